#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

pub mod data;
pub mod design;
pub mod ebitda;
pub mod pipeline;
pub mod prices;
pub mod regression;
