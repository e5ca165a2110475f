pub mod entities;
pub mod geo;
pub mod ports;
