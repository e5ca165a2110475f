pub mod entities;
pub mod parsing;
pub mod ports;
