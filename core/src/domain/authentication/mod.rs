pub mod entities;
pub mod ports;
pub mod services;
pub mod tokens;
pub mod value_objects;
