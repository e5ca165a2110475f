pub mod begin_login;
pub mod complete_login;
pub mod logout;
pub mod me;
