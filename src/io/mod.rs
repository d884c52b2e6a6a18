pub mod config_io;
pub mod paths;
pub mod session_store;
