pub mod api;
pub mod cli;
pub mod client;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod tui;
pub mod util;
