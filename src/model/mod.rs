pub mod config;
pub mod dashboard;
pub mod filter;
pub mod session;
pub mod task;

pub use config::*;
pub use dashboard::*;
pub use filter::*;
pub use session::*;
pub use task::*;
