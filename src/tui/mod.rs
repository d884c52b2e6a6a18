pub mod app;
pub mod input;
pub mod render;
pub mod text_input;
pub mod theme;
pub mod worker;

pub use app::run;
