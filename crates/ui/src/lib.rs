pub mod context;
pub mod vm;
pub mod views;

pub use context::{AppContext, UiApp};
