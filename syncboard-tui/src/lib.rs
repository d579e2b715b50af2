pub mod commands;
pub mod navigator;
pub mod render;
pub mod tui_module;

pub use navigator::BrowserNavigator;
pub use tui_module::TuiModule;
