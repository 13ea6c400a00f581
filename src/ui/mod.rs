mod renderer;
mod state;
pub mod theme;
mod widgets;

pub use renderer::render;
pub use state::{AppState, Notice};
pub use theme::Theme;
