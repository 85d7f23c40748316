//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use layout::{calculate_layout, layout_tree, AppLayout, TreeLayout};
pub use renderer::Renderer;
pub use theme::{ComponentType, Theme};
pub use viewport::{Viewport, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_STEP};
