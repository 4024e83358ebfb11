//! State Management
//!
//! Global dashboard state, the theme context and the content-update stream.

pub mod global;
pub mod theme;
pub mod updates;

pub use global::{provide_global_state, GlobalState};
pub use theme::{provide_theme, ThemeContext};
pub use updates::{init_updates, listen_for_content_updates, CONTENT_UPDATED_EVENT};
