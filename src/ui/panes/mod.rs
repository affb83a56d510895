//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and line indicator
//! - [`tree`]: Syntax tree rows with selection, or the syntax error report
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a primary `render_*` function that draws into the
//! area it is given; scroll state is owned by the caller.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeView};
