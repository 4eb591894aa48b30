//! Terminal UI for codews.
//!
//! - [render]: the top-level frame layout
//! - [panes]: the entry list and the runner output pane
//! - [widgets]: modal dialogs and the header/footer lines

pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
