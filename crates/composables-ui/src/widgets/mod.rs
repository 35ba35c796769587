//! UI widget components

pub mod layout;
pub mod lazy;
pub mod nodes;
pub mod pull_to_refresh;
pub mod scaffold;
pub mod text;

pub use layout::*;
pub use lazy::*;
pub use nodes::{
    compose_container, compose_node, replace_children, update_node, LayoutNode, LayoutPolicy,
    ProgressIndicatorNode, TextNode,
};
pub use pull_to_refresh::*;
pub use scaffold::*;
pub use text::*;
