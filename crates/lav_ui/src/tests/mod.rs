//! Cross-module scenarios driven through a window

mod tree_view_integration;
