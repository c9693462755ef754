//! Rendering

pub mod display_text;
pub mod pager_view;
