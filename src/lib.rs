//! A terminal pager for very large log files that may still be growing.
//!
//! Only a bounded window of lines is ever held in memory. Lines are read in
//! fixed-size chunks around the highlighted line, fetched lazily as the user
//! scrolls, and dropped from whichever end of the window is farthest away.
//! A periodic size check follows appended output and recovers from
//! truncation.

pub mod app;
pub mod chunk_reader;
pub mod config;
pub mod error;
pub mod growth_monitor;
pub mod keybindings;
pub mod line_scanner;
pub mod line_window;
pub mod navigation;
pub mod services;
pub mod theme;
pub mod view;
pub mod viewport;

pub use app::Pager;
pub use error::{PagerError, Result};
