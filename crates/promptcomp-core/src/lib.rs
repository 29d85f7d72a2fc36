//! promptcomp core library.
//!
//! Turns free-form backend responses into HTML fragments and provides the
//! small UI affordances around them (clipboard copy, notifications, error
//! alerts, comparison export).

pub mod clipboard;
pub mod config;
pub mod export;
pub mod format;
pub mod logging;
pub mod notify;

pub use format::{
    FormatOptions, ResponseFormatter, Shape, TableDetection, classify, format_for_display,
    format_response,
};
