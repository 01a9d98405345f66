//! Library side of the `tenta` command-line tool.

pub mod exit;
pub mod logging;
pub mod render;
pub mod settings;
