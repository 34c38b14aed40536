//! Worker side of the GUI: commands in, UI events out.

pub mod commands;
pub mod runtime;
