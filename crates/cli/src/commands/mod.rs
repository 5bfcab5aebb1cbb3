//! CLI commands

pub mod resize;
