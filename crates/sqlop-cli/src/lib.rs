//! Command implementations for the `sqlop` tool

pub mod commands;
pub mod output;
