//! A3S Pod CLI - command dispatch and argument resolution.

pub mod commands;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod wrap;
