//! fretchord CLI library.
//!
//! This crate provides the command implementations behind the `fretchord`
//! binary: config loading, logging setup, and the `analyze`, `tab`,
//! `diagram` and `assets` commands.

pub mod commands;
pub mod input;
pub mod logging;
