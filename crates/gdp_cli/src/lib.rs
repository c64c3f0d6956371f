//! Library half of the `gdp` command-line tool.
//!
//! [`render`] turns decoded records into display trees; [`commands`]
//! holds the subcommand implementations used by the binary.

pub mod commands;
pub mod render;
