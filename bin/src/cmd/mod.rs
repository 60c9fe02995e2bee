//! CLI subcommand modules.
//!
//! This module contains the implementations for all intrinsic CLI subcommands.

pub(crate) mod guide;
pub(crate) mod value;
