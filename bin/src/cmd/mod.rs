//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod rank;
pub(crate) mod score;
pub(crate) mod signals;
