//! Brainy Control - CLI client for the Brainy Tutor service.
//!
//! Thin presentation layer over `brainy_common`: it only consumes session
//! state and vault data, never touches payload shapes directly.

pub mod cli;
pub mod commands;
pub mod display;
