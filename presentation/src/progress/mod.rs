//! Progress display for long-running commands

pub mod reporter;
