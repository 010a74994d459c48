//! Command implementations behind the `graphctl` binary.

pub mod commands;
