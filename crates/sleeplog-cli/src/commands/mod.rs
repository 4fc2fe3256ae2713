//! CLI subcommand implementations.

pub mod add;
pub mod benefits;
pub mod clear;
pub mod home;
pub mod last;
pub mod list;
pub mod sign_in;
pub mod util;
