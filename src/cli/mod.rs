//! Command-line front end: parses `argv` into a typed [`Cli`], then
//! validates it into the library's own [`crate::config::Config`].
//!
//! Implemented with `clap`'s derive API: a flat struct of `#[arg(...)]`
//! fields, parsed once in `main` and converted into validated library types
//! so the rest of the crate never has to think about flag parsing.

pub mod args;

pub use args::Cli;
