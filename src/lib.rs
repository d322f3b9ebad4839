//! linewrap - reflow text to a fixed line width
//!
//! A stream-oriented line wrapper: text goes in as raw bytes, words, single
//! characters, or whole paragraphs, and comes out wrapped so that no line
//! exceeds a configured column width, with an optional fixed prefix at the
//! start of every output line.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod wrap;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use wrap::Writer;
