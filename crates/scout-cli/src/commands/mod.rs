//! CLI subcommand implementations.

pub mod boards;
pub mod check_name;
pub mod decode;
pub mod encode;
mod input;

pub use input::{read_file_or_stdin, value_or_stdin};
