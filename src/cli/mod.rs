pub mod args;
pub mod process;

pub use args::{Cli, CliCommand, ProcessCliArgs};
pub use process::handle_process_command;
