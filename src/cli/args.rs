use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetnotes")]
#[command(about = "Turn meeting audio into structured notes", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Upload a pre-recorded audio file and export the notes
    Process(ProcessCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct ProcessCliArgs {
    /// Audio file to process (MP3, WAV, M4A, WebM; up to 25 MiB)
    pub file: PathBuf,

    /// Write the exported notes to this path instead of the exports dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the notes service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Declared media type, when the extension alone is not trusted
    #[arg(long)]
    pub media_type: Option<String>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}
