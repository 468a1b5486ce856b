use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use introdoc::{DocBookWriter, Language, Library, MallardWriter, OutputFormat};

#[derive(Parser)]
#[command(
    name = "introdoc",
    about = "Render introspected interface descriptions as API documentation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate documentation from an interface description
    Generate {
        /// File (docbook) or directory (mallard) to write
        #[arg(short, long)]
        output: PathBuf,

        /// Output dialect
        #[arg(short, long, value_enum, default_value = "docbook")]
        format: OutputFormat,

        /// Target audience for titles and synopses
        #[arg(short, long, value_enum, default_value = "python")]
        language: Language,

        /// Additional directories searched for included namespaces
        #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /// Interface description to document
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            output,
            format,
            language,
            include_dirs,
            input,
        } => {
            let library = Library::load(&input, &include_dirs)?;
            match format {
                OutputFormat::Docbook => DocBookWriter::new(language).write(&library, &output),
                OutputFormat::Mallard => MallardWriter::new(language).write(&library, &output),
            }
        }
    }
}
