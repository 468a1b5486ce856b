pub mod docbook;
pub mod format;
pub mod inline;
mod language;
pub mod mallard;

pub use docbook::DocBookWriter;
pub use format::Formatter;
pub use language::Language;
pub use mallard::MallardWriter;

use clap::ValueEnum;

/// Which writer variant a generation run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Docbook,
    Mallard,
}
