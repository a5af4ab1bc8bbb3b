use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "headway")]
#[command(version)]
#[command(about = "Read markdown from files, URLs and hosted repositories in the terminal")]
#[command(
    long_about = "headway - A terminal markdown reader.\n\n\
    Resolves a locator to a markdown document, splits it into headings and\n\
    sections, and opens a two-pane viewer: a table of contents on the left and\n\
    the selected heading's sections on the right.\n\n\
    Examples:\n  \
    headway README.md                  # Local file\n  \
    headway https://example.com/doc.md # Remote URL\n  \
    headway github.com/user/repo       # Repository README\n  \
    headway --raw README.md            # Print plain text and exit"
)]
pub struct Cli {
    /// Where to read the document from
    ///
    /// A file path, an http(s) URL, or a `host/user/repo` shorthand for
    /// github.com, gitlab.com or bitbucket.org. Sources are tried in that
    /// order; the first that answers wins.
    #[arg(value_name = "LOCATOR")]
    pub locator: String,

    /// Print each heading title followed by its section bodies, as plain text
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Print the parsed document as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging and raw style decorations in the viewer
    #[arg(long)]
    pub debug: bool,

    /// HTTP timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// What to do with the loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Interactive,
    Plain,
    Json,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.raw {
            OutputFormat::Plain
        } else {
            OutputFormat::Interactive
        }
    }
}
