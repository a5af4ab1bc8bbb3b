//! # headway
//!
//! A terminal markdown reader.
//!
//! ## Usage
//!
//! Open the viewer on a local file, a URL, or a repository README:
//! ```sh
//! headway README.md
//! headway https://example.com/guide.md
//! headway github.com/user/repo
//! ```
//!
//! Print the document instead:
//! ```sh
//! headway --raw README.md
//! headway --json README.md
//! ```

mod cli;

use clap::Parser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use headway::parser::{Document, Transformer, load_document};
use headway::resolver::{Chain, ReqwestGetter, Resolver};
use headway::style::AnsiStyler;
use headway::tui::{self, App, Loader, SystemClipboard, TerminalCanvas};
use headway::Config;
use std::io::{self, Write};
use std::sync::Arc;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    // Parse errors are reported once the logger is up
    let loaded = Config::load();
    let config_debug = loaded.as_ref().is_ok_and(|config| config.debug);
    init_logging(args.debug || config_debug);

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("{e}");
        Config::default()
    });

    // CLI flags take precedence over the config file
    config.debug |= args.debug;
    if let Some(timeout) = args.timeout {
        config.network.timeout_secs = timeout;
    }

    let getter = ReqwestGetter::new(config.network.timeout())
        .wrap_err("failed to set up the HTTP client")?;
    let resolver: Arc<dyn Resolver> = Arc::new(Chain::standard(Arc::new(getter)));

    match args.output_format() {
        OutputFormat::Plain => {
            let document = load(&args.locator, resolver.as_ref(), &config)?;
            let mut out = io::stdout().lock();
            print_plain(&document, &mut out)?;
            out.flush()?;
        }
        OutputFormat::Json => {
            let document = load(&args.locator, resolver.as_ref(), &config)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Interactive => run_viewer(args.locator, resolver, &config)?,
    }

    Ok(())
}

/// Logs go to stderr. The `headway` target defaults to `warn`, or `debug`
/// in debug mode; `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("headway={level}")),
    )
    .format_timestamp_millis()
    .init();
}

/// Load for non-interactive output, styles off.
fn load(locator: &str, resolver: &dyn Resolver, config: &Config) -> Result<Document> {
    let transformer = Transformer::plain().with_debug(config.debug);
    load_document(locator, resolver, &transformer).wrap_err_with(|| format!("could not load {locator}"))
}

/// Each heading title on its own line, followed by that heading's sections.
fn print_plain(document: &Document, out: &mut impl Write) -> io::Result<()> {
    for heading in &document.headings {
        writeln!(out, "{}", heading.title)?;
        for section in &heading.sections {
            write!(out, "{}", section.text)?;
        }
    }
    Ok(())
}

fn run_viewer(locator: String, resolver: Arc<dyn Resolver>, config: &Config) -> Result<()> {
    let transformer = Transformer::new(Arc::new(AnsiStyler)).with_debug(config.debug);
    let loader = Loader::new(locator.clone(), resolver, transformer);
    let mut app = App::new(locator, config, Box::new(SystemClipboard::new()));

    let mut canvas = TerminalCanvas::new(ratatui::init(), config.keybindings());
    let result = tui::run(&mut canvas, &mut app, &loader);
    ratatui::restore();

    result
}
