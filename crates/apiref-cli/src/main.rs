//! apiref CLI - Command-line interface for API reference extraction

use apiref::{
    extract_docs_with_options, inspect_registry_file, Catalog, ClientRegistry, DocsConfig,
    LoadOptions,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log filter used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "warn,apiref=info";

/// Output format of the extracted reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One plain-text block per action
    #[default]
    Text,
    /// JSON array of key/record pairs
    Json,
}

/// apiref - API reference extraction for the SimpleMDM API
#[derive(Parser, Debug)]
#[command(name = "apiref")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the reference from the published HTML documentation
    Docs {
        /// Local HTML file; the published documentation is fetched when omitted
        html: Option<String>,

        /// Verbose output (reserved)
        #[arg(long, short)]
        verbose: bool,

        /// Documentation URL to fetch instead of the default
        #[arg(long)]
        url: Option<String>,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Format the reference of a client library from its registry
    Inspect {
        /// Registry JSON file, or a directory containing registry.json
        registry: PathBuf,

        /// Verbose output (reserved)
        #[arg(long, short)]
        verbose: bool,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Print the JSON schema of the registry format
    Schema,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Docs {
            html,
            verbose,
            url,
            user_agent,
            output,
        }) => {
            note_verbose(verbose);
            run_docs(html.as_deref(), url, user_agent, output).await;
        }
        Some(Commands::Inspect {
            registry,
            verbose,
            output,
        }) => {
            note_verbose(verbose);
            run_inspect(registry, output).await;
        }
        Some(Commands::Schema) => print_schema(),
        None => {
            eprintln!("Usage: apiref docs [HTML]");
            eprintln!("   or: apiref inspect <REGISTRY>");
            eprintln!("   or: apiref --help");
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr so stdout carries only the reference
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn note_verbose(verbose: bool) {
    if verbose {
        tracing::debug!("--verbose is reserved and does not change output");
    }
}

async fn run_docs(
    html: Option<&str>,
    url: Option<String>,
    user_agent: Option<String>,
    output: OutputFormat,
) {
    let mut config = DocsConfig::default();
    if let Some(url) = url {
        config = config.docs_url(url);
    }

    let mut options = LoadOptions::default();
    if let Some(ua) = user_agent {
        options = options.user_agent(ua);
    }

    match extract_docs_with_options(html, config, options).await {
        Ok(extraction) => writeln_safe(&render(&extraction.catalog, output)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_inspect(registry: PathBuf, output: OutputFormat) {
    match inspect_registry_file(&registry).await {
        Ok(catalog) => writeln_safe(&render(&catalog, output)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_schema() {
    let json = serde_json::to_string_pretty(&ClientRegistry::schema()).unwrap_or_else(|e| {
        eprintln!("Error serializing schema: {}", e);
        std::process::exit(1);
    });
    writeln_safe(&json);
}

/// Format a catalog for stdout
fn render(catalog: &Catalog, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => catalog.render_text(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&catalog.entries()).unwrap_or_else(|e| {
                eprintln!("Error serializing catalog: {}", e);
                std::process::exit(1);
            })
        }
    }
}

/// Write to stdout with a trailing newline, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = if s.ends_with('\n') {
        write!(handle, "{}", s)
    } else {
        writeln!(handle, "{}", s)
    };
    if let Err(e) = result {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
