#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use trace_locator::link_cmd::LinkOverrides;
use trace_locator::list_cmd::OutputFormat;
use trace_locator::{api_url_cmd, link_cmd, list_cmd};

#[derive(Parser, Debug)]
#[command(name = "trace-locator")]
#[command(about = "Find Playwright traces in CircleCI artifacts and open them in the trace viewer", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set TRACE_LOCATOR_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List traces in an artifact list, grouped by test with retries folded in
    List {
        /// Artifact list (CircleCI artifacts JSON, listing JSON, array or JSONL); `-` for stdin
        #[arg(long, default_value = "-")]
        input: std::path::PathBuf,
        /// Free-text filter over test name, suite, type, severity, retry and path
        #[arg(long, short)]
        query: Option<String>,
        /// Group every artifact, not only trace archives
        #[arg(long)]
        all: bool,
        /// Output format written to stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write machine-readable JSON report to this file
        #[arg(long)]
        json: Option<std::path::PathBuf>,
    },

    /// Print the trace viewer URL for an artifact URL
    Link {
        /// CircleCI artifact URL of a trace.zip
        #[arg(long)]
        url: String,
        /// Viewer config (TOML)
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Origin serving /api/proxy, overrides the config
        #[arg(long)]
        proxy_origin: Option<String>,
        /// Trace viewer base URL, overrides the config
        #[arg(long)]
        viewer_url: Option<String>,
    },

    /// Print the CircleCI artifacts API URL for a job
    ApiUrl {
        /// Project slug (gh/org/repo or github/org/repo)
        #[arg(long)]
        project: String,
        /// Job number
        #[arg(long)]
        job: String,
        /// Viewer config (TOML)
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("TRACE_LOCATOR_LOG").unwrap_or_else(|_| {
        if verbose { "trace_locator=debug".to_string() } else { "trace_locator=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { input, query, all, format, json } => list_cmd::run(input, query, all, format, json),
        Commands::Link { url, config, proxy_origin, viewer_url } => {
            link_cmd::run(url, config, LinkOverrides { proxy_origin, viewer_url })
        }
        Commands::ApiUrl { project, job, config } => api_url_cmd::run(project, job, config),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
