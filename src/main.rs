//! LogReports - local host harness for the log report plugins.
//!
//! Loads log records from JSON files, builds a report request and prints
//! the response JSON the platform would hand to its client.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, unreadable config or request, etc.)

use anyhow::{Context, Result};
use logreports::cli::Args;
use logreports::config::{Config, CONFIG_FILE_NAME};
use logreports::host::{FileLogSource, MemoryLogSource, ServerInterface};
use logreports::report::{self, ReportKind};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Config is read before logging so its verbosity can apply
    let (mut config, config_warning) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    debug!("LogReports v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    if let Some(warning) = config_warning {
        warn!("{}", warning);
    }

    if let Err(e) = run(&args, &config) {
        error!("Report failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .logreports.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    eprintln!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` overrides the level. Diagnostics go to stderr; stdout
/// carries the response JSON.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run one about/create call and write the response.
fn run(args: &Args, config: &Config) -> Result<()> {
    let kind = config.report_kind();

    let response = if args.about {
        report::about_report(kind)?
    } else {
        create(args, config, kind)?
    };

    let output = report::generate_json_response(&response, config.general.pretty)?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write response to {}", path.display()))?;
            info!("Response saved to: {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn create(args: &Args, config: &Config, kind: ReportKind) -> Result<Value> {
    let mut request = read_request(args)?;
    match request {
        Value::Object(ref mut map) => args.apply_overrides(map),
        _ => anyhow::bail!("Request must be a JSON object"),
    }

    let host: Box<dyn ServerInterface> = match config.host.logs_path {
        Some(ref path) => Box::new(
            FileLogSource::open(path.clone())?.with_progress(config.host.show_progress),
        ),
        None => {
            warn!("No log source configured (--logs); the report will be empty");
            Box::new(MemoryLogSource::default())
        }
    };

    info!("Creating report: {}", kind);
    report::create_report(kind, &request, host.as_ref(), &config.settings()).map_err(Into::into)
}

/// Read the request JSON from --request, or start from an empty object.
fn read_request(args: &Args) -> Result<Value> {
    let text = match args.request {
        Some(ref path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?,
        None => String::new(),
    };

    report::parse_request(&text).context("Failed to parse request JSON")
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so an unreadable default file is reported
/// back as a warning for the caller to log.
fn load_config(args: &Args) -> Result<(Config, Option<String>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Ok((Config::load(config_path)?, None));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, None)),
        Ok(None) => Ok((Config::default(), None)),
        Err(e) => Ok((
            Config::default(),
            Some(format!("Failed to load config: {:#}", e)),
        )),
    }
}
