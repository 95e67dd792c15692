//! NameCheck CLI Application
//!
//! Checks username availability across social platforms and looks up domain
//! WHOIS data through a NameCheck backend. Runs a single lookup from the
//! command line or an interactive two-tab session.

mod interactive;
mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Term;
use namecheck_lib::{
    load_env_config, parse_timeout_string, run_lookup, validate_base_url, ApiClient,
    ClientConfig, ConfigManager, DomainView, EnvConfig, FileConfig, LookupBackend, PlatformList,
    Session, Tab, UsernameView,
};
use std::error::Error;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for namecheck
#[derive(Parser, Debug)]
#[command(name = "namecheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check username availability across social platforms and look up domain WHOIS data")]
#[command(
    long_about = "Check whether a username is free on popular social platforms, or whether a domain is registered.\n\nRuns one lookup per invocation, or an interactive session with --interactive."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Username or domain name to check
    #[arg(value_name = "QUERY", help_heading = "Lookup")]
    pub query: Option<String>,

    /// Which lookup to run: username or domain
    #[arg(short = 'm', long = "mode", value_name = "MODE", help_heading = "Lookup")]
    pub mode: Option<Tab>,

    /// Shorthand for --mode domain
    #[arg(short = 'd', long = "domain", help_heading = "Lookup")]
    pub domain: bool,

    /// Print the platforms the backend checks and exit
    #[arg(long = "list-platforms", help_heading = "Lookup")]
    pub list_platforms: bool,

    /// Start the interactive session
    #[arg(short = 'I', long = "interactive", help_heading = "Interactive")]
    pub interactive: bool,

    /// Search automatically once input settles
    #[arg(long = "auto-search", help_heading = "Interactive")]
    pub auto_search: bool,

    /// Print the backend payload as JSON
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Grouped, styled output
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Backend base address (default: http://localhost:8000)
    #[arg(long = "api-url", value_name = "URL", help_heading = "Backend")]
    pub api_url: Option<String>,

    /// Request timeout, e.g. "10s" or "2m"
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Backend")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,

    /// Show debug logging
    #[arg(long = "debug", help_heading = "Configuration")]
    pub debug: bool,
}

impl Args {
    /// Tab selected on the command line.
    fn tab(&self) -> Tab {
        if self.domain {
            Tab::Domain
        } else {
            self.mode.unwrap_or_default()
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub client: ClientConfig,
    pub pretty: bool,
    pub json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_tracing(&args);
    info!("namecheck v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        ui::print_error(&e.to_string());
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the CLI flags.
fn init_tracing(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,namecheck={0},namecheck_lib={0}", level))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.query.is_none() && !args.interactive && !args.list_platforms {
        return Err(
            "You must specify a username or domain, --interactive, or --list-platforms"
                .to_string(),
        );
    }

    if args.domain && args.mode.is_some() {
        return Err("Cannot combine -d/--domain with --mode".to_string());
    }

    if args.interactive && args.list_platforms {
        return Err("Cannot use --list-platforms with --interactive".to_string());
    }

    if args.interactive && args.json {
        return Err("Cannot use --json with --interactive".to_string());
    }

    if args.auto_search && !args.interactive {
        return Err("--auto-search only applies to --interactive".to_string());
    }

    if args.json && args.pretty {
        return Err("Cannot specify both --json and --pretty".to_string());
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}'. Use a positive duration like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    if let Some(url) = &args.api_url {
        validate_base_url(url).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Main dispatch
async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let settings = build_settings(&args)?;
    debug!(?settings, "resolved settings");

    let client = ApiClient::with_config(settings.client.clone())?;

    if args.list_platforms {
        return list_platforms(&client, &settings).await;
    }

    if args.interactive {
        let backend: Arc<dyn LookupBackend> = Arc::new(client);
        return interactive::run(backend, args.tab(), &settings).await;
    }

    match args.query.as_deref() {
        Some(query) => check_once(&client, args.tab(), query, &settings).await,
        None => Ok(()),
    }
}

/// Run a single lookup and print its result.
async fn check_once(
    backend: &dyn LookupBackend,
    tab: Tab,
    query: &str,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(tab);
    session.set_input(query);

    let Some(ticket) = session.submit() else {
        info!(%tab, query, "query too short, nothing to check");
        return Ok(());
    };

    let spinner = (settings.pretty && Term::stderr().is_term())
        .then(|| ui::Spinner::start(tab, &ticket.query));

    let completion = run_lookup(backend, &ticket).await;

    if let Some(spinner) = spinner {
        spinner.stop().await;
    }

    session.complete(&ticket, completion);

    if let Some(error) = session.error() {
        return Err(error.into());
    }

    match tab {
        Tab::Username => {
            if let Some(result) = session.username_form().result() {
                if settings.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    ui::print_lines(&ui::username_lines(
                        &UsernameView::from(result),
                        settings.pretty,
                    ));
                }
            }
        }
        Tab::Domain => {
            if let Some(result) = session.domain_form().result() {
                if settings.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    ui::print_lines(&ui::domain_lines(&DomainView::from(result), settings.pretty));
                }
            }
        }
    }

    Ok(())
}

async fn list_platforms(
    backend: &dyn LookupBackend,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let platforms = backend.list_platforms().await?;

    if settings.json {
        let payload = PlatformList { platforms };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        ui::print_platforms(&platforms, settings.pretty);
    }

    Ok(())
}

/// Resolve settings: CLI > environment > config file > defaults.
fn build_settings(args: &Args) -> Result<Settings, Box<dyn Error>> {
    let env_config = load_env_config();
    let file_config = load_file_config(args, &env_config)?;

    let mut settings = Settings::default();
    settings = apply_file_config(settings, file_config);
    settings = apply_env_config(settings, &env_config);
    settings = apply_cli_args(settings, args);

    Ok(settings)
}

/// Load the explicit config file (`--config`, then `NC_CONFIG`) or fall
/// back to discovery.
fn load_file_config(args: &Args, env_config: &EnvConfig) -> Result<FileConfig, Box<dyn Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    let explicit = args
        .config
        .as_ref()
        .map(|path| (path, "--config"))
        .or_else(|| env_config.config.as_ref().map(|path| (path, "NC_CONFIG")));

    if let Some((path, source)) = explicit {
        info!(path = %path, source, "using explicit config file");
        return config_manager
            .load_file(path)
            .map_err(|e| format!("Failed to load config file '{}': {}", path, e).into());
    }

    debug!("discovering config files");
    Ok(config_manager.discover_and_load()?)
}

/// Apply values from a config file.
fn apply_file_config(mut settings: Settings, file_config: FileConfig) -> Settings {
    if let Some(backend) = file_config.backend {
        if let Some(base_url) = backend.base_url {
            settings.client = settings.client.with_base_url(base_url);
        }
        if let Some(secs) = backend.timeout.as_deref().and_then(parse_timeout_string) {
            settings.client = settings.client.with_timeout(Duration::from_secs(secs));
        }
    }

    if let Some(search) = file_config.search {
        if let Some(auto_search) = search.auto_search {
            settings.client = settings.client.with_auto_search(auto_search);
        }
        if let Some(ms) = search.debounce_ms {
            settings.client = settings.client.with_debounce(Duration::from_millis(ms));
        }
    }

    if let Some(output) = file_config.output {
        if let Some(pretty) = output.pretty {
            settings.pretty = pretty;
        }
        if let Some(json) = output.json {
            settings.json = json;
        }
    }

    settings
}

/// Apply `NC_*` environment variables.
fn apply_env_config(mut settings: Settings, env_config: &EnvConfig) -> Settings {
    if let Some(url) = &env_config.api_url {
        settings.client = settings.client.with_base_url(url.as_str());
    }
    if let Some(secs) = env_config.timeout.as_deref().and_then(parse_timeout_string) {
        settings.client = settings.client.with_timeout(Duration::from_secs(secs));
    }
    if let Some(auto_search) = env_config.auto_search {
        settings.client = settings.client.with_auto_search(auto_search);
    }
    if let Some(ms) = env_config.debounce_ms {
        settings.client = settings.client.with_debounce(Duration::from_millis(ms));
    }
    if let Some(pretty) = env_config.pretty {
        settings.pretty = pretty;
    }
    if let Some(json) = env_config.json {
        settings.json = json;
    }

    settings
}

/// Apply CLI arguments (highest precedence).
///
/// Boolean flags only ever switch a setting on; leaving a flag out keeps the
/// environment or file value.
fn apply_cli_args(mut settings: Settings, args: &Args) -> Settings {
    if let Some(url) = &args.api_url {
        settings.client = settings.client.with_base_url(url.as_str());
    }
    if let Some(secs) = args.timeout.as_deref().and_then(parse_timeout_string) {
        settings.client = settings.client.with_timeout(Duration::from_secs(secs));
    }
    if args.auto_search {
        settings.client = settings.client.with_auto_search(true);
    }

    if args.json {
        settings.json = true;
        settings.pretty = false;
    } else if args.pretty {
        settings.pretty = true;
        settings.json = false;
    }

    // JSON is meaningless inside the interactive session
    if args.interactive {
        settings.json = false;
    } else if settings.json {
        settings.pretty = false;
    }

    settings
}
