//! vigia - command-line client for the Vigia property management backend.
//!
//! Plays the part of the browser shell: login, the role-driven menu, and
//! guarded navigation into the list and dashboard views.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;

use vigia::api::ApiClient;
use vigia::auth::{AuthFlow, AuthState, DEFAULT_AUTHENTICATED_ROUTE};
use vigia::config::{self, ClientConfig};
use vigia::nav::{GuardDecision, RouteGuard, entries_for};
use vigia::session::{SessionFile, SessionStore};
use vigia::views::{self, Fetched, PageData};

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "Error: {err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref())?;
    let session_file = match &cli.session {
        Some(path) => path.clone(),
        None => config::session_file()?,
    };
    let store = Arc::new(
        SessionStore::open(SessionFile::new(session_file)).context("opening session store")?,
    );
    let api = ApiClient::new(config.server.base_url.as_str(), store.clone());

    match cli.command {
        Command::Login { identifier, secret } => {
            handle_login(api, store, &identifier, &secret).await
        }
        Command::Logout => handle_logout(&store),
        Command::Whoami => handle_whoami(&store),
        Command::Nav => handle_nav(&store),
        Command::Open { route } => handle_open(api, store, &route, cli.json).await,
        Command::Status => handle_status(&api, &config, cli.json).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vigia",
    author,
    version,
    about = "Client for the Vigia property management backend - login, navigation, and data views."
)]
struct Cli {
    /// Path to an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to an alternate session file
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and establish a session
    Login {
        /// Account identifier
        #[arg(long, default_value = "admin@vp.local", env = "VIGIA_IDENTIFIER")]
        identifier: String,

        /// Account secret
        #[arg(long, default_value = "admin123", env = "VIGIA_SECRET")]
        secret: String,
    },

    /// Clear the session
    Logout,

    /// Show the current session
    Whoami,

    /// Show the navigation menu for the current role
    Nav,

    /// Open a view by route, e.g. `dashboard` or `units`
    Open {
        /// Route segment to open
        route: String,
    },

    /// Show backend address and branding
    Status,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vigia={level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .ok();
}

async fn handle_login(
    api: ApiClient,
    store: Arc<SessionStore>,
    identifier: &str,
    secret: &str,
) -> Result<()> {
    let mut flow = AuthFlow::new(api, store.clone());
    match flow.submit(identifier, secret).await {
        AuthState::Authenticated => {
            let session = store.get();
            let role = session.role.map(|r| r.to_string()).unwrap_or_default();
            println!("Logged in as `{role}`. Start at {DEFAULT_AUTHENTICATED_ROUTE}.");
            Ok(())
        }
        AuthState::Failed { message } => bail!("{message}"),
        state => bail!("unexpected login state: {state:?}"),
    }
}

fn handle_logout(store: &SessionStore) -> Result<()> {
    store.clear();
    println!("Logged out.");
    Ok(())
}

fn handle_whoami(store: &SessionStore) -> Result<()> {
    let session = store.get();
    match (&session.token, session.role) {
        (Some(_), Some(role)) => println!("Authenticated as `{role}`."),
        (Some(_), None) => {
            println!("Authenticated, but the stored role is not recognized; no menu available.")
        }
        _ => println!("Not authenticated."),
    }
    Ok(())
}

fn handle_nav(store: &SessionStore) -> Result<()> {
    let entries = entries_for(store.get().role);
    if entries.is_empty() {
        println!("No navigation available. Run `vigia login` first.");
        return Ok(());
    }
    println!("{:<16} ROUTE", "LABEL");
    for entry in entries {
        println!("{:<16} /{}", entry.label, entry.route);
    }
    Ok(())
}

async fn handle_open(
    api: ApiClient,
    store: Arc<SessionStore>,
    route: &str,
    json: bool,
) -> Result<()> {
    let route = route.trim_start_matches('/');
    let guard = RouteGuard::new(store.clone());
    guard.watch(|| {
        let _ = writeln!(io::stderr(), "Session ended, returning to login.");
    });

    if guard.evaluate(route) == GuardDecision::RedirectToLogin {
        bail!("not authenticated; run `vigia login` first");
    }

    let page = PageData::new(api, store);
    if route == "dashboard" {
        match page.dashboard().await? {
            Fetched::Stale => {}
            Fetched::Fresh(summary) => {
                if json {
                    println!(
                        r#"{{"finance": {}, "operations": {}}}"#,
                        summary.finance, summary.operations
                    );
                } else {
                    println!("Dashboard");
                    println!("  Paid: {}", card(&summary.finance, "paid"));
                    println!("  Pending: {}", card(&summary.finance, "pending"));
                    println!("  Late: {}", card(&summary.finance, "late"));
                    println!("  Rounds: {}", card(&summary.operations, "rounds_period"));
                    println!("  Open tickets: {}", card(&summary.operations, "tickets_open"));
                    println!(
                        "  Pending coverages: {}",
                        card(&summary.operations, "coverages_pending")
                    );
                }
            }
        }
    } else {
        match page.list(route).await.context("fetching view data")? {
            Fetched::Stale => {}
            Fetched::Fresh(rows) => {
                if json {
                    println!("{}", serde_json::to_string(&rows)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
            }
        }
    }
    Ok(())
}

async fn handle_status(api: &ApiClient, config: &ClientConfig, json: bool) -> Result<()> {
    let branding = views::branding(api).await;
    if json {
        println!("{}", serde_json::to_string(&branding)?);
    } else {
        println!("Backend: {}", config.server.base_url);
        println!("Brand: {}", branding.brand_name);
        println!(
            "Colors: primary {}, secondary {}",
            branding.primary_color, branding.secondary_color
        );
        println!("Logo: {}", branding.logo_path);
    }
    Ok(())
}

fn card(source: &Value, key: &str) -> String {
    source
        .get(key)
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}
