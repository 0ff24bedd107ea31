//! Site router CLI.
//!
//! Drives the router against a deployed site with an in-memory document,
//! which is how fragments and the route table are checked outside a browser.
//!
//! ```text
//! site-router.toml ─▶ config ─▶ RouteTable ─▶ Router ─▶ HttpFetcher ─▶ site
//!                                               │
//!                                               ▼
//!                                        MemoryDocument / MemoryHistory
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use site_router::config::loader::load_config;
use site_router::dom::MemoryDocument;
use site_router::history::MemoryHistory;
use site_router::lifecycle::build_router;
use site_router::observability::logging::init_logging;
use site_router::{BehaviorRegistry, NavigationOutcome, SiteConfig};

#[derive(Parser)]
#[command(name = "site-router")]
#[command(about = "Load and check site fragments through the page router", long_about = None)]
struct Cli {
    /// Path to the site configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the base URL fragments are fetched from.
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load one route the way the page would at startup and print it
    Render {
        /// Route identifier (unknown routes load the default)
        route: String,

        /// Print a JSON report instead of the title and markup
        #[arg(long)]
        json: bool,
    },
    /// List the route table
    Routes,
    /// Load every route and report failures
    Check,
}

#[derive(Serialize)]
struct RenderReport {
    route: String,
    path: Option<String>,
    loaded: bool,
    title: String,
    content: String,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.fetch.base_url = base_url;
    }

    init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Render { route, json } => render(&config, &route, json).await,
        Commands::Routes => {
            for route in &config.routes {
                let marker = if route.name == config.default_route { " (default)" } else { "" };
                println!("{:<20} {}{}", route.name, route.path, marker);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => check(&config).await,
    }
}

fn chrome_links(config: &SiteConfig) -> Vec<String> {
    config.routes.iter().map(|r| r.name.clone()).collect()
}

async fn render(config: &SiteConfig, route: &str, json: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let document = Arc::new(MemoryDocument::new(chrome_links(config)).with_year_element());
    let history = Arc::new(MemoryHistory::new(&format!("#{route}")));
    let router = build_router(config, document.clone(), history, BehaviorRegistry::new())?;

    let outcome = router.start().await;

    let (path, error) = match &outcome {
        NavigationOutcome::Loaded { path, .. } => (Some(path.clone()), None),
        NavigationOutcome::Failed { error, .. } => (None, Some(error.to_string())),
        NavigationOutcome::Superseded { .. } => (None, None),
    };
    let report = RenderReport {
        route: outcome.route().to_string(),
        path,
        loaded: outcome.is_loaded(),
        title: document.title(),
        content: document.content(),
        error,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.title);
        println!();
        println!("{}", report.content);
    }

    Ok(if report.loaded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn check(config: &SiteConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let document = Arc::new(MemoryDocument::new(chrome_links(config)));
    let history = Arc::new(MemoryHistory::default());
    let router = build_router(config, document.clone(), history, BehaviorRegistry::new())?;

    let mut failures = 0;
    for route in &config.routes {
        match router.navigate(&route.name, true).await {
            NavigationOutcome::Loaded { path, title, .. } => {
                println!("ok    {:<20} {} {}", route.name, path, title.unwrap_or_default());
            }
            NavigationOutcome::Failed { error, .. } => {
                failures += 1;
                println!("FAIL  {:<20} {}", route.name, error);
            }
            NavigationOutcome::Superseded { .. } => {}
        }
    }

    println!("{} routes, {} failed", config.routes.len(), failures);
    Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
