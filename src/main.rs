//! spa-router command line.
//!
//! Loads an application config (or the built-in shell), registers its route
//! table and answers questions about it: which route a location resolves
//! to, the href of a named route, where an asset or aliased import lands.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use spa_router::build::BuildError;
use spa_router::config::{AppConfig, ConfigWatcher, load_config};
use spa_router::history::History;
use spa_router::navigation::{NavigationState, RouteResolver};
use spa_router::observability::init_logging;
use spa_router::views::ViewRegistry;

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Resolve and check single-page application routes", long_about = None)]
struct Cli {
    /// Application config (TOML); the built-in shell is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (overrides the config)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the config and report components with no source file
    Check {
        /// Re-validate whenever the config file changes
        #[arg(long)]
        watch: bool,
    },
    /// Print the route table
    Routes,
    /// Navigate to each location in turn, printing one JSON line per navigation
    Resolve {
        /// Treat inputs as hrefs and extract locations via the history mode
        #[arg(long)]
        href: bool,

        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Print the href of a named route
    Href {
        name: String,

        /// Route parameter as key=value
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Print the URL of a generated asset under the base path
    Asset { path: String },
    /// Resolve an aliased import specifier
    Alias { specifier: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level)?;

    // Emitted again here: the loader ran before the subscriber existed.
    if let Some(path) = &cli.config {
        tracing::info!(
            path = %path.display(),
            routes = config.routes.len(),
            "Configuration loaded"
        );
    }

    let root = project_root(cli.config.as_deref());
    tracing::debug!(
        config = ?cli.config,
        routes = config.routes.len(),
        history = ?config.router.history,
        "Configuration ready"
    );

    match cli.command {
        Commands::Check { watch } => {
            println!("{}", check(&config, &root)?);
            if watch {
                let Some(path) = cli.config.as_deref() else {
                    return Err("--watch requires --config".into());
                };
                watch_config(path, &root).await?;
            }
        }
        Commands::Routes => {
            let table = config.route_table()?;
            let routes: Vec<_> = table.iter().map(|r| r.as_ref()).collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Resolve { href, locations } => {
            resolve(&config, &root, href, &locations)?;
        }
        Commands::Href { name, params } => {
            let table = config.route_table()?;
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let location = table.href(&name, &params)?;
            println!("{}", config.history().href(&location));
        }
        Commands::Asset { path } => {
            println!("{}", config.base_path()?.asset_url(&path));
        }
        Commands::Alias { specifier } => {
            let aliases = config.aliases()?;
            match aliases.resolve(&specifier) {
                Some(resolved) => println!("{resolved}"),
                None => {
                    tracing::info!(specifier = %specifier, "No alias applies");
                    println!("{specifier}");
                }
            }
        }
    }

    Ok(())
}

/// Register the table and look for component sources on disk.
fn check(config: &AppConfig, root: &Path) -> Result<Value, Box<dyn Error>> {
    let table = config.route_table()?;
    let views = view_registry(config, root)?;
    let missing = views.missing(&table);

    for component in &missing {
        tracing::warn!(
            component = %component,
            root = %root.display(),
            "Component source not found"
        );
    }

    Ok(json!({
        "routes": table.len(),
        "named": table.iter().filter(|r| r.name.is_some()).count(),
        "history": config.router.history,
        "base_path": config.base_path()?.to_string(),
        "missing_components": missing,
    }))
}

async fn watch_config(path: &Path, root: &Path) -> Result<(), Box<dyn Error>> {
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(config) = updates.recv() => match check(&config, root) {
                Ok(report) => println!("{report}"),
                Err(e) => tracing::error!("Config check failed: {}", e),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping config watcher");
                break;
            }
        }
    }
    Ok(())
}

fn resolve(
    config: &AppConfig,
    root: &Path,
    hrefs: bool,
    inputs: &[String],
) -> Result<(), Box<dyn Error>> {
    let table = Arc::new(config.route_table()?);
    let history: Rc<dyn History> = Rc::from(config.history());
    let views = view_registry(config, root)?;

    let mut resolver = RouteResolver::new(table, config.router.initial_location.clone());
    let printer = {
        let history = Rc::clone(&history);
        resolver.subscribe(move |state| {
            println!("{}", state_json(state, history.as_ref(), &views));
        })
    };

    let mut misses = 0usize;
    for input in inputs {
        let location = if hrefs {
            history.location(input)
        } else {
            input.clone()
        };
        if resolver.navigate(&location).is_err() {
            misses += 1;
        }
    }
    printer.unsubscribe();

    tracing::info!(navigations = inputs.len(), misses, "Resolution finished");
    Ok(())
}

fn state_json(
    state: &NavigationState,
    history: &dyn History,
    views: &ViewRegistry<PathBuf>,
) -> Value {
    let route = state.current_route.as_ref().map(|m| {
        json!({
            "path": m.route.path,
            "name": m.name(),
            "component": m.component(),
            "params": m.params,
            "query": m.query,
        })
    });

    json!({
        "location": state.current_location,
        "href": history.href(&state.current_location),
        "status": if state.has_route() { "ok" } else { "not_found" },
        "route": route,
        "view": views.view_for(state),
    })
}

/// Map component specifiers to source files that exist under `root`.
fn view_registry(config: &AppConfig, root: &Path) -> Result<ViewRegistry<PathBuf>, BuildError> {
    let aliases = config.aliases()?;
    let source = |component: &str| {
        let path = aliases.resolve_from(root, component);
        path.is_file().then_some(path)
    };

    let mut views = match config.router.not_found.as_deref().and_then(source) {
        Some(path) => ViewRegistry::new().with_not_found(path),
        None => ViewRegistry::new(),
    };
    for route in &config.routes {
        if let Some(path) = source(&route.component) {
            views.register(route.component.clone(), path);
        }
    }
    Ok(views)
}

/// Directory component specifiers are resolved against.
fn project_root(config: Option<&Path>) -> PathBuf {
    config
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}
