use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use benchboard::api::{ApiClient, ApiError, endpoints};
use benchboard::config::{ConfigV1, config_schema, load_config};
use benchboard::models::{BenchmarkSubmission, BenchmarkUpdate};
use benchboard::routes::Route;
use benchboard::session::{AuthOutcome, Navigator, SessionStore};
use benchboard::utils::logger::init_logging;
use clap::{Parser, Subcommand};
use inline_colorization::*;
use reqwest::Url;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("{0}")]
    Logging(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Parser, Debug)]
#[command(name = "benchboard", about = "Benchmark leaderboard client", version)]
struct Cli {
    /// Backend URL; overrides `api.base_url` from config.yaml / BENCHBOARD_API__BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Existing `auth_token` session cookie to reuse.
    #[arg(long, global = true, env = "BENCHBOARD_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backend health.
    Health,
    /// Check the session and print the signed-in user.
    Whoami,
    /// Ask the backend whether the session token is valid.
    Verify,
    /// Print the OAuth authorization URL to open in a browser.
    Login,
    /// Apply the URL the browser was redirected to after OAuth.
    Callback { url: String },
    /// Exchange an OAuth authorization code for a session.
    Exchange { code: String },
    /// End the session.
    Logout,
    /// Show the signed-in user's profile.
    Profile,
    /// List your benchmark results.
    Results {
        #[arg(long, default_value_t = endpoints::DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = endpoints::DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Show one benchmark result.
    Show { id: i64 },
    /// Submit a benchmark result from a JSON file.
    Submit { file: PathBuf },
    /// Update a benchmark result from a JSON file.
    Update { id: i64, file: PathBuf },
    /// Delete a benchmark result.
    Delete { id: i64 },
    /// Parse raw benchmark output from a text file.
    Parse { file: PathBuf },
    /// Resolve an application path to its view.
    Route { path: String },
    /// Print the configuration JSON schema.
    Schema,
}

/// Stands in for a browser redirect: the user opens the URL themselves.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, url: &str) {
        println!("Open this URL to sign in:\n{style_bold}{}{style_reset}", url);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn finish(outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Failed { error } => Err(CliError::Failed(error)),
        other => print_json(&other),
    }
}

async fn run(command: Command, config: ConfigV1) -> Result<(), CliError> {
    let client = Arc::new(ApiClient::new(&config.api)?);
    let store = SessionStore::new(
        client.clone(),
        Arc::new(TerminalNavigator),
        config.session.clone(),
    );

    let result = match command {
        Command::Health => print_json(&client.health().await?),
        Command::Whoami => {
            if store.initialize().await {
                print_json(&store.snapshot().user())
            } else {
                println!("{color_yellow}Not signed in{color_reset}");
                Ok(())
            }
        }
        Command::Verify => print_json(&client.verify_token().await?),
        Command::Login => match store.start_oauth_login().await {
            Some(_) => Ok(()),
            None => Err(CliError::Failed(
                store
                    .snapshot()
                    .error()
                    .unwrap_or("could not start OAuth login")
                    .to_string(),
            )),
        },
        Command::Callback { url } => {
            let url = Url::parse(&url).map_err(|_| CliError::InvalidUrl(url.clone()))?;
            if Route::from_path(url.path()) != Some(Route::OAuthCallback) {
                warn!("{} is not the OAuth callback route", url.path());
            }
            match store.handle_oauth_callback(&url) {
                Some(outcome) => finish(outcome),
                None => {
                    println!("{color_yellow}No OAuth callback parameters in URL{color_reset}");
                    Ok(())
                }
            }
        }
        Command::Exchange { code } => finish(store.handle_oauth_login(&code).await),
        Command::Logout => finish(store.logout().await),
        Command::Profile => print_json(&client.user_profile().await?),
        Command::Results { page, limit } => print_json(&client.my_results(page, limit).await?),
        Command::Show { id } => print_json(&client.benchmark_result(id).await?),
        Command::Submit { file } => {
            let data: BenchmarkSubmission = serde_json::from_str(&read_file(&file)?)?;
            print_json(&client.submit_benchmark(&data).await?)
        }
        Command::Update { id, file } => {
            let data: BenchmarkUpdate = serde_json::from_str(&read_file(&file)?)?;
            print_json(&client.update_benchmark_result(id, &data).await?)
        }
        Command::Delete { id } => print_json(&client.delete_benchmark_result(id).await?),
        Command::Parse { file } => {
            print_json(&client.parse_benchmark_text(&read_file(&file)?).await?)
        }
        Command::Route { .. } | Command::Schema => Ok(()),
    };
    result
}

fn resolve_route(path: &str) {
    match Route::from_path(path) {
        Some(route) if Route::is_alias(path) => {
            println!("{} (deprecated alias of {})", route, route.path())
        }
        Some(route) => println!("{}", route),
        None => println!("{color_yellow}No view for {}{color_reset}", path),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Offline commands need neither config nor network.
    match &cli.command {
        Command::Schema => {
            return match config_schema() {
                Ok(schema) => {
                    println!("{}", schema);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{color_red}error:{color_reset} {}", e);
                    ExitCode::FAILURE
                }
            };
        }
        Command::Route { path } => {
            resolve_route(path);
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let mut config = load_config();
    if let Some(base_url) = cli.base_url {
        config.api.base_url = Some(base_url);
    }
    if let Some(token) = cli.auth_token {
        config.api.auth_token = Some(token);
    }

    if let Err(e) = init_logging(&config.logging).map_err(CliError::Logging) {
        eprintln!("{color_red}error:{color_reset} {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{color_red}error:{color_reset} {}", e);
            ExitCode::FAILURE
        }
    }
}
