mod history;
mod render;
mod search;
mod session;
mod store;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::Style;
use dialoguer::{theme::ColorfulTheme, Password};
use sliedic_core::AppConfig;
use sliedic_gemini::PricePipeline;
use tracing_subscriber::EnvFilter;

use crate::search::SearchOutcome;
use crate::store::{JsonFileStore, KeyValueStore};

#[derive(Debug, Parser)]
#[command(name = "sliedic")]
#[command(about = "Cenový Sliedič: akciové ceny potravín v slovenských obchodoch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Unlock searching with the shared password
    Login {
        /// Password to check (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Lock searching again
    Logout,
    /// Search current promo prices for a product
    Search {
        /// Product to search for (e.g. "Kuracie prsia")
        #[arg(required = true)]
        term: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Fail instead of retrying without web search
        #[arg(long)]
        no_fallback: bool,
    },
    /// List quick-pick product categories
    Categories,
    /// Show recent searches
    History {
        /// Forget all recorded searches
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = sliedic_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = JsonFileStore::open(&config.state_path)?;

    match cli.command {
        Some(Commands::Login { password }) => return run_login(&mut store, &config, password),
        Some(Commands::Logout) => {
            session::logout(&mut store)?;
            println!("Odhlásené.");
        }
        Some(Commands::Search {
            term,
            json,
            no_fallback,
        }) => {
            let pipeline = PricePipeline::from_config(&config)?
                .with_fallback(config.fallback_enabled && !no_fallback);
            let outcome = search::run_search(
                &mut store,
                &pipeline,
                &term,
                json,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
            .await?;
            if outcome == SearchOutcome::Failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Categories) => search::run_categories(&mut io::stdout().lock())?,
        Some(Commands::History { clear }) => run_history(&mut store, clear)?,
        None => {
            println!("Cenový Sliedič: použite `sliedic --help` pre zoznam príkazov.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_login(
    store: &mut impl KeyValueStore,
    config: &AppConfig,
    password: Option<String>,
) -> anyhow::Result<ExitCode> {
    let attempt = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Heslo")
            .allow_empty_password(true)
            .interact()?,
    };

    if session::login(store, &config.app_password, attempt.trim())? {
        println!("{}", Style::new().green().bold().apply_to("Prihlásené."));
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", Style::new().red().bold().apply_to("Chybné heslo!"));
        Ok(ExitCode::FAILURE)
    }
}

fn run_history(store: &mut impl KeyValueStore, clear: bool) -> anyhow::Result<()> {
    if clear {
        history::clear(store)?;
        println!("História vymazaná.");
        return Ok(());
    }

    let entries = history::load(store)?;
    if entries.is_empty() {
        println!("Zatiaľ žiadne vyhľadávania.");
        return Ok(());
    }

    let dim = Style::new().dim();
    let mut out = io::stdout().lock();
    for entry in &entries {
        writeln!(
            out,
            "{}  {}",
            dim.apply_to(entry.searched_at.format("%Y-%m-%d %H:%M")),
            entry.term
        )?;
    }
    Ok(())
}
