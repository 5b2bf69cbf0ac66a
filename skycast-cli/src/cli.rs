use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use skycast_core::{
    Config, RecentSearches, RecentStore, SearchSession, ViewState, provider_from_config,
};
use tracing::warn;

use crate::{prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    /// City to search as soon as the interactive session starts.
    #[arg(long, value_name = "CITY")]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key used for lookups.
    Configure,

    /// Look up a city once and print the report.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,
    },

    /// Print recent searches, most recent first.
    Recent,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            Some(Command::Recent) => recent(),
            None => prompt::interactive(self.city).await,
        }
    }
}

/// Build a search session from config: provider, recent list, store.
pub(crate) fn build_session(config: &Config) -> Result<SearchSession> {
    let provider = provider_from_config(config)?;

    let store = RecentStore::open_default()?;
    let recent = match store.load(config.recent_limit) {
        Ok(recent) => recent,
        Err(err) => {
            // A broken store must not block live lookups.
            warn!(error = %err, "could not load recent searches, starting empty");
            RecentSearches::new(config.recent_limit)
        }
    };

    Ok(SearchSession::new(provider, recent, Some(store)))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = inquire::Text::new("OpenWeatherMap API key:")
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()?;

    let key = key.trim().to_string();
    if key.is_empty() {
        bail!("API key cannot be empty");
    }

    config.set_api_key(key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = build_session(&config)?;

    let state = match session.submit(city).await {
        Ok(state) => state,
        Err(invalid) => bail!("{invalid}"),
    };

    match state {
        ViewState::Content(report) => print!("{}", render::report_text(report)),
        ViewState::Error(message) => bail!("{message}"),
        other => warn!(?other, "unexpected state after a completed search"),
    }

    Ok(())
}

fn recent() -> Result<()> {
    let config = Config::load()?;
    let store = RecentStore::open_default()?;
    let searches = store.load(config.recent_limit)?;

    if searches.is_empty() {
        println!("No recent searches yet.");
        return Ok(());
    }

    for (index, city) in searches.entries().iter().enumerate() {
        println!("{}. {city}", index + 1);
    }

    Ok(())
}
