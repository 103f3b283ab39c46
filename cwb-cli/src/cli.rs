use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use cwb_core::{
    ColumnKey, Config, ObservationPage, SortOrder, observation_columns, provider_from_config,
    render, sort_rows, wide_observation_columns,
};
use inquire::{Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cwb-obs", version, about = "CWB weather station observations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the open-data authorization key.
    Configure {
        /// Key to store; prompted for when absent.
        #[arg(long)]
        key: Option<String>,

        /// Override the observation endpoint URL.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Fetch current observations and print them as a table.
    Show {
        /// Authorization key; overrides the configured one.
        #[arg(long, env = "CWB_AUTHORIZATION_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Column to sort by: county, area, time, weather, temp, wind, station.
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending.
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Only show stations in this county, e.g. "臺北市".
        #[arg(long)]
        county: Option<String>,

        /// Add station name and id columns.
        #[arg(long)]
        wide: bool,

        /// Print rows as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { key, endpoint } => configure(key, endpoint),
            Command::Show { key, sort, desc, county, wide, json } => {
                let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
                let sort = sort.as_deref().map(ColumnKey::try_from).transpose()?;
                show(key, sort.map(|k| (k, order)), county, wide, json).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(key: Option<String>, endpoint: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = match key {
        Some(key) => key,
        None => Password::new("CWB authorization key:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read authorization key")?,
    };
    if key.trim().is_empty() {
        return Err(anyhow!("Authorization key must not be empty"));
    }

    config.set_authorization_key(key);
    if endpoint.is_some() {
        config.endpoint = endpoint;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(
    key: Option<String>,
    sort: Option<(ColumnKey, SortOrder)>,
    county: Option<String>,
    wide: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let authorization = config.resolve_authorization(key)?;
    let provider = provider_from_config(&config, authorization);

    let mut page = ObservationPage::new();
    page.load(provider.as_ref()).await;

    if let Some(message) = page.error_message() {
        return Err(anyhow!("{message}"));
    }

    let mut rows = page.rows().to_vec();
    if let Some(county) = county {
        rows.retain(|r| r.county == county);
    }
    if let Some((key, order)) = sort {
        sort_rows(&mut rows, &key.column(), order);
    }

    if json {
        let text = serde_json::to_string_pretty(&rows).context("Failed to serialize rows")?;
        println!("{text}");
    } else {
        let columns = if wide { wide_observation_columns() } else { observation_columns() };
        print!("{}", render(&rows, &columns));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_parses_sort_options() {
        let cli = Cli::try_parse_from(["cwb-obs", "show", "--key", "K", "--sort", "temp", "--desc"])
            .expect("arguments should parse");

        match cli.command {
            Command::Show { key, sort, desc, wide, json, .. } => {
                assert_eq!(key.as_deref(), Some("K"));
                assert_eq!(sort.as_deref(), Some("temp"));
                assert!(desc);
                assert!(!wide);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn desc_without_sort_is_rejected() {
        assert!(Cli::try_parse_from(["cwb-obs", "show", "--desc"]).is_err());
    }
}
