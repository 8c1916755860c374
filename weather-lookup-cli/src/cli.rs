use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_lookup_core::{
    Config, LookupController, LookupOutcome, OpenWeatherProvider, SubmitError, WeatherProvider,
    provider_from_config,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Look up current weather by city name")]
pub struct Cli {
    /// Override the provider endpoint from the config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the API key from the config file.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the provider API key.
    Configure,

    /// Look up one city and print the results panel.
    Show {
        /// City name, optionally with a country code, e.g. "London,UK".
        city: String,
    },

    /// Search repeatedly from a prompt (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { ref city }) => {
                let controller = self.controller()?;
                show(controller, city).await
            }
            Some(Command::Interactive) | None => {
                let controller = self.controller()?;
                interactive(controller).await
            }
        }
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut cfg = Config::load()?;
        if let Some(base_url) = &self.base_url {
            cfg.base_url = base_url.clone();
        }
        cfg.apply_api_key_override(self.api_key.clone());
        Ok(cfg)
    }

    fn controller(&self) -> anyhow::Result<LookupController<OpenWeatherProvider>> {
        let cfg = self.config()?;
        debug!(base_url = %cfg.base_url, "using provider");
        Ok(LookupController::new(provider_from_config(&cfg)?))
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    cfg.api_key = Some(key.trim().to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show<P: WeatherProvider>(
    mut controller: LookupController<P>,
    city: &str,
) -> anyhow::Result<()> {
    if !city.trim().is_empty() {
        eprintln!("{}", view::searching(city));
    }

    match controller.submit(city).await? {
        LookupOutcome::Loaded { .. } => {
            print!(
                "{}",
                view::render_panel(controller.store().snapshot(), &chrono::Local::now())
            );
            Ok(())
        }
        LookupOutcome::Failed(err) => bail!("{}\n({err})", view::LOOKUP_FAILED),
        LookupOutcome::Cancelled => bail!("Lookup cancelled"),
    }
}

async fn interactive<P: WeatherProvider>(
    mut controller: LookupController<P>,
) -> anyhow::Result<()> {
    println!("{}", view::render_header());

    let cancel = controller.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    loop {
        let initial = controller.state().pending_text.clone();
        let answer = Text::new("City Name:")
            .with_initial_value(&initial)
            .with_placeholder("e.g., Mumbai, London, Tokyo")
            .with_help_message("Enter to search, Esc or :q to quit")
            .prompt();

        let input = match answer {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };
        if input.trim() == ":q" {
            break;
        }

        controller.set_input(input.clone());
        if !input.trim().is_empty() {
            println!("{}", view::searching(&input));
        }

        let submitted = controller.submit(&input).await;
        if ends_session(&submitted) {
            break;
        }
        match submitted {
            Err(SubmitError::EmptyInput) => {
                println!("⚠️  {}", SubmitError::EmptyInput);
                continue;
            }
            Err(err) => return Err(err.into()),
            Ok(LookupOutcome::Failed(_)) => println!("❌ {}", view::LOOKUP_FAILED),
            Ok(LookupOutcome::Loaded { .. } | LookupOutcome::Cancelled) => {}
        }

        if controller.store().is_loaded() {
            print!(
                "{}",
                view::render_panel(controller.store().snapshot(), &chrono::Local::now())
            );
        }
        println!("{}\n", view::SEARCH_HINT);
    }

    controller.shutdown();
    println!("{}", view::FOOTER);
    Ok(())
}

/// Ctrl-C cancels the controller token; whichever way that surfaces, the
/// prompt loop ends quietly.
fn ends_session(submitted: &Result<LookupOutcome, SubmitError>) -> bool {
    matches!(
        submitted,
        Err(SubmitError::ShutDown) | Ok(LookupOutcome::Cancelled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_lookup_core::LookupError;

    #[test]
    fn cancellation_ends_the_session() {
        assert!(ends_session(&Err(SubmitError::ShutDown)));
        assert!(ends_session(&Ok(LookupOutcome::Cancelled)));
    }

    #[test]
    fn lookup_results_keep_the_session_open() {
        let failed = LookupOutcome::Failed(LookupError::Status {
            status: 404,
            body: String::new(),
        });

        assert!(!ends_session(&Ok(failed)));
        assert!(!ends_session(&Ok(LookupOutcome::Loaded { city: "Paris".into() })));
        assert!(!ends_session(&Err(SubmitError::EmptyInput)));
    }

    #[test]
    fn global_overrides_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "weather-lookup",
            "--api-key",
            "KEY",
            "-vv",
            "show",
            "London,UK",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Show { ref city }) if city == "London,UK"));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-lookup"]).unwrap();
        assert!(cli.command.is_none());
    }
}
