use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, Coordinates, Session, geolocator_from_config, present, provider_from_config,
};

/// Typed in the interactive prompt to use the current location.
const HERE_COMMAND: &str = ":here";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Log provider requests to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show weather for a city, zip code, landmark, etc.
    Show {
        /// Location to search for.
        location: String,
    },

    /// Show weather for the current location.
    Here {
        /// Latitude; overrides the configured position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; overrides the configured position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Search repeatedly, keeping the last result on screen.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { location } => {
                let mut session = session(None)?;
                session.set_location_text(location);
                if !session.submit().await {
                    anyhow::bail!("Location must not be empty.");
                }
                Ok(print_state(&session))
            }
            Command::Here { lat, lon } => {
                let explicit = lat.zip(lon).map(|(latitude, longitude)| Coordinates {
                    latitude,
                    longitude,
                });
                let mut session = session(explicit)?;
                session.use_my_location().await;
                Ok(print_state(&session))
            }
            Command::Interactive => interactive().await.map(|()| ExitCode::SUCCESS),
        }
    }
}

fn session(explicit: Option<Coordinates>) -> anyhow::Result<Session> {
    let config = Config::resolve()?;
    tracing::debug!(?explicit, "building session");
    Ok(Session::new(provider_from_config(&config), geolocator_from_config(&config, explicit)))
}

fn print_state(session: &Session) -> ExitCode {
    print!("{}", present::render(session.state(), Local::now().date_naive()));
    if session.state().error.is_some() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty.");
    }

    config.set_api_key(api_key);
    config.save()?;

    let path = Config::config_file_path()?;
    tracing::debug!(path = %path.display(), "API key saved");
    println!("Saved to {}", path.display());
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let mut session = session(None)?;

    loop {
        let input = Text::new("Location:")
            .with_initial_value(&session.state().location_text)
            .with_placeholder("Enter city, zip code, landmark, etc.")
            .with_help_message(&format!("{HERE_COMMAND} for your location, Esc to quit"))
            .prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        tracing::debug!(%input, "interactive input");
        if input.trim() == HERE_COMMAND {
            session.use_my_location().await;
        } else {
            session.set_location_text(input);
            if !session.submit().await {
                continue;
            }
        }

        print_state(&session);
    }

    Ok(())
}
