//! `cover`: the Health Cover quote client.
//!
//! `cover quote` fills in the lead form: it computes the quote, posts the
//! submission and shows the weather for the applicant's city.
//! `cover calc` only runs the calculator.

mod commands;

use clap::{Parser, Subcommand};
use cover_quote::client::DEFAULT_SERVER;
use cover_quote::form::QuoteForm;
use cover_weather::DEFAULT_BASE_URL;

/// Health Cover quote client.
#[derive(Parser, Debug)]
#[command(name = "cover", about = "Health Cover quote client")]
struct Cli {
    /// Output format: text or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "text")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a quote and submit the lead form.
    Quote {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        city: String,
        /// Annual income.
        #[arg(long)]
        income: String,
        /// Number of dependents.
        #[arg(long)]
        dependents: String,

        /// Submission server.
        #[arg(long, env = "COVER_SERVER", default_value = DEFAULT_SERVER)]
        server: String,

        /// Tomorrow.io API base URL.
        #[arg(long = "weather-url", env = "TOMORROW_API_URL", default_value = DEFAULT_BASE_URL)]
        weather_url: String,

        /// Tomorrow.io API key. Without one the weather card is skipped.
        #[arg(long = "weather-key", env = "TOMORROW_API_KEY", hide_env_values = true)]
        weather_key: Option<String>,
    },

    /// Compute cover and premium without submitting anything.
    Calc {
        #[arg(long)]
        income: String,
        #[arg(long, default_value = "0")]
        dependents: String,
    },

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Quote {
            name,
            age,
            city,
            income,
            dependents,
            server,
            weather_url,
            weather_key,
        } => {
            let form = QuoteForm {
                name,
                age,
                city,
                income,
                dependents,
            };
            let weather = weather_key
                .filter(|k| !k.trim().is_empty())
                .map(|key| (weather_url, key));
            commands::quote::run(&form, &server, weather, json_output).await?;
        }

        Commands::Calc { income, dependents } => {
            commands::calc::run(&income, &dependents, json_output)?;
        }

        Commands::Version => {
            println!("cover cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
