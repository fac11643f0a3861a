//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use workpay_core::config;
use workpay_core::profile::ProfileForm;

mod commands;
mod shell;

#[derive(Parser)]
#[command(name = "workpay")]
#[command(version = "0.1")]
#[command(about = "WorkPay session shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in through the auth widget
    Login {
        /// Use the OTP widget variant
        #[arg(long)]
        otp: bool,
    },

    /// Sign out (clear the persisted session)
    Logout,

    /// Show the persisted session state
    Status,

    /// Choose how you want to use WorkPay
    Role {
        /// One of: hire, work, both
        #[arg(value_name = "CHOICE")]
        choice: String,
    },

    /// Complete the client profile
    Profile {
        /// Full name
        #[arg(long)]
        full_name: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Service to hire for (repeat for several)
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,

        /// City or area
        #[arg(long)]
        city: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Log to stderr, filtered by RUST_LOG; stdout stays with the shell output.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    match cli.command {
        Commands::Login { otp } => commands::auth::login(&config, otp).await,
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Role { choice } => commands::role::run(&config, &choice).await,
        Commands::Profile {
            full_name,
            phone,
            services,
            city,
        } => {
            commands::profile::run(
                &config,
                ProfileForm {
                    full_name,
                    phone_number: phone,
                    services,
                    city_area: city,
                },
            )
            .await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
