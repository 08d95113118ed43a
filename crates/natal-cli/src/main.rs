mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, sign::SignSubcommand};
use natal_core::config::Config;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "natal",
    about = "Sun, moon and rising sign calculator with onboarding validation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .natal/ or .git/)
    #[arg(long, global = true, env = "NATAL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute sun, moon and rising signs
    Signs {
        /// Birth date (YYYY-MM-DD or ISO timestamp)
        #[arg(long)]
        date: String,
        /// Birth time (HH:mm, 24-hour)
        #[arg(long)]
        time: String,
        /// Birth place (recorded, not used in the calculation)
        #[arg(long)]
        location: Option<String>,
    },

    /// Sun sign for a birth date
    Sun { date: String },

    /// Moon sign for a birth date
    Moon { date: String },

    /// Rising sign for a birth date and time
    Rising {
        date: String,
        time: String,
        #[arg(long)]
        location: Option<String>,
    },

    /// Inspect zodiac signs
    Sign {
        #[command(subcommand)]
        subcommand: SignSubcommand,
    },

    /// Validate onboarding input and print the profile update it produces
    Onboard {
        /// User the profile update is keyed by
        #[arg(long)]
        user_id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Show usage limits for a subscription
    Limits {
        /// free or premium (omit for a user with no subscription)
        #[arg(long)]
        tier: Option<String>,
        /// Treat the subscription as lapsed
        #[arg(long)]
        inactive: bool,
    },

    /// Manage .natal/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let json = cli.json || configured_json(&root);

    let result = match cli.command {
        Commands::Signs {
            date,
            time,
            location,
        } => cmd::calc::signs(&date, &time, location.as_deref(), json),
        Commands::Sun { date } => cmd::calc::sun(&date, json),
        Commands::Moon { date } => cmd::calc::moon(&date, json),
        Commands::Rising {
            date,
            time,
            location,
        } => cmd::calc::rising(&date, &time, location.as_deref(), json),
        Commands::Sign { subcommand } => cmd::sign::run(subcommand, json),
        Commands::Onboard {
            user_id,
            name,
            date,
            time,
            location,
        } => cmd::onboard::run(
            &root,
            user_id,
            natal_core::validation::OnboardingParams {
                display_name: name,
                birth_date: date,
                birth_time: time,
                birth_location: location,
            },
            json,
        ),
        Commands::Limits { tier, inactive } => cmd::limits::run(tier.as_deref(), inactive, json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// `output.json` from the config file. A missing or unreadable config never
/// blocks a command; `natal config validate` is where problems get reported.
fn configured_json(root: &std::path::Path) -> bool {
    match Config::load_or_default(root) {
        Ok(cfg) => cfg.output.json,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            false
        }
    }
}
