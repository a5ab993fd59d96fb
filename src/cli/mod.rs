use agora::clock::{Clock, SystemClock};
use agora::registry::{GovernanceParams, Registry};
use agora::store::SqliteStore;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod config;
pub mod init;
pub mod list;
pub mod propose;
pub mod show;
pub mod status;
pub mod version;
pub mod vote;

use config::AgoraConfig;

#[derive(Parser)]
#[command(name = "agora")]
#[command(author = "Agora Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Governance proposal registry and voting ledger", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a registry database and configuration file
    Init {
        /// Path to write the config file (default: adjacent to the database)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the registry database (default: ~/.local/share/agora/registry.db)
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Create a new proposal
    Propose {
        /// Proposal title
        #[arg(long)]
        title: String,

        /// Proposal description
        #[arg(long)]
        description: String,

        /// Identity to record as proposer
        #[arg(long = "as")]
        proposer: String,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Cast a vote on a proposal
    Vote {
        /// Proposal id
        proposal_id: u64,

        /// Vote direction
        #[arg(value_enum)]
        choice: VoteChoice,

        /// Identity to record as voter
        #[arg(long = "as")]
        voter: String,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a proposal's full record
    Show {
        /// Proposal id
        proposal_id: u64,

        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a proposal's current status (Active, Passed, or Failed)
    Status {
        /// Proposal id
        proposal_id: u64,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all proposals
    List {
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Vote direction as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoteChoice {
    For,
    Against,
}

impl VoteChoice {
    pub fn support(self) -> bool {
        matches!(self, VoteChoice::For)
    }
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init {
            config,
            db_path,
            force,
        } => init::execute(config, db_path, force),
        Commands::Propose {
            title,
            description,
            proposer,
            config,
        } => propose::execute(title, description, proposer, config).await,
        Commands::Vote {
            proposal_id,
            choice,
            voter,
            config,
        } => vote::execute(proposal_id, choice, voter, config).await,
        Commands::Show {
            proposal_id,
            json,
            config,
        } => show::execute(proposal_id, json, config).await,
        Commands::Status {
            proposal_id,
            config,
        } => status::execute(proposal_id, config).await,
        Commands::List { json, config } => list::execute(json, config).await,
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

/// Load the config file, falling back to the default location.
pub fn load_config(config: Option<PathBuf>) -> Result<AgoraConfig, Box<dyn std::error::Error>> {
    let config_path =
        config.unwrap_or_else(|| config::default_config_path(&config::default_db_path()));

    if !config_path.exists() {
        return Err(format!(
            "Config file '{}' not found. Run 'agora init' first.",
            config_path.display()
        )
        .into());
    }

    AgoraConfig::load(&config_path)
}

/// Open the registry described by the config file.
pub async fn open_registry(
    config: &AgoraConfig,
) -> Result<Registry<SqliteStore>, Box<dyn std::error::Error>> {
    init_tracing(&config.logging.level);

    let params: GovernanceParams = config.governance.params()?;
    let store = SqliteStore::open(&config.storage.db_path).await?;
    let registry = Registry::open(store, params).await?;
    Ok(registry)
}

/// Current wall-clock time in UNIX seconds.
pub fn now() -> u64 {
    SystemClock.now()
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agora={}", level)));

    // Ignore the error if a subscriber is already installed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
