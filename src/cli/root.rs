use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::{login, logout, navigate, register, whoami};
use crate::common::debug;
use crate::config::{Config, Initializer};
use crate::core::access::Navigator;

/// Scholars command
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct ScholarsCommand {
    /// Global options
    #[command(flatten)]
    pub options: GlobalOptions,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Global options
#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Configuration file path
    #[arg(long, short = 'C', env = "SCHOLARS_CONFIG_PATH", global = true)]
    pub config: Option<PathBuf>,
    /// Directory where the session is persisted
    #[arg(
        long,
        env = "SCHOLARS_STORAGE_DIR",
        default_value = ".scholars",
        global = true
    )]
    pub storage_dir: PathBuf,
    /// Simulated directory latency
    #[arg(long, env = "SCHOLARS_LATENCY_MILLISECONDS", global = true)]
    pub latency_milliseconds: Option<u64>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and persist the session
    Login(login::LoginCommand),
    /// Create an account and log in
    Register(register::RegisterCommand),
    /// Clear the persisted session
    Logout(logout::LogoutCommand),
    /// Show the current session
    Whoami(whoami::WhoamiCommand),
    /// Check whether the current session may open a path
    Navigate(navigate::NavigateCommand),
}

/// Parse command line args
pub fn parse() -> ScholarsCommand {
    ScholarsCommand::parse()
}

/// Load configuration, start the session and restore it.
pub async fn initialize(options: GlobalOptions) -> crate::Result<Navigator> {
    let GlobalOptions {
        config,
        storage_dir,
        latency_milliseconds,
    } = options;

    let mut initializer = match config {
        Some(path) => Initializer::load_config_file(path).await?,
        None => Initializer::from_config(Config::default()),
    };

    initializer
        .config
        .session
        .set_latency_milliseconds(latency_milliseconds);
    initializer.set_storage_dir(storage_dir);

    debug!("{:?}", initializer);

    initializer.init_navigator().await
}
