//! Command-line interface of the `signup` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "signup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Account sign-up with manual activation")]
pub struct Cli {
    /// Configuration file (TOML, JSON, YAML). Defaults to `signup.*` in the working directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register an account, notify administrators and activate it as an administrator would
    Demo(DemoArgs),
    /// Print the effective registration settings
    Config {},
}

#[derive(Debug, Clone, Args)]
pub struct DemoArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Password confirmation; defaults to `--password`
    #[arg(long)]
    pub password2: Option<String>,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    /// Host the simulated request is addressed to
    #[arg(long, default_value = "localhost")]
    pub host: String,
    /// Register only; leave the account waiting for activation
    #[arg(long)]
    pub skip_activation: bool,
}
