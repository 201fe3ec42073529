#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use signup_cli::args::{Cli, Command};
use signup_cli::handlers::{config, demo};
use signup_domain::config::AppConfig;
use signup_kernel::config::load_config;
use signup_logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    match cli.command {
        Command::Config {} => print!("{}", config::render(&cfg)),
        Command::Demo(args) => {
            let report = demo::run(&cfg, args).await?;

            println!("registered  {} ({})", report.registered.username, report.registered.id);
            println!("redirect    {}", report.registration_redirect.name);
            for mail in &report.mailed {
                println!("mailed      {} -> [{}]", mail.subject, mail.recipients.join(", "));
            }
            match (&report.activated, &report.activation_redirect) {
                (Some(user), Some(redirect)) => {
                    println!("activated   {} (active: {})", user.username, user.is_active);
                    println!("redirect    {}", redirect.name);
                },
                _ => println!("activation  pending"),
            }
            println!("events      {}", report.events.join(", "));
        },
    }

    Ok(())
}
