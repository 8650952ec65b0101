//! AccountDesk - command-line front end for the account form.

use accountdesk_lib::cli::{self, Cli, CliCommand};
use accountdesk_lib::utils::logging::init_logging;
use accountdesk_lib::{commands, AppContext};
use anyhow::{anyhow, Context};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first so .env loading is visible
    init_logging();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let cli = Cli::parse();

    let ctx = AppContext::new().context("failed to initialise AccountDesk")?;

    match cli.command {
        CliCommand::Submit { form, photo } => {
            let input = cli::load_form(&form, photo.as_deref())?;
            commands::submit_form(&ctx, input).await.map_err(|e| anyhow!(e))?;
        }
        CliCommand::SignIn { email, password } => {
            commands::sign_in(&ctx, &email, &password).await.map_err(|e| anyhow!(e))?;
        }
        CliCommand::SignOut => {
            commands::sign_out(&ctx).await.map_err(|e| anyhow!(e))?;
        }
        CliCommand::ShowForm => print_form(&ctx)?,
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_form(ctx: &AppContext) -> anyhow::Result<()> {
    match commands::show_form(ctx) {
        Some(form) => println!("{}", serde_json::to_string_pretty(&form)?),
        None => println!("{{}}"),
    }
    Ok(())
}
