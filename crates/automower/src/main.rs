//! `automower` - Husqvarna Automower status from the command line
//!
//! Loads application credentials, logs in and prints every mower on the
//! account.
//!
//! ## Environment
//!
//! - `AUTOMOWER_APP_KEY` / `AUTOMOWER_APP_SECRET` - application credentials
//! - `AUTOMOWER_CREDENTIALS` - path of a credentials JSON file
//! - `AUTOMOWER_REDIRECT_URI` - use the authorization-code grant with this
//!   redirect URI instead of the client-credentials grant
//! - `RUST_LOG` - log filter

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod browser;

use std::path::PathBuf;

use anyhow::Context;
use automower_core::{AutomowerClient, Credentials, Mower};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use browser::BrowserAuthenticator;

const CREDENTIALS_VAR: &str = "AUTOMOWER_CREDENTIALS";
const REDIRECT_URI_VAR: &str = "AUTOMOWER_REDIRECT_URI";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "automower=info,automower_core=debug,automower_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting automower");

    let credentials = match std::env::var_os(CREDENTIALS_VAR) {
        Some(path) => Credentials::load_with(PathBuf::from(path)).await,
        None => Credentials::load().await,
    }
    .context("Failed to load application credentials")?;

    let mut client = AutomowerClient::new(credentials)?;

    let token = match std::env::var(REDIRECT_URI_VAR) {
        Ok(redirect_uri) => client
            .authenticate_authorization_code(&BrowserAuthenticator, &redirect_uri)
            .await
            .context("Authorization-code login failed")?,
        Err(_) => client
            .authenticate_client_credentials()
            .await
            .context("Client-credentials login failed")?,
    };
    info!(valid_until = %token.valid_until, "Logged in");

    let mowers = client.fetch_mowers().await.context("Failed to fetch mowers")?;
    if mowers.is_empty() {
        println!("No mowers linked to this account.");
    }
    for mower in &mowers {
        println!("{}", describe(mower));
    }

    Ok(())
}

fn describe(mower: &Mower) -> String {
    let mut line = format!(
        "{} ({} #{}) battery {}% mode {:?} activity {:?} state {:?}",
        mower.name,
        mower.model,
        mower.serial_number,
        mower.battery_percent,
        mower.mode,
        mower.activity,
        mower.state,
    );
    if mower.state.is_error() {
        line.push_str(&format!(" error {}", mower.error_code));
        if let Some(at) = mower.error_time() {
            line.push_str(&format!(" at {at}"));
        }
    }
    if let Some(position) = mower.latest_position() {
        line.push_str(&format!(" @ {:.5},{:.5}", position.latitude, position.longitude));
    }
    line
}
