//! # automower-core
//!
//! Client for the Husqvarna Automower Connect API.
//!
//! This crate provides:
//! - Application credential loading (environment, JSON file, keyring)
//! - The authenticated client and its two login methods
//! - Mower status models decoded from the listing endpoint
//!
//! ## Example
//!
//! ```ignore
//! use automower_core::{AutomowerClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = AutomowerClient::new(Credentials::load().await?)?;
//!     client.authenticate_client_credentials().await?;
//!
//!     for mower in client.fetch_mowers().await? {
//!         println!("{}: {}% {:?}", mower.name, mower.battery_percent, mower.activity);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod credentials;
mod error;
pub mod mower;

pub use client::AutomowerClient;
pub use credentials::{CredentialError, CredentialResult, Credentials};
pub use error::{Error, Result};
pub use mower::{Mower, MowerActivity, MowerMode, MowerState, Position, decode_mowers};

pub use automower_api as api;
