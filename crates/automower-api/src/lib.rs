//! # automower-api
//!
//! Request descriptors and `OAuth2` token lifecycle for the Husqvarna
//! Automower Connect API.
//!
//! ## Features
//!
//! - **Endpoints**: pure request descriptors for the authorize, token and
//!   mower listing operations
//! - **Grants**: client-credentials and authorization-code, sharing one
//!   token exchange
//! - **Interactive sessions**: the consent screen is an injected
//!   [`WebAuthenticator`], so flows are testable without a browser
//!
//! ## Quick Start
//!
//! ```ignore
//! use automower_api::{ApiRoots, Authenticator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut auth = Authenticator::new("application_key", "secret", ApiRoots::husqvarna()?);
//!     let token = auth.authenticate_client_credentials().await?;
//!     println!("Valid until: {}", token.valid_until);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod endpoint;
mod error;
pub mod flow;
pub mod status;
pub mod token;

pub use async_trait::async_trait;
pub use endpoint::{ApiRoots, Endpoint, Host, Method};
pub use error::{BoxError, Error, Result};
pub use flow::{Authenticator, CallbackParams, Grant, WebAuthenticator};
pub use token::Token;
