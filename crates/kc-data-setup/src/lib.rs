//! # kc-data-setup
//!
//! Provisions a running server for trying out the custom email domain
//! mappers:
//! - the `example-realm` realm with a public OIDC client
//! - group membership and custom email domain mappers on that client
//! - two example users with permanent passwords
//!
//! All calls go through the admin REST API with a token obtained by a
//! password grant.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod representation;

pub use cli::{Cli, Command};
pub use client::AdminClient;
pub use config::SetupConfig;
pub use error::{SetupError, SetupResult};
