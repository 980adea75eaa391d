//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Provisions the example realm, client, mappers and users on a running
/// server.
#[derive(Debug, Parser)]
#[command(name = "kc-data-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server URL including the context path (overrides config).
    #[arg(short, long, env = "KC_SERVER_URL")]
    pub server: Option<String>,

    /// Admin username (overrides config).
    #[arg(long, env = "KC_ADMIN_USERNAME")]
    pub admin_username: Option<String>,

    /// Admin password (overrides config).
    #[arg(long, env = "KC_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Realm the admin user authenticates against (overrides config).
    #[arg(long)]
    pub admin_realm: Option<String>,

    /// Client used for the admin login (overrides config).
    #[arg(long)]
    pub admin_client_id: Option<String>,

    /// Setup step to run. Runs all steps if omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Setup steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Realm, OIDC client mappers and users, in that order.
    All,
    /// Create the realm with its OIDC client.
    Realm,
    /// Register the protocol mappers on the OIDC client.
    Mappers,
    /// Create the example users.
    Users,
    /// Register the protocol mappers on the SAML client.
    ///
    /// The SAML client must already exist.
    SamlMappers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_defaults_to_none() {
        let cli = Cli::parse_from(["kc-data-setup"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parses_steps() {
        let cli = Cli::parse_from(["kc-data-setup", "--config", "setup.toml", "saml-mappers"]);
        assert_eq!(cli.command, Some(Command::SamlMappers));
        assert_eq!(cli.config, Some(PathBuf::from("setup.toml")));

        let cli = Cli::parse_from(["kc-data-setup", "users"]);
        assert_eq!(cli.command, Some(Command::Users));
    }

    #[test]
    fn rejects_unknown_step() {
        assert!(Cli::try_parse_from(["kc-data-setup", "groups"]).is_err());
    }
}
