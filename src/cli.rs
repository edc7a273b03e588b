//! CLI argument definitions for identity-entry.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! `UrlArgs` and `InspectArgs` implement custom `Debug` to redact tokens
//! and personal data so they cannot leak through debug formatting or logs.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use identity_entry::{DEFAULT_DOMAIN, parse_access_level};

/// Issue signed identity entry URLs that let a user's browser join a
/// live events platform session without logging in.
#[derive(Debug, Parser)]
#[command(name = "identity-entry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign an identity entry and print the URL to send the browser to.
    Url(UrlArgs),

    /// Decode an entry URL or token without verifying its signature.
    Inspect(InspectArgs),
}

/// Arguments for the `url` subcommand.
#[derive(clap::Args)]
pub struct UrlArgs {
    /// Issuer (certificate) name assigned by the platform. Used as the `kid`.
    #[arg(long, env = "IDENTITY_ENTRY_ISSUER", value_name = "NAME")]
    pub issuer: String,

    /// Path to the PEM-encoded RSA private key.
    #[arg(long, env = "IDENTITY_ENTRY_KEY_FILE", value_name = "FILE", conflicts_with = "key_env")]
    pub key_file: Option<PathBuf>,

    /// Read the PEM-encoded RSA private key from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub key_env: Option<String>,

    /// Platform base URL to send the user to.
    #[arg(long, env = "IDENTITY_ENTRY_DOMAIN", value_name = "URL", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Display name of the user.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address of the user.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Durable user key, conventionally `<issuer>\<unique id>`.
    #[arg(long, default_value = "")]
    pub identifier: String,

    /// Reference of the live session to enter.
    #[arg(long, value_name = "REFERENCE", default_value = "")]
    pub session: String,

    /// Access level to grant: observer, participant, host, presenter, or an integer.
    #[arg(long, value_name = "LEVEL", value_parser = parse_access_level, allow_hyphen_values = true)]
    pub access_level: Option<i64>,

    /// Display title to show for the user's role.
    #[arg(long, value_name = "TITLE")]
    pub custom_title: Option<String>,

    /// Offer the user the option of opening the player in a popup.
    #[arg(long)]
    pub offer_popup: bool,

    /// Skip the platform's browser system checker.
    #[arg(long)]
    pub no_system_checker: bool,

    /// Expire the entry this many seconds from now (may be negative).
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub expires_in: Option<i64>,

    /// Use this nonce instead of a generated one. Must be unique per entry.
    #[arg(long)]
    pub nonce: Option<String>,

    /// Extra URL parameter to store on the entry, as KEY=VALUE. Repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

/// Custom `Debug` that redacts personal data.
impl fmt::Debug for UrlArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlArgs")
            .field("issuer", &self.issuer)
            .field("key_file", &self.key_file)
            .field("key_env", &self.key_env)
            .field("domain", &self.domain)
            .field("name", &"[REDACTED]")
            .field("email", &"[REDACTED]")
            .field("identifier", &"[REDACTED]")
            .field("session", &self.session)
            .field("access_level", &self.access_level)
            .field("custom_title", &self.custom_title)
            .field("offer_popup", &self.offer_popup)
            .field("no_system_checker", &self.no_system_checker)
            .field("expires_in", &self.expires_in)
            .field("nonce", &self.nonce.as_ref().map(|_| "[REDACTED]"))
            .field("params", &self.params.len())
            .finish()
    }
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Entry URL or bare token to inspect. If omitted, reads from stdin.
    pub input: Option<String>,

    /// Read the URL or token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Output raw JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the input to prevent accidental leakage.
impl fmt::Debug for InspectArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectArgs")
            .field("input", &self.input.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("json", &self.json)
            .finish()
    }
}

/// Parse a `KEY=VALUE` pair for `--param`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
