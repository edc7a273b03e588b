//! Handler for the `url` subcommand.
//!
//! Loads the issuer's private key, applies the identity and policy
//! options to an [`EntryBuilder`], and prints the signed entry URL.

use std::collections::BTreeMap;

use anyhow::Result;
use identity_entry::{EntryBuilder, EntryError};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::UrlArgs;

/// Execute the `url` subcommand with the given arguments.
pub fn execute(args: &UrlArgs) -> Result<()> {
    let url = build_url(args)?;
    println!("{url}");
    Ok(())
}

/// Build the signed entry URL described by `args`.
pub fn build_url(args: &UrlArgs) -> Result<String, EntryError> {
    let key = load_signing_key(args)?;
    let mut builder = EntryBuilder::for_domain(args.issuer.as_str(), key.as_slice(), args.domain.as_str())?;

    builder
        .set_name(args.name.as_str())
        .set_email(args.email.as_str())
        .set_identifier(args.identifier.as_str())
        .set_session_reference(args.session.as_str())
        .set_offer_popup(args.offer_popup)
        .set_show_system_checker(!args.no_system_checker);

    if let Some(level) = args.access_level {
        builder.set_access_level(level);
    }
    if let Some(title) = &args.custom_title {
        builder.set_custom_title(title.as_str());
    }
    if let Some(seconds) = args.expires_in {
        builder.set_expiry_in(seconds);
    }
    if let Some(nonce) = &args.nonce {
        builder.set_nonce(nonce.as_str());
    }
    if !args.params.is_empty() {
        builder.set_extra_url_parameters(args.params.iter().cloned().collect::<BTreeMap<_, _>>());
    }

    debug!(?builder, "configured identity entry");
    builder.to_url()
}

fn load_signing_key(args: &UrlArgs) -> Result<Zeroizing<Vec<u8>>, EntryError> {
    if let Some(path) = &args.key_file {
        return std::fs::read(path)
            .map(Zeroizing::new)
            .map_err(|e| EntryError::KeyFileError {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
    }
    if let Some(name) = &args.key_env {
        let pem = super::read_env_var(name)?;
        return Ok(Zeroizing::new(pem.as_bytes().to_vec()));
    }
    Err(EntryError::NoSigningKey)
}
