//! Command handlers for each CLI subcommand.
//!
//! Each subcommand is implemented in its own module and exposes
//! a single `execute` function that receives the parsed arguments.

pub mod inspect;
pub mod url;

use std::io::{IsTerminal, Read};

use identity_entry::EntryError;
use zeroize::Zeroizing;

/// Read a value from the named environment variable.
///
/// Rejects names that the OS cannot look up (empty, or containing `=` or
/// NUL) before touching the environment.
pub fn read_env_var(name: &str) -> Result<Zeroizing<String>, EntryError> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return Err(EntryError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| EntryError::EnvVarNotFound {
            name: name.to_string(),
        })
}

/// Resolve input from an argument, an environment variable, or stdin, in
/// that order. Blank input counts as missing.
pub fn resolve_input(arg: Option<&str>, env_name: Option<&str>) -> Result<String, EntryError> {
    let value = match (arg, env_name) {
        (Some(value), _) => value.to_string(),
        (None, Some(name)) => read_env_var(name)?.to_string(),
        (None, None) => read_stdin()?,
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(EntryError::NoTokenProvided);
    }
    Ok(value.to_string())
}

fn read_stdin() -> Result<String, EntryError> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(EntryError::NoTokenProvided);
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|_| EntryError::NoTokenProvided)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_env_var_rejects_bad_names() {
        for name in ["", "BAD=NAME", "NUL\0NAME"] {
            let err = read_env_var(name).unwrap_err();
            assert!(matches!(err, EntryError::InvalidEnvVarName { .. }));
        }
    }

    #[test]
    fn test_read_env_var_missing() {
        let err = read_env_var("IDENTITY_ENTRY_SURELY_UNSET_VAR").unwrap_err();
        assert!(matches!(err, EntryError::EnvVarNotFound { name } if name == "IDENTITY_ENTRY_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_resolve_input_prefers_argument() {
        assert_eq!(resolve_input(Some("  a.b.c \n"), None).unwrap(), "a.b.c");
    }

    #[test]
    fn test_resolve_input_blank_argument_is_missing() {
        let err = resolve_input(Some("   "), None).unwrap_err();
        assert!(matches!(err, EntryError::NoTokenProvided));
    }
}
