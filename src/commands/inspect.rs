//! Handler for the `inspect` subcommand.
//!
//! Decodes and prints the header and claims of an entry URL or bare
//! token without verifying its signature. Reads the input from a CLI
//! argument, environment variable, or stdin.

use anyhow::Result;
use identity_entry::core::decoder::{decode_token, extract_token};

use crate::cli::InspectArgs;
use crate::commands::resolve_input;
use crate::display::json_printer::{print_json, print_section};
use crate::display::token_status::display_token_status;

/// Execute the `inspect` subcommand with the given arguments.
pub fn execute(args: &InspectArgs) -> Result<()> {
    let input = resolve_input(args.input.as_deref(), args.token_env.as_deref())?;
    let token = extract_token(&input)?;
    let decoded = decode_token(&token)?;

    if args.json {
        let output = serde_json::json!({
            "header": decoded.header,
            "payload": decoded.payload,
        });
        print_json(&output, false);
        return Ok(());
    }

    print_section("Header");
    print_json(&decoded.header, true);
    print_section("Payload");
    print_json(&decoded.payload, true);
    print_section("Token Status");
    display_token_status(&decoded.payload);
    Ok(())
}
