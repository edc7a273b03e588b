//! JSON printing for terminal output.

use serde_json::Value;

/// Print a JSON value to stdout.
///
/// Pretty output uses 2-space indentation; compact output is a single
/// line suitable for piping into other tools.
pub fn print_json(value: &Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    // Serializing a `Value` cannot fail.
    if let Ok(text) = rendered {
        println!("{text}");
    }
}

/// Print a section heading such as `--- Header ---`.
pub fn print_section(title: &str) {
    println!("--- {title} ---");
}
