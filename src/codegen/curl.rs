//! cURL command generation.

use super::protocol::CodegenRequest;
use crate::models::HttpMethod;

/// Commands up to this length stay on one line.
const SINGLE_LINE_LIMIT: usize = 80;

const SHELL_SPECIAL: [char; 26] = [
    ' ', '\t', '\n', '\r', '|', '&', ';', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', '*', '?',
    '[', ']', '#', '~', '=', '%', '{', '}',
];

/// Generates a cURL command. Headers keep their request order.
pub fn generate_curl(request: &CodegenRequest) -> String {
    let mut parts = vec!["curl".to_string()];

    if request.method != HttpMethod::GET {
        parts.push("-X".to_string());
        parts.push(request.method.as_str().to_string());
    }

    for header in &request.headers {
        parts.push("-H".to_string());
        parts.push(escape_shell_arg(&format!("{}: {}", header.key, header.value)));
    }

    if let Some(body) = request.body() {
        parts.push("--data-raw".to_string());
        parts.push(escape_shell_arg(body));
    }

    parts.push(escape_shell_arg(&request.url));

    format_multiline(&parts)
}

/// Single-quotes `arg` when the shell would otherwise interpret it.
fn escape_shell_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.chars().any(|c| SHELL_SPECIAL.contains(&c)) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\\''"))
}

fn format_multiline(parts: &[String]) -> String {
    let single_line = parts.join(" ");
    if single_line.len() <= SINGLE_LINE_LIMIT {
        return single_line;
    }

    // Keep flag/value pairs together on continuation lines
    let mut result = parts[0].clone();
    let mut rest = parts[1..].iter().peekable();
    while let Some(part) = rest.next() {
        result.push_str(" \\\n  ");
        result.push_str(part);
        if part.starts_with('-') {
            if let Some(value) = rest.next() {
                result.push(' ');
                result.push_str(value);
            }
        }
    }
    result
}
