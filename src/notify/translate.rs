//! Message lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const CODEGEN_ENTER_URL: &str = "codegen.enterUrl";
pub const CODEGEN_UNAVAILABLE: &str = "codegen.unavailable";
pub const CODEGEN_FAILED: &str = "codegen.failed";
pub const RESPONSE_INVALID_JSON: &str = "response.invalidJson";
pub const REQUEST_FAILED: &str = "request.failed";
pub const VARIABLE_REJECTED: &str = "variables.rejected";

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (CODEGEN_ENTER_URL, "Enter a URL to generate a code snippet"),
        (CODEGEN_UNAVAILABLE, "Code snippet unavailable"),
        (CODEGEN_FAILED, "Failed to generate code snippet"),
        (RESPONSE_INVALID_JSON, "Response is not valid JSON"),
        (REQUEST_FAILED, "Request failed: {message}"),
        (VARIABLE_REJECTED, "Variable '{key}' was not saved"),
    ])
});

/// Resolves message keys to display strings.
pub trait Translator: Send + Sync {
    /// Looks up `key` and substitutes each `{name}` in it with its param.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// English message table. Unknown keys translate to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = ENGLISH.get(key).copied().unwrap_or(key);
        substitute(template, params)
    }
}

fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}
