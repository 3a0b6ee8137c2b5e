//! JavaScript fetch() snippet generation.

use super::protocol::CodegenRequest;

/// Generates an async fetch() snippet.
pub fn generate_fetch(request: &CodegenRequest) -> String {
    let mut code = String::new();

    code.push_str("const options = {\n");
    code.push_str(&format!("  method: '{}',\n", request.method.as_str()));

    if !request.headers.is_empty() {
        code.push_str("  headers: {\n");
        for header in &request.headers {
            code.push_str(&format!(
                "    '{}': '{}',\n",
                escape_js_string(&header.key),
                escape_js_string(&header.value)
            ));
        }
        code.push_str("  },\n");
    }

    if let Some(body) = request.body() {
        if request.is_json() {
            code.push_str(&format!("  body: JSON.stringify({}),\n", js_json_literal(body)));
        } else {
            code.push_str(&format!("  body: '{}',\n", escape_js_string(body)));
        }
    }

    code.push_str("};\n\n");
    code.push_str(&format!(
        "const response = await fetch('{}', options);\n",
        escape_js_string(&request.url)
    ));
    code.push_str("const data = await response.text();\n");
    code.push_str("console.log(response.status, data);\n");

    code
}

fn escape_js_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\'' => "\\'".to_string(),
            '"' => "\\\"".to_string(),
            '\\' => "\\\\".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            c if c.is_control() => format!("\\u{:04x}", c as u32),
            c => c.to_string(),
        })
        .collect()
}

/// A JSON body as an object literal, or as a string literal if it does not parse.
fn js_json_literal(json: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) => value.to_string(),
        Err(_) => format!("'{}'", escape_js_string(json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, KeyValue};

    fn request(method: HttpMethod, headers: Vec<KeyValue>, body: &str) -> CodegenRequest {
        CodegenRequest {
            selected_language: "JavaScript - Fetch".to_string(),
            method,
            url: "https://api.example.com/users".to_string(),
            headers,
            request_body: body.to_string(),
        }
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("hello'world"), "hello\\'world");
        assert_eq!(escape_js_string("a\nb"), "a\\nb");
        assert_eq!(escape_js_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_simple_get() {
        let code = generate_fetch(&request(HttpMethod::GET, vec![], ""));
        assert!(code.contains("method: 'GET'"));
        assert!(code.contains("await fetch('https://api.example.com/users', options)"));
        assert!(!code.contains("headers:"));
        assert!(!code.contains("body:"));
    }

    #[test]
    fn test_json_body_is_object_literal() {
        let code = generate_fetch(&request(
            HttpMethod::POST,
            vec![KeyValue::new("Content-Type", "application/json")],
            r#"{ "name": "Ada" }"#,
        ));
        assert!(code.contains("'Content-Type': 'application/json'"));
        assert!(code.contains(r#"body: JSON.stringify({"name":"Ada"})"#));
    }

    #[test]
    fn test_text_body_is_string_literal() {
        let code = generate_fetch(&request(HttpMethod::POST, vec![], "it's plain"));
        assert!(code.contains("body: 'it\\'s plain'"));
    }
}
