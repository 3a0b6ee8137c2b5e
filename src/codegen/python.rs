//! Python requests snippet generation.

use super::protocol::CodegenRequest;

/// Generates a snippet using the requests library.
pub fn generate_requests(request: &CodegenRequest) -> String {
    let mut code = String::new();

    code.push_str("import requests\n\n");
    code.push_str(&format!("url = '{}'\n", escape_python_string(&request.url)));

    if request.headers.is_empty() {
        code.push_str("headers = {}\n");
    } else {
        code.push_str("headers = {\n");
        for header in &request.headers {
            code.push_str(&format!(
                "    '{}': '{}',\n",
                escape_python_string(&header.key),
                escape_python_string(&header.value)
            ));
        }
        code.push_str("}\n");
    }

    let body = request.body();
    if let Some(body) = body {
        code.push_str(&format!("payload = '{}'\n", escape_python_string(body)));
    }

    code.push('\n');
    code.push_str(&format!(
        "response = requests.request('{}', url, headers=headers",
        request.method.as_str()
    ));
    if body.is_some() {
        code.push_str(", data=payload");
    }
    code.push_str(")\n\n");
    code.push_str("print(response.status_code)\n");
    code.push_str("print(response.text)\n");

    code
}

fn escape_python_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
