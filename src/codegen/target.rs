//! Snippet targets and their resolution from a free-form language label.

use std::fmt;

/// A (language, variant) pair a snippet can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetTarget {
    JavaScriptFetch,
    JavaScriptXhr,
    NodeNative,
    PythonRequests,
    JavaOkHttp,
    CSharpRestSharp,
    GoNative,
    Curl,
}

/// Label fragments in match order. The first fragment contained in the
/// lower-cased label wins.
const RESOLUTION_ORDER: [(&str, SnippetTarget); 8] = [
    ("javascript - fetch", SnippetTarget::JavaScriptFetch),
    ("javascript - xhr", SnippetTarget::JavaScriptXhr),
    ("nodejs", SnippetTarget::NodeNative),
    ("python", SnippetTarget::PythonRequests),
    ("java", SnippetTarget::JavaOkHttp),
    ("c#", SnippetTarget::CSharpRestSharp),
    ("go", SnippetTarget::GoNative),
    ("curl", SnippetTarget::Curl),
];

impl SnippetTarget {
    /// Resolves a label such as `"JavaScript - Fetch"` or `"cURL"`.
    ///
    /// Anything unrecognised resolves to curl.
    pub fn resolve(selected_language: &str) -> Self {
        let label = selected_language.to_lowercase();
        RESOLUTION_ORDER
            .iter()
            .find(|(fragment, _)| label.contains(fragment))
            .map(|(_, target)| *target)
            .unwrap_or(SnippetTarget::Curl)
    }

    pub fn language(&self) -> &'static str {
        match self {
            SnippetTarget::JavaScriptFetch
            | SnippetTarget::JavaScriptXhr
            | SnippetTarget::NodeNative => "javascript",
            SnippetTarget::PythonRequests => "python",
            SnippetTarget::JavaOkHttp => "java",
            SnippetTarget::CSharpRestSharp => "csharp",
            SnippetTarget::GoNative => "go",
            SnippetTarget::Curl => "curl",
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            SnippetTarget::JavaScriptFetch => "fetch",
            SnippetTarget::JavaScriptXhr => "xhr",
            SnippetTarget::NodeNative | SnippetTarget::GoNative => "native",
            SnippetTarget::PythonRequests => "requests",
            SnippetTarget::JavaOkHttp => "okhttp",
            SnippetTarget::CSharpRestSharp => "restsharp",
            SnippetTarget::Curl => "curl",
        }
    }
}

impl fmt::Display for SnippetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language(), self.variant())
    }
}
