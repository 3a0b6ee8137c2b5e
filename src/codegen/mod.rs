//! Code snippet generation.
//!
//! The client side ([`CodeSnippetRequestor`]) turns the draft into a
//! [`CodegenRequest`] and hands it to a [`CodeGenerator`]. The endpoint side
//! ([`handle_codegen_request`]) resolves a [`SnippetTarget`] from the
//! language label and runs a [`SnippetGenerator`]; [`BuiltinGenerator`]
//! covers curl, JavaScript fetch and Python requests.

pub mod client;
pub mod curl;
pub mod javascript;
pub mod protocol;
pub mod python;
pub mod requestor;
pub mod service;
pub mod target;

pub use client::{classify_codegen_reply, CodeGenerator, CodegenError, LocalCodeGenerator};
#[cfg(feature = "native")]
pub use client::HttpCodeGenerator;
pub use protocol::{CodegenReply, CodegenRequest, CodegenResponse};
pub use requestor::{CodeSnippetRequestor, SnippetState};
pub use service::{handle_codegen_request, BuiltinGenerator, GenerationError, SnippetGenerator};
pub use target::SnippetTarget;
