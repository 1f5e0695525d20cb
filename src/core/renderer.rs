use crate::domain::model::ParseResult;
use crate::utils::error::{Result, WrapgenError};
use std::path::Path;

pub const FILE_NAME_PLACEHOLDER: &str = "{file_name}";
pub const SERVICE_NAME_PLACEHOLDER: &str = "{service_name}";
pub const ENDPOINT_PLACEHOLDER: &str = "{endpoint}";
pub const REQUEST_PLACEHOLDER: &str = "{request}";

pub const DEFAULT_ENDPOINT_TEMPLATE: &str = include_str!("../../templates/endpoint.rs.tmpl");

/// Per-endpoint text template with `{file_name}`, `{service_name}`,
/// `{endpoint}` and `{request}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    text: String,
}

impl EndpointTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_ENDPOINT_TEMPLATE)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map(Self::new)
            .map_err(|e| WrapgenError::TemplateError {
                message: format!("cannot read template {}: {}", path.display(), e),
            })
    }

    /// 依序替換四個佔位符
    pub fn render(&self, file_name: &str, service_name: &str, endpoint: &str, request: &str) -> String {
        self.text
            .replace(FILE_NAME_PLACEHOLDER, file_name)
            .replace(SERVICE_NAME_PLACEHOLDER, service_name)
            .replace(ENDPOINT_PLACEHOLDER, endpoint)
            .replace(REQUEST_PLACEHOLDER, request)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for EndpointTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Module preamble: generated bindings for `file_name` plus the runtime helpers.
pub fn render_header(file_name: &str) -> String {
    format!(
        "// @generated by grpc-wrapgen from {file_name}.proto. Do not edit.\n\
         #![allow(non_snake_case, dead_code)]\n\
         \n\
         use super::{file_name}_grpc;\n\
         use super::{file_name}_pb;\n\
         use grpc_wrapgen::runtime::{{\n    \
         create_channel, into_request, normalize_metadata, normalize_payload, ResponseEnvelope,\n\
         }};\n"
    )
}

/// Renders the wrapper module for one declaration file: the header, then one
/// template block per endpoint in declaration order.
pub fn render_module(result: &ParseResult, file_name: &str, template: &EndpointTemplate) -> String {
    let mut module = render_header(file_name);

    for service in &result.services {
        for endpoint in service.endpoints() {
            let block = template.render(
                file_name,
                &service.name,
                &endpoint.name,
                &endpoint.request_type,
            );
            module.push('\n');
            module.push_str(block.trim_end());
            module.push('\n');
        }
    }

    module
}

/// `helloWorld.proto` -> `helloWorld`; `None` when the extension does not match.
pub fn base_name(path: &Path, extension: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
