use serde::Serialize;

/// One `rpc` line of a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDef {
    pub name: String,
    pub request_type: String,
    pub response_type: String,
}

impl EndpointDef {
    pub fn new(
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            request_type: request_type.into(),
            response_type: response_type.into(),
        }
    }
}

/// A `service` block and its endpoints, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDef {
    pub name: String,
    endpoints: Vec<EndpointDef>,
}

impl ServiceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    pub fn add_endpoint(&mut self, endpoint: EndpointDef) {
        self.endpoints.push(endpoint);
    }

    pub fn endpoints(&self) -> &[EndpointDef] {
        &self.endpoints
    }
}

/// All services read from a single declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub services: Vec<ServiceDef>,
}

impl ParseResult {
    pub fn endpoint_count(&self) -> usize {
        self.services.iter().map(|s| s.endpoints().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// 單一宣告檔的產生結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModule {
    pub file_name: String,
    pub output_path: String,
    pub service_count: usize,
    pub endpoint_count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub service: String,
    pub modules: Vec<GeneratedModule>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn total_endpoints(&self) -> usize {
        self.modules.iter().map(|m| m.endpoint_count).sum()
    }
}

/// Classification of one trimmed declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationLine {
    ServiceStart { name: String },
    Endpoint(EndpointDef),
    Other,
}
