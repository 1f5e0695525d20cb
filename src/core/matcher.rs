use crate::domain::model::{DeclarationLine, EndpointDef};
use crate::domain::ports::DeclarationSyntax;
use regex::Regex;
use std::sync::LazyLock;

static SERVICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^service\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{").expect("service pattern is valid")
});

// `stream` 只做辨識，不保留在 EndpointDef 上
static ENDPOINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rpc\s*([a-zA-Z]+)\s*\(([a-zA-Z]+)\)\s*returns\s*\(\s*(?:stream\s+)?([a-zA-Z]+)\s*\).*",
    )
    .expect("endpoint pattern is valid")
});

/// Returns the service name when `line` opens a `service <Name> {` block.
pub fn match_service(line: &str) -> Option<&str> {
    SERVICE_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the endpoint declared by an `rpc name(Request) returns (Response)` line.
pub fn match_endpoint(line: &str) -> Option<EndpointDef> {
    let caps = ENDPOINT_PATTERN.captures(line)?;
    Some(EndpointDef::new(&caps[1], &caps[2], &caps[3]))
}

/// Line-oriented matcher for the subset of proto syntax the generator understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoLineMatcher;

impl DeclarationSyntax for ProtoLineMatcher {
    fn classify(&self, line: &str) -> DeclarationLine {
        if let Some(name) = match_service(line) {
            return DeclarationLine::ServiceStart {
                name: name.to_string(),
            };
        }

        match match_endpoint(line) {
            Some(endpoint) => DeclarationLine::Endpoint(endpoint),
            None => DeclarationLine::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_service() {
        assert_eq!(match_service("service Demo {"), Some("Demo"));
        assert_eq!(match_service("service Greeter{"), Some("Greeter"));
        assert_eq!(match_service("service Demo { // comment"), Some("Demo"));
        assert_eq!(match_service("message Demo {"), None);
        assert_eq!(match_service("// service Demo {"), None);
        assert_eq!(match_service("service Demo"), None);
    }

    #[test]
    fn test_match_endpoint_captures_literal_tokens() {
        let endpoint = match_endpoint("rpc send(SendRequest) returns (SendResponse)").unwrap();
        assert_eq!(endpoint, EndpointDef::new("send", "SendRequest", "SendResponse"));

        let spaced = match_endpoint("rpc  Send (SendRequest)  returns(SendResponse);").unwrap();
        assert_eq!(spaced, EndpointDef::new("Send", "SendRequest", "SendResponse"));
    }

    #[test]
    fn test_match_endpoint_ignores_stream_marker_and_trailing_tokens() {
        let endpoint =
            match_endpoint("rpc Watch(WatchRequest) returns (stream WatchEvent) {}").unwrap();
        assert_eq!(endpoint, EndpointDef::new("Watch", "WatchRequest", "WatchEvent"));

        let with_options =
            match_endpoint("rpc Get(GetRequest) returns (GetResponse) { option deprecated = true; }")
                .unwrap();
        assert_eq!(with_options.response_type, "GetResponse");
    }

    #[test]
    fn test_lowercase_response_starting_with_stream_letters() {
        let endpoint = match_endpoint("rpc get(query) returns (result)").unwrap();
        assert_eq!(endpoint.response_type, "result");
    }

    #[test]
    fn test_match_endpoint_rejects_other_lines() {
        assert!(match_endpoint("message SendRequest {").is_none());
        assert!(match_endpoint("rpc send(send.Request) returns (SendResponse)").is_none());
        assert!(match_endpoint("rpc send(SendRequest)").is_none());
        assert!(match_endpoint("// rpc send(SendRequest) returns (SendResponse)").is_none());
    }

    #[test]
    fn test_classify() {
        let matcher = ProtoLineMatcher;
        assert_eq!(
            matcher.classify("service Demo {"),
            DeclarationLine::ServiceStart {
                name: "Demo".to_string()
            }
        );
        assert!(matches!(
            matcher.classify("rpc send(SendRequest) returns (SendResponse)"),
            DeclarationLine::Endpoint(_)
        ));
        assert_eq!(matcher.classify("syntax = \"proto3\";"), DeclarationLine::Other);
    }
}
