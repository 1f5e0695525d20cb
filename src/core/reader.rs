use crate::core::matcher::ProtoLineMatcher;
use crate::domain::model::{DeclarationLine, ParseResult, ServiceDef};
use crate::domain::ports::DeclarationSyntax;
use crate::utils::error::{Result, WrapgenError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Builds the service/endpoint model of a declaration file, one line at a time.
#[derive(Debug, Clone, Default)]
pub struct DeclarationReader<S: DeclarationSyntax = ProtoLineMatcher> {
    syntax: S,
}

impl DeclarationReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DeclarationSyntax> DeclarationReader<S> {
    pub fn with_syntax(syntax: S) -> Self {
        Self { syntax }
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseResult> {
        let path = path.as_ref();
        tracing::debug!("Reading declarations from {}", path.display());

        let file = File::open(path)?;
        self.read(&path.display().to_string(), BufReader::new(file))
    }

    pub fn read_str(&self, source: &str, text: &str) -> Result<ParseResult> {
        self.read(source, text.as_bytes())
    }

    /// `source` is only used to label errors.
    pub fn read<R: BufRead>(&self, source: &str, input: R) -> Result<ParseResult> {
        let mut services: Vec<ServiceDef> = Vec::new();
        // 目前所在的 service，每個檔案重新開始
        let mut active: Option<usize> = None;

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match self.syntax.classify(trimmed) {
                DeclarationLine::ServiceStart { name } => {
                    tracing::debug!("Found service {}", name);
                    services.push(ServiceDef::new(name));
                    active = Some(services.len() - 1);
                }
                DeclarationLine::Endpoint(endpoint) => {
                    let Some(current) = active.and_then(|i| services.get_mut(i)) else {
                        return Err(WrapgenError::MalformedDeclarationError {
                            file: source.to_string(),
                            line_number: index + 1,
                            line: trimmed.to_string(),
                        });
                    };
                    tracing::debug!(
                        "Found endpoint {}.{} ({} -> {})",
                        current.name,
                        endpoint.name,
                        endpoint.request_type,
                        endpoint.response_type
                    );
                    current.add_endpoint(endpoint);
                }
                DeclarationLine::Other => {}
            }
        }

        Ok(ParseResult { services })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EndpointDef;

    const DEMO: &str = r#"
syntax = "proto3";

package demo;

service Demo {
    rpc send(SendRequest) returns (SendResponse);
}

message SendRequest {
    string body = 1;
}
"#;

    #[test]
    fn test_read_single_service() {
        let result = DeclarationReader::new().read_str("demo.proto", DEMO).unwrap();

        assert_eq!(result.services.len(), 1);
        assert_eq!(result.services[0].name, "Demo");
        assert_eq!(
            result.services[0].endpoints(),
            &[EndpointDef::new("send", "SendRequest", "SendResponse")]
        );
    }

    #[test]
    fn test_preserves_declaration_order() {
        let text = r#"
service Alpha {
  rpc One(OneRequest) returns (OneResponse);
  rpc Two(TwoRequest) returns (stream TwoResponse);
  rpc Three(ThreeRequest) returns (ThreeResponse);
}
service Beta {
}
service Gamma {
  rpc Four(FourRequest) returns (FourResponse);
}
"#;
        let result = DeclarationReader::new().read_str("order.proto", text).unwrap();

        let names: Vec<&str> = result.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

        let counts: Vec<usize> = result.services.iter().map(|s| s.endpoints().len()).collect();
        assert_eq!(counts, vec![3, 0, 1]);

        let alpha: Vec<&str> = result.services[0]
            .endpoints()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(alpha, vec!["One", "Two", "Three"]);
        assert_eq!(result.endpoint_count(), 4);
    }

    #[test]
    fn test_no_services_is_empty_result() {
        let text = "syntax = \"proto3\";\nmessage Ping {\n  string id = 1;\n}\n";
        let result = DeclarationReader::new().read_str("messages.proto", text).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicates_pass_through() {
        let text = r#"
service Demo {
  rpc send(SendRequest) returns (SendResponse);
  rpc send(SendRequest) returns (SendResponse);
}
"#;
        let result = DeclarationReader::new().read_str("dup.proto", text).unwrap();
        assert_eq!(result.services[0].endpoints().len(), 2);
        assert_eq!(result.services[0].endpoints()[0], result.services[0].endpoints()[1]);
    }

    #[test]
    fn test_endpoint_before_service_is_malformed() {
        let text = "rpc send(SendRequest) returns (SendResponse)\nservice Demo {\n}\n";
        let err = DeclarationReader::new().read_str("bad.proto", text).unwrap_err();

        match err {
            WrapgenError::MalformedDeclarationError {
                file, line_number, ..
            } => {
                assert_eq!(file, "bad.proto");
                assert_eq!(line_number, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_syntax_is_used() {
        struct NothingMatches;
        impl DeclarationSyntax for NothingMatches {
            fn classify(&self, _line: &str) -> DeclarationLine {
                DeclarationLine::Other
            }
        }

        let result = DeclarationReader::with_syntax(NothingMatches)
            .read_str("demo.proto", DEMO)
            .unwrap();
        assert!(result.is_empty());
    }
}
