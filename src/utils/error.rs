use thiserror::Error;

#[derive(Error, Debug)]
pub enum WrapgenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    TransportError(#[from] tonic::transport::Error),

    #[error("Malformed declaration in {file} at line {line_number}: endpoint `{line}` has no enclosing service")]
    MalformedDeclarationError {
        file: String,
        line_number: usize,
        line: String,
    },

    #[error("Invalid payload type: data should be a JSON string or object, got {found}")]
    InvalidPayloadTypeError { found: String },

    #[error("Invalid metadata type: metadata should be an object, got {found}")]
    InvalidMetadataTypeError { found: String },

    #[error("Invalid metadata entry `{key}`: {reason}")]
    InvalidMetadataValueError { key: String, reason: String },

    #[error("Invalid response envelope state: {reason}")]
    InvalidEnvelopeStateError { reason: String },

    #[error("Binding compiler failed for {file}: {message}")]
    CompilerError { file: String, message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Declaration,
    Runtime,
    Generation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WrapgenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WrapgenError::MalformedDeclarationError { .. } => ErrorCategory::Declaration,
            WrapgenError::InvalidPayloadTypeError { .. }
            | WrapgenError::InvalidMetadataTypeError { .. }
            | WrapgenError::InvalidMetadataValueError { .. }
            | WrapgenError::InvalidEnvelopeStateError { .. }
            | WrapgenError::TransportError(_) => ErrorCategory::Runtime,
            WrapgenError::CompilerError { .. }
            | WrapgenError::TemplateError { .. }
            | WrapgenError::SerializationError(_) => ErrorCategory::Generation,
            WrapgenError::ConfigError { .. }
            | WrapgenError::ConfigValidationError { .. }
            | WrapgenError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            WrapgenError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Runtime => ErrorSeverity::Medium,
            ErrorCategory::Declaration
            | ErrorCategory::Generation
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WrapgenError::MalformedDeclarationError { .. } => {
                "Make sure every `rpc` line is declared inside a `service <Name> {` block"
            }
            WrapgenError::InvalidPayloadTypeError { .. } => {
                "Pass the request data as a JSON object or a JSON-encoded string"
            }
            WrapgenError::InvalidMetadataTypeError { .. } => {
                "Pass the metadata as a JSON object of string keys"
            }
            WrapgenError::InvalidMetadataValueError { .. } => {
                "Metadata keys must be lowercase ASCII and values printable ASCII"
            }
            WrapgenError::InvalidEnvelopeStateError { .. } => {
                "The transport returned an inconsistent call result; report it as a bug"
            }
            WrapgenError::TransportError(_) => "Check the host address and TLS settings",
            WrapgenError::CompilerError { .. } => {
                "Check that protoc and its plugins are installed, or run with --skip-compile"
            }
            WrapgenError::TemplateError { .. } => {
                "Check that the endpoint template file exists and is valid UTF-8"
            }
            WrapgenError::SerializationError(_) => "Check the JSON data passed to the call",
            WrapgenError::ConfigError { .. }
            | WrapgenError::ConfigValidationError { .. }
            | WrapgenError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            WrapgenError::IoError(_) => "Check file permissions and that the paths exist",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Declaration => format!("Could not read service declarations: {}", self),
            ErrorCategory::Runtime => format!("gRPC call could not be prepared: {}", self),
            ErrorCategory::Generation => format!("Code generation failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WrapgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_declaration_is_high_severity() {
        let err = WrapgenError::MalformedDeclarationError {
            file: "demo.proto".to_string(),
            line_number: 3,
            line: "rpc send(SendRequest) returns (SendResponse)".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Declaration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("demo.proto"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let errors = [
            WrapgenError::ConfigError {
                message: "missing directory".to_string(),
            },
            WrapgenError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: "bad".to_string(),
            },
            WrapgenError::InvalidConfigValueError {
                field: "compiler.program".to_string(),
                value: " ".to_string(),
                reason: "empty".to_string(),
            },
        ];

        for err in errors {
            assert_eq!(err.category(), ErrorCategory::Configuration);
            assert!(err.user_friendly_message().starts_with("Invalid configuration"));
        }
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: WrapgenError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("System error"));
    }
}
