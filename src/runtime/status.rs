use serde::Serialize;
use std::fmt;

/// Canonical gRPC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::Unknown => "UNKNOWN",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::AlreadyExists => "ALREADY_EXISTS",
            StatusCode::PermissionDenied => "PERMISSION_DENIED",
            StatusCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Aborted => "ABORTED",
            StatusCode::OutOfRange => "OUT_OF_RANGE",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::DataLoss => "DATA_LOSS",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tonic::Code> for StatusCode {
    fn from(code: tonic::Code) -> Self {
        match code {
            tonic::Code::Ok => StatusCode::Ok,
            tonic::Code::Cancelled => StatusCode::Cancelled,
            tonic::Code::Unknown => StatusCode::Unknown,
            tonic::Code::InvalidArgument => StatusCode::InvalidArgument,
            tonic::Code::DeadlineExceeded => StatusCode::DeadlineExceeded,
            tonic::Code::NotFound => StatusCode::NotFound,
            tonic::Code::AlreadyExists => StatusCode::AlreadyExists,
            tonic::Code::PermissionDenied => StatusCode::PermissionDenied,
            tonic::Code::ResourceExhausted => StatusCode::ResourceExhausted,
            tonic::Code::FailedPrecondition => StatusCode::FailedPrecondition,
            tonic::Code::Aborted => StatusCode::Aborted,
            tonic::Code::OutOfRange => StatusCode::OutOfRange,
            tonic::Code::Unimplemented => StatusCode::Unimplemented,
            tonic::Code::Internal => StatusCode::Internal,
            tonic::Code::Unavailable => StatusCode::Unavailable,
            tonic::Code::DataLoss => StatusCode::DataLoss,
            tonic::Code::Unauthenticated => StatusCode::Unauthenticated,
        }
    }
}
