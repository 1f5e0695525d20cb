//! Uniform result of one remote call.
//!
//! A call either succeeds, yielding the decoded payload together with its call
//! handle, or fails with an [`RpcFailure`]. Non-OK statuses are data here, not
//! errors: callers inspect the envelope instead of matching on `Err`.

use crate::runtime::status::StatusCode;
use crate::utils::error::{Result, WrapgenError};
use std::collections::HashMap;
use tonic::metadata::{KeyAndValueRef, MetadataMap};

/// Status and trailing metadata of a completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    code: StatusCode,
    trailing_metadata: Vec<(String, String)>,
}

impl CallHandle {
    pub fn new(code: StatusCode, trailing_metadata: Vec<(String, String)>) -> Self {
        Self {
            code,
            trailing_metadata,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn trailing_metadata(&self) -> &[(String, String)] {
        &self.trailing_metadata
    }
}

/// A call that ended with a non-OK status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFailure {
    code: StatusCode,
    message: String,
    trailing_metadata: Vec<(String, String)>,
}

impl RpcFailure {
    pub fn new(
        code: StatusCode,
        message: impl Into<String>,
        trailing_metadata: Vec<(String, String)>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            trailing_metadata,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trailing_metadata(&self) -> &[(String, String)] {
        &self.trailing_metadata
    }
}

impl From<&tonic::Status> for RpcFailure {
    fn from(status: &tonic::Status) -> Self {
        Self::new(
            status.code().into(),
            status.message(),
            metadata_pairs(status.metadata()),
        )
    }
}

impl From<tonic::Status> for RpcFailure {
    fn from(status: tonic::Status) -> Self {
        Self::from(&status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<T> {
    Success { payload: T, call: CallHandle },
    Failure { failure: RpcFailure },
}

impl<T> ResponseEnvelope<T> {
    pub fn success(payload: T, call: CallHandle) -> Self {
        ResponseEnvelope::Success { payload, call }
    }

    pub fn failure(failure: RpcFailure) -> Self {
        ResponseEnvelope::Failure { failure }
    }

    /// Builds an envelope from loosely-typed parts, rejecting any combination
    /// other than (payload + OK call) or a non-OK failure alone.
    pub fn from_parts(
        payload: Option<T>,
        call: Option<CallHandle>,
        failure: Option<RpcFailure>,
    ) -> Result<Self> {
        match (payload, call, failure) {
            (Some(_), Some(call), None) if !call.code().is_ok() => Err(invalid_state(&format!(
                "a successful call must have status OK, got {}",
                call.code()
            ))),
            (None, None, Some(failure)) if failure.code().is_ok() => {
                Err(invalid_state("a failure cannot have status OK"))
            }
            (Some(payload), Some(call), None) => Ok(Self::success(payload, call)),
            (None, None, Some(failure)) => Ok(Self::failure(failure)),
            (_, Some(_), Some(_)) => Err(invalid_state("both a call handle and a failure were given")),
            (_, None, None) => Err(invalid_state("neither a call handle nor a failure was given")),
            (None, Some(_), None) => Err(invalid_state("a successful call requires a payload")),
            (Some(_), None, Some(_)) => Err(invalid_state("a failed call cannot carry a payload")),
        }
    }

    /// Converts the outcome of a tonic unary call.
    pub fn from_tonic(result: std::result::Result<tonic::Response<T>, tonic::Status>) -> Self {
        match result {
            Ok(response) => {
                let call = CallHandle::new(StatusCode::Ok, metadata_pairs(response.metadata()));
                Self::success(response.into_inner(), call)
            }
            Err(status) => Self::failure(RpcFailure::from(&status)),
        }
    }

    pub fn status_code(&self) -> &'static str {
        self.code().as_str()
    }

    pub fn code(&self) -> StatusCode {
        match self {
            ResponseEnvelope::Success { call, .. } => call.code(),
            ResponseEnvelope::Failure { failure } => failure.code(),
        }
    }

    /// Trailing metadata as a map; a repeated key keeps its last value.
    pub fn metadata(&self) -> HashMap<String, String> {
        let pairs = match self {
            ResponseEnvelope::Success { call, .. } => call.trailing_metadata(),
            ResponseEnvelope::Failure { failure } => failure.trailing_metadata(),
        };

        pairs.iter().cloned().collect()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            ResponseEnvelope::Success { payload, .. } => Some(payload),
            ResponseEnvelope::Failure { .. } => None,
        }
    }

    pub fn call(&self) -> Option<&CallHandle> {
        match self {
            ResponseEnvelope::Success { call, .. } => Some(call),
            ResponseEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RpcFailure> {
        match self {
            ResponseEnvelope::Success { .. } => None,
            ResponseEnvelope::Failure { failure } => Some(failure),
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            ResponseEnvelope::Success { payload, .. } => Some(payload),
            ResponseEnvelope::Failure { .. } => None,
        }
    }
}

fn invalid_state(reason: &str) -> WrapgenError {
    WrapgenError::InvalidEnvelopeStateError {
        reason: reason.to_string(),
    }
}

/// 將 tonic 的 metadata 轉為 (key, value) 序列；二進位值以原始編碼保留
pub fn metadata_pairs(metadata: &MetadataMap) -> Vec<(String, String)> {
    metadata
        .iter()
        .map(|entry| match entry {
            KeyAndValueRef::Ascii(key, value) => (
                key.as_str().to_string(),
                String::from_utf8_lossy(value.as_encoded_bytes()).into_owned(),
            ),
            KeyAndValueRef::Binary(key, value) => (
                key.as_str().to_string(),
                String::from_utf8_lossy(value.as_encoded_bytes()).into_owned(),
            ),
        })
        .collect()
}
