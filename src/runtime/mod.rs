//! Helpers used by generated wrapper modules at call time.

pub mod envelope;
pub mod normalize;
pub mod status;
pub mod transport;

pub use envelope::{CallHandle, ResponseEnvelope, RpcFailure};
pub use normalize::{normalize_metadata, normalize_payload};
pub use status::StatusCode;
pub use transport::{create_channel, into_request};
