use crate::utils::error::{Result, WrapgenError};
use std::time::Duration;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `localhost:8080` -> `http://localhost:8080` (or `https://` when secure).
/// Hosts that already carry a scheme are kept as given.
pub fn endpoint_uri(host: &str, secure: bool) -> String {
    if host.contains("://") {
        host.to_string()
    } else if secure {
        format!("https://{}", host)
    } else {
        format!("http://{}", host)
    }
}

/// Opens a lazily-connected channel to `host`; TLS uses the webpki root store.
///
/// Must be called from within a tokio runtime.
pub fn create_channel(host: &str, secure: bool) -> Result<Channel> {
    let uri = endpoint_uri(host, secure);
    tracing::debug!("Creating {} channel to {}", if secure { "secure" } else { "insecure" }, uri);

    let mut endpoint = Endpoint::from_shared(uri)?.connect_timeout(CONNECT_TIMEOUT);
    if secure {
        endpoint = endpoint.tls_config(ClientTlsConfig::new().with_webpki_roots())?;
    }

    Ok(endpoint.connect_lazy())
}

/// Wraps `message` in a request carrying the normalized metadata pairs.
pub fn into_request<T>(message: T, metadata: Vec<(String, String)>) -> Result<tonic::Request<T>> {
    let mut request = tonic::Request::new(message);

    for (key, value) in metadata {
        let metadata_key = MetadataKey::<Ascii>::from_bytes(key.to_lowercase().as_bytes()).map_err(|e| {
            WrapgenError::InvalidMetadataValueError {
                key: key.clone(),
                reason: e.to_string(),
            }
        })?;
        let metadata_value = value.parse::<MetadataValue<Ascii>>().map_err(|e| {
            WrapgenError::InvalidMetadataValueError {
                key: key.clone(),
                reason: e.to_string(),
            }
        })?;
        request.metadata_mut().append(metadata_key, metadata_value);
    }

    Ok(request)
}
