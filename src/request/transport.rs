use std::fs;
use std::sync::LazyLock;

use reqwest::{Client, Identity};

use crate::error::{Error, Result};

use super::builder::Request;

// Shared by every request without custom TLS settings, so connection pooling
// works across calls. `Client::new` is the ecosystem default constructor.
static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(Client::new);

impl Request {
    /// Whether this request needs its own transport: true iff both TLS
    /// client-certificate and key paths are set.
    pub fn requires_custom_transport(&self) -> bool {
        self.tls_cert_path.is_some() && self.tls_key_path.is_some()
    }

    /// Resolves the client to dispatch with.
    ///
    /// With TLS cert and key paths set, builds a dedicated client carrying
    /// the loaded identity and the configured timeout on both the connect
    /// and total-request phases; unreadable or invalid files fail with
    /// [`Error::TlsLoad`]. Otherwise returns the shared default client —
    /// the timeout, when set, is still honored per-request by the dispatch
    /// layer.
    pub(crate) fn resolve_client(&self) -> Result<Client> {
        let (Some(cert_path), Some(key_path)) = (&self.tls_cert_path, &self.tls_key_path) else {
            return Ok(DEFAULT_CLIENT.clone());
        };

        let mut pem = fs::read(cert_path).map_err(|e| {
            Error::tls_load(format!(
                "failed to read client certificate {}: {e}",
                cert_path.display()
            ))
        })?;
        pem.extend(fs::read(key_path).map_err(|e| {
            Error::tls_load(format!(
                "failed to read client key {}: {e}",
                key_path.display()
            ))
        })?);

        let identity = Identity::from_pem(&pem)
            .map_err(|e| Error::tls_load(format!("invalid client certificate/key pair: {e}")))?;

        let mut builder = Client::builder().use_rustls_tls().identity(identity).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))
    }
}
