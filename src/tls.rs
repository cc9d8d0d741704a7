//! TLS configuration with a pinned CA root certificate.
//!
//! Internal gateway deployments sign their TLS chains with a private CA,
//! so the root is supplied at runtime (see `ORDERPAD_CA_PEM`) rather
//! than taken from the system store.

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store contains only the CA
/// certificates from the given PEM bytes.
///
/// # Errors
///
/// Returns [`OrderpadError::Tls`](crate::OrderpadError::Tls) if the PEM
/// cannot be parsed or contains no usable certificate.
pub fn build_tls_config(ca_pem: &[u8]) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();

    let certs: Vec<_> = rustls_pemfile::certs(&mut &ca_pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::OrderpadError::Tls(format!("failed to parse CA PEM: {e}")))?;

    let (added, _) = root_store.add_parsable_certificates(certs);
    if added == 0 {
        return Err(crate::OrderpadError::Tls(
            "CA PEM contained no usable certificate".to_string(),
        ));
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}

/// Reads a PEM file from disk and builds the pinned [`ClientConfig`].
///
/// # Errors
///
/// Returns [`OrderpadError::Tls`](crate::OrderpadError::Tls) if the file
/// cannot be read or parsed.
pub fn build_tls_config_from_file(path: &str) -> Result<ClientConfig> {
    let pem = std::fs::read(path)
        .map_err(|e| crate::OrderpadError::Tls(format!("failed to read CA PEM {path}: {e}")))?;
    build_tls_config(&pem)
}
