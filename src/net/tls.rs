//! TLS credential loading and key-pair construction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::ring;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use thiserror::Error;

/// Error type for credential loading.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read certificate from path {path:?}: {source}")]
    ReadCertificate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read key from path {path:?}: {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed PEM in certificate file {path:?}: {source}")]
    MalformedCertificate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no certificate found in {path:?}")]
    NoCertificate { path: PathBuf },

    #[error("malformed PEM in key file {path:?}: {source}")]
    MalformedKey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no private key found in {path:?}")]
    NoPrivateKey { path: PathBuf },

    #[error("failed to generate a key pair from the cert and key: {source}")]
    KeyPair {
        #[source]
        source: rustls::Error,
    },
}

/// A validated TLS key pair, ready for the TLS-serving call.
#[derive(Clone, Debug)]
pub struct TlsKeyPair {
    config: RustlsConfig,
}

impl TlsKeyPair {
    /// The rustls server configuration backing this key pair.
    pub fn rustls_config(&self) -> RustlsConfig {
        self.config.clone()
    }
}

/// Credential material read at startup: the raw PEM bytes handed to the
/// server-start call, plus the validated key pair used for serving.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
    pub key_pair: TlsKeyPair,
}

/// Read certificate and key files and pair them into a [`TlsKeyPair`].
///
/// One-shot, startup-only: every failure names the offending path so a
/// misconfigured deployment can be diagnosed from the error alone.
pub fn load_credentials(cert_path: &Path, key_path: &Path) -> Result<Credentials, CredentialError> {
    let cert_pem = fs::read(cert_path).map_err(|source| CredentialError::ReadCertificate {
        path: cert_path.to_path_buf(),
        source,
    })?;
    let key_pem = fs::read(key_path).map_err(|source| CredentialError::ReadKey {
        path: key_path.to_path_buf(),
        source,
    })?;

    let key_pair = pair_credentials(&cert_pem, &key_pem, cert_path, key_path)?;

    Ok(Credentials {
        cert_pem,
        key_pem,
        key_pair,
    })
}

fn pair_credentials(
    cert_pem: &[u8],
    key_pem: &[u8],
    cert_path: &Path,
    key_path: &Path,
) -> Result<TlsKeyPair, CredentialError> {
    let certs = rustls_pemfile::certs(&mut &cert_pem[..])
        .collect::<Result<Vec<CertificateDer<'static>>, _>>()
        .map_err(|source| CredentialError::MalformedCertificate {
            path: cert_path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(CredentialError::NoCertificate {
            path: cert_path.to_path_buf(),
        });
    }

    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut &key_pem[..])
        .map_err(|source| CredentialError::MalformedKey {
            path: key_path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| CredentialError::NoPrivateKey {
            path: key_path.to_path_buf(),
        })?;

    // with_single_cert rejects a key that does not match the certificate.
    let server_config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|source| CredentialError::KeyPair { source })?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|source| CredentialError::KeyPair { source })?;

    Ok(TlsKeyPair {
        config: RustlsConfig::from_config(Arc::new(server_config)),
    })
}
