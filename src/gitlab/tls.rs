//! Trusted certificate loading and HTTP transport construction

use std::fs;
use std::time::Duration;

use log::debug;
use reqwest::{Certificate, Client};

use crate::error::{GitlabError, Result};

/// Resolve certificate entries to PEM blobs
///
/// An entry starting with `@` names a file to read; anything else is taken
/// as literal PEM text.
pub fn dereference(values: &[String]) -> Result<Vec<Vec<u8>>> {
    values
        .iter()
        .map(|value| match value.strip_prefix('@') {
            Some(path) => fs::read(path).map_err(|e| {
                GitlabError::Certificate(format!("reading '{}': {}", value, e))
            }),
            None => Ok(value.as_bytes().to_vec()),
        })
        .collect()
}

/// Build the HTTP client used for every API call
///
/// The platform trust store is kept; every certificate found in `pems` is
/// trusted in addition.
pub fn build_http_client(pems: &[Vec<u8>]) -> Result<Client> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(20)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30));

    let mut trusted = Vec::new();
    for (index, pem) in pems.iter().enumerate() {
        let certs = parse_bundle(pem)
            .map_err(|msg| GitlabError::Certificate(format!("entry {}: {}", index + 1, msg)))?;
        debug!("Trusting {} certificate(s) from entry {}", certs.len(), index + 1);
        trusted.extend(certs);
    }
    if !trusted.is_empty() {
        builder = builder.tls_certs_merge(trusted);
    }

    builder
        .build()
        .map_err(|e| GitlabError::Certificate(format!("building HTTP client: {}", e)))
}

fn parse_bundle(pem: &[u8]) -> std::result::Result<Vec<Certificate>, String> {
    let certs = Certificate::from_pem_bundle(pem).map_err(|e| e.to_string())?;
    if certs.is_empty() {
        return Err("no PEM certificates found".to_string());
    }
    Ok(certs)
}
