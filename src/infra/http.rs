use reqwest::blocking::Client;
use tracing::debug;

use crate::error::Result;

/// Shared blocking client. Lookup and download borrow it; the certificate
/// toggle replaces it wholesale before any request is made.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    ignore_ssl_errors: bool,
    builds: u32,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(false)?,
            ignore_ssl_errors: false,
            builds: 1,
        })
    }

    /// Returns true when the client had to be rebuilt.
    pub fn set_ignore_ssl_errors(&mut self, ignore: bool) -> Result<bool> {
        if ignore == self.ignore_ssl_errors {
            return Ok(false);
        }

        self.client = build_client(ignore)?;
        self.ignore_ssl_errors = ignore;
        self.builds += 1;
        debug!(ignore, "rebuilt HTTP client");
        Ok(true)
    }

    pub fn ignores_ssl_errors(&self) -> bool {
        self.ignore_ssl_errors
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// How many times the underlying client has been built.
    pub fn builds(&self) -> u32 {
        self.builds
    }
}

fn build_client(ignore_ssl_errors: bool) -> Result<Client> {
    Ok(Client::builder()
        .danger_accept_invalid_certs(ignore_ssl_errors)
        .build()?)
}
