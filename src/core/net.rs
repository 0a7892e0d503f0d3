// src/core/net.rs
// Form POST against the case status endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::consts::{FORM_LOCALE, FORM_RECEIPT, FORM_SEARCH, FORM_SEARCH_VALUE, USER_AGENT};
use crate::error::{Error, Result};

/// Anything that can turn a receipt number into a status page.
/// The scrape loop only needs this, so tests can feed canned HTML.
pub trait CaseSource {
    fn fetch(&self, receipt_number: &str) -> Result<String>;
}

pub struct StatusClient {
    http: Client,
    endpoint: String,
}

impl StatusClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, endpoint: s!(endpoint) })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

impl CaseSource for StatusClient {
    fn fetch(&self, receipt_number: &str) -> Result<String> {
        debug!(receipt_number, endpoint = %self.endpoint, "POST case status form");
        let resp = self
            .http
            .post(&self.endpoint)
            .form(&form_fields(receipt_number))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), receipt_number: s!(receipt_number) });
        }
        let body = resp.text()?;
        debug!(receipt_number, bytes = body.len(), "status page received");
        Ok(body)
    }
}

/// Form payload for one lookup, in the order the site's own form sends it.
pub fn form_fields(receipt_number: &str) -> [(&'static str, &str); 3] {
    [
        (FORM_LOCALE, ""),
        (FORM_RECEIPT, receipt_number),
        (FORM_SEARCH, FORM_SEARCH_VALUE),
    ]
}
