// src/core/net.rs
//! Blocking HTTP for the web vendors. One request at a time, no retries.

use std::{thread, time::Duration};

use log::debug;
use reqwest::blocking::Client;

use crate::config::{consts::USER_AGENT, options::ScrapeOptions};
use crate::error::Result;

pub struct Http {
    client: Client,
    pause: Duration,
}

impl Http {
    pub fn new(opts: &ScrapeOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()?;
        Ok(Self { client, pause: Duration::from_millis(opts.request_pause_ms) })
    }

    /// GET, non-2xx is an error. Returns the body text.
    pub fn get(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        self.rest();
        Ok(body)
    }

    /// POST a urlencoded form. Returns the body text.
    pub fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        debug!("POST {url} {form:?}");
        let body = self.client.post(url).form(form).send()?.error_for_status()?.text()?;
        self.rest();
        Ok(body)
    }

    fn rest(&self) {
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
    }
}
