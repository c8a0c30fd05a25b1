use std::time::Duration;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("cluemetrics/", env!("CARGO_PKG_VERSION"));

/// A fully read response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Page {
    pub fn ok(body: impl Into<Vec<u8>>) -> Page {
        Page {
            status: 200,
            body: body.into(),
        }
    }
}

/// Anything that can return the page stored at a URL.
///
/// Non-success statuses are returned as a [`Page`], not an error; only a
/// failure to get any response at all should produce [`Error::Request`].
pub trait PageSource {
    fn get(&self, offset: u64, url: &str) -> Result<Page>;
}

impl<F> PageSource for F
where
    F: Fn(u64, &str) -> Result<Page>,
{
    fn get(&self, offset: u64, url: &str) -> Result<Page> {
        self(offset, url)
    }
}

/// Blocking HTTP source. One request at a time; the whole body is read into
/// memory before returning.
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<HttpPageSource> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(HttpPageSource { client })
    }
}

impl PageSource for HttpPageSource {
    fn get(&self, offset: u64, url: &str) -> Result<Page> {
        let request_error = |e: reqwest::Error| Error::Request {
            offset,
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(request_error)?;

        Ok(Page {
            status,
            body: body.to_vec(),
        })
    }
}
