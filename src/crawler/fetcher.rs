//! HTTP fetch capability
//!
//! A connection-pooled fetcher with a caller-supplied concurrency bound.
//! Admitted URLs beyond the bound queue here, waiting on a semaphore permit,
//! not inside the dispatch engine. Every fetch reaches exactly one terminal
//! outcome; there are no retries.

use chrono::DateTime;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Terminal outcome of fetching one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with a readable body
    Success {
        /// `Last-Modified` header reformatted as `YYYY-MM-DD`, if present
        last_modified: Option<String>,
        /// Raw response body
        body: String,
    },

    /// Transport failure or non-200 status; fatal to this URL only
    Failed {
        /// Composite description carrying the status code when one exists
        error: String,
    },
}

/// Builds the HTTP client shared by every fetch of a crawl
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("inkmap/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Connection-pooled fetcher with bounded concurrency
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    permits: Arc<Semaphore>,
}

impl Fetcher {
    /// Creates a fetcher allowing at most `pool_size` simultaneous requests
    pub fn new(pool_size: usize) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
            permits: Arc::new(Semaphore::new(pool_size)),
        })
    }

    /// Fetches one URL, queueing until a connection permit is free
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            // The semaphore is never closed while a fetcher exists
            Err(_) => {
                return FetchOutcome::Failed {
                    error: failure("connection pool closed", None),
                }
            }
        };

        tracing::debug!("fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::Failed {
                    error: failure(&e.to_string(), e.status()),
                }
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchOutcome::Failed {
                error: failure("request failed", Some(status)),
            };
        }

        let last_modified = response
            .headers()
            .get(header::LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .and_then(format_header_date);

        match response.text().await {
            Ok(body) => FetchOutcome::Success {
                last_modified,
                body,
            },
            Err(e) => FetchOutcome::Failed {
                error: failure(&e.to_string(), e.status()),
            },
        }
    }
}

/// Composes the per-URL error string, spelling out a missing status code
fn failure(error: &str, status: Option<StatusCode>) -> String {
    match status {
        Some(status) => format!("{} {}", error, status.as_u16()),
        None => format!("{} undefined status code", error),
    }
}

/// Reformats an HTTP date header value as `YYYY-MM-DD`
fn format_header_date(value: &str) -> Option<String> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[test]
    fn test_format_header_date() {
        assert_eq!(
            format_header_date("Tue, 08 Mar 2016 07:28:00 GMT").as_deref(),
            Some("2016-03-08")
        );
    }

    #[test]
    fn test_format_header_date_rejects_garbage() {
        assert_eq!(format_header_date("not a date"), None);
    }

    #[test]
    fn test_failure_with_status_code() {
        assert_eq!(
            failure("request failed", Some(StatusCode::NOT_FOUND)),
            "request failed 404"
        );
    }

    #[test]
    fn test_failure_without_status_code() {
        assert_eq!(
            failure("connection refused", None),
            "connection refused undefined status code"
        );
    }
}
