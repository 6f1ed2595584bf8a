//! HTTP server configuration object.

use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, DefaultClock};

use crate::config::HttpConfig;

/// Builder-style configuration for creating the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) http: HttpConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Construct a server configuration from the HTTP settings, using the
    /// system clock.
    #[must_use]
    pub fn new(http: HttpConfig) -> Self {
        Self {
            http,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used for health timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Host and port the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.http.host.as_str(), self.http.port)
    }

    /// Graceful drain deadline in whole seconds, as actix expects.
    ///
    /// Partial seconds round up; actix reads `0` as an immediate forced close,
    /// so only an explicit zero deadline yields it.
    pub(crate) fn shutdown_timeout_secs(&self) -> u64 {
        let timeout = self.http.shutdown_timeout;
        timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
    }

    pub(crate) fn read_header_timeout(&self) -> Duration {
        self.http.read_header_timeout
    }

    pub(crate) fn idle_timeout(&self) -> Duration {
        self.http.idle_timeout
    }

    pub(crate) fn allowed_origins(&self) -> &[String] {
        &self.http.allowed_origins
    }
}
