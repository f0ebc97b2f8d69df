//! Timeout configuration for portal client operations.

use std::time::Duration;

/// Timeouts applied to the underlying HTTP client.
///
/// # Examples
///
/// ```rust
/// use sima_link::SimaTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = SimaTimeouts::default();
///
/// // Custom timeouts for high-latency environments
/// let timeouts = SimaTimeouts::builder()
///     .connect_timeout(Duration::from_secs(30))
///     .request_timeout(Duration::from_secs(120))
///     .build();
///
/// // Aggressive timeouts for local development
/// let timeouts = SimaTimeouts::fast();
/// ```
#[derive(Debug, Clone)]
pub struct SimaTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Total timeout for a request, from send to fully-received response.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for SimaTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SimaTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> SimaTimeoutsBuilder {
        SimaTimeoutsBuilder::new()
    }

    /// Timeouts optimized for fast local development.
    pub fn fast() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Timeouts optimized for high-latency or unreliable networks.
    pub fn relaxed() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Builder for creating custom [`SimaTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct SimaTimeoutsBuilder {
    timeouts: SimaTimeouts,
}

impl SimaTimeoutsBuilder {
    fn new() -> Self {
        Self { timeouts: SimaTimeouts::default() }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connect_timeout_secs(self, secs: u64) -> Self {
        self.connect_timeout(Duration::from_secs(secs))
    }

    /// Set the total per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set the total per-request timeout in seconds.
    pub fn request_timeout_secs(self, secs: u64) -> Self {
        self.request_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> SimaTimeouts {
        self.timeouts
    }
}
