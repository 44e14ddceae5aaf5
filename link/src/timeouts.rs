//! Timeout and interval configuration for Trainify client operations.

use std::time::Duration;

/// Timeouts and polling cadence for a [`TrainifyClient`](crate::TrainifyClient).
///
/// # Examples
///
/// ```rust
/// use trainify_link::TrainifyTimeouts;
/// use std::time::Duration;
///
/// // Defaults (recommended)
/// let timeouts = TrainifyTimeouts::default();
///
/// // Faster polling for local development
/// let timeouts = TrainifyTimeouts::builder()
///     .poll_interval(Duration::from_millis(500))
///     .build();
/// # let _ = timeouts;
/// ```
#[derive(Debug, Clone)]
pub struct TrainifyTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds.
    pub connect_timeout: Duration,

    /// Overall timeout for a request/response exchange.
    /// Default: 30 seconds.
    pub request_timeout: Duration,

    /// Overall timeout for a multipart upload (large files).
    /// Default: 5 minutes.
    pub upload_timeout: Duration,

    /// Fixed period between job status polls.
    /// Default: 2 seconds.
    pub poll_interval: Duration,
}

impl Default for TrainifyTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_millis(2000),
        }
    }
}

impl TrainifyTimeouts {
    /// Create a builder over the defaults.
    pub fn builder() -> TrainifyTimeoutsBuilder {
        TrainifyTimeoutsBuilder::default()
    }

    /// Aggressive timeouts for localhost development.
    pub fn fast() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            upload_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }

    /// Relaxed timeouts for high-latency networks.
    pub fn relaxed() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            upload_timeout: Duration::from_secs(900),
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Builder for [`TrainifyTimeouts`].
#[derive(Debug, Default)]
pub struct TrainifyTimeoutsBuilder {
    inner: Option<TrainifyTimeouts>,
}

impl TrainifyTimeoutsBuilder {
    fn get(&mut self) -> &mut TrainifyTimeouts {
        self.inner.get_or_insert_with(TrainifyTimeouts::default)
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.get().connect_timeout = value;
        self
    }

    /// Set the request timeout.
    pub fn request_timeout(mut self, value: Duration) -> Self {
        self.get().request_timeout = value;
        self
    }

    /// Set the upload timeout.
    pub fn upload_timeout(mut self, value: Duration) -> Self {
        self.get().upload_timeout = value;
        self
    }

    /// Set the job status poll interval.
    pub fn poll_interval(mut self, value: Duration) -> Self {
        self.get().poll_interval = value;
        self
    }

    /// Build the configuration.
    pub fn build(mut self) -> TrainifyTimeouts {
        self.inner.take().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_single_field() {
        let timeouts = TrainifyTimeouts::builder()
            .poll_interval(Duration::from_millis(100))
            .build();
        assert_eq!(timeouts.poll_interval, Duration::from_millis(100));
        assert_eq!(timeouts.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn default_poll_interval_is_two_seconds() {
        assert_eq!(
            TrainifyTimeouts::default().poll_interval,
            Duration::from_millis(2000)
        );
    }
}
