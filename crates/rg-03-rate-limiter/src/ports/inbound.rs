//! # Inbound Ports (Driving Ports / API)

/// Request admission.
pub trait RateLimiterApi: Send + Sync {
    /// Try to take `n` tokens.
    ///
    /// Returns `true` if the request is allowed, `false` if rate limited.
    fn consume(&self, n: f64) -> bool;

    /// Tokens currently available, after crediting elapsed time.
    fn available_tokens(&self) -> f64;

    /// Try to take a single token.
    fn try_acquire(&self) -> bool {
        self.consume(1.0)
    }
}
