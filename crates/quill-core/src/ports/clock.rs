use std::time::Instant;

/// Injected time source.
///
/// Cache TTL expiry reads the clock through this trait so tests can advance
/// time deterministically instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
