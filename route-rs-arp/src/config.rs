use std::time::Duration;

/// Number of cache slots.
pub const ARP_CACHE_SIZE: usize = 32;
/// How long a learned or pending entry lives without being refreshed.
pub const ARP_CACHE_TIMEOUT: Duration = Duration::from_secs(30);
/// How often the expiration timer sweeps the cache.
pub const ARP_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// ArpConfig
/// Sizing and aging policy for an `Arp` instance. Built the same way processors are:
/// start from `new()` and override what you need.
///
/// ```
/// use route_rs_arp::config::ArpConfig;
/// use std::time::Duration;
///
/// let config = ArpConfig::new()
///     .capacity(64)
///     .entry_timeout(Duration::from_secs(60));
/// assert_eq!(config.capacity, 64);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArpConfig {
    pub capacity: usize,
    pub entry_timeout: Duration,
    pub sweep_interval: Duration,
}

impl ArpConfig {
    pub fn new() -> Self {
        ArpConfig {
            capacity: ARP_CACHE_SIZE,
            entry_timeout: ARP_CACHE_TIMEOUT,
            sweep_interval: ARP_SWEEP_INTERVAL,
        }
    }

    pub fn capacity(self, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        ArpConfig { capacity, ..self }
    }

    pub fn entry_timeout(self, entry_timeout: Duration) -> Self {
        ArpConfig {
            entry_timeout,
            ..self
        }
    }

    pub fn sweep_interval(self, sweep_interval: Duration) -> Self {
        assert!(
            sweep_interval > Duration::from_secs(0),
            "sweep_interval must be non-zero"
        );
        ArpConfig {
            sweep_interval,
            ..self
        }
    }
}

impl Default for ArpConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ArpConfig::default();
        assert_eq!(config.capacity, 32);
        assert_eq!(config.entry_timeout, Duration::from_secs(30));
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
    }

    #[test]
    fn overrides_keep_other_fields() {
        let config = ArpConfig::new().sweep_interval(Duration::from_millis(250));
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.capacity, ARP_CACHE_SIZE);
        assert_eq!(config.entry_timeout, ARP_CACHE_TIMEOUT);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity() {
        ArpConfig::new().capacity(0);
    }

    #[test]
    #[should_panic(expected = "sweep_interval must be non-zero")]
    fn zero_sweep_interval() {
        ArpConfig::new().sweep_interval(Duration::from_secs(0));
    }
}
