use crate::cache::{ArpCache, CacheEntry};
use crate::config::ArpConfig;
use crate::device::{InputHandler, InterfaceLookup, NetDevice, ProtocolRegistry};
use crate::ArpError;
use route_rs_packets::{MacAddr, ARP_ETHER_TYPE};
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, error, info};

/// Arp
/// Address resolution for one stack. Holds the cache behind a single lock, shared between the
/// receive path (`input`), the transmit path (`resolve`) and the expiration timer. The lock is
/// only ever held for one cache operation and never across a transmit.
pub struct Arp {
    cache: Mutex<ArpCache>,
    pub(crate) interfaces: Arc<dyn InterfaceLookup>,
    pub(crate) config: ArpConfig,
}

impl Arp {
    pub fn new(config: ArpConfig, interfaces: Arc<dyn InterfaceLookup>) -> Self {
        Arp {
            cache: Mutex::new(ArpCache::new(config.capacity)),
            interfaces,
            config,
        }
    }

    /// Hooks `arp` into the stack's dispatch table so it sees every inbound ARP frame. A refusal
    /// from the registry means the stack cannot do ARP at all and should not start.
    ///
    /// The registered handler only holds a weak reference: the registry does not keep `arp`
    /// (or its expiration timer) alive, and frames arriving after it is dropped are ignored.
    pub fn init(arp: &Arc<Arp>, registry: &dyn ProtocolRegistry) -> Result<(), ArpError> {
        let handler_arp = Arc::downgrade(arp);
        let handler: InputHandler = Box::new(move |data: &[u8], device: &Arc<dyn NetDevice>| {
            match handler_arp.upgrade() {
                Some(arp) => arp.input(data, device),
                None => debug!(dev = device.name(), "arp frame ignored, arp is gone"),
            }
        });

        match registry.register(ARP_ETHER_TYPE, handler) {
            Ok(()) => {
                info!(ether_type = ARP_ETHER_TYPE, "arp input handler registered");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "arp input handler registration failed");
                Err(ArpError::RegistrationFailure {
                    ether_type: ARP_ETHER_TYPE,
                    reason: err.to_string(),
                })
            }
        }
    }

    pub fn config(&self) -> &ArpConfig {
        &self.config
    }

    /// Pins `pa` to `ha`. Static entries are never aged out or evicted and are not overwritten
    /// by traffic.
    pub fn add_static(&self, pa: Ipv4Addr, ha: MacAddr) -> Result<(), ArpError> {
        self.table().insert_static(pa, ha, Instant::now())?;
        Ok(())
    }

    /// Drops whatever the cache holds for `pa`. Returns whether there was anything.
    pub fn remove(&self, pa: Ipv4Addr) -> bool {
        self.table().remove(pa).is_some()
    }

    /// Snapshot of the entry for `pa`.
    pub fn lookup(&self, pa: Ipv4Addr) -> Option<CacheEntry> {
        self.table().select(pa).copied()
    }

    /// Snapshot of every entry in use.
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.table().entries().copied().collect()
    }

    /// Runs one expiration sweep against the current time.
    pub fn expire(&self) -> usize {
        self.expire_at(Instant::now())
    }

    pub(crate) fn expire_at(&self, now: Instant) -> usize {
        let freed = self.table().sweep(now, self.config.entry_timeout);
        if freed > 0 {
            debug!(freed = freed, "arp cache sweep");
        }
        freed
    }

    // Every cache operation is a single slot overwrite, so a holder that panicked cannot have
    // left a half-written table behind.
    pub(crate) fn table(&self) -> MutexGuard<ArpCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
