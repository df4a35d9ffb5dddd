use crate::ArpError;
use route_rs_packets::MacAddr;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// Unused slot.
    Free,
    /// A request went out, no reply yet. The hardware address is meaningless.
    Incomplete,
    /// Learned from the wire. Ages out.
    Resolved,
    /// Installed by hand. Never ages out and is never evicted.
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheEntry {
    pub state: CacheState,
    pub protocol_addr: Ipv4Addr,
    pub hardware_addr: MacAddr,
    pub last_updated: Instant,
}

impl CacheEntry {
    fn free(now: Instant) -> Self {
        CacheEntry {
            state: CacheState::Free,
            protocol_addr: Ipv4Addr::UNSPECIFIED,
            hardware_addr: MacAddr::ZERO,
            last_updated: now,
        }
    }

    /// True when the hardware address can be handed out.
    pub fn is_usable(&self) -> bool {
        match self.state {
            CacheState::Resolved | CacheState::Static => true,
            CacheState::Free | CacheState::Incomplete => false,
        }
    }
}

/// ArpCache
/// Fixed size table of protocol address -> hardware address bindings. There is at most one
/// non-free slot per protocol address. When every slot is taken, new bindings evict the stalest
/// non-static one.
///
/// Operations take the current time as an argument instead of reading the clock, callers are
/// expected to hold whatever lock guards the table for the whole call.
pub struct ArpCache {
    entries: Vec<CacheEntry>,
}

impl ArpCache {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        let now = Instant::now();
        ArpCache {
            entries: vec![CacheEntry::free(now); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots in use.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every non-free entry, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.state != CacheState::Free)
    }

    pub fn select(&self, pa: Ipv4Addr) -> Option<&CacheEntry> {
        self.position(pa).map(|index| &self.entries[index])
    }

    /// Hands out a free slot, evicting the oldest non-static entry if the table is full. Ties go
    /// to the lowest slot.
    pub fn allocate(&mut self) -> Result<&mut CacheEntry, ArpError> {
        let index = self.allocate_index()?;
        Ok(&mut self.entries[index])
    }

    /// Refreshes the binding for `pa` if one exists. Never creates an entry. Static entries are
    /// returned as they are.
    pub fn update(&mut self, pa: Ipv4Addr, ha: MacAddr, now: Instant) -> Option<&CacheEntry> {
        let index = self.position(pa)?;
        let entry = &mut self.entries[index];
        if entry.state != CacheState::Static {
            entry.state = CacheState::Resolved;
            entry.hardware_addr = ha;
            entry.last_updated = now;
            debug!(pa = %pa, ha = %ha, "arp cache update");
        }
        Some(&*entry)
    }

    /// Binds `pa` to `ha` as a resolved entry. If `pa` is already present the existing slot is
    /// reused, so this never duplicates a key.
    pub fn insert(
        &mut self,
        pa: Ipv4Addr,
        ha: MacAddr,
        now: Instant,
    ) -> Result<&CacheEntry, ArpError> {
        let index = match self.position(pa) {
            Some(index) if self.entries[index].state == CacheState::Static => {
                return Ok(&self.entries[index]);
            }
            Some(index) => index,
            None => self.allocate_index()?,
        };
        debug!(pa = %pa, ha = %ha, "arp cache insert");
        Ok(self.fill(index, CacheState::Resolved, pa, ha, now))
    }

    /// Reserves a slot for `pa` while a request is in flight. An existing entry for `pa` is
    /// returned untouched.
    pub fn insert_incomplete(
        &mut self,
        pa: Ipv4Addr,
        now: Instant,
    ) -> Result<&CacheEntry, ArpError> {
        if let Some(index) = self.position(pa) {
            return Ok(&self.entries[index]);
        }
        let index = self.allocate_index()?;
        debug!(pa = %pa, "arp cache insert incomplete");
        Ok(self.fill(index, CacheState::Incomplete, pa, MacAddr::ZERO, now))
    }

    /// Pins `pa` to `ha`, replacing whatever entry `pa` had.
    pub fn insert_static(
        &mut self,
        pa: Ipv4Addr,
        ha: MacAddr,
        now: Instant,
    ) -> Result<&CacheEntry, ArpError> {
        let index = match self.position(pa) {
            Some(index) => index,
            None => self.allocate_index()?,
        };
        debug!(pa = %pa, ha = %ha, "arp cache insert static");
        Ok(self.fill(index, CacheState::Static, pa, ha, now))
    }

    /// Frees the entry for `pa`, static or not, and returns what it held.
    pub fn remove(&mut self, pa: Ipv4Addr) -> Option<CacheEntry> {
        let index = self.position(pa)?;
        let removed = self.entries[index];
        self.delete(index);
        Some(removed)
    }

    /// Frees every incomplete or resolved entry that has gone `timeout` without a refresh.
    /// Returns how many were freed.
    pub fn sweep(&mut self, now: Instant, timeout: Duration) -> usize {
        let mut freed = 0;
        for index in 0..self.entries.len() {
            let entry = self.entries[index];
            match entry.state {
                CacheState::Incomplete | CacheState::Resolved => {}
                CacheState::Free | CacheState::Static => continue,
            }
            if now.saturating_duration_since(entry.last_updated) >= timeout {
                debug!(
                    pa = %entry.protocol_addr,
                    ha = %entry.hardware_addr,
                    state = ?entry.state,
                    "arp cache entry expired"
                );
                self.delete(index);
                freed += 1;
            }
        }
        freed
    }

    fn position(&self, pa: Ipv4Addr) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.state != CacheState::Free && entry.protocol_addr == pa)
    }

    fn allocate_index(&mut self) -> Result<usize, ArpError> {
        if let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.state == CacheState::Free)
        {
            return Ok(index);
        }

        let oldest = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.state != CacheState::Static)
            .min_by_key(|(index, entry)| (entry.last_updated, *index))
            .map(|(index, _)| index);

        match oldest {
            Some(index) => {
                let victim = self.entries[index];
                debug!(
                    pa = %victim.protocol_addr,
                    ha = %victim.hardware_addr,
                    "arp cache full, evicting oldest entry"
                );
                self.delete(index);
                Ok(index)
            }
            None => Err(ArpError::CacheExhausted {
                capacity: self.capacity(),
            }),
        }
    }

    fn fill(
        &mut self,
        index: usize,
        state: CacheState,
        pa: Ipv4Addr,
        ha: MacAddr,
        now: Instant,
    ) -> &CacheEntry {
        let entry = &mut self.entries[index];
        entry.state = state;
        entry.protocol_addr = pa;
        entry.hardware_addr = ha;
        entry.last_updated = now;
        entry
    }

    fn delete(&mut self, index: usize) {
        let entry = &mut self.entries[index];
        entry.state = CacheState::Free;
        entry.protocol_addr = Ipv4Addr::UNSPECIFIED;
        entry.hardware_addr = MacAddr::ZERO;
    }
}
