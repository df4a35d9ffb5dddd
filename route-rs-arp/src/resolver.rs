use crate::cache::CacheState;
use crate::device::IpInterface;
use crate::{Arp, ArpError};
use route_rs_packets::{hexdump, ArpPacket, MacAddr, ARP_ETHER_TYPE};
use std::net::Ipv4Addr;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Outcome of a resolve that did not hard-fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(MacAddr),
    /// A request is out (or was just sent). Try again later.
    Incomplete,
}

impl Arp {
    ///
    /// Looks up the hardware address for `pa`, for a packet about to leave through `iface`.
    ///
    /// Never waits on the network. If the address is unknown, a slot is reserved in the
    /// incomplete state, a request is broadcast on the interface's device and `Incomplete` is
    /// returned. Later calls for the same address also get `Incomplete` without another
    /// broadcast, until either a reply resolves the slot or the sweep frees it.
    ///
    /// Fails only when the cache is full of static entries.
    ///
    pub fn resolve(&self, iface: &IpInterface, pa: Ipv4Addr) -> Result<Resolution, ArpError> {
        {
            let mut table = self.table();
            match table.select(pa) {
                Some(entry) if entry.is_usable() => {
                    trace!(pa = %pa, ha = %entry.hardware_addr, "arp resolved");
                    return Ok(Resolution::Found(entry.hardware_addr));
                }
                Some(entry) if entry.state == CacheState::Incomplete => {
                    trace!(pa = %pa, "arp resolution already in flight");
                    return Ok(Resolution::Incomplete);
                }
                _ => {}
            }
            table.insert_incomplete(pa, Instant::now())?;
        }

        // Lost requests are retried once the sweep frees the incomplete slot.
        if let Err(err) = self.request(iface, pa) {
            warn!(error = %err, "arp request dropped");
        }
        Ok(Resolution::Incomplete)
    }

    fn request(&self, iface: &IpInterface, tpa: Ipv4Addr) -> Result<(), ArpError> {
        let device = &iface.device;
        let request = ArpPacket::request(device.hardware_addr(), iface.unicast, tpa);
        debug!(dev = device.name(), tpa = %tpa, "arp request");
        let bytes = request.to_bytes();
        trace!("\n{}\n{}", request, hexdump(&bytes));

        device
            .output(ARP_ETHER_TYPE, &bytes, MacAddr::BROADCAST)
            .map_err(|err| ArpError::TransmitFailure {
                device: device.name().to_string(),
                reason: err.to_string(),
            })
    }
}
