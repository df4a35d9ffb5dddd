use crate::device::IpInterface;
use crate::{Arp, ArpError};
use route_rs_packets::{hexdump, ArpPacket, MacAddr, ARP_ETHER_TYPE};
use std::net::Ipv4Addr;
use tracing::{debug, trace};

impl Arp {
    /// Answers a request for `iface.unicast`, telling `tpa` (at `tha`) that the address lives at
    /// this device's hardware address. The reply is unicast to `dst`.
    pub(crate) fn reply(
        &self,
        iface: &IpInterface,
        tha: MacAddr,
        tpa: Ipv4Addr,
        dst: MacAddr,
    ) -> Result<(), ArpError> {
        let device = &iface.device;
        let reply = ArpPacket::reply(device.hardware_addr(), iface.unicast, tha, tpa);
        debug!(dev = device.name(), tpa = %tpa, dst = %dst, "arp reply");
        let bytes = reply.to_bytes();
        trace!("\n{}\n{}", reply, hexdump(&bytes));

        device
            .output(ARP_ETHER_TYPE, &bytes, dst)
            .map_err(|err| ArpError::TransmitFailure {
                device: device.name().to_string(),
                reason: err.to_string(),
            })
    }
}
