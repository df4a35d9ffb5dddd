use crate::device::NetDevice;
use crate::{Arp, ArpError};
use route_rs_packets::{hexdump, ArpOp, ArpPacket};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

impl Arp {
    /// Entry point for inbound ARP frames, `data` being the link layer payload. Never fails from
    /// the dispatcher's point of view: anything that goes wrong is logged and the frame dropped.
    pub fn input(&self, data: &[u8], device: &Arc<dyn NetDevice>) {
        if let Err(err) = self.process_frame(data, device) {
            warn!(dev = device.name(), error = %err, "arp frame dropped");
        }
    }

    ///
    /// From the ARP RFC: https://tools.ietf.org/html/rfc826
    ///
    /// Every valid frame teaches us the sender's mapping, request or reply, whether or not it was
    /// meant for us. Only requests for the unicast address of the interface on the receiving
    /// device get an answer.
    ///
    pub(crate) fn process_frame(
        &self,
        data: &[u8],
        device: &Arc<dyn NetDevice>,
    ) -> Result<(), ArpError> {
        let message = ArpPacket::parse(data)?;
        debug!(dev = device.name(), len = data.len(), "arp input");
        trace!("\n{}\n{}", message, hexdump(data));

        let spa = message.sender_protocol_addr;
        let sha = message.sender_hardware_addr;
        {
            let now = Instant::now();
            let mut table = self.table();
            if table.update(spa, sha, now).is_none() {
                if let Err(err) = table.insert(spa, sha, now) {
                    warn!(pa = %spa, ha = %sha, error = %err, "arp sender not learned");
                }
            }
        }

        let iface = match self.interfaces.interface_for(&**device) {
            Some(iface) => iface,
            None => return Ok(()),
        };
        if iface.unicast != message.target_protocol_addr {
            return Ok(());
        }
        if message.op() == Some(ArpOp::Request) {
            self.reply(&iface, sha, spa, sha)?;
        }
        Ok(())
    }
}
