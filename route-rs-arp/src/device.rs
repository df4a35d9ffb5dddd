use failure::Error;
use route_rs_packets::MacAddr;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// A link layer device that can put frames on the wire.
pub trait NetDevice: Send + Sync {
    fn name(&self) -> &str;

    fn hardware_addr(&self) -> MacAddr;

    /// Transmits `payload` in a frame tagged with `ether_type`, addressed to `dst`.
    fn output(&self, ether_type: u16, payload: &[u8], dst: MacAddr) -> Result<(), Error>;
}

/// An IPv4 address bound to a device.
#[derive(Clone)]
pub struct IpInterface {
    pub device: Arc<dyn NetDevice>,
    pub unicast: Ipv4Addr,
}

impl IpInterface {
    pub fn new(device: Arc<dyn NetDevice>, unicast: Ipv4Addr) -> Self {
        IpInterface { device, unicast }
    }
}

impl fmt::Debug for IpInterface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IpInterface")
            .field("device", &self.device.name())
            .field("unicast", &self.unicast)
            .finish()
    }
}

/// The IP layer's view of which address lives on which device.
pub trait InterfaceLookup: Send + Sync {
    fn interface_for(&self, device: &dyn NetDevice) -> Option<IpInterface>;
}

/// Called with the payload of every inbound frame of the registered ether type.
pub type InputHandler = Box<dyn Fn(&[u8], &Arc<dyn NetDevice>) + Send + Sync>;

/// The ether type dispatch table of the stack.
pub trait ProtocolRegistry {
    fn register(&self, ether_type: u16, handler: InputHandler) -> Result<(), Error>;
}
