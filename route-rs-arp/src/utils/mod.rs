/// In-memory stand-ins for the device, interface and dispatch layers, for exercising ARP without
/// a driver underneath.
pub mod test;
