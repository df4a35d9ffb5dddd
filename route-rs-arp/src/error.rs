use failure::Fail;
use route_rs_packets::ArpParseError;

#[derive(Debug, Fail, PartialEq)]
pub enum ArpError {
    /// Inbound frame failed validation. Dropped, never fatal.
    #[fail(display = "malformed arp frame: {}", _0)]
    MalformedFrame(#[cause] ArpParseError),

    /// Every slot in the cache is static, so nothing can be evicted to make room.
    #[fail(display = "arp cache exhausted, all {} entries are static", capacity)]
    CacheExhausted { capacity: usize },

    #[fail(display = "transmit failure, dev={}: {}", device, reason)]
    TransmitFailure { device: String, reason: String },

    #[fail(
        display = "protocol registration failure, type=0x{:04x}: {}",
        ether_type, reason
    )]
    RegistrationFailure { ether_type: u16, reason: String },
}

impl From<ArpParseError> for ArpError {
    fn from(err: ArpParseError) -> Self {
        ArpError::MalformedFrame(err)
    }
}
