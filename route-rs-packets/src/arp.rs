use crate::{MacAddr, IPV4_ETHER_TYPE};
use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

impl ArpOp {
    pub fn from_raw(code: u16) -> Option<ArpOp> {
        match code {
            1 => Some(ArpOp::Request),
            2 => Some(ArpOp::Reply),
            _ => None,
        }
    }

    /// Name of a raw opcode, as printed in packet dumps.
    pub fn name(code: u16) -> &'static str {
        match ArpOp::from_raw(code) {
            Some(ArpOp::Request) => "Request",
            Some(ArpOp::Reply) => "Reply",
            None => "Unknown",
        }
    }
}

pub enum ArpHardwareType {
    Ethernet = 1,
}

pub const ARP_HRD_ETHER: u16 = ArpHardwareType::Ethernet as u16;

const ETHER_ADDR_LEN: u8 = 6;
const IPV4_ADDR_LEN: u8 = 4;

/// Size of an Ethernet/IPv4 ARP message: an 8 byte fixed header plus two
/// (hardware, protocol) address pairs.
pub const ARP_PACKET_LEN: usize = 28;

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_OFFSET: usize = 4;
const PROTOCOL_ADDR_LEN_OFFSET: usize = 5;
const OPCODE_RANGE: (usize, usize) = (6, 8);
const SENDER_HARDWARE_ADDR_RANGE: (usize, usize) = (8, 14);
const SENDER_PROTOCOL_ADDR_RANGE: (usize, usize) = (14, 18);
const TARGET_HARDWARE_ADDR_RANGE: (usize, usize) = (18, 24);
const TARGET_PROTOCOL_ADDR_RANGE: (usize, usize) = (24, 28);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArpParseError {
    TooShort { len: usize },
    UnsupportedHardware { hrd: u16, hln: u8 },
    UnsupportedProtocol { pro: u16, pln: u8 },
}

impl fmt::Display for ArpParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArpParseError::TooShort { len } => write!(
                f,
                "too short, len={} (need at least {})",
                len, ARP_PACKET_LEN
            ),
            ArpParseError::UnsupportedHardware { hrd, hln } => write!(
                f,
                "unsupported hardware address, hrd=0x{:04x}, hln={}",
                hrd, hln
            ),
            ArpParseError::UnsupportedProtocol { pro, pln } => write!(
                f,
                "unsupported protocol address, pro=0x{:04x}, pln={}",
                pro, pln
            ),
        }
    }
}

impl Error for ArpParseError {}

///
/// An Ethernet/IPv4 ARP message as described in RFC 826
/// https://tools.ietf.org/html/rfc826
///
/// The hardware and protocol types and address lengths are implied: only
/// Ethernet (6 byte) hardware addresses over IPv4 (4 byte) protocol addresses
/// are representable.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArpPacket {
    /// Raw opcode. Unknown values are carried through untouched.
    pub opcode: u16,
    pub sender_hardware_addr: MacAddr,
    pub sender_protocol_addr: Ipv4Addr,
    pub target_hardware_addr: MacAddr,
    pub target_protocol_addr: Ipv4Addr,
}

impl ArpPacket {
    /// Who has `target`? Tell `sender`. The target hardware address is left zeroed.
    pub fn request(
        sender_hardware_addr: MacAddr,
        sender_protocol_addr: Ipv4Addr,
        target_protocol_addr: Ipv4Addr,
    ) -> Self {
        ArpPacket {
            opcode: ArpOp::Request as u16,
            sender_hardware_addr,
            sender_protocol_addr,
            target_hardware_addr: MacAddr::ZERO,
            target_protocol_addr,
        }
    }

    pub fn reply(
        sender_hardware_addr: MacAddr,
        sender_protocol_addr: Ipv4Addr,
        target_hardware_addr: MacAddr,
        target_protocol_addr: Ipv4Addr,
    ) -> Self {
        ArpPacket {
            opcode: ArpOp::Reply as u16,
            sender_hardware_addr,
            sender_protocol_addr,
            target_hardware_addr,
            target_protocol_addr,
        }
    }

    pub fn op(&self) -> Option<ArpOp> {
        ArpOp::from_raw(self.opcode)
    }

    ///
    /// Parses an ARP message from the payload of a frame.
    /// Validates
    /// - The payload holds at least a full Ethernet/IPv4 message
    /// - The hardware type is Ethernet with 6 byte addresses
    /// - The protocol type is IPv4 with 4 byte addresses
    ///
    /// Bytes past the end of the message (link layer padding) are ignored.
    ///
    pub fn parse(data: &[u8]) -> Result<Self, ArpParseError> {
        if data.len() < ARP_PACKET_LEN {
            return Err(ArpParseError::TooShort { len: data.len() });
        }

        let hrd = read_u16(data, HARDWARE_TYPE_RANGE);
        let hln = data[HARDWARE_ADDR_LEN_OFFSET];
        if hrd != ARP_HRD_ETHER || hln != ETHER_ADDR_LEN {
            return Err(ArpParseError::UnsupportedHardware { hrd, hln });
        }

        let pro = read_u16(data, PROTOCOL_TYPE_RANGE);
        let pln = data[PROTOCOL_ADDR_LEN_OFFSET];
        if pro != IPV4_ETHER_TYPE || pln != IPV4_ADDR_LEN {
            return Err(ArpParseError::UnsupportedProtocol { pro, pln });
        }

        Ok(ArpPacket {
            opcode: read_u16(data, OPCODE_RANGE),
            sender_hardware_addr: read_mac(data, SENDER_HARDWARE_ADDR_RANGE),
            sender_protocol_addr: read_ipv4(data, SENDER_PROTOCOL_ADDR_RANGE),
            target_hardware_addr: read_mac(data, TARGET_HARDWARE_ADDR_RANGE),
            target_protocol_addr: read_ipv4(data, TARGET_PROTOCOL_ADDR_RANGE),
        })
    }

    pub fn to_bytes(&self) -> [u8; ARP_PACKET_LEN] {
        let mut data = [0; ARP_PACKET_LEN];
        write(&mut data, HARDWARE_TYPE_RANGE, &ARP_HRD_ETHER.to_be_bytes());
        write(&mut data, PROTOCOL_TYPE_RANGE, &IPV4_ETHER_TYPE.to_be_bytes());
        data[HARDWARE_ADDR_LEN_OFFSET] = ETHER_ADDR_LEN;
        data[PROTOCOL_ADDR_LEN_OFFSET] = IPV4_ADDR_LEN;
        write(&mut data, OPCODE_RANGE, &self.opcode.to_be_bytes());
        write(
            &mut data,
            SENDER_HARDWARE_ADDR_RANGE,
            &self.sender_hardware_addr.bytes,
        );
        write(
            &mut data,
            SENDER_PROTOCOL_ADDR_RANGE,
            &self.sender_protocol_addr.octets(),
        );
        write(
            &mut data,
            TARGET_HARDWARE_ADDR_RANGE,
            &self.target_hardware_addr.bytes,
        );
        write(
            &mut data,
            TARGET_PROTOCOL_ADDR_RANGE,
            &self.target_protocol_addr.octets(),
        );
        data
    }
}

/// Multi-line field dump, one field per line.
impl fmt::Display for ArpPacket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "        hrd: 0x{:04x}", ARP_HRD_ETHER)?;
        writeln!(f, "        pro: 0x{:04x}", IPV4_ETHER_TYPE)?;
        writeln!(f, "        hln: {}", ETHER_ADDR_LEN)?;
        writeln!(f, "        pln: {}", IPV4_ADDR_LEN)?;
        writeln!(
            f,
            "         op: {} ({})",
            self.opcode,
            ArpOp::name(self.opcode)
        )?;
        writeln!(f, "        sha: {}", self.sender_hardware_addr)?;
        writeln!(f, "        spa: {}", self.sender_protocol_addr)?;
        writeln!(f, "        tha: {}", self.target_hardware_addr)?;
        write!(f, "        tpa: {}", self.target_protocol_addr)
    }
}

fn read_u16(data: &[u8], (start, _): (usize, usize)) -> u16 {
    u16::from_be_bytes([data[start], data[start + 1]])
}

fn read_mac(data: &[u8], (start, end): (usize, usize)) -> MacAddr {
    let mut bytes = [0; 6];
    bytes.copy_from_slice(&data[start..end]);
    MacAddr::new(bytes)
}

fn read_ipv4(data: &[u8], (start, _): (usize, usize)) -> Ipv4Addr {
    Ipv4Addr::new(data[start], data[start + 1], data[start + 2], data[start + 3])
}

fn write(data: &mut [u8], (start, end): (usize, usize), bytes: &[u8]) {
    data[start..end].copy_from_slice(bytes);
}
