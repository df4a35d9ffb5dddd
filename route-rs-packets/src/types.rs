use std::fmt;

/// The common datatype that all packet structures share to represent their data
pub type PacketData = Vec<u8>;

pub trait Packet {}

pub const IPV4_ETHER_TYPE: u16 = 0x0800;
pub const ARP_ETHER_TYPE: u16 = 0x0806;

// Most significant byte is 0th
#[derive(Eq, Clone, Copy, Hash, PartialEq, Default)]
pub struct MacAddr {
    pub bytes: [u8; 6],
}

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr { bytes: [0xff; 6] };
    pub const ZERO: MacAddr = MacAddr { bytes: [0; 6] };

    pub fn new(bytes: [u8; 6]) -> MacAddr {
        MacAddr { bytes }
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MacAddr({})", self)
    }
}

/// Offset, hex and ASCII columns, 16 bytes to a line. Used for raw packet traces.
pub fn hexdump(data: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in data.chunks(16).enumerate() {
        if line > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:04x}:", line * 16));
        for byte in chunk {
            out.push_str(&format!(" {:02x}", byte));
        }
        for _ in chunk.len()..16 {
            out.push_str("   ");
        }
        out.push_str("  |");
        for &byte in chunk {
            if byte.is_ascii_graphic() || byte == b' ' {
                out.push(byte as char);
            } else {
                out.push('.');
            }
        }
        out.push('|');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_colon_hex() {
        let mac = MacAddr::new([0xaa, 0xbb, 0xcc, 0x0d, 0x0e, 0xff]);
        assert_eq!(mac.to_string(), "aa:bb:cc:0d:0e:ff");
    }

    #[test]
    fn well_known_addresses() {
        assert_eq!(MacAddr::BROADCAST.to_string(), "ff:ff:ff:ff:ff:ff");
        assert_eq!(MacAddr::default(), MacAddr::ZERO);
    }

    #[test]
    fn hexdump_columns() {
        let expected = format!("0000: 41 52 50 00 01{}  |ARP..|", "   ".repeat(11));
        assert_eq!(hexdump(b"ARP\x00\x01"), expected);
    }

    #[test]
    fn hexdump_wraps_every_16_bytes() {
        let data: Vec<u8> = (0..17).collect();
        let dump = hexdump(&data);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000: 00 01 02"));
        assert!(lines[0].ends_with("|................|"));
        assert!(lines[1].starts_with("0010: 10 "));
        assert!(hexdump(&[]).is_empty());
    }
}
