extern crate crossbeam;
extern crate tokio;

/// The cache is the heart of ARP: a fixed number of slots binding IPv4 addresses to Ethernet
/// addresses, each slot tagged with where it is in its lifecycle (free, waiting on a reply,
/// learned, or administratively pinned). It is a plain owned value; `Arp` puts it behind a lock
/// and is the only thing that touches it concurrently.
pub mod cache;

/// Knobs for the cache size and the aging policy.
pub mod config;

/// The seams between ARP and the rest of the stack. ARP does not own devices, IP interfaces or
/// the ether type dispatch table; it talks to them through the traits in this module so the
/// driver layer can be swapped out (or faked in tests).
pub mod device;

mod arp;
pub use self::arp::*;

mod error;
pub use self::error::*;

mod input;
mod reply;

mod resolver;
pub use self::resolver::Resolution;

mod timer;
pub use self::timer::ExpirationTimer;

/// Utility module
pub mod utils;
