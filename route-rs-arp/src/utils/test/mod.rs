pub use self::capture_device::CaptureDevice;

pub use self::interfaces::StaticInterfaces;

pub use self::protocol_table::ProtocolTable;
