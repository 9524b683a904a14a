#![doc = include_str!("../README.md")]

mod bytes;
mod error;
pub mod fixed24;
mod packet;
mod packet_a;
mod scanner;
mod status;

pub use error::{Error, Result};
pub use packet::{calculate_checksum, PACKET_LENGTH, SYNC_BYTE};
pub use packet_a::{PacketA, Time};
pub use scanner::{decode_aligned, read_packets, scan_packets, PacketScanner, PacketStream};
pub use status::{FullTime, Innovations, StatusChannel, STATUS_CHANNEL_LENGTH};
