//! The parts of the NCOM packet contract shared by all structure variants:
//! the sync marker, the fixed packet length, and the checksum arithmetic.

/// First byte of every NCOM packet.
pub const SYNC_BYTE: u8 = 0xe7;

/// Total encoded length of an NCOM packet, sync byte included.
pub const PACKET_LENGTH: usize = 72;

/// Calculate the single-byte checksum over `dat`.
///
/// The NCOM checksum is the additive sum of the bytes modulo 256. Each of
/// the three checksum fields in a packet covers a prefix of the packet
/// starting at byte 1; the sync byte is never included, so callers pass a
/// range beginning just after it.
#[must_use]
pub fn calculate_checksum(dat: &[u8]) -> u8 {
    dat.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Find the next position at or after `offset` where a full packet could
/// start, i.e., a sync byte with at least [`PACKET_LENGTH`] bytes from it
/// to the end of `dat`.
pub(crate) fn seek_sync(dat: &[u8], offset: usize) -> Option<usize> {
    if dat.len() < PACKET_LENGTH {
        return None;
    }
    let last = dat.len() - PACKET_LENGTH;
    (offset..=last).find(|&i| dat[i] == SYNC_BYTE)
}
