//! Recovery of structure-A packets from noisy bytes.
//!
//! Captured NCOM data rarely starts on a packet boundary: logging
//! preambles, serial line noise, and concatenated captures all put
//! non-packet bytes before, between, and after valid records. The scanner
//! walks a buffer looking for the sync byte, attempts a decode at each
//! candidate, and on failure moves forward a single byte so a sync byte
//! buried inside misinterpreted payload can still start the next match.

use std::io::{ErrorKind, Read};

use rayon::prelude::*;
use tracing::trace;

use crate::bytes::Bytes;
use crate::packet::{seek_sync, PACKET_LENGTH, SYNC_BYTE};
use crate::packet_a::PacketA;
use crate::{Error, Result};

enum State {
    /// Looking for the next viable sync byte.
    Seeking,
    /// A sync byte was found at the cursor; a decode attempt is pending.
    Validating,
    /// The cursor has passed the last position a full packet could start.
    Done,
}

/// Iterator over the packets recoverable from a byte buffer.
///
/// Decode failures at candidate positions are absorbed: the scanner
/// advances one byte and keeps looking. On success it advances past the
/// whole packet. The input is never mutated, and the only scan state is
/// the cursor, so a scan over a large capture can be checkpointed with
/// [`position`](PacketScanner::position) and picked up later with
/// [`resume`](PacketScanner::resume).
pub struct PacketScanner<'a> {
    dat: &'a [u8],
    pos: usize,
    state: State,
}

impl<'a> PacketScanner<'a> {
    #[must_use]
    pub fn new(dat: &'a [u8]) -> Self {
        Self::resume(dat, 0)
    }

    /// Start scanning at a previously checkpointed cursor.
    #[must_use]
    pub fn resume(dat: &'a [u8], pos: usize) -> Self {
        PacketScanner {
            dat,
            pos,
            state: State::Seeking,
        }
    }

    /// Current scan cursor, i.e., the offset the next search starts from.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for PacketScanner<'_> {
    type Item = PacketA;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Seeking => match seek_sync(self.dat, self.pos) {
                    Some(start) => {
                        self.pos = start;
                        self.state = State::Validating;
                    }
                    None => {
                        self.pos = self.dat.len();
                        self.state = State::Done;
                        return None;
                    }
                },
                State::Validating => {
                    match PacketA::decode_at(&self.dat[self.pos..self.pos + PACKET_LENGTH]) {
                        Ok(packet) => {
                            self.pos += PACKET_LENGTH;
                            self.state = State::Seeking;
                            return Some(packet);
                        }
                        Err(err) => {
                            trace!(pos = self.pos, %err, "candidate failed, resyncing");
                            self.pos += 1;
                            self.state = State::Seeking;
                        }
                    }
                }
            }
        }
    }
}

/// Scan `dat` for every recoverable packet, in order.
///
/// # Examples
/// ```
/// let mut dat = vec![0xab, 0xcd];
/// dat.extend_from_slice(&ncom::PacketA::default().encode());
///
/// let packets: Vec<ncom::PacketA> = ncom::scan_packets(&dat).collect();
/// assert_eq!(packets.len(), 1);
/// ```
#[must_use]
pub fn scan_packets(dat: &[u8]) -> PacketScanner<'_> {
    PacketScanner::new(dat)
}

/// Decode a capture already aligned on packet boundaries.
///
/// Because each 72-byte stride is decoded independently, strides are
/// processed in parallel. Unlike scanning this is strict: the buffer must
/// be an exact multiple of the packet length and every stride must decode,
/// otherwise an error is returned.
///
/// # Errors
/// [`Error::NotEnoughData`] for a trailing partial stride, or the first
/// decode error encountered.
pub fn decode_aligned(dat: &[u8]) -> Result<Vec<PacketA>> {
    if dat.len() % PACKET_LENGTH != 0 {
        return Err(Error::NotEnoughData {
            actual: dat.len() % PACKET_LENGTH,
            needed: PACKET_LENGTH,
        });
    }
    dat.par_chunks(PACKET_LENGTH)
        .map(PacketA::decode_at)
        .collect()
}

/// Iterator over packets decoded from an [`io::Read`](std::io::Read)
/// stream. Created by [`read_packets`].
///
/// Resynchronization matches [`PacketScanner`]: after a failed candidate,
/// every byte read past the failed sync byte is pushed back and the search
/// resumes at the very next byte. The iterator ends at EOF; a partial
/// packet at the end of the stream is dropped.
pub struct PacketStream<R>
where
    R: Read + Send,
{
    bytes: Bytes<R>,
}

impl<R> Iterator for PacketStream<R>
where
    R: Read + Send,
{
    type Item = Result<PacketA>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; PACKET_LENGTH];
        loop {
            // Seek the sync byte
            loop {
                match self.bytes.next() {
                    Ok(b) if b == SYNC_BYTE => break,
                    Ok(_) => (),
                    Err(err) if err.kind() == ErrorKind::UnexpectedEof => return None,
                    Err(err) => return Some(Err(Error::Io(err))),
                }
            }

            buf[0] = SYNC_BYTE;
            match self.bytes.fill(&mut buf[1..]) {
                Ok(true) => (),
                Ok(false) => return None, // partial packet at EOF
                Err(err) => return Some(Err(Error::Io(err))),
            }

            match PacketA::decode_at(&buf) {
                Ok(packet) => return Some(Ok(packet)),
                Err(err) => {
                    trace!(offset = self.bytes.offset(), %err, "candidate failed, resyncing");
                    // Put everything after the failed sync byte back so a
                    // sync byte within it can still start a packet
                    self.bytes.unread(&buf[1..]);
                }
            }
        }
    }
}

/// Return an iterator decoding packets from `reader`.
///
/// # Examples
/// ```
/// use ncom::{read_packets, PacketA};
///
/// let dat = PacketA::default().encode();
/// let packets: Vec<_> = read_packets(std::io::Cursor::new(dat))
///     .collect::<ncom::Result<_>>()
///     .unwrap();
/// assert_eq!(packets.len(), 1);
/// ```
pub fn read_packets<R>(reader: R) -> PacketStream<R>
where
    R: Read + Send,
{
    PacketStream {
        bytes: Bytes::new(reader),
    }
}
