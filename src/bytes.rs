use std::collections::VecDeque;
use std::io::{self, Read};

/// Bytes provides the ability to read bytes from a reader and push them
/// back if they are not needed, i.e., peek-and-push. The original order of
/// the bytes is preserved when pushing bytes back.
pub(crate) struct Bytes<R>
where
    R: Read,
{
    reader: R,
    num_read: usize,
    cache: VecDeque<u8>,
    buf: [u8; 1],
}

impl<R> Bytes<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Bytes {
            reader,
            num_read: 0,
            cache: VecDeque::new(),
            buf: [0u8; 1],
        }
    }

    /// Next byte, from the push-back cache first.
    pub fn next(&mut self) -> Result<u8, io::Error> {
        if let Some(b) = self.cache.pop_front() {
            return Ok(b);
        }
        let n = self.reader.read(&mut self.buf)?;
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        self.num_read += 1;
        Ok(self.buf[0])
    }

    /// Fill `buf` completely, consuming cached bytes before reading.
    /// Returns false if the source hits EOF before `buf` is full.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<bool, io::Error> {
        let cached = self.cache.len().min(buf.len());
        for b in &mut buf[..cached] {
            // cached <= cache.len(), pop cannot fail
            *b = self.cache.pop_front().unwrap();
        }
        if cached < buf.len() {
            if let Err(err) = self.reader.read_exact(&mut buf[cached..]) {
                if err.kind() == io::ErrorKind::UnexpectedEof {
                    return Ok(false);
                }
                return Err(err);
            }
            self.num_read += buf.len() - cached;
        }
        Ok(true)
    }

    /// Push bytes back so subsequent reads produce them again, in order.
    pub fn unread(&mut self, dat: &[u8]) {
        for &b in dat.iter().rev() {
            self.cache.push_front(b);
        }
    }

    /// Offset of the next byte to be produced within the source stream.
    pub fn offset(&self) -> usize {
        self.num_read - self.cache.len()
    }
}
