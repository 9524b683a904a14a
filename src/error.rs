#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bytes remain at a candidate position than a full packet needs.
    #[error("not enough bytes: have {actual}, need {needed}")]
    NotEnoughData { actual: usize, needed: usize },
    /// No sync byte with a full packet's worth of bytes after it.
    #[error("no sync byte found")]
    SyncNotFound,
    #[error("expected sync byte 0xe7, got {0:#04x}")]
    InvalidSync(u8),
    /// The navigation status byte is not one of the structure-A values.
    #[error("navigation status {0} is not valid for a structure-A packet")]
    InvalidNavigationStatus(u8),
    /// Time must be within the GPS minute, i.e., at most 59999 ms.
    #[error("time {0} ms is past the end of the GPS minute")]
    TimeOutOfRange(u16),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
