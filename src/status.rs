//! Batch S status-channel sub-protocol.
//!
//! Bytes 63 to 70 of a structure-A packet carry an 8-byte status payload
//! whose interpretation is selected by the channel byte at 62. The unit
//! cycles through channels over successive packets, so any single packet
//! carries at most one. Channel `0xFF` means no status information is
//! present, which this crate models as `Option::<StatusChannel>::None`.

use serde::{Deserialize, Serialize};

/// Length of a status-channel payload.
pub const STATUS_CHANNEL_LENGTH: usize = 8;

/// Channel byte value indicating no status channel is present.
pub(crate) const CHANNEL_ABSENT: u8 = 0xff;

/// A decoded Batch S status channel.
///
/// Channels with a dedicated structure decode to their typed variant;
/// every other channel value is preserved as [`StatusChannel::Raw`] so
/// that re-encoding reproduces the original bytes exactly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum StatusChannel {
    /// Channel 0: full GPS time and solution-mode summary.
    FullTime(FullTime),
    /// Channel 1: Kalman filter innovations.
    Innovations(Innovations),
    /// A channel this crate has no dedicated structure for.
    Raw { channel: u8, payload: [u8; STATUS_CHANNEL_LENGTH] },
}

impl StatusChannel {
    /// Decode the payload for `channel`. Returns `None` for the absent
    /// sentinel channel `0xFF`.
    #[must_use]
    pub fn decode(channel: u8, payload: &[u8; STATUS_CHANNEL_LENGTH]) -> Option<StatusChannel> {
        match channel {
            CHANNEL_ABSENT => None,
            FullTime::CHANNEL => Some(StatusChannel::FullTime(FullTime::decode(payload))),
            Innovations::CHANNEL => Some(StatusChannel::Innovations(Innovations::decode(payload))),
            channel => Some(StatusChannel::Raw {
                channel,
                payload: *payload,
            }),
        }
    }

    /// The channel byte transmitted at packet byte 62.
    #[must_use]
    pub fn channel(&self) -> u8 {
        match self {
            StatusChannel::FullTime(_) => FullTime::CHANNEL,
            StatusChannel::Innovations(_) => Innovations::CHANNEL,
            StatusChannel::Raw { channel, .. } => *channel,
        }
    }

    /// Encode the 8 payload bytes transmitted at packet bytes 63 to 70.
    #[must_use]
    pub fn encode(&self) -> [u8; STATUS_CHANNEL_LENGTH] {
        match self {
            StatusChannel::FullTime(c) => c.encode(),
            StatusChannel::Innovations(c) => c.encode(),
            StatusChannel::Raw { payload, .. } => *payload,
        }
    }
}

/// Status channel 0: full time and navigation-mode summary.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FullTime {
    /// GPS time in whole minutes since the GPS epoch. Together with the
    /// packet's millisecond-into-minute time this gives the full timestamp.
    pub gps_minutes: u32,
    /// Number of GPS satellites tracked.
    pub num_satellites: u8,
    /// Position solution mode.
    pub position_mode: u8,
    /// Velocity solution mode.
    pub velocity_mode: u8,
    /// Orientation (dual antenna) solution mode.
    pub orientation_mode: u8,
}

impl FullTime {
    pub const CHANNEL: u8 = 0;

    fn decode(payload: &[u8; STATUS_CHANNEL_LENGTH]) -> Self {
        FullTime {
            gps_minutes: u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]),
            num_satellites: payload[4],
            position_mode: payload[5],
            velocity_mode: payload[6],
            orientation_mode: payload[7],
        }
    }

    fn encode(&self) -> [u8; STATUS_CHANNEL_LENGTH] {
        let min = self.gps_minutes.to_le_bytes();
        [
            min[0],
            min[1],
            min[2],
            min[3],
            self.num_satellites,
            self.position_mode,
            self.velocity_mode,
            self.orientation_mode,
        ]
    }
}

/// Status channel 1: Kalman filter innovations.
///
/// Each innovation is transmitted as a single filtered byte; the unit's
/// convention is that values persistently over 1.0 indicate the filter
/// disagrees with its measurement updates.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Innovations {
    /// Position innovations, X/Y/Z.
    pub position: [u8; 3],
    /// Velocity innovations, X/Y/Z.
    pub velocity: [u8; 3],
    /// Heading innovation.
    pub heading: u8,
    /// Pitch innovation.
    pub pitch: u8,
}

impl Innovations {
    pub const CHANNEL: u8 = 1;

    fn decode(payload: &[u8; STATUS_CHANNEL_LENGTH]) -> Self {
        Innovations {
            position: [payload[0], payload[1], payload[2]],
            velocity: [payload[3], payload[4], payload[5]],
            heading: payload[6],
            pitch: payload[7],
        }
    }

    fn encode(&self) -> [u8; STATUS_CHANNEL_LENGTH] {
        [
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
            self.heading,
            self.pitch,
        ]
    }
}
