//! NCOM structure-A packet codec.
//!
//! Structure-A is the variant emitted for customers. It is 72 bytes split
//! into three batches: Batch A (inertial measurements, bytes 1-22),
//! Batch B (navigation solution, bytes 23-61), and Batch S (status
//! channel, bytes 62-71). Each batch ends with a checksum over all packet
//! bytes so far, sync byte excluded, so low-latency consumers can use
//! Batch A without waiting for the rest of the packet to arrive.

use serde::{Deserialize, Serialize};

use crate::fixed24;
use crate::packet::{calculate_checksum, seek_sync, PACKET_LENGTH, SYNC_BYTE};
use crate::status::{StatusChannel, CHANNEL_ABSENT, STATUS_CHANNEL_LENGTH};
use crate::{Error, Result};

const ACCELERATION_SCALING: f32 = 1e-4;
const ANGULAR_RATE_SCALING: f32 = 1e-5;
const VELOCITY_SCALING: f32 = 1e-4;
const ORIENTATION_SCALING: f32 = 1e-6;

const NAV_STATUS_INDEX: usize = 21;
const CHECKSUM_1_INDEX: usize = 22;
const CHECKSUM_2_INDEX: usize = 61;
const STATUS_CHANNEL_INDEX: usize = 62;
const CHECKSUM_3_INDEX: usize = 71;

/// Navigation status values a structure-A packet may carry. Any other
/// value at byte 21 means the candidate position is not a structure-A
/// packet at all.
const ALLOWED_NAV_STATUSES: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 10, 20, 21, 22];

/// Milliseconds into the current GPS minute. Range [0, 59999].
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u16);

impl Time {
    /// Largest representable value, the last millisecond of the minute.
    pub const MAX_MILLIS: u16 = 59_999;

    /// Create a `Time`.
    ///
    /// # Errors
    /// [`Error::TimeOutOfRange`] if `millis` is past the end of the minute.
    pub fn new(millis: u16) -> Result<Self> {
        if millis > Self::MAX_MILLIS {
            return Err(Error::TimeOutOfRange(millis));
        }
        Ok(Time(millis))
    }

    #[must_use]
    pub fn millis(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Time {
    type Error = Error;

    fn try_from(millis: u16) -> Result<Self> {
        Time::new(millis)
    }
}

/// A decoded NCOM structure-A packet.
///
/// The three `checksum*` flags record whether the corresponding checksum
/// byte matched when the packet was decoded; a mismatch never fails the
/// decode. Packets built by hand have all flags default to `false` and
/// [`PacketA::encode`] always writes correct checksum bytes regardless.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PacketA {
    /// Milliseconds into the current GPS minute.
    pub time: Time,
    /// Acceleration in the X direction, m/s².
    pub acceleration_x: f32,
    /// Acceleration in the Y direction, m/s².
    pub acceleration_y: f32,
    /// Acceleration in the Z direction, m/s².
    pub acceleration_z: f32,
    /// Angular rate about the X axis, rad/s.
    pub angular_rate_x: f32,
    /// Angular rate about the Y axis, rad/s.
    pub angular_rate_y: f32,
    /// Angular rate about the Z axis, rad/s.
    pub angular_rate_z: f32,
    /// Navigation status byte. Opaque here beyond membership in the
    /// structure-A allowed set; 4 is the unit's "Locked" state.
    pub navigation_status: u8,
    /// Whether the Batch A checksum (bytes 1-21) verified on decode.
    pub checksum1: bool,
    /// Latitude in radians.
    pub latitude: f64,
    /// Longitude in radians.
    pub longitude: f64,
    /// Altitude in radians.
    pub altitude: f32,
    /// North velocity, m/s.
    pub north_velocity: f32,
    /// East velocity, m/s.
    pub east_velocity: f32,
    /// Down velocity, m/s.
    pub down_velocity: f32,
    /// Heading in radians, ±π.
    pub heading: f32,
    /// Pitch in radians, ±π/2.
    pub pitch: f32,
    /// Roll in radians, ±π.
    pub roll: f32,
    /// Whether the Batch B checksum (bytes 1-60) verified on decode.
    pub checksum2: bool,
    /// Batch S status channel, if one is present.
    pub status_channel: Option<StatusChannel>,
    /// Whether the Batch S checksum (bytes 1-70) verified on decode.
    pub checksum3: bool,
}

impl PacketA {
    /// Encode to wire bytes.
    ///
    /// All three checksum bytes are computed fresh; the `checksum*` flags
    /// on this packet are ignored.
    #[must_use]
    pub fn encode(&self) -> [u8; PACKET_LENGTH] {
        let mut buf = [0u8; PACKET_LENGTH];
        buf[0] = SYNC_BYTE;

        // Batch A
        buf[1..3].copy_from_slice(&self.time.millis().to_le_bytes());
        buf[3..6].copy_from_slice(&fixed24::encode(self.acceleration_x, ACCELERATION_SCALING));
        buf[6..9].copy_from_slice(&fixed24::encode(self.acceleration_y, ACCELERATION_SCALING));
        buf[9..12].copy_from_slice(&fixed24::encode(self.acceleration_z, ACCELERATION_SCALING));
        buf[12..15].copy_from_slice(&fixed24::encode(self.angular_rate_x, ANGULAR_RATE_SCALING));
        buf[15..18].copy_from_slice(&fixed24::encode(self.angular_rate_y, ANGULAR_RATE_SCALING));
        buf[18..21].copy_from_slice(&fixed24::encode(self.angular_rate_z, ANGULAR_RATE_SCALING));
        buf[NAV_STATUS_INDEX] = self.navigation_status;
        buf[CHECKSUM_1_INDEX] = calculate_checksum(&buf[1..CHECKSUM_1_INDEX]);

        // Batch B
        buf[23..31].copy_from_slice(&self.latitude.to_le_bytes());
        buf[31..39].copy_from_slice(&self.longitude.to_le_bytes());
        buf[39..43].copy_from_slice(&self.altitude.to_le_bytes());
        buf[43..46].copy_from_slice(&fixed24::encode(self.north_velocity, VELOCITY_SCALING));
        buf[46..49].copy_from_slice(&fixed24::encode(self.east_velocity, VELOCITY_SCALING));
        buf[49..52].copy_from_slice(&fixed24::encode(self.down_velocity, VELOCITY_SCALING));
        buf[52..55].copy_from_slice(&fixed24::encode(self.heading, ORIENTATION_SCALING));
        buf[55..58].copy_from_slice(&fixed24::encode(self.pitch, ORIENTATION_SCALING));
        buf[58..61].copy_from_slice(&fixed24::encode(self.roll, ORIENTATION_SCALING));
        buf[CHECKSUM_2_INDEX] = calculate_checksum(&buf[1..CHECKSUM_2_INDEX]);

        // Batch S; absent channel leaves the payload bytes zeroed
        match &self.status_channel {
            Some(channel) => {
                buf[STATUS_CHANNEL_INDEX] = channel.channel();
                buf[63..71].copy_from_slice(&channel.encode());
            }
            None => buf[STATUS_CHANNEL_INDEX] = CHANNEL_ABSENT,
        }
        buf[CHECKSUM_3_INDEX] = calculate_checksum(&buf[1..CHECKSUM_3_INDEX]);

        buf
    }

    /// Decode the packet starting at the first byte of `dat`.
    ///
    /// Checksum mismatches are recorded in the returned packet's
    /// `checksum*` flags and do not fail the decode.
    ///
    /// # Errors
    /// [`Error::NotEnoughData`] if `dat` holds less than a full packet,
    /// [`Error::InvalidSync`] if it does not start with the sync byte,
    /// [`Error::InvalidNavigationStatus`] if byte 21 is not a structure-A
    /// status, and [`Error::TimeOutOfRange`] if the time field is past the
    /// end of the GPS minute. All of these mean only that no packet starts
    /// here; scanning may resume one byte further on.
    pub fn decode_at(dat: &[u8]) -> Result<PacketA> {
        if dat.len() < PACKET_LENGTH {
            return Err(Error::NotEnoughData {
                actual: dat.len(),
                needed: PACKET_LENGTH,
            });
        }
        if dat[0] != SYNC_BYTE {
            return Err(Error::InvalidSync(dat[0]));
        }
        let navigation_status = dat[NAV_STATUS_INDEX];
        if !ALLOWED_NAV_STATUSES.contains(&navigation_status) {
            return Err(Error::InvalidNavigationStatus(navigation_status));
        }

        let mut payload = [0u8; STATUS_CHANNEL_LENGTH];
        payload.copy_from_slice(&dat[63..71]);

        Ok(PacketA {
            // Batch A
            time: Time::new(u16::from_le_bytes([dat[1], dat[2]]))?,
            acceleration_x: fixed24::decode(take3(dat, 3), ACCELERATION_SCALING),
            acceleration_y: fixed24::decode(take3(dat, 6), ACCELERATION_SCALING),
            acceleration_z: fixed24::decode(take3(dat, 9), ACCELERATION_SCALING),
            angular_rate_x: fixed24::decode(take3(dat, 12), ANGULAR_RATE_SCALING),
            angular_rate_y: fixed24::decode(take3(dat, 15), ANGULAR_RATE_SCALING),
            angular_rate_z: fixed24::decode(take3(dat, 18), ANGULAR_RATE_SCALING),
            navigation_status,
            checksum1: calculate_checksum(&dat[1..CHECKSUM_1_INDEX]) == dat[CHECKSUM_1_INDEX],
            // Batch B
            latitude: f64::from_le_bytes(dat[23..31].try_into().unwrap()),
            longitude: f64::from_le_bytes(dat[31..39].try_into().unwrap()),
            altitude: f32::from_le_bytes(dat[39..43].try_into().unwrap()),
            north_velocity: fixed24::decode(take3(dat, 43), VELOCITY_SCALING),
            east_velocity: fixed24::decode(take3(dat, 46), VELOCITY_SCALING),
            down_velocity: fixed24::decode(take3(dat, 49), VELOCITY_SCALING),
            heading: fixed24::decode(take3(dat, 52), ORIENTATION_SCALING),
            pitch: fixed24::decode(take3(dat, 55), ORIENTATION_SCALING),
            roll: fixed24::decode(take3(dat, 58), ORIENTATION_SCALING),
            checksum2: calculate_checksum(&dat[1..CHECKSUM_2_INDEX]) == dat[CHECKSUM_2_INDEX],
            // Batch S
            status_channel: StatusChannel::decode(dat[STATUS_CHANNEL_INDEX], &payload),
            checksum3: calculate_checksum(&dat[1..CHECKSUM_3_INDEX]) == dat[CHECKSUM_3_INDEX],
        })
    }

    /// Seek the next sync byte at or after `offset` and decode the packet
    /// starting there. On success returns the packet and the absolute
    /// offset into `dat` one past the packet's end, which is where a
    /// follow-up `decode` call should resume. Note this is a position,
    /// not a count of bytes consumed: when the sync byte is found past
    /// `offset` it also covers the skipped junk.
    ///
    /// # Errors
    /// [`Error::SyncNotFound`] if no viable sync byte remains. Any decode
    /// error applies only to the first candidate position found; callers
    /// wanting to search further should resume one byte past it, which is
    /// what [`crate::PacketScanner`] does.
    pub fn decode(dat: &[u8], offset: usize) -> Result<(PacketA, usize)> {
        let start = seek_sync(dat, offset).ok_or(Error::SyncNotFound)?;
        let packet = PacketA::decode_at(&dat[start..start + PACKET_LENGTH])?;
        Ok((packet, start + PACKET_LENGTH))
    }
}

fn take3(dat: &[u8], at: usize) -> [u8; 3] {
    [dat[at], dat[at + 1], dat[at + 2]]
}
