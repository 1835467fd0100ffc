//! Device status response

use std::fmt;

use bitflags::bitflags;
use chrono::{NaiveDate, NaiveTime};
use uhppote_core::{Frame, Function, FRAME_SIZE};

use crate::error::{Error, Result};
use crate::field::{extract_integer, status_fields as fields, Field};

/// One of the four doors a board controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Door {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Door {
    pub const ALL: [Door; 4] = [Door::One, Door::Two, Door::Three, Door::Four];

    /// Door number as printed on the board (1-4)
    pub fn number(self) -> u8 {
        self as u8
    }

    fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for Door {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Door::One),
            2 => Ok(Door::Two),
            3 => Ok(Door::Three),
            4 => Ok(Door::Four),
            other => Err(Error::InvalidDoor(other)),
        }
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door {}", self.number())
    }
}

bitflags! {
    /// Door relay outputs, one bit per door
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RelayState: u8 {
        const DOOR_1 = 0x01;
        const DOOR_2 = 0x02;
        const DOOR_3 = 0x04;
        const DOOR_4 = 0x08;
    }
}

impl RelayState {
    /// Relay bit driving `door`
    pub fn for_door(door: Door) -> Self {
        Self::from_bits_retain(1 << door.index())
    }
}

bitflags! {
    /// Alarm inputs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AlarmState: u8 {
        const FORCED_LOCK = 0x01;
        const FIRE = 0x02;
    }
}

/// Decoded response to a device status request
///
/// Values are read lazily from the frame through the [`status_fields`]
/// table; event and reason codes are returned as raw integers.
///
/// [`status_fields`]: crate::field::status_fields
#[derive(Clone, PartialEq, Eq)]
pub struct ControllerStatus {
    frame: Frame,
    raw: [u8; FRAME_SIZE],
}

impl ControllerStatus {
    /// Wrap a validated status response
    pub fn new(frame: Frame) -> Result<Self> {
        let code = u8::from(Function::DeviceStatus);
        if frame.function() != code {
            return Err(Error::NotStatusFrame(frame.function()));
        }

        let raw = <[u8; FRAME_SIZE]>::try_from(frame.as_bytes()).map_err(|_| {
            uhppote_core::Error::FrameLength {
                expected: FRAME_SIZE,
                actual: frame.len(),
            }
        })?;

        Ok(Self { frame, raw })
    }

    /// Parse a status response from raw bytes
    pub fn from_bytes(bytes: impl Into<bytes::Bytes>) -> Result<Self> {
        Self::new(Frame::from_bytes(bytes)?)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn read(&self, field: Field) -> u64 {
        field.read(&self.raw)
    }

    fn read_u8(&self, field: Field) -> u8 {
        self.read(field) as u8
    }

    fn read_u32(&self, field: Field) -> u32 {
        self.read(field) as u32
    }

    /// Read an arbitrary integer from the response
    pub fn extract_integer(&self, offset: usize, length: usize, reverse: bool) -> Result<u64> {
        extract_integer(&self.raw, offset, length, reverse)
    }

    /// Index of the most recent event record
    pub fn last_index(&self) -> u32 {
        self.read_u32(fields::LAST_INDEX)
    }

    pub fn latest_swipe(&self) -> u8 {
        self.read_u8(fields::LATEST_SWIPE)
    }

    pub fn no_access(&self) -> u8 {
        self.read_u8(fields::NO_ACCESS)
    }

    pub fn last_door(&self) -> u8 {
        self.read_u8(fields::LAST_DOOR)
    }

    pub fn last_door_open(&self) -> u8 {
        self.read_u8(fields::LAST_DOOR_OPEN)
    }

    pub fn last_card_id(&self) -> u32 {
        self.read_u32(fields::LAST_CARD_ID)
    }

    /// Timestamp of the last swipe as one 7-byte big-endian integer
    pub fn last_swipe_time_raw(&self) -> u64 {
        self.read(fields::LAST_SWIPE_TIME)
    }

    /// The seven timestamp bytes of the last swipe, in frame order
    pub fn last_swipe_time_bytes(&self) -> [u8; 7] {
        let mut out = [0u8; 7];
        out.copy_from_slice(&self.last_swipe_time_raw().to_be_bytes()[1..]);
        out
    }

    pub fn last_swipe_reason(&self) -> u8 {
        self.read_u8(fields::LAST_SWIPE_REASON)
    }

    /// Door sensor byte; non-zero means open
    pub fn door_state(&self, door: Door) -> u8 {
        self.read_u8(fields::DOOR_OPEN[door.index()])
    }

    pub fn door_open(&self, door: Door) -> bool {
        self.door_state(door) != 0
    }

    /// Exit button byte; non-zero means pressed
    pub fn button_state(&self, door: Door) -> u8 {
        self.read_u8(fields::DOOR_BUTTON[door.index()])
    }

    pub fn button_pressed(&self, door: Door) -> bool {
        self.button_state(door) != 0
    }

    pub fn system_status(&self) -> u8 {
        self.read_u8(fields::SYSTEM_STATUS)
    }

    pub fn is_system_ok(&self) -> bool {
        self.system_status() == 0
    }

    /// Board clock as `(hour, minute, second)`
    pub fn system_time_raw(&self) -> (u8, u8, u8) {
        (
            self.read_u8(fields::SYSTEM_HOUR),
            self.read_u8(fields::SYSTEM_MINUTE),
            self.read_u8(fields::SYSTEM_SECOND),
        )
    }

    /// Board clock, if the bytes form a valid time of day
    pub fn system_time(&self) -> Option<NaiveTime> {
        let (h, m, s) = self.system_time_raw();
        NaiveTime::from_hms_opt(h.into(), m.into(), s.into())
    }

    /// Board date as `(two-digit year, month, day)`
    pub fn system_date_raw(&self) -> (u8, u8, u8) {
        (
            self.read_u8(fields::SYSTEM_YEAR),
            self.read_u8(fields::SYSTEM_MONTH),
            self.read_u8(fields::SYSTEM_DAY),
        )
    }

    /// Board date, with the year counted from 2000
    pub fn system_date(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.system_date_raw();
        NaiveDate::from_ymd_opt(2000 + i32::from(y), m.into(), d.into())
    }

    pub fn packet_serial_number(&self) -> u32 {
        self.read_u32(fields::PACKET_SERIAL_NUMBER)
    }

    pub fn backup(&self) -> u32 {
        self.read_u32(fields::BACKUP)
    }

    pub fn special_message(&self) -> u8 {
        self.read_u8(fields::SPECIAL_MESSAGE)
    }

    pub fn relays(&self) -> RelayState {
        RelayState::from_bits_retain(self.read_u8(fields::RELAYS))
    }

    pub fn door_unlocked(&self, door: Door) -> bool {
        self.relays().contains(RelayState::for_door(door))
    }

    pub fn alarms(&self) -> AlarmState {
        AlarmState::from_bits_retain(self.read_u8(fields::ALARMS))
    }
}

impl fmt::Debug for ControllerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerStatus")
            .field("last_index", &self.last_index())
            .field("last_card_id", &self.last_card_id())
            .field("last_swipe_reason", &self.last_swipe_reason())
            .field("system_status", &self.system_status())
            .field("system_date", &self.system_date_raw())
            .field("system_time", &self.system_time_raw())
            .field("relays", &self.relays())
            .field("alarms", &self.alarms())
            .finish()
    }
}

impl fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (yy, mo, dd) = self.system_date_raw();
        let (hh, mi, ss) = self.system_time_raw();
        write!(
            f,
            "Status[event: {}, card: {}, clock: 20{:02}-{:02}-{:02} {:02}:{:02}:{:02}, system: {}]",
            self.last_index(),
            self.last_card_id(),
            yy,
            mo,
            dd,
            hh,
            mi,
            ss,
            if self.is_system_ok() { "ok" } else { "fault" }
        )
    }
}
