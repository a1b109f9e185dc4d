//! Decoder for the legacy packed date / date-time encoding stored in `i64`
//! columns tagged `Date` or `DateTime`.
//!
//! The 64 bits hold, from least to most significant:
//!
//! ```text
//! bit  0      negative flag (time values only)
//! bits 1..4   kind: 1 = time, 2 = date, 3 = date-time
//! bits 4..16  hour
//! bits 16..24 minute
//! bits 24..32 second
//! bits 32..48 year
//! bits 48..56 month
//! bits 56..64 day
//! ```
//!
//! Two columns may encode the same instant with different bit layouts, so
//! checksum hashing works on the canonical text produced by [`PackedDateTime::render`].

const KIND_TIME: u8 = 1;
const KIND_DATE: u8 = 2;
const KIND_DATETIME: u8 = 3;

/// The encoded kind of a packed temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedKind {
    Time,
    Date,
    DateTime,
    /// Kind bits that name no known kind, including the all-zero pattern.
    Unknown(u8),
}

/// A decoded view over one packed temporal `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDateTime {
    pub neg: bool,
    pub kind: PackedKind,
    pub hour: u16,
    pub minute: u8,
    pub second: u8,
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PackedDateTime {
    /// A date value (`YYYY-MM-DD`).
    pub fn date(year: u16, month: u8, day: u8) -> Self {
        Self {
            neg: false,
            kind: PackedKind::Date,
            hour: 0,
            minute: 0,
            second: 0,
            year,
            month,
            day,
        }
    }

    /// A date-time value (`YYYY-MM-DD HH:MM:SS`).
    pub fn datetime(year: u16, month: u8, day: u8, hour: u16, minute: u8, second: u8) -> Self {
        Self {
            neg: false,
            kind: PackedKind::DateTime,
            hour,
            minute,
            second,
            year,
            month,
            day,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        let bits = value as u64;
        let kind = match ((bits >> 1) & 0b111) as u8 {
            KIND_TIME => PackedKind::Time,
            KIND_DATE => PackedKind::Date,
            KIND_DATETIME => PackedKind::DateTime,
            other => PackedKind::Unknown(other),
        };
        Self {
            neg: bits & 1 == 1,
            kind,
            hour: ((bits >> 4) & 0xFFF) as u16,
            minute: (bits >> 16) as u8,
            second: (bits >> 24) as u8,
            year: (bits >> 32) as u16,
            month: (bits >> 48) as u8,
            day: (bits >> 56) as u8,
        }
    }

    pub fn to_i64(&self) -> i64 {
        let kind = match self.kind {
            PackedKind::Time => KIND_TIME,
            PackedKind::Date => KIND_DATE,
            PackedKind::DateTime => KIND_DATETIME,
            PackedKind::Unknown(k) => k & 0b111,
        };
        let bits = (self.neg as u64)
            | (u64::from(kind) << 1)
            | ((u64::from(self.hour) & 0xFFF) << 4)
            | (u64::from(self.minute) << 16)
            | (u64::from(self.second) << 24)
            | (u64::from(self.year) << 32)
            | (u64::from(self.month) << 48)
            | (u64::from(self.day) << 56);
        bits as i64
    }

    /// Writes the canonical text form into `buf` (cleared first).
    ///
    /// Unknown kinds render as the empty string, so hashing them leaves the
    /// accumulator unchanged.
    pub fn render_into(&self, buf: &mut String) {
        use std::fmt::Write;
        buf.clear();
        // Writing into a String cannot fail.
        let _ = match self.kind {
            PackedKind::Date => write!(buf, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
            PackedKind::DateTime => write!(
                buf,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            ),
            PackedKind::Time => write!(
                buf,
                "{}{:02}:{:02}:{:02}",
                if self.neg { "-" } else { "" },
                self.hour,
                self.minute,
                self.second
            ),
            PackedKind::Unknown(_) => Ok(()),
        };
    }

    pub fn render(&self) -> String {
        let mut buf = String::with_capacity(19);
        self.render_into(&mut buf);
        buf
    }
}
