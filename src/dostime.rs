//! DOS date/time packing (§4.7): local headers and central directory
//! records carry a 32-bit DOS timestamp, which only represents even
//! seconds and has no timezone of its own — it is conventionally the
//! archiver's local time.

use chrono::{Datelike, LocalResult, TimeZone, Timelike};

/// Fixed DOS stamp for midnight, 1980-01-01 — the earliest representable
/// date, used whenever the real mtime predates it. `to_le_bytes()` is
/// `{00 00 21 00}`, matching the spec's literal fixed value.
const DOS_EPOCH: u32 = 0x0021_0000;

/// Pack a POSIX-seconds timestamp into a 4-byte little-endian DOS
/// date/time pair (`{time_lo, time_hi, date_lo, date_hi}` packed as one
/// `u32`, time in the low 16 bits, date in the high 16 bits).
pub(crate) fn pack(epoch_seconds: i64) -> u32 {
    // DOS time only represents even seconds; round up.
    let rounded = epoch_seconds + (epoch_seconds & 1);

    let local = match chrono::Local.timestamp_opt(rounded, 0) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // Substitute the current wall-clock time; this is infallible in
            // practice since the system clock is always readable.
            match chrono::Local.timestamp_opt(chrono::Utc::now().timestamp(), 0) {
                LocalResult::Single(dt) => dt,
                LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => return DOS_EPOCH,
            }
        }
    };

    if local.year() < 1980 {
        return DOS_EPOCH;
    }

    let time: u16 = ((local.hour() << 11) | (local.minute() << 5) | (local.second() / 2)) as u16;
    let date: u16 =
        (((local.year() as u32 - 1980) << 9) | (local.month() << 5) | local.day()) as u16;

    (date as u32) << 16 | time as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_1980_clamps_to_dos_epoch() {
        // 1970-01-01, well before the DOS epoch. Check against the spec's
        // literal byte sequence rather than the constant under test.
        assert_eq!(pack(0).to_le_bytes(), [0x00, 0x00, 0x21, 0x00]);
    }

    #[test]
    fn rounds_up_odd_seconds_to_the_next_even_one() {
        // 1_700_000_000 is even; the odd second just before it rounds up to it.
        let even = pack(1_700_000_000);
        let odd = pack(1_699_999_999);
        assert_eq!(even, odd);
    }
}
