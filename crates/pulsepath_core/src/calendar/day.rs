//! Day bucketing between epoch timestamps and local calendar dates.
//!
//! # Invariants
//! - The zone is always supplied by the caller; nothing here reads the device zone.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

/// Local calendar day of `timestamp_ms` in `zone`.
///
/// Returns `None` only for timestamps outside chrono's representable range.
pub fn bucket_day<Tz: TimeZone>(timestamp_ms: i64, zone: &Tz) -> Option<NaiveDate> {
    let instant = Utc.timestamp_millis_opt(timestamp_ms).single()?;
    Some(instant.with_timezone(zone).date_naive())
}

/// `yyyy-MM-dd` key for a day.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Epoch milliseconds of a local wall-clock time in `zone`.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Times inside a
/// DST gap resolve to the start of `date`, and failing that to the wall clock
/// read as UTC.
pub fn local_datetime_ms<Tz: TimeZone>(zone: &Tz, date: NaiveDate, time: NaiveTime) -> i64 {
    let wall = date.and_time(time);
    if let Some(resolved) = zone.from_local_datetime(&wall).earliest() {
        return resolved.timestamp_millis();
    }
    if let Some(start) = zone.from_local_datetime(&date.and_time(NaiveTime::MIN)).earliest() {
        return start.timestamp_millis();
    }
    wall.and_utc().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::{bucket_day, day_key, local_datetime_ms};
    use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn late_evening_entry_stays_on_its_local_day() {
        let zone = FixedOffset::east_opt(2 * 3600).expect("offset");
        let ts = zone
            .with_ymd_and_hms(2024, 3, 7, 23, 59, 0)
            .single()
            .expect("local time")
            .timestamp_millis();

        assert_eq!(bucket_day(ts, &zone), Some(date(2024, 3, 7)));
        assert_ne!(bucket_day(ts, &zone), Some(date(2024, 3, 8)));
    }

    #[test]
    fn same_instant_buckets_differently_per_zone() {
        let utc = FixedOffset::east_opt(0).expect("utc");
        let tokyo = FixedOffset::east_opt(9 * 3600).expect("tokyo");
        let ts = utc
            .with_ymd_and_hms(2024, 3, 7, 20, 0, 0)
            .single()
            .expect("instant")
            .timestamp_millis();

        assert_eq!(bucket_day(ts, &utc), Some(date(2024, 3, 7)));
        assert_eq!(bucket_day(ts, &tokyo), Some(date(2024, 3, 8)));
    }

    #[test]
    fn day_key_is_zero_padded() {
        assert_eq!(day_key(date(2024, 3, 4)), "2024-03-04");
    }

    #[test]
    fn local_datetime_roundtrips_through_bucket() {
        let zone = FixedOffset::west_opt(5 * 3600).expect("offset");
        let time = NaiveTime::from_hms_opt(9, 0, 0).expect("time");
        let ms = local_datetime_ms(&zone, date(2024, 1, 31), time);
        assert_eq!(bucket_day(ms, &zone), Some(date(2024, 1, 31)));
    }
}
