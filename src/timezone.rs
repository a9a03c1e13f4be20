//! Timezone lookups for displaying dates in the configured timezone.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the UTC offset of `canonical_timezone` in effect at `date_time`.
///
/// Returns `None` if `canonical_timezone` is not a known timezone name.
pub fn get_offset_at(canonical_timezone: &str, date_time: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&date_time).to_utc())
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::datetime};

    use super::get_offset_at;

    #[test]
    fn returns_offset_for_known_timezone() {
        let offset = get_offset_at("America/Sao_Paulo", datetime!(2020-04-20 00:00:00 UTC));

        assert_eq!(offset, UtcOffset::from_hms(-3, 0, 0).ok());
    }

    #[test]
    fn returns_none_for_unknown_timezone() {
        assert_eq!(
            get_offset_at("Not/A_Timezone", datetime!(2020-04-20 00:00:00 UTC)),
            None
        );
    }
}
