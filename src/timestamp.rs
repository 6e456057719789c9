use chrono::{DateTime, Local, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Local wall-clock time as `YYYY-MM-DD HH:MM:SS.mmm`.
/// Returns an empty string if the clock cannot be read.
pub fn now() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => {
            let secs = i64::try_from(since_epoch.as_secs()).unwrap_or(i64::MAX);
            match Local.timestamp_opt(secs, since_epoch.subsec_nanos()).single() {
                Some(time) => format(&time),
                None => String::new(),
            }
        }
        Err(err) => {
            log::warn!("System clock is before the epoch: {err}");
            String::new()
        }
    }
}

pub fn format<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format() {
        let time = NaiveDate::from_ymd_opt(2014, 9, 4)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 9)
            .unwrap()
            .and_utc();
        assert_eq!(format(&time), "2014-09-04 07:05:03.009");
    }

    #[test]
    fn test_format_truncates_sub_millis() {
        let time = Utc.timestamp_opt(0, 999_999_999).unwrap();
        assert_eq!(format(&time), "1970-01-01 00:00:00.999");
    }

    #[test]
    fn test_now_shape() {
        let re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}$").unwrap();
        let now = now();
        assert!(re.is_match(&now), "unexpected timestamp {now:?}");
    }
}
