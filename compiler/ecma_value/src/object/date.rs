//! String form of date objects.

const MS_PER_DAY: f64 = 86_400_000.0;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Render a time value the way `String(date)` does, in UTC.
///
/// `Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)`
pub fn format_date(time: f64) -> String {
    if !time.is_finite() {
        return "Invalid Date".to_string();
    }
    let days = (time / MS_PER_DAY).floor();
    let ms_in_day = time - days * MS_PER_DAY;
    let days = days as i64;

    let (year, month, day) = civil_from_days(days);
    // 1970-01-01 was a Thursday.
    let weekday = (days + 4).rem_euclid(7) as usize;

    let secs = (ms_in_day / 1000.0).floor() as i64;
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);

    let year = if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("{year:04}")
    };

    format!(
        "{} {} {day:02} {year} {hours:02}:{minutes:02}:{seconds:02} GMT+0000 (Coordinated Universal Time)",
        WEEKDAYS[weekday],
        MONTHS[(month - 1) as usize],
    )
}

/// Days since 1970-01-01 to (year, month 1..=12, day 1..=31).
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
