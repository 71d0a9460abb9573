//! UTC ISO-8601 parsing without a calendar library.
//!
//! Uses Howard Hinnant's civil-calendar algorithm (proleptic Gregorian),
//! valid for any year. Local-time display formatting goes through chrono.

use chrono::{Local, TimeZone};

/// Days since 1970-01-01 for a civil (year, month, day).
pub fn days_from_civil(mut y: i64, m: u32, d: u32) -> i64 {
    y -= i64::from(m <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let m = u64::from(m);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + u64::from(d) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe as i64 - 719468
}

/// Inverse of `days_from_civil`.
pub fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (y + i64::from(m <= 2), m, d)
}

/// Parse `YYYY-MM-DDTHH:MM[:SS[...]]` as UTC epoch seconds.
///
/// Requires at least date + hour + minute; seconds default to 0. Trailing
/// zone designators ("Z", "+00:00") are ignored — upstream timestamps are
/// always UTC.
pub fn parse_iso_utc(text: &str) -> Option<i64> {
    let mut fields = [0i64; 6];
    let mut count = 0;
    let mut cur: Option<i64> = None;
    let mut sign = 1i64;

    for (i, c) in text.chars().enumerate() {
        if let Some(digit) = c.to_digit(10) {
            cur = Some(cur.unwrap_or(0) * 10 + i64::from(digit));
            continue;
        }
        // A leading '-' would be a negative year; interior '-' separates.
        if c == '-' && i == 0 {
            sign = -1;
            continue;
        }
        if let Some(v) = cur.take() {
            if count < 6 {
                fields[count] = if count == 0 { sign * v } else { v };
                count += 1;
            }
        }
        if count >= 6 || matches!(c, 'Z' | '+') {
            break;
        }
        if !matches!(c, '-' | 'T' | ':' | '.') {
            break;
        }
    }
    if let Some(v) = cur {
        if count < 6 {
            fields[count] = if count == 0 { sign * v } else { v };
            count += 1;
        }
    }

    if count < 5 {
        return None;
    }
    let [y, mo, d, hh, mm, ss] = fields;
    if !(1..=12).contains(&mo) || !(1..=31).contains(&d) {
        return None;
    }
    let days = days_from_civil(y, mo as u32, d as u32);
    Some(days * 86400 + hh * 3600 + mm * 60 + ss)
}

/// "HH:MM" in the local timezone; empty for an unknown (zero) epoch.
pub fn hhmm_local(epoch: i64) -> String {
    if epoch <= 0 {
        return String::new();
    }
    match Local.timestamp_opt(epoch, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        _ => String::new(),
    }
}

/// "HH:MM" sliced straight out of an ISO-8601 string, no zone conversion.
pub fn hhmm_from_iso_utc(iso: &str) -> String {
    if iso.len() >= 16 && iso.as_bytes()[10] == b'T' {
        // get() keeps a malformed timestamp with multi-byte text from
        // panicking on a char boundary.
        iso.get(11..16).unwrap_or_default().to_string()
    } else {
        String::new()
    }
}
