// Bitrate cap parsing and target/min/max distribution
//
// The cap is a free-form string ("4500k", "10M", "0"): optional sign, then
// the first run of digits is the value. The unit is whatever remains after
// dropping as many characters as the value has when printed as a JS number,
// so "+5M" and "007k" yield odd units.

use super::types::{BitrateDistribution, TranscodeConfig};

/// Ratio between the cap and the average target for constrained quality
/// (see https://developers.google.com/media/vp9/settings/vod)
pub const MAX_TO_TARGET_RATIO: f64 = 1.45;

/// Sign and leading digit run of `s`, if it has any digits
fn int_prefix(s: &str) -> Option<(bool, &str)> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    (len > 0).then(|| (negative, &rest[..len]))
}

/// Integer prefix of `s`, saturating at `i64::MAX`; 0 when there are no
/// leading digits
fn parse_int_prefix(s: &str) -> i64 {
    match int_prefix(s) {
        Some((negative, digits)) => {
            let value = digits.parse::<i64>().unwrap_or(i64::MAX);
            if negative { -value } else { value }
        }
        None => 0,
    }
}

/// Length of the integer prefix of `s` when printed as a double, the way
/// ECMAScript's `Number.prototype.toString` does it
fn printed_len(s: &str) -> usize {
    let Some((negative, digits)) = int_prefix(s) else {
        return 1;
    };
    let len = match digits.parse::<i64>() {
        Ok(0) => return 1,
        Ok(value) => value.to_string().len(),
        Err(_) => {
            // Only all-digit strings reach here, so the parse cannot fail
            let value: f64 = digits.parse().unwrap_or(f64::INFINITY);
            if value.is_infinite() {
                "Infinity".len()
            } else if value < 1e21 {
                format!("{:.0}", value).len()
            } else {
                // "1e23" here, "1e+23" in JS
                format!("{:e}", value).len() + 1
            }
        }
    };
    if negative { len + 1 } else { len }
}

/// Numeric part of the configured cap; 0 means "no cap"
pub fn max_bitrate_value(config: &TranscodeConfig) -> i64 {
    parse_int_prefix(&config.max_bitrate)
}

/// Unit the user typed after the number ("k", "M", or empty)
pub fn bitrate_unit(config: &TranscodeConfig) -> String {
    let value_len = printed_len(&config.max_bitrate);
    config.max_bitrate.trim().chars().skip(value_len).collect()
}

pub fn is_bitrate_constrained(config: &TranscodeConfig) -> bool {
    max_bitrate_value(config) > 0
}

/// Target/min/max derived from the cap. With no cap all three are zero.
pub fn bitrate_distribution(config: &TranscodeConfig) -> BitrateDistribution {
    let max = max_bitrate_value(config);
    let target = (max as f64 / MAX_TO_TARGET_RATIO).ceil() as i64;
    let min = target as f64 / 2.0;

    BitrateDistribution {
        max,
        target,
        min,
        unit: bitrate_unit(config),
    }
}
