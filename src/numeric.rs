//! Base-36 conversion and millisecond trimming of timestamps.

use crate::constants::round_half_up;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render `n` in lowercase base 36.
///
/// Fractional parts are truncated; callers always pass whole milliseconds.
/// Returns an empty string when `n` is not a finite number.
pub fn to_base36(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let n = n.trunc() as i64;
    let mut magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(14);
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if n < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Millisecond offset of `time` from `start_time`.
///
/// Both inputs are rounded to whole milliseconds first. A `time` that rounds
/// to zero is treated as missing and yields exactly 0. Non-finite inputs count
/// as 0.
pub fn trim_timing(time: f64, start_time: f64) -> i64 {
    let time = if time.is_finite() { time } else { 0.0 };
    let start_time = if start_time.is_finite() { start_time } else { 0.0 };

    let time_ms = round_half_up(time) as i64;
    let start_ms = round_half_up(start_time) as i64;

    if time_ms == 0 {
        0
    } else {
        time_ms.saturating_sub(start_ms)
    }
}

/// Parse the leading base-36 number of `s`, stopping at the first non-digit.
///
/// Accepts an optional leading `-` and either letter case. An empty or
/// digit-less prefix parses as 0.
pub fn parse_base36_prefix(s: &str) -> i64 {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let mut value = 0i64;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(36) else { break };
        value = value.saturating_mul(36).saturating_add(i64::from(d));
    }

    if negative {
        -value
    } else {
        value
    }
}
