//! Decoder for the compact counters shown under each post ("12", "1.2K",
//! "3M", "10,000").

/// Parse a raw counter into a non-negative integer.
///
/// Branches are tried in a fixed order: `K`, then `M`, then `,`, then a plain
/// integer. Only the first `K`, `M` or `,` is removed. Anything unparsable,
/// negative or absent comes out as 0.
pub fn parse_metric(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let metric = raw.trim();
    if metric.is_empty() {
        return 0;
    }

    if metric.contains('K') {
        scaled(&metric.replacen('K', "", 1), 1_000.0)
    } else if metric.contains('M') {
        scaled(&metric.replacen('M', "", 1), 1_000_000.0)
    } else if metric.contains(',') {
        integer_prefix(&metric.replacen(',', "", 1))
    } else {
        integer_prefix(metric)
    }
}

fn scaled(number: &str, factor: f64) -> u64 {
    match float_prefix(number) {
        // Rounded so "4.1M" is not cut to 4099999; `as` saturates and maps NaN to 0
        Some(value) => (value * factor).round() as u64,
        None => 0,
    }
}

/// Longest leading decimal float, `parseFloat` style: optional sign, digits,
/// optional fraction, optional exponent, or `Infinity`.
fn float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Longest leading base-10 integer, `parseInt` style. Negative values
/// clamp to 0 and oversized values saturate.
fn integer_prefix(s: &str) -> u64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 || negative {
        return 0;
    }

    digits[..len]
        .bytes()
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
}
