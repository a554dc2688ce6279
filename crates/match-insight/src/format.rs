//! Fixed-point number formatting for display values.
//!
//! Rust's `{:.N}` rounds exact binary ties to even (`0.125` → `"0.12"`),
//! while the dashboard convention rounds ties away from zero (`"0.13"`).
//! [`to_fixed`] reproduces the latter.

/// Shown wherever a value is missing or not a finite number.
pub const PLACEHOLDER: &str = "-";

/// Extra digits rendered before rounding. An `f64` that is not an exact tie
/// always differs from one well within this many places.
const GUARD_DIGITS: usize = 30;

/// Format `value` with exactly `digits` fractional digits, rounding halves
/// away from zero.
///
/// Non-finite values render as [`PLACEHOLDER`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let negative = value < 0.0;
    let expanded = format!("{:.*}", digits + GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = expanded
        .split_once('.')
        .unwrap_or((expanded.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .map(|c| c - b'0')
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|&c| c >= b'5');

    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|d| char::from(b'0' + d)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// [`to_fixed`] for optional values, with [`PLACEHOLDER`] for `None`.
pub fn fixed_or_dash(value: Option<f64>, digits: usize) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| to_fixed(v, digits))
}

/// `"#n"` rank label, `"#-"` when unranked.
pub fn rank_label(rank: Option<u32>) -> String {
    match rank {
        Some(r) if r > 0 => format!("#{r}"),
        _ => format!("#{PLACEHOLDER}"),
    }
}
