//! Number and currency rendering for `formatNumber` and `formatCurrency`.

use std::iter;

use dynval_semantics::currency_symbol;

/// Upper bound on requested decimal places.
pub const MAX_DECIMALS: usize = 20;

/// Turn a requested decimal count into a usable one.
///
/// Absent means `default`; negative counts clamp to zero and large ones to
/// [`MAX_DECIMALS`].
pub fn clamp_decimals(requested: Option<i64>, default: usize) -> usize {
    requested.map_or(default, |d| {
        usize::try_from(d).unwrap_or(0).min(MAX_DECIMALS)
    })
}

/// Round `value` to `decimals` places, optionally grouping the integer part
/// in thousands.
///
/// Ties round away from zero, on the shortest decimal form of the value, so
/// `2.5` gives `3` and `0.125` at two places gives `0.13`. Non-finite values
/// render as their float display (`NaN`, `inf`).
///
/// # Example
///
/// ```
/// use dynval::interpreter::format_number;
///
/// assert_eq!(format_number(1234567.891, 2, true), "1,234,567.89");
/// assert_eq!(format_number(1234567.891, 0, false), "1234568");
/// assert_eq!(format_number(-0.001, 2, false), "0.00");
/// assert_eq!(format_number(2.5, 0, false), "3");
/// ```
pub fn format_number(value: f64, decimals: usize, grouping: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = round_half_away(value.abs(), decimals);
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() * 2);
    if value.is_sign_negative() && has_nonzero_digit(&digits) {
        out.push('-');
    }
    if grouping {
        out.push_str(&group_thousands(integer));
    } else {
        out.push_str(integer);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Render `value` as an amount of `currency`.
///
/// The symbol comes from the fixed table in `dynval-semantics`; unknown codes
/// render as `"<CODE> "`. The integer part is always grouped and the decimal
/// part zero-padded. A negative sign precedes the symbol.
///
/// # Example
///
/// ```
/// use dynval::interpreter::format_currency;
///
/// assert_eq!(format_currency(29.99, "USD", 2), "$29.99");
/// assert_eq!(format_currency(-1500.0, "eur", 2), "-€1,500.00");
/// assert_eq!(format_currency(5.0, "CHF", 2), "CHF 5.00");
/// assert_eq!(format_currency(1200.0, "JPY", 0), "¥1,200");
/// ```
pub fn format_currency(value: f64, currency: &str, decimals: usize) -> String {
    let symbol = currency_symbol(currency).map_or_else(
        || format!("{} ", currency.to_ascii_uppercase()),
        str::to_string,
    );
    if !value.is_finite() {
        return format!("{symbol}{value}");
    }

    let amount = format_number(value.abs(), decimals, true);
    if value.is_sign_negative() && has_nonzero_digit(&amount) {
        format!("-{symbol}{amount}")
    } else {
        format!("{symbol}{amount}")
    }
}

/// Round a non-negative finite value to exactly `decimals` places.
///
/// Works on the digits of the shortest round-tripping representation, which
/// never uses exponent notation, so no binary scaling error creeps in.
fn round_half_away(value: f64, decimals: usize) -> String {
    let shortest = value.to_string();
    let (integer, fraction) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(iter::repeat(b'0')).take(decimals))
        .collect();
    let mut integer_len = integer.len();

    if fraction.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            integer_len += 1;
        }
    }

    let (integer, fraction) = digits.split_at(integer_len);
    let mut out = String::from_utf8_lossy(integer).into_owned();
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(fraction));
    }
    out
}

/// Insert `,` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn has_nonzero_digit(digits: &str) -> bool {
    digits.bytes().any(|b| matches!(b, b'1'..=b'9'))
}
