//! Format specifiers applied to placeholder values
//!
//! Integers understand the standard numeric specifiers `D`, `X`, `N`, `F`, `G`
//! (each optionally followed by a precision) plus zero-only custom patterns such
//! as `0000`. `G` with a precision keeps that many significant digits and
//! switches to scientific notation when the value has more. Text values have
//! no formatting of their own and render unchanged whatever the specifier.

use super::{TemplateError, Value};

const MAX_PRECISION: usize = 99;

/// Render `value` using the optional format specifier
pub fn apply(value: &Value, name: &str, specifier: Option<&str>) -> Result<String, TemplateError> {
    let Some(specifier) = specifier else {
        return Ok(value.to_string());
    };

    match value {
        Value::Text(text) => Ok(text.clone()),
        Value::Integer(n) => {
            format_integer(*n, specifier).ok_or_else(|| TemplateError::InvalidSpecifier {
                name: name.to_string(),
                specifier: specifier.to_string(),
            })
        }
    }
}

fn format_integer(n: i64, specifier: &str) -> Option<String> {
    if specifier.chars().all(|c| c == '0') {
        return Some(zero_padded(n, specifier.len()));
    }

    let mut chars = specifier.chars();
    let kind = chars.next()?;
    let rest = chars.as_str();
    let precision = if rest.is_empty() {
        None
    } else {
        let digits = rest.parse::<usize>().ok()?;
        if digits > MAX_PRECISION || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(digits)
    };

    match kind {
        'D' | 'd' => Some(zero_padded(n, precision.unwrap_or(0))),
        'X' => Some(hex(n, precision.unwrap_or(0), true)),
        'x' => Some(hex(n, precision.unwrap_or(0), false)),
        'N' | 'n' => Some(grouped(n, precision.unwrap_or(2))),
        'F' | 'f' => Some(fixed(n, precision.unwrap_or(2))),
        'G' => Some(general(n, precision.unwrap_or(0), 'E')),
        'g' => Some(general(n, precision.unwrap_or(0), 'e')),
        _ => None,
    }
}

fn zero_padded(n: i64, width: usize) -> String {
    if n < 0 {
        format!("-{:0width$}", n.unsigned_abs(), width = width)
    } else {
        format!("{:0width$}", n, width = width)
    }
}

// Negative values print as two's complement.
fn hex(n: i64, width: usize, upper: bool) -> String {
    if upper {
        format!("{:0width$X}", n, width = width)
    } else {
        format!("{:0width$x}", n, width = width)
    }
}

fn fixed(n: i64, decimals: usize) -> String {
    let sign = if n < 0 { "-" } else { "" };
    with_decimals(format!("{}{}", sign, n.unsigned_abs()), decimals)
}

fn grouped(n: i64, decimals: usize) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    with_decimals(out, decimals)
}

// Round half away from zero to `precision` significant digits, trailing zeros
// of the mantissa dropped.
fn general(n: i64, precision: usize, exponent_char: char) -> String {
    let digits = n.unsigned_abs().to_string();
    if precision == 0 || digits.len() <= precision {
        return n.to_string();
    }

    // digits.len() is at most 20, so precision < 20 and the mantissa fits a u64
    let mut mantissa = digits[..precision]
        .bytes()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));
    let mut exponent = digits.len() - 1;
    if digits.as_bytes()[precision] >= b'5' {
        mantissa += 1;
        if mantissa == 10u64.pow(precision as u32) {
            mantissa /= 10;
            exponent += 1;
        }
    }

    let mantissa = mantissa.to_string();
    let mantissa = mantissa.trim_end_matches('0');
    let (lead, fraction) = mantissa.split_at(1);
    let sign = if n < 0 { "-" } else { "" };
    let point = if fraction.is_empty() { "" } else { "." };
    format!(
        "{}{}{}{}{}+{:02}",
        sign, lead, point, fraction, exponent_char, exponent
    )
}

fn with_decimals(mut whole: String, decimals: usize) -> String {
    if decimals > 0 {
        whole.push('.');
        whole.extend(std::iter::repeat('0').take(decimals));
    }
    whole
}
