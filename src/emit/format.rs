// src/emit/format.rs

/// Render a float the way the fixture consumers expect: shortest digits that
/// round-trip, a trailing `.0` on integral values, and scientific notation with
/// a signed two-digit exponent once the decimal exponent is below -4 or at
/// least 16 (`1e-05`, `1.5e+16`).
pub fn render_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }

    let sign = if v.is_sign_negative() { "-" } else { "" };
    // `{:e}` already yields the shortest round-trip mantissa, e.g. "1.2345e3"
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let body = if exp < 0 {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    } else {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    };
    format!("{}{}", sign, body)
}

/// Truncate towards zero at two decimal places.
pub fn trunc2(v: f64) -> f64 {
    (v * 100.0).trunc() / 100.0
}

/// Escape a value for use inside a double-quoted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_keep_point_zero() {
        assert_eq!(render_float(1.0), "1.0");
        assert_eq!(render_float(0.0), "0.0");
        assert_eq!(render_float(-0.0), "-0.0");
        assert_eq!(render_float(1200.0), "1200.0");
        assert_eq!(render_float(-42.0), "-42.0");
    }

    #[test]
    fn fractions_use_shortest_digits() {
        assert_eq!(render_float(12.5), "12.5");
        assert_eq!(render_float(0.1), "0.1");
        assert_eq!(render_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(render_float(3.14159), "3.14159");
        assert_eq!(render_float(0.0001), "0.0001");
        assert_eq!(render_float(-0.25), "-0.25");
    }

    #[test]
    fn extremes_switch_to_scientific() {
        assert_eq!(render_float(0.00001), "1e-05");
        assert_eq!(render_float(0.000012), "1.2e-05");
        assert_eq!(render_float(1e16), "1e+16");
        assert_eq!(render_float(1.5e16), "1.5e+16");
        assert_eq!(render_float(-2.5e-7), "-2.5e-07");
        assert_eq!(render_float(1e100), "1e+100");
        assert_eq!(render_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn non_finite() {
        assert_eq!(render_float(f64::NAN), "nan");
        assert_eq!(render_float(f64::INFINITY), "inf");
        assert_eq!(render_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn trunc2_goes_towards_zero() {
        assert_eq!(trunc2(12.349), 12.34);
        assert_eq!(trunc2(-12.349), -12.34);
        assert_eq!(trunc2(3.0), 3.0);
        assert_eq!(render_float(trunc2(2.0 / 3.0)), "0.66");
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("W06000011"), r#""W06000011""#);
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
