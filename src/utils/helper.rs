/// Format a number with `decimals` places and comma thousands separators
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    // "-0.00" reads as noise in a table
    if value < 0.0 && grouped.chars().any(|c| matches!(c, '1'..='9')) {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `1,234.57`
pub fn format_amount(value: f64) -> String {
    format_number(value, 2)
}

/// `1,234.57 ADA`
pub fn format_ada(value: f64) -> String {
    format!("{} ADA", format_number(value, 2))
}

/// `$1,234.57`
pub fn format_usd(value: f64) -> String {
    format!("${}", format_number(value, 2))
}

/// `$0.350000`
pub fn format_price(value: f64) -> String {
    format!("${}", format_number(value, 6))
}

/// Shorten a long identifier (address, asset unit) to `head...tail`
pub fn shorten_identifier(s: &str, keep: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= keep * 2 + 3 {
        return s.to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}...{}", head, tail)
}
