use rust_decimal::Decimal;

/// Format an amount with thousands separators and two decimals: 1,234.56
pub fn amount(val: Decimal) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(amount(Decimal::from_str("1234.56").unwrap()), "1,234.56");
        assert_eq!(amount(Decimal::from(-500)), "-500.00");
        assert_eq!(amount(Decimal::ZERO), "0.00");
        assert_eq!(amount(Decimal::from_str("1000000.99").unwrap()), "1,000,000.99");
        assert_eq!(amount(Decimal::from_str("42.1").unwrap()), "42.10");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Brookside", 20), "Brookside");
        assert_eq!(truncate("Brookside Dairy Ltd", 10), "Brookside\u{2026}");
    }
}
