//! Currency tables and amount normalization. Everything here is a pure
//! function over `&str`/`f64`; parsing never fails, it degrades to zero.

/// Fallback for unknown or missing currency codes.
pub const DEFAULT_CURRENCY: Currency = Currency::Inr;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Cad,
    Aud,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
    ];

    pub fn from_code(code: &str) -> Currency {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "INR" => Currency::Inr,
            "JPY" => Currency::Jpy,
            "CAD" => Currency::Cad,
            "AUD" => Currency::Aud,
            _ => DEFAULT_CURRENCY,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
        }
    }

    pub fn decimal_places(self) -> usize {
        match self {
            Currency::Inr | Currency::Jpy => 0,
            _ => 2,
        }
    }

    fn group_separator(self) -> char {
        match self {
            Currency::Eur => '.',
            _ => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Currency::Eur => ',',
            _ => '.',
        }
    }

    fn uses_lakh_grouping(self) -> bool {
        matches!(self, Currency::Inr)
    }
}

/// Normalizes a user-typed amount to a plain decimal. Group separators
/// for the code are dropped, the code's decimal separator becomes `.`,
/// every other non-numeric character (symbols, spaces, stray letters)
/// is stripped, and the longest leading float prefix of what remains is
/// parsed. Unparseable input is `0.0`; this runs on every keystroke and
/// must never panic.
pub fn parse_amount(raw: &str, currency: Currency) -> f64 {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == currency.group_separator() {
            continue;
        }
        let ch = if ch == currency.decimal_separator() {
            '.'
        } else {
            ch
        };
        if ch.is_ascii_digit() || ch == '.' || ch == '-' {
            cleaned.push(ch);
        }
    }

    match parse_float_prefix(&cleaned) {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// parseFloat semantics: an optional sign, digits, an optional point and
// fraction, ignoring whatever trails. "12-34" is 12, not an error.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Renders an amount for display: symbol, grouped digits, the code's
/// decimal places. The inverse of `parse_amount` up to that precision.
pub fn format_amount(value: f64, currency: Currency) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let magnitude = format!("{:.*}", currency.decimal_places(), value.abs());
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (magnitude.as_str(), None),
    };

    let rounds_to_zero = !magnitude.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let mut out = String::with_capacity(magnitude.len() + 8);
    if value < 0.0 && !rounds_to_zero {
        out.push('-');
    }
    out.push_str(currency.symbol());
    out.push_str(&group_digits(int_part, currency));
    if let Some(frac) = frac_part {
        out.push(currency.decimal_separator());
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, currency: Currency) -> String {
    let len = digits.len();
    let mut boundaries = Vec::new();
    let mut pos = len.saturating_sub(3);
    while pos > 0 {
        boundaries.push(pos);
        // Indian grouping keeps the rightmost three digits together and
        // pairs everything above them: 12,34,567.
        pos = pos.saturating_sub(if currency.uses_lakh_grouping() { 2 } else { 3 });
    }

    let mut out = String::with_capacity(len + boundaries.len());
    for (idx, ch) in digits.chars().enumerate() {
        if boundaries.contains(&idx) {
            out.push(currency.group_separator());
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn from_code_is_case_insensitive_and_defaults_unknown() {
        assert_eq!(Currency::from_code("usd"), Currency::Usd);
        assert_eq!(Currency::from_code(" GBP "), Currency::Gbp);
        assert_eq!(Currency::from_code("XYZ"), DEFAULT_CURRENCY);
        assert_eq!(Currency::from_code(""), DEFAULT_CURRENCY);
    }

    #[test]
    fn parse_strips_symbols_and_grouping() {
        assert_eq!(parse_amount("$1,234.56", Currency::Usd), 1_234.56);
        assert_eq!(parse_amount("₹1,23,456", Currency::Inr), 123_456.0);
        assert_eq!(parse_amount("1.234,56", Currency::Eur), 1_234.56);
        assert_eq!(parse_amount("¥1,234", Currency::Jpy), 1_234.0);
        assert_eq!(parse_amount("  2 500.75 ", Currency::Usd), 2_500.75);
    }

    #[test]
    fn parse_keeps_signs_and_parsefloat_quirks() {
        assert_eq!(parse_amount("-₹500", Currency::Inr), -500.0);
        assert_eq!(parse_amount("$-1,234.56", Currency::Usd), -1_234.56);
        // parseFloat reads the leading prefix and ignores the rest.
        assert_eq!(parse_amount("12-34", Currency::Usd), 12.0);
        assert_eq!(parse_amount("1.2.3", Currency::Usd), 1.2);
        assert_eq!(parse_amount("-.5", Currency::Usd), -0.5);
    }

    #[test]
    fn parse_degrades_to_zero_instead_of_failing() {
        assert_eq!(parse_amount("", Currency::Usd), 0.0);
        assert_eq!(parse_amount("abc", Currency::Usd), 0.0);
        assert_eq!(parse_amount("--", Currency::Usd), 0.0);
        assert_eq!(parse_amount("₹", Currency::Inr), 0.0);
        assert_eq!(parse_amount(".", Currency::Usd), 0.0);
    }

    #[test]
    fn format_applies_symbol_grouping_and_precision() {
        assert_eq!(format_amount(1_234.5, Currency::Usd), "$1,234.50");
        assert_eq!(format_amount(1_234_567.0, Currency::Inr), "₹12,34,567");
        assert_eq!(format_amount(1_234.56, Currency::Eur), "€1.234,56");
        assert_eq!(format_amount(1_234.0, Currency::Jpy), "¥1,234");
        assert_eq!(format_amount(987.0, Currency::Gbp), "£987.00");
        assert_eq!(format_amount(-1_234.0, Currency::Cad), "-C$1,234.00");
    }

    #[test]
    fn format_rounds_to_the_code_precision() {
        assert_eq!(format_amount(0.005, Currency::Usd), "$0.01");
        assert_eq!(format_amount(1_234.4, Currency::Inr), "₹1,234");
        assert_eq!(format_amount(-0.004, Currency::Usd), "$0.00");
    }

    #[test]
    fn lakh_grouping_matches_indian_convention() {
        assert_eq!(format_amount(100.0, Currency::Inr), "₹100");
        assert_eq!(format_amount(1_000.0, Currency::Inr), "₹1,000");
        assert_eq!(format_amount(100_000.0, Currency::Inr), "₹1,00,000");
        assert_eq!(format_amount(10_000_000.0, Currency::Inr), "₹1,00,00,000");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_parse_inverts_format(
            cents in -1_000_000_000i64..1_000_000_000,
            currency_index in 0usize..Currency::ALL.len()
        ) {
            let currency = Currency::ALL[currency_index];
            // Quantize to the code's precision so formatting is lossless.
            let value = if currency.decimal_places() == 0 {
                (cents / 100) as f64
            } else {
                cents as f64 / 100.0
            };

            let display = format_amount(value, currency);
            let parsed = parse_amount(&display, currency);
            prop_assert!(
                (parsed - value).abs() <= 1e-9,
                "{display} parsed back as {parsed}, expected {value}"
            );
        }
    }
}
