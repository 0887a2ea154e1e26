//! Parsing of the two-line `PRICE:` / `SIZE:` reply the prompt asks the model for.

use crate::domain::model::{EstimateResult, RawModelResponse, NOT_AVAILABLE};

const PRICE_LABEL: &str = "PRICE:";
const SIZE_LABEL: &str = "SIZE:";

/// Returns `(price, size)` as written by the model. Unmatched fields stay `"N/A"`;
/// when a label repeats, the last line wins.
pub fn parse_labeled_fields(text: &str) -> (String, String) {
    let mut price = NOT_AVAILABLE.to_string();
    let mut size = NOT_AVAILABLE.to_string();

    for line in text.trim().split('\n') {
        if let Some(rest) = line.strip_prefix(PRICE_LABEL) {
            price = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(SIZE_LABEL) {
            size = rest.trim().to_string();
        }
    }

    (price, size)
}

/// Keeps ASCII digits and periods, in order, and parses what is left.
/// Once a number has started, digits glued to letters belong to a unit (`m2`) and
/// are dropped with it, so `"60 m2"` gives 60.0 while `"PEN1500"` and `"1,500 PEN"`
/// give 1500.0; `"N/A"` or `"1.2.3"` give `None`.
pub fn extract_number(value: &str) -> Option<f64> {
    let mut digits = String::new();
    let mut in_word = false;
    let mut seen_digit = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            in_word = true;
        } else if c.is_ascii_digit() {
            if !(in_word && seen_digit) {
                seen_digit = true;
                in_word = false;
                digits.push(c);
            }
        } else {
            in_word = false;
            if c == '.' {
                digits.push(c);
            }
        }
    }

    digits.parse::<f64>().ok()
}

/// Price divided by size with two decimals, or `"N/A"` when either side is
/// unparseable, the size is zero, or the quotient is not finite.
pub fn price_per_sqm(price: &str, size: &str) -> String {
    let (Some(price_value), Some(size_value)) = (extract_number(price), extract_number(size))
    else {
        return NOT_AVAILABLE.to_string();
    };

    if size_value <= 0.0 {
        return NOT_AVAILABLE.to_string();
    }

    let ratio = price_value / size_value;
    if !ratio.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    format!("{:.2}", ratio)
}

impl EstimateResult {
    pub fn from_model_text(text: &str) -> Self {
        let (price, size) = parse_labeled_fields(text);
        let price_per_sqm = price_per_sqm(&price, &size);

        Self {
            estimated_price: price,
            average_size: size,
            price_per_sqm,
        }
    }
}

impl From<&RawModelResponse> for EstimateResult {
    fn from(raw: &RawModelResponse) -> Self {
        Self::from_model_text(&raw.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_reply() {
        let result = EstimateResult::from_model_text("PRICE: 1500 PEN\nSIZE: 60 m2");

        assert_eq!(result.estimated_price, "1500 PEN");
        assert_eq!(result.average_size, "60 m2");
        assert_eq!(result.price_per_sqm, "25.00");
    }

    #[test]
    fn test_numeric_extraction() {
        assert_eq!(extract_number("1500 PEN"), Some(1500.0));
        // 單位裡的 2 不算數字
        assert_eq!(extract_number("60 m2"), Some(60.0));
        assert_eq!(extract_number("85m2"), Some(85.0));
        assert_eq!(extract_number("60"), Some(60.0));
        // 幣別寫在數字前面
        assert_eq!(extract_number("PEN1500"), Some(1500.0));
        assert_eq!(extract_number("USD2000"), Some(2000.0));
        assert_eq!(extract_number("S1500 per month"), Some(1500.0));
        assert_eq!(extract_number("S/ 2,350.50"), Some(2350.5));
        assert_eq!(extract_number("0"), Some(0.0));
        assert_eq!(extract_number("abc"), None);
        assert_eq!(extract_number("N/A"), None);
        assert_eq!(extract_number("1.2.3"), None);
        assert_eq!(extract_number("."), None);
    }

    #[test]
    fn test_unrecognized_reply_is_all_sentinels() {
        let result = EstimateResult::from_model_text("I could not find data.");
        assert_eq!(result, EstimateResult::default());
    }

    #[test]
    fn test_zero_size_guard() {
        let result = EstimateResult::from_model_text("PRICE: abc\nSIZE: 0");
        assert_eq!(result.estimated_price, "abc");
        assert_eq!(result.average_size, "0");
        assert_eq!(result.price_per_sqm, "N/A");

        let result = EstimateResult::from_model_text("PRICE: 1200\nSIZE: 0 m");
        assert_eq!(result.price_per_sqm, "N/A");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let result = EstimateResult::from_model_text("PRICE: 1000\nPRICE: 2000\nSIZE: 50");
        assert_eq!(result.estimated_price, "2000");
        assert_eq!(result.price_per_sqm, "40.00");
    }

    #[test]
    fn test_line_order_and_noise_are_ignored() {
        let text = "Here is what I found:\nSIZE: 75\nsome listing text\nPRICE: 3000 PEN\n";
        let result = EstimateResult::from_model_text(text);
        assert_eq!(result.estimated_price, "3000 PEN");
        assert_eq!(result.average_size, "75");
        assert_eq!(result.price_per_sqm, "40.00");
    }

    #[test]
    fn test_prefix_is_case_sensitive_and_anchored() {
        let result = EstimateResult::from_model_text("price: 1500\nFound\n  SIZE: 60\nSIZE: 30");
        assert_eq!(result.estimated_price, "N/A");
        assert_eq!(result.average_size, "30");
        assert_eq!(result.price_per_sqm, "N/A");
    }

    #[test]
    fn test_leading_whitespace_of_whole_reply_is_trimmed() {
        let result = EstimateResult::from_model_text("\n   PRICE: 900\r\nSIZE: 45\r\n");
        assert_eq!(result.estimated_price, "900");
        assert_eq!(result.average_size, "45");
        assert_eq!(result.price_per_sqm, "20.00");
    }

    #[test]
    fn test_missing_size_gives_no_ratio() {
        let result = EstimateResult::from_model_text("PRICE: 1500 PEN");
        assert_eq!(result.estimated_price, "1500 PEN");
        assert_eq!(result.average_size, "N/A");
        assert_eq!(result.price_per_sqm, "N/A");
    }

    #[test]
    fn test_currency_prefix_keeps_ratio() {
        assert_eq!(price_per_sqm("PEN1500", "60"), "25.00");
        assert_eq!(price_per_sqm("USD2000", "80m2"), "25.00");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(price_per_sqm("1000", "3"), "333.33");
        assert_eq!(price_per_sqm("2000", "3"), "666.67");
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = RawModelResponse::new("PRICE: 2,100 PEN\nSIZE: 70 m²");
        let first = EstimateResult::from(&raw);
        let second = EstimateResult::from(&raw);
        assert_eq!(first, second);
        assert_eq!(first.price_per_sqm, "30.00");
    }
}
