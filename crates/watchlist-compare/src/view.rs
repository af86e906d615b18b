//! Typed view model for a comparison, and the field formatting rules

use crate::api::{ComparisonResult, StockSummary};
use crate::comparator::CompareOutcome;
use crate::error::{CompareError, MSG_BACKEND_FALLBACK};
use serde::Serialize;
use serde_json::Value;

/// Shown for any field that is missing or not numeric
pub const PLACEHOLDER: &str = "-";

/// Column headers, in display order
pub const HEADERS: [&str; 5] = ["Stock", "Price", "Change", "P/E", "Market cap"];

/// Interpret a JSON value as a finite number
///
/// Numbers and numeric strings count; blanks, `null`, booleans and
/// non-finite values do not.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    // normalise -0 so it never prints with a sign
    n.is_finite().then_some(if n == 0.0 { 0.0 } else { n })
}

/// Fixed-point text with `places` decimals, rounding ties away from zero
///
/// The decision is made on the exact decimal expansion of `n`, so `10.125`
/// (exact in binary) becomes `10.13` while `1.005` (stored just below)
/// stays `1.00`.
pub fn to_fixed(n: f64, places: usize) -> String {
    // wide enough to print any finite f64 exactly
    let exact = format!("{:.1074}", n.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5');

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let int_digits: String = digits[..split].iter().copied().map(char::from).collect();
    let frac_digits: String = digits[split..].iter().copied().map(char::from).collect();
    let sign = if n < 0.0 { "-" } else { "" };

    if places == 0 {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_digits}")
    }
}

/// `$150.20`
pub fn format_price(value: Option<&Value>) -> String {
    value
        .and_then(numeric)
        .map_or_else(|| PLACEHOLDER.to_string(), |n| format!("${}", to_fixed(n, 2)))
}

/// `+1.23%`, `-0.40%`, `0.00%`
pub fn format_change(value: Option<&Value>) -> String {
    value.and_then(numeric).map_or_else(
        || PLACEHOLDER.to_string(),
        |n| {
            let sign = if n > 0.0 { "+" } else { "" };
            format!("{sign}{}%", to_fixed(n, 2))
        },
    )
}

/// P/E as the backend sent it: shortest number form or the raw string
pub fn format_pe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => numeric(v).map_or_else(|| v.to_string(), |n| n.to_string()),
    }
}

/// Market cap with `,` grouping, e.g. `2,750,000,000,000`
pub fn format_market_cap(value: Option<&Value>) -> String {
    value
        .and_then(numeric)
        .map_or_else(|| PLACEHOLDER.to_string(), group_thousands)
}

/// Group the integer part in threes and keep at most three fraction digits
fn group_thousands(n: f64) -> String {
    let fixed = to_fixed(n.abs(), 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let sign = if n < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRow {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub pe_ratio: String,
    pub market_cap: String,
}

impl StockRow {
    pub fn from_summary(summary: &StockSummary) -> Self {
        let symbol = summary
            .symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string();
        let name = summary
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map_or_else(|| symbol.clone(), str::to_string);

        Self {
            price: format_price(summary.price.as_ref()),
            change: format_change(summary.change.as_ref()),
            pe_ratio: format_pe(summary.pe_ratio.as_ref()),
            market_cap: format_market_cap(summary.market_cap.as_ref()),
            symbol,
            name,
        }
    }

    /// Cells after the stock column, in header order
    pub fn values(&self) -> [&str; 4] {
        [&self.price, &self.change, &self.pe_ratio, &self.market_cap]
    }
}

/// What the compare panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CompareView {
    /// Comparison table with optional narrative and resolution hints
    Table {
        rows: Vec<StockRow>,
        narrative: Option<String>,
        mappings: Vec<String>,
    },
    /// Single-line message in place of the table
    Message(String),
}

impl CompareView {
    /// Build the view for a comparison payload
    ///
    /// A payload with `success = false` becomes its error text.
    pub fn from_result(result: &ComparisonResult, mappings: Vec<String>) -> Self {
        if !result.success {
            let message = result
                .error
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(MSG_BACKEND_FALLBACK);
            return Self::Message(message.to_string());
        }

        let rows = result
            .stocks
            .iter()
            .flatten()
            .map(StockRow::from_summary)
            .collect();

        Self::Table {
            rows,
            narrative: result.comparison.clone().filter(|c| !c.trim().is_empty()),
            mappings,
        }
    }

    pub fn from_outcome(outcome: &CompareOutcome) -> Self {
        Self::from_result(&outcome.result, outcome.symbols.mappings.clone())
    }

    pub fn from_error(error: &CompareError) -> Self {
        Self::Message(error.user_message())
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table { .. })
    }

    /// Message text, if this view is a message
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m),
            Self::Table { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric() {
        assert_eq!(numeric(&json!(150.2)), Some(150.2));
        assert_eq!(numeric(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(numeric(&json!("")), None);
        assert_eq!(numeric(&json!("n/a")), None);
        assert_eq!(numeric(&json!("NaN")), None);
        assert_eq!(numeric(&json!("inf")), None);
        assert_eq!(numeric(&json!(true)), None);
        assert_eq!(numeric(&Value::Null), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(&json!(150.2))), "$150.20");
        assert_eq!(format_price(Some(&json!(310.5))), "$310.50");
        assert_eq!(format_price(Some(&json!("99"))), "$99.00");
        assert_eq!(format_price(Some(&json!("abc"))), PLACEHOLDER);
        assert_eq!(format_price(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(&json!(1.23))), "+1.23%");
        assert_eq!(format_change(Some(&json!(-0.4))), "-0.40%");
        assert_eq!(format_change(Some(&json!(0))), "0.00%");
        assert_eq!(format_change(Some(&json!(-0.0))), "0.00%");
        assert_eq!(format_change(None), PLACEHOLDER);
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_price(Some(&json!(10.125))), "$10.13");
        assert_eq!(format_change(Some(&json!(0.125))), "+0.13%");
        assert_eq!(format_change(Some(&json!(-0.125))), "-0.13%");
        assert_eq!(format_market_cap(Some(&json!(1234.5625))), "1,234.563");
    }

    #[test]
    fn test_to_fixed() {
        // stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(2.675, 2), "2.67");
        // carry into the integer part
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(150.2, 2), "150.20");
    }

    #[test]
    fn test_format_pe() {
        assert_eq!(format_pe(Some(&json!(28.5))), "28.5");
        assert_eq!(format_pe(Some(&json!(30.0))), "30");
        assert_eq!(format_pe(Some(&json!("Infinity"))), "Infinity");
        assert_eq!(format_pe(Some(&Value::Null)), PLACEHOLDER);
        assert_eq!(format_pe(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(
            format_market_cap(Some(&json!(2_750_000_000_000_u64))),
            "2,750,000,000,000"
        );
        assert_eq!(format_market_cap(Some(&json!(999))), "999");
        assert_eq!(format_market_cap(Some(&json!(1000))), "1,000");
        assert_eq!(format_market_cap(Some(&json!(1234.5))), "1,234.5");
        assert_eq!(format_market_cap(Some(&json!(-1_500_000))), "-1,500,000");
        assert_eq!(format_market_cap(Some(&json!(0))), "0");
        assert_eq!(format_market_cap(Some(&json!(""))), PLACEHOLDER);
        assert_eq!(format_market_cap(None), PLACEHOLDER);
    }

    #[test]
    fn test_row_fallbacks() {
        let row = StockRow::from_summary(&StockSummary {
            symbol: Some("AAPL".to_string()),
            ..Default::default()
        });
        assert_eq!(row.name, "AAPL");
        assert_eq!(row.values(), [PLACEHOLDER; 4]);

        let row = StockRow::from_summary(&StockSummary::default());
        assert_eq!(row.symbol, PLACEHOLDER);
        assert_eq!(row.name, PLACEHOLDER);
    }

    #[test]
    fn test_two_row_table() {
        let result: ComparisonResult = serde_json::from_value(json!({
            "success": true,
            "stocks": [
                {"symbol": "AAPL", "price": 150.2, "change": 1.23},
                {"symbol": "MSFT", "price": 310.5, "change": -0.4}
            ],
            "comparison": "AAPL is up, MSFT is down."
        }))
        .unwrap();

        let view = CompareView::from_result(&result, Vec::new());
        let CompareView::Table { rows, narrative, .. } = view else {
            panic!("expected a table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, "$150.20");
        assert_eq!(rows[0].change, "+1.23%");
        assert_eq!(rows[1].price, "$310.50");
        assert_eq!(rows[1].change, "-0.40%");
        assert_eq!(narrative.as_deref(), Some("AAPL is up, MSFT is down."));
    }

    #[test]
    fn test_failure_renders_backend_message() {
        let result: ComparisonResult =
            serde_json::from_value(json!({"success": false, "error": "x"})).unwrap();
        let view = CompareView::from_result(&result, Vec::new());
        assert_eq!(view, CompareView::Message("x".to_string()));
        assert!(!view.is_table());

        let result: ComparisonResult = serde_json::from_value(json!({"success": false})).unwrap();
        let view = CompareView::from_result(&result, Vec::new());
        assert_eq!(view.message(), Some(MSG_BACKEND_FALLBACK));
    }

    #[test]
    fn test_blank_narrative_dropped() {
        let result: ComparisonResult =
            serde_json::from_value(json!({"success": true, "stocks": [], "comparison": "  "}))
                .unwrap();
        let view = CompareView::from_result(&result, Vec::new());
        assert!(matches!(view, CompareView::Table { narrative: None, .. }));
    }
}
