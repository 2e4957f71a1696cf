//! Utility functions and helpers

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

fn group_thousands(digits: &str, separator: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// How monetary amounts are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct AmountStyle {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub symbol_before: bool,
}

impl Default for AmountStyle {
    fn default() -> Self {
        Self {
            symbol: "€".to_string(),
            decimal_places: 2,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            symbol_before: true,
        }
    }
}

/// Format a monetary amount, e.g. `€ 1.250,50`
pub fn format_amount(amount: Decimal, style: &AmountStyle) -> String {
    let places = style.decimal_places as usize;
    let rounded =
        amount.round_dp_with_strategy(style.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", places, rounded);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut number = group_thousands(int_part, &style.thousands_separator);
    if let Some(frac) = frac_part {
        number.push_str(&style.decimal_separator);
        number.push_str(frac);
    }

    if style.symbol_before {
        format!("{} {}", style.symbol, number)
    } else {
        format!("{} {}", number, style.symbol)
    }
}

/// Escape text for safe inclusion in HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Dutch abbreviated month names; `mei` is short enough to keep whole
const MONTHS_SHORT: [&str; 12] = [
    "jan.", "feb.", "mrt.", "apr.", "mei", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "dec.",
];

fn month_short(month: u32) -> &'static str {
    MONTHS_SHORT
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Day and month, e.g. `15 jan.`
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_short(date.month()))
}

/// Day, month and year, e.g. `15 jan. 2024`
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", format_day_month(date), date.year())
}

/// Date with time of day, e.g. `16 jan. 2024, 10:30`
pub fn format_date_time(at: DateTime<Utc>) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_date(at.date_naive()),
        at.hour(),
        at.minute()
    )
}
