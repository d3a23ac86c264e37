//! Points calculation for stored receipts.
//!
//! A score is the sum of seven independent rules, each reading the raw
//! receipt text:
//! 1. One point per letter or digit in the retailer name
//! 2. 50 points if the total is a round dollar amount
//! 3. 25 points if the total is a multiple of 0.25
//! 4. 5 points for every two items
//! 5. `trunc(price * 0.2) + 1` for every item whose trimmed description
//!    length is a multiple of 3
//! 6. 6 points if the day of the purchase date is odd
//! 7. 10 points if the purchase hour is 14 or 15
//!
//! A field that fails to parse only zeroes the rule reading it.

use crate::errors::FieldParseError;
use crate::models::{Item, Receipt};
use unicode_general_category::{get_general_category, GeneralCategory};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const ITEM_PAIR_POINTS: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const AFTERNOON_START_HOUR: i64 = 14;
const AFTERNOON_END_HOUR: i64 = 16;

/// How rule 3 treats a total that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuarterRule {
    /// An unparsable total is read as `0.0`, which is a multiple of 0.25,
    /// so the 25 points are awarded.
    #[default]
    Lenient,
    /// The 25 points require a total that parses.
    Strict,
}

/// Knobs for the scoring rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringOptions {
    pub quarter_rule: QuarterRule,
}

/// Per-rule contributions to a receipt's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer: i64,
    pub round_dollar: i64,
    pub quarter_multiple: i64,
    pub item_pairs: i64,
    pub descriptions: i64,
    pub odd_day: i64,
    pub afternoon: i64,
}

impl PointsBreakdown {
    /// Sum of all rule contributions, never below zero.
    pub fn total(&self) -> i64 {
        [
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .iter()
        .fold(self.retailer, |sum, points| sum.saturating_add(*points))
        .max(0)
    }
}

/// Computes the points awarded for a receipt.
pub fn calculate_points(receipt: &Receipt, options: ScoringOptions) -> i64 {
    score(receipt, options).total()
}

/// Evaluates every rule against the receipt and returns each contribution.
pub fn score(receipt: &Receipt, options: ScoringOptions) -> PointsBreakdown {
    let total = parse_amount(&receipt.total);
    if let Err(e) = &total {
        tracing::debug!("Scoring total without a parsed value: {}", e);
    }

    PointsBreakdown {
        retailer: retailer_points(&receipt.retailer),
        round_dollar: round_dollar_points(&total),
        quarter_multiple: quarter_multiple_points(&total, options.quarter_rule),
        item_pairs: item_pair_points(&receipt.items),
        descriptions: receipt
            .items
            .iter()
            .map(description_points)
            .fold(0, i64::saturating_add),
        odd_day: odd_day_points(&receipt.purchase_date),
        afternoon: afternoon_points(&receipt.purchase_time),
    }
}

/// Rule 1: one point per Unicode letter (L*) or decimal digit (Nd).
pub fn retailer_points(retailer: &str) -> i64 {
    retailer.chars().filter(|c| is_letter_or_digit(*c)).count() as i64
}

fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Rule 2: the total has no cents.
fn round_dollar_points(total: &Result<f64, FieldParseError>) -> i64 {
    match total {
        Ok(value) if *value == truncate(*value) as f64 => ROUND_DOLLAR_POINTS,
        _ => 0,
    }
}

/// Rule 3: the total in whole cents divides by 25.
fn quarter_multiple_points(total: &Result<f64, FieldParseError>, rule: QuarterRule) -> i64 {
    let value = match (total, rule) {
        (Ok(value), _) => *value,
        // An out-of-range total still reads as infinite, never as 0.0
        (Err(FieldParseError::AmountOutOfRange(_)), _) => return 0,
        (Err(_), QuarterRule::Lenient) => 0.0,
        (Err(_), QuarterRule::Strict) => return 0,
    };

    if value.is_finite() && truncate(value * 100.0) % 25 == 0 {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// Rule 4: five points for every complete pair of items.
fn item_pair_points(items: &[Item]) -> i64 {
    (items.len() / 2) as i64 * ITEM_PAIR_POINTS
}

/// Rule 5: price-based bonus for descriptions whose trimmed length is a
/// multiple of three. An empty description qualifies.
pub fn description_points(item: &Item) -> i64 {
    let length = item.short_description.trim().chars().count();
    if length % 3 != 0 {
        return 0;
    }

    match parse_amount(&item.price) {
        Ok(price) => truncate(price * DESCRIPTION_PRICE_MULTIPLIER).saturating_add(1),
        Err(e) => {
            tracing::debug!("Skipping description bonus: {}", e);
            0
        }
    }
}

/// Rule 6: the day of the purchase date is odd.
fn odd_day_points(purchase_date: &str) -> i64 {
    match parse_day(purchase_date) {
        Ok(day) if day % 2 == 1 => ODD_DAY_POINTS,
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!("Skipping odd day bonus: {}", e);
            0
        }
    }
}

/// Rule 7: purchased between 14:00 and 16:00. Minutes are ignored.
fn afternoon_points(purchase_time: &str) -> i64 {
    match parse_hour(purchase_time) {
        Ok(hour) if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour) => {
            AFTERNOON_POINTS
        }
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!("Skipping afternoon bonus: {}", e);
            0
        }
    }
}

/// Parses a decimal amount. A finite literal too large for f64 (`"1e400"`)
/// is a range error; only the `inf`/`infinity`/`nan` spellings may yield a
/// non-finite value.
fn parse_amount(raw: &str) -> Result<f64, FieldParseError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| FieldParseError::Amount(raw.to_string()))?;

    if !value.is_finite() && !is_non_finite_literal(raw) {
        return Err(FieldParseError::AmountOutOfRange(raw.to_string()));
    }
    Ok(value)
}

fn is_non_finite_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

/// Reads the segment after the second `-`. No calendar validation.
fn parse_day(purchase_date: &str) -> Result<i64, FieldParseError> {
    purchase_date
        .split('-')
        .nth(2)
        .and_then(|day| day.parse::<i64>().ok())
        .ok_or_else(|| FieldParseError::Day(purchase_date.to_string()))
}

/// Reads the hour of an `HH:MM` time. Exactly one `:` is required.
fn parse_hour(purchase_time: &str) -> Result<i64, FieldParseError> {
    let parts: Vec<&str> = purchase_time.split(':').collect();
    if parts.len() != 2 {
        return Err(FieldParseError::Hour(purchase_time.to_string()));
    }

    parts[0]
        .parse::<i64>()
        .map_err(|_| FieldParseError::Hour(purchase_time.to_string()))
}

/// Truncates toward zero, saturating at the `i64` bounds.
fn truncate(value: f64) -> i64 {
    value as i64
}
