use serde::{Deserialize, Deserializer, Serialize};

// ============ Receipt Models ============

/// A purchase receipt as submitted to `POST /receipts/process`.
///
/// Every field is kept as the raw text the client sent. Scoring parses the
/// numeric, date and time fields itself so that a malformed value only
/// affects the rule that reads it. Absent or `null` fields decode to empty
/// values, as do `null` entries in `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Retailer or store name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub retailer: String,
    /// Purchase date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_date: String,
    /// Purchase time, `HH:MM` in 24-hour form.
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_time: String,
    /// Total amount paid, as a decimal string (e.g. `"6.49"`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: String,
    /// Purchased items, in receipt order.
    #[serde(default, deserialize_with = "null_items_as_default")]
    pub items: Vec<Item>,
}

/// A single line item on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Short product description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    /// Item price, as a decimal string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
}

/// Reads `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a `null` item list as empty and each `null` entry as an empty item.
fn null_items_as_default<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<Item>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

// ============ API Responses ============

/// Response body for a processed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
}

/// Response body for a points lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}
