use super::category;
use super::dataset::parse_identifier;
use super::selection::{SelectionField, SelectionState};
use chrono::{Datelike, Timelike};
use serde::Serialize;

/// Training-time column order of the classifier input.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "AccountId",
    "CustomerId",
    "ProductId",
    "ProductCategory",
    "ChannelId",
    "Amount",
    "PricingStrategy",
    "year",
    "month",
    "day",
    "hour",
    "minute",
];

/// Lowest amount the screening form accepts.
pub const MIN_AMOUNT: f64 = -1_000_000_000_000.0;

/// Encoded transaction in the exact shape the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "AccountId")]
    pub account_id: i64,
    #[serde(rename = "CustomerId")]
    pub customer_id: i64,
    #[serde(rename = "ProductId")]
    pub product_id: i64,
    #[serde(rename = "ProductCategory")]
    pub product_category: i32,
    #[serde(rename = "ChannelId")]
    pub channel_id: i64,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "PricingStrategy")]
    pub pricing_strategy: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl FeatureVector {
    /// Values ordered as [`FEATURE_COLUMNS`].
    pub fn to_row(&self) -> [f64; 12] {
        [
            self.account_id as f64,
            self.customer_id as f64,
            self.product_id as f64,
            f64::from(self.product_category),
            self.channel_id as f64,
            self.amount,
            self.pricing_strategy as f64,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.day),
            f64::from(self.hour),
            f64::from(self.minute),
        ]
    }

    pub fn named(&self) -> [(&'static str, f64); 12] {
        let row = self.to_row();
        std::array::from_fn(|index| (FEATURE_COLUMNS[index], row[index]))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("{0} is required before screening")]
    IncompleteSelection(SelectionField),
    #[error("invalid identifier for {field}: '{value}'")]
    InvalidIdentifier {
        field: SelectionField,
        value: String,
    },
    #[error("amount {0} is outside the accepted range")]
    InvalidAmount(f64),
}

/// Converts a finalized selection into the classifier's feature vector.
///
/// Form values are trimmed before encoding: identifiers through prefix
/// normalization, the product category before the label lookup.
pub fn build(selection: &SelectionState) -> Result<FeatureVector, EncodingError> {
    let amount = selection
        .amount
        .ok_or(EncodingError::IncompleteSelection(SelectionField::Amount))?;
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(EncodingError::InvalidAmount(amount));
    }

    let date = selection
        .transaction_date
        .ok_or(EncodingError::IncompleteSelection(
            SelectionField::TransactionDate,
        ))?;
    let time = selection
        .transaction_time
        .ok_or(EncodingError::IncompleteSelection(
            SelectionField::TransactionTime,
        ))?;

    let category_label = required(selection, SelectionField::ProductCategory)?;

    Ok(FeatureVector {
        account_id: identifier(selection, SelectionField::AccountId)?,
        customer_id: identifier(selection, SelectionField::CustomerId)?,
        product_id: identifier(selection, SelectionField::ProductId)?,
        product_category: category::encode(category_label.trim()),
        channel_id: identifier(selection, SelectionField::ChannelId)?,
        amount,
        pricing_strategy: identifier(selection, SelectionField::PricingStrategy)?,
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
    })
}

fn required(selection: &SelectionState, field: SelectionField) -> Result<&str, EncodingError> {
    selection
        .cascaded_value(field)
        .ok_or(EncodingError::IncompleteSelection(field))
}

fn identifier(selection: &SelectionState, field: SelectionField) -> Result<i64, EncodingError> {
    let raw = required(selection, field)?;
    parse_identifier(field.column(), raw).ok_or_else(|| EncodingError::InvalidIdentifier {
        field,
        value: raw.to_string(),
    })
}
