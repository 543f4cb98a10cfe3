use super::dataset::strip_prefix;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fields of the screening form, in the order the cascade fixes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    CustomerId,
    AccountId,
    ProductCategory,
    ProductId,
    ChannelId,
    PricingStrategy,
    Amount,
    TransactionDate,
    TransactionTime,
}

impl SelectionField {
    /// Fields whose domain is derived from the reference dataset.
    pub const fn cascaded() -> [Self; 6] {
        [
            Self::CustomerId,
            Self::AccountId,
            Self::ProductCategory,
            Self::ProductId,
            Self::ChannelId,
            Self::PricingStrategy,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CustomerId => "Customer ID",
            Self::AccountId => "Account ID",
            Self::ProductCategory => "Product Category",
            Self::ProductId => "Product ID",
            Self::ChannelId => "Channel ID",
            Self::PricingStrategy => "Pricing Strategy",
            Self::Amount => "Amount",
            Self::TransactionDate => "Transaction Date",
            Self::TransactionTime => "Transaction Time",
        }
    }

    /// Reference dataset column backing this field.
    pub const fn column(self) -> &'static str {
        match self {
            Self::CustomerId => "CustomerId",
            Self::AccountId => "AccountId",
            Self::ProductCategory => "ProductCategory",
            Self::ProductId => "ProductId",
            Self::ChannelId => "ChannelId",
            Self::PricingStrategy => "PricingStrategy",
            Self::Amount => "Amount",
            Self::TransactionDate => "TransactionDate",
            Self::TransactionTime => "TransactionTime",
        }
    }

    /// Form value in the shape stored by the reference dataset.
    pub(crate) fn normalize(self, raw: &str) -> String {
        match self {
            Self::ProductCategory => raw.trim().to_string(),
            _ => strip_prefix(self.column(), raw),
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The user's in-progress choices for one screening interaction.
///
/// Identifier fields hold raw form values; both `"AccountId_5"` and `"5"` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    pub customer_id: Option<String>,
    pub account_id: Option<String>,
    pub product_category: Option<String>,
    pub product_id: Option<String>,
    pub channel_id: Option<String>,
    pub pricing_strategy: Option<String>,
    pub amount: Option<f64>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_time")]
    pub transaction_time: Option<NaiveTime>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a cascaded field, if selected.
    pub fn cascaded_value(&self, field: SelectionField) -> Option<&str> {
        let value = match field {
            SelectionField::CustomerId => &self.customer_id,
            SelectionField::AccountId => &self.account_id,
            SelectionField::ProductCategory => &self.product_category,
            SelectionField::ProductId => &self.product_id,
            SelectionField::ChannelId => &self.channel_id,
            SelectionField::PricingStrategy => &self.pricing_strategy,
            SelectionField::Amount
            | SelectionField::TransactionDate
            | SelectionField::TransactionTime => return None,
        };
        value.as_deref()
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_time(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_partial_form_payload() {
        let state: SelectionState = serde_json::from_value(json!({
            "customer_id": "CustomerId_10",
            "amount": -200.5,
            "transaction_date": "2024-03-15",
            "transaction_time": "14:30"
        }))
        .expect("payload parses");

        assert_eq!(state.customer_id.as_deref(), Some("CustomerId_10"));
        assert!(state.account_id.is_none());
        assert_eq!(state.amount, Some(-200.5));
        assert_eq!(
            state.transaction_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(state.transaction_time, NaiveTime::from_hms_opt(14, 30, 0));
    }

    #[test]
    fn rejects_malformed_dates() {
        let result = serde_json::from_value::<SelectionState>(json!({
            "transaction_date": "15/03/2024"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn parse_time_accepts_seconds() {
        assert_eq!(
            parse_time("08:05:59").expect("time parses"),
            NaiveTime::from_hms_opt(8, 5, 59).expect("valid time")
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn cascaded_value_ignores_free_form_fields() {
        let state = SelectionState {
            product_category: Some("tv".to_string()),
            amount: Some(10.0),
            ..SelectionState::default()
        };
        assert_eq!(
            state.cascaded_value(SelectionField::ProductCategory),
            Some("tv")
        );
        assert_eq!(state.cascaded_value(SelectionField::Amount), None);
    }
}
