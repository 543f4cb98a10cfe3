use super::normalizer::{parse_identifier, strip_prefix};
use super::{DatasetError, TransactionRecord};
use serde::Deserialize;
use std::io::Read;

const TRANSACTION_ID: &str = "TransactionId";
const ACCOUNT_ID: &str = "AccountId";
const BATCH_ID: &str = "BatchId";
const SUBSCRIPTION_ID: &str = "SubscriptionId";
const CUSTOMER_ID: &str = "CustomerId";
const PROVIDER_ID: &str = "ProviderId";
const CHANNEL_ID: &str = "ChannelId";
const PRODUCT_ID: &str = "ProductId";
const PRICING_STRATEGY: &str = "PricingStrategy";

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<ReferenceRow>().enumerate() {
        let row = record?;
        records.push(row.into_record(index + 1)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "TransactionId")]
    transaction_id: String,
    #[serde(rename = "AccountId")]
    account_id: String,
    #[serde(rename = "BatchId")]
    batch_id: String,
    #[serde(rename = "SubscriptionId")]
    subscription_id: String,
    #[serde(rename = "CustomerId")]
    customer_id: String,
    #[serde(rename = "ProviderId")]
    provider_id: String,
    #[serde(rename = "ChannelId")]
    channel_id: String,
    #[serde(rename = "ProductId")]
    product_id: String,
    #[serde(rename = "ProductCategory")]
    product_category: String,
    #[serde(rename = "PricingStrategy")]
    pricing_strategy: String,
}

impl ReferenceRow {
    fn into_record(self, row: usize) -> Result<TransactionRecord, DatasetError> {
        Ok(TransactionRecord {
            transaction_id: identifier(row, TRANSACTION_ID, &self.transaction_id)?,
            account_id: identifier(row, ACCOUNT_ID, &self.account_id)?,
            batch_id: identifier(row, BATCH_ID, &self.batch_id)?,
            subscription_id: identifier(row, SUBSCRIPTION_ID, &self.subscription_id)?,
            customer_id: identifier(row, CUSTOMER_ID, &self.customer_id)?,
            provider_id: identifier(row, PROVIDER_ID, &self.provider_id)?,
            channel_id: identifier(row, CHANNEL_ID, &self.channel_id)?,
            product_id: identifier(row, PRODUCT_ID, &self.product_id)?,
            product_category: self.product_category,
            pricing_strategy: identifier(row, PRICING_STRATEGY, &self.pricing_strategy)?,
        })
    }
}

fn identifier(row: usize, column: &'static str, raw: &str) -> Result<String, DatasetError> {
    if parse_identifier(column, raw).is_none() {
        return Err(DatasetError::InvalidIdentifier {
            row,
            column,
            value: raw.to_string(),
        });
    }

    Ok(strip_prefix(column, raw))
}
