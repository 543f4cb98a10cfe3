mod normalizer;
mod parser;

pub(crate) use normalizer::{parse_identifier, strip_prefix};

use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidIdentifier {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read reference data: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid reference CSV data: {}", err),
            DatasetError::InvalidIdentifier { row, column, value } => write!(
                f,
                "row {} has non-numeric {} '{}' after prefix stripping",
                row, column, value
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::InvalidIdentifier { .. } => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One historical transaction with identifier prefixes already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub account_id: String,
    pub batch_id: String,
    pub subscription_id: String,
    pub customer_id: String,
    pub provider_id: String,
    pub channel_id: String,
    pub product_id: String,
    pub product_category: String,
    pub pricing_strategy: String,
}

/// Immutable table of historical transactions backing the selection cascade.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    records: Vec<TransactionRecord>,
}

impl ReferenceDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path.as_ref())?;
        let dataset = Self::from_reader(file)?;
        debug!(
            path = %path.as_ref().display(),
            rows = dataset.len(),
            "reference dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = parser::parse_records(reader)?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "TransactionId,BatchId,AccountId,SubscriptionId,CustomerId,CurrencyCode,CountryCode,ProviderId,ProductId,ProductCategory,ChannelId,Amount,Value,TransactionStartTime,PricingStrategy,FraudResult\n";

    #[test]
    fn loader_strips_prefixes_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}TransactionId_76871,BatchId_36123,AccountId_3957,SubscriptionId_887,CustomerId_4406,UGX,256,ProviderId_6,ProductId_10,airtime,ChannelId_3,1000.0,1000,2018-11-15T02:18:49Z,2,0\n"
        );
        let dataset = ReferenceDataset::from_reader(Cursor::new(csv)).expect("dataset loads");

        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.transaction_id, "76871");
        assert_eq!(record.batch_id, "36123");
        assert_eq!(record.account_id, "3957");
        assert_eq!(record.subscription_id, "887");
        assert_eq!(record.customer_id, "4406");
        assert_eq!(record.provider_id, "6");
        assert_eq!(record.product_id, "10");
        assert_eq!(record.channel_id, "3");
        assert_eq!(record.product_category, "airtime");
        assert_eq!(record.pricing_strategy, "2");
    }

    #[test]
    fn loader_rejects_non_numeric_identifier_with_row_and_column() {
        let csv = format!(
            "{HEADER}TransactionId_1,BatchId_1,AccountId_1,SubscriptionId_1,CustomerId_1,UGX,256,ProviderId_1,ProductId_1,tv,ChannelId_1,10,10,2018-11-15T02:18:49Z,2,0\n\
TransactionId_2,BatchId_1,AccountId_x,SubscriptionId_1,CustomerId_1,UGX,256,ProviderId_1,ProductId_1,tv,ChannelId_1,10,10,2018-11-15T02:18:49Z,2,0\n"
        );
        let error = ReferenceDataset::from_reader(Cursor::new(csv)).expect_err("row 2 invalid");

        match error {
            DatasetError::InvalidIdentifier { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "AccountId");
                assert_eq!(value, "AccountId_x");
            }
            other => panic!("expected invalid identifier, got {other:?}"),
        }
    }

    #[test]
    fn loader_reports_missing_columns_as_csv_errors() {
        let csv = "TransactionId,AccountId\nTransactionId_1,AccountId_1\n";
        let error = ReferenceDataset::from_reader(Cursor::new(csv)).expect_err("columns missing");
        assert!(matches!(error, DatasetError::Csv(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ReferenceDataset::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            DatasetError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
