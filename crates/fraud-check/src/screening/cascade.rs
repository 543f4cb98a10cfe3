use super::dataset::ReferenceDataset;
use super::selection::{SelectionField, SelectionState};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Distinct values in first-appearance order.
#[derive(Debug, Default, Clone)]
struct DistinctValues {
    values: Vec<String>,
    seen: HashSet<String>,
}

impl DistinctValues {
    fn push(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.values.push(value.to_string());
        }
    }

    fn as_slice(&self) -> &[String] {
        &self.values
    }
}

#[derive(Debug, Default, Clone)]
struct CustomerNode {
    accounts: DistinctValues,
    by_account: HashMap<String, AccountNode>,
}

#[derive(Debug, Default, Clone)]
struct AccountNode {
    categories: DistinctValues,
    by_category: HashMap<String, LeafDomains>,
}

#[derive(Debug, Default, Clone)]
struct LeafDomains {
    product_ids: DistinctValues,
    channel_ids: DistinctValues,
    pricing_strategies: DistinctValues,
}

/// Grouped lookup index answering "which values are still valid" for each form field.
///
/// Built once from the reference dataset and never mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct SelectionCascade {
    customers: DistinctValues,
    by_customer: HashMap<String, CustomerNode>,
}

impl SelectionCascade {
    pub fn build(dataset: &ReferenceDataset) -> Self {
        let mut cascade = Self::default();

        for record in dataset.records() {
            cascade.customers.push(&record.customer_id);
            let customer = cascade
                .by_customer
                .entry(record.customer_id.clone())
                .or_default();

            customer.accounts.push(&record.account_id);
            let account = customer
                .by_account
                .entry(record.account_id.clone())
                .or_default();

            account.categories.push(&record.product_category);
            let leaf = account
                .by_category
                .entry(record.product_category.clone())
                .or_default();

            leaf.product_ids.push(&record.product_id);
            leaf.channel_ids.push(&record.channel_id);
            leaf.pricing_strategies.push(&record.pricing_strategy);
        }

        cascade
    }

    pub fn customer_ids(&self) -> &[String] {
        self.customers.as_slice()
    }

    pub fn account_ids(&self, customer_id: &str) -> &[String] {
        self.by_customer
            .get(customer_id)
            .map(|customer| customer.accounts.as_slice())
            .unwrap_or(&[])
    }

    pub fn product_categories(&self, customer_id: &str, account_id: &str) -> &[String] {
        self.account(customer_id, account_id)
            .map(|account| account.categories.as_slice())
            .unwrap_or(&[])
    }

    pub fn product_ids(&self, customer_id: &str, account_id: &str, category: &str) -> &[String] {
        self.leaf(customer_id, account_id, category)
            .map(|leaf| leaf.product_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn channel_ids(&self, customer_id: &str, account_id: &str, category: &str) -> &[String] {
        self.leaf(customer_id, account_id, category)
            .map(|leaf| leaf.channel_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn pricing_strategies(
        &self,
        customer_id: &str,
        account_id: &str,
        category: &str,
    ) -> &[String] {
        self.leaf(customer_id, account_id, category)
            .map(|leaf| leaf.pricing_strategies.as_slice())
            .unwrap_or(&[])
    }

    /// Candidate sets for every cascaded field given the current selection.
    ///
    /// A field whose upstream fields are not all selected offers nothing.
    pub fn options(&self, selection: &SelectionState) -> CascadeOptions {
        let customer = normalized(selection, SelectionField::CustomerId);
        let account = normalized(selection, SelectionField::AccountId);
        let category = normalized(selection, SelectionField::ProductCategory);

        let mut options = CascadeOptions {
            customer_ids: self.customer_ids().to_vec(),
            ..CascadeOptions::default()
        };

        if let Some(customer) = customer.as_deref() {
            options.account_ids = self.account_ids(customer).to_vec();

            if let Some(account) = account.as_deref() {
                options.product_categories = self.product_categories(customer, account).to_vec();

                if let Some(category) = category.as_deref() {
                    options.product_ids = self.product_ids(customer, account, category).to_vec();
                    options.channel_ids = self.channel_ids(customer, account, category).to_vec();
                    options.pricing_strategies =
                        self.pricing_strategies(customer, account, category).to_vec();
                }
            }
        }

        options.blocked_at = SelectionField::cascaded()
            .into_iter()
            .find(|field| options.domain(*field).is_empty());
        options
    }

    fn account(&self, customer_id: &str, account_id: &str) -> Option<&AccountNode> {
        self.by_customer
            .get(customer_id)
            .and_then(|customer| customer.by_account.get(account_id))
    }

    fn leaf(&self, customer_id: &str, account_id: &str, category: &str) -> Option<&LeafDomains> {
        self.account(customer_id, account_id)
            .and_then(|account| account.by_category.get(category))
    }
}

fn normalized(selection: &SelectionState, field: SelectionField) -> Option<String> {
    selection
        .cascaded_value(field)
        .map(|raw| field.normalize(raw))
}

/// Offered domain per cascaded field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeOptions {
    pub customer_ids: Vec<String>,
    pub account_ids: Vec<String>,
    pub product_categories: Vec<String>,
    pub product_ids: Vec<String>,
    pub channel_ids: Vec<String>,
    pub pricing_strategies: Vec<String>,
    /// First cascaded field with an empty domain; the interaction cannot be submitted past it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_at: Option<SelectionField>,
}

impl CascadeOptions {
    pub fn domain(&self, field: SelectionField) -> &[String] {
        match field {
            SelectionField::CustomerId => &self.customer_ids,
            SelectionField::AccountId => &self.account_ids,
            SelectionField::ProductCategory => &self.product_categories,
            SelectionField::ProductId => &self.product_ids,
            SelectionField::ChannelId => &self.channel_ids,
            SelectionField::PricingStrategy => &self.pricing_strategies,
            SelectionField::Amount
            | SelectionField::TransactionDate
            | SelectionField::TransactionTime => &[],
        }
    }

    /// First selected value that is not among the offered candidates.
    pub fn unoffered(&self, selection: &SelectionState) -> Option<(SelectionField, String)> {
        SelectionField::cascaded().into_iter().find_map(|field| {
            let raw = selection.cascaded_value(field)?;
            let value = field.normalize(raw);
            if self.domain(field).contains(&value) {
                None
            } else {
                Some((field, raw.to_string()))
            }
        })
    }
}
