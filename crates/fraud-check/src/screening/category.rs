use serde::{Deserialize, Serialize};

/// Code the classifier receives for a category label outside the known table.
pub const UNKNOWN_CATEGORY_CODE: i32 = -1;

/// Product categories the classifier was trained on, in training-time code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Airtime,
    FinancialServices,
    Tv,
    UtilityBill,
    DataBundles,
    Movies,
    Ticket,
    Retail,
    Transport,
}

impl ProductCategory {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Airtime,
            Self::FinancialServices,
            Self::Tv,
            Self::UtilityBill,
            Self::DataBundles,
            Self::Movies,
            Self::Ticket,
            Self::Retail,
            Self::Transport,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Airtime => "airtime",
            Self::FinancialServices => "financial_services",
            Self::Tv => "tv",
            Self::UtilityBill => "utility_bill",
            Self::DataBundles => "data_bundles",
            Self::Movies => "movies",
            Self::Ticket => "ticket",
            Self::Retail => "retail",
            Self::Transport => "transport",
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Airtime => 0,
            Self::FinancialServices => 1,
            Self::Tv => 2,
            Self::UtilityBill => 3,
            Self::DataBundles => 4,
            Self::Movies => 5,
            Self::Ticket => 6,
            Self::Retail => 7,
            Self::Transport => 8,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.label() == label)
    }
}

/// Encodes a category label, falling back to [`UNKNOWN_CATEGORY_CODE`].
pub fn encode(label: &str) -> i32 {
    ProductCategory::from_label(label)
        .map(ProductCategory::code)
        .unwrap_or(UNKNOWN_CATEGORY_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_map_to_training_codes() {
        let expected = [
            ("airtime", 0),
            ("financial_services", 1),
            ("tv", 2),
            ("utility_bill", 3),
            ("data_bundles", 4),
            ("movies", 5),
            ("ticket", 6),
            ("retail", 7),
            ("transport", 8),
        ];
        for (label, code) in expected {
            assert_eq!(encode(label), code, "label {label}");
        }
    }

    #[test]
    fn ordered_table_codes_are_positions() {
        for (position, category) in ProductCategory::ordered().into_iter().enumerate() {
            assert_eq!(category.code(), position as i32);
            assert_eq!(ProductCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn unknown_labels_use_sentinel() {
        for label in ["", "Airtime", "UTILITY_BILL", " tv", "other", "utility bill"] {
            assert_eq!(encode(label), UNKNOWN_CATEGORY_CODE, "label {label:?}");
        }
    }

    #[test]
    fn encode_is_total_over_arbitrary_input() {
        let inputs = ["airtime", "\u{feff}retail", "transport\n", "9", "-1", "movies"];
        for label in inputs {
            let code = encode(label);
            assert!((-1..=8).contains(&code), "label {label:?} produced {code}");
        }
    }
}
