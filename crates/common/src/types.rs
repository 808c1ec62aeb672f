use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Declares a closed categorical enum whose JSON and database encoding is the
/// human-readable label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = "text")]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                #[sqlx(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every allowed value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Primary class of an asset.
    pub enum AssetClass {
        CashEquivalent => "Cash / Cash Equivalent",
        Equity => "Equity",
        Debt => "Debt",
        RealEstate => "Real Estate",
        Commodities => "Commodities",
        Alternatives => "Alternatives",
        Other => "Other",
    }
}

labelled_enum! {
    /// Specific instrument or sub-class of an asset.
    pub enum AssetType {
        SavingsAccount => "Savings Account",
        FixedDeposit => "Fixed Deposit (FD)",
        RecurringDeposit => "Recurring Deposit (RD)",
        DirectEquity => "Stocks (Direct Equity)",
        EquityMutualFund => "Equity Mutual Fund",
        DebtMutualFund => "Debt Mutual Fund",
        ProvidentFund => "PPF / EPF / NPS",
        Bonds => "Bonds",
        ResidentialProperty => "Residential Property",
        CommercialProperty => "Commercial Property",
        Land => "Land",
        PhysicalMetal => "Physical Gold / Silver",
        SovereignGoldBond => "SGB (Sovereign Gold Bond)",
        Cryptocurrency => "Cryptocurrency",
        OtherSubClass => "Other Sub Class",
    }
}

labelled_enum! {
    /// Financial-planning purpose of an asset.
    pub enum FpAssetClass {
        EmergencyFund => "Emergency Fund",
        Retirement => "Retirement",
        GoalSpecific => "Goal-Specific",
        GeneralInvestment => "General Investment / Wealth Creation",
        TaxSaving => "Tax Saving",
        Other => "Other",
    }
}

labelled_enum! {
    pub enum ExpenseFrequency {
        OneTime => "One-Time",
        Monthly => "Monthly",
        Quarterly => "Quarterly",
        SemiAnnually => "Semi-Annually",
        Annually => "Annually",
    }
}

labelled_enum! {
    pub enum NeedWant {
        Need => "Need",
        Want => "Want",
    }
}

labelled_enum! {
    pub enum GoalPriority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

labelled_enum! {
    pub enum GoalCategory {
        House => "House",
        Car => "Car",
        Education => "Education",
        Wedding => "Wedding",
        Vacation => "Vacation",
        Retirement => "Retirement",
        EmergencyFund => "Emergency Fund",
        Investment => "Investment",
        Other => "Other",
    }
}

// ============================================================
// Stored records
// ============================================================

/// An asset owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    #[serde(rename = "valueINR")]
    pub value_inr: f64,
    pub asset_class: AssetClass,
    pub asset_type: AssetType,
    pub fp_asset_class: FpAssetClass,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / replace payload for an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    pub name: String,
    #[serde(rename = "valueINR")]
    pub value_inr: f64,
    pub asset_class: AssetClass,
    pub asset_type: AssetType,
    pub fp_asset_class: FpAssetClass,
}

/// A debt owed by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub liability_type: String,
    #[serde(rename = "outstandingAmountINR")]
    pub outstanding_amount_inr: f64,
    /// Annual interest rate in percent
    pub interest_rate: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / replace payload for a liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityInput {
    pub name: String,
    #[serde(rename = "type")]
    pub liability_type: String,
    #[serde(rename = "outstandingAmountINR")]
    pub outstanding_amount_inr: f64,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A recurring or one-off expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub owner_id: i64,
    pub category: String,
    pub details: Option<String>,
    pub amount: f64,
    pub frequency: ExpenseFrequency,
    pub need_want: NeedWant,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub category: String,
    #[serde(default)]
    pub details: Option<String>,
    pub amount: f64,
    pub frequency: ExpenseFrequency,
    pub need_want: NeedWant,
    pub date: NaiveDate,
}

/// A savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub category: GoalCategory,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
    pub category: GoalCategory,
    #[serde(default)]
    pub notes: Option<String>,
}

// ============================================================
// Financial independence
// ============================================================

fn default_fp_asset_classes_for_investable() -> Vec<FpAssetClass> {
    vec![FpAssetClass::Retirement, FpAssetClass::GeneralInvestment]
}

/// Caller-supplied parameters for an FI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFiParameters {
    pub desired_annual_fi_expenses: f64,
    /// Safe withdrawal rate as a percentage (4.0 means 4%)
    pub swr_percentage: f64,
    #[serde(default)]
    pub emergency_fund_to_exclude: f64,
    #[serde(default)]
    pub primary_residence_equity_to_exclude: f64,
    /// Accepted and echoed through the API, but not applied as an asset filter.
    #[serde(default = "default_fp_asset_classes_for_investable")]
    pub fp_asset_classes_for_investable: Vec<FpAssetClass>,
}

impl UserFiParameters {
    pub fn new(desired_annual_fi_expenses: f64, swr_percentage: f64) -> Self {
        Self {
            desired_annual_fi_expenses,
            swr_percentage,
            emergency_fund_to_exclude: 0.0,
            primary_residence_equity_to_exclude: 0.0,
            fp_asset_classes_for_investable: default_fp_asset_classes_for_investable(),
        }
    }
}

/// Corpus needed to fund the desired expenses; undefined for a non-positive
/// withdrawal rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequiredCorpus {
    Amount(f64),
    NotApplicable,
}

impl RequiredCorpus {
    pub const NOT_APPLICABLE_LABEL: &'static str = "N/A";
}

impl Serialize for RequiredCorpus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequiredCorpus::Amount(v) => serializer.serialize_f64(*v),
            RequiredCorpus::NotApplicable => serializer.serialize_str(Self::NOT_APPLICABLE_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for RequiredCorpus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CorpusVisitor;

        impl Visitor<'_> for CorpusVisitor {
            type Value = RequiredCorpus;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a number or \"N/A\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(RequiredCorpus::Amount(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(RequiredCorpus::Amount(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(RequiredCorpus::Amount(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == RequiredCorpus::NOT_APPLICABLE_LABEL {
                    Ok(RequiredCorpus::NotApplicable)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(CorpusVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiDetails {
    pub net_investable_assets: f64,
    pub total_current_cost_of_goals_to_set_aside: f64,
}

/// Outcome of an FI calculation. Monetary and ratio fields are rounded to
/// two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialIndependenceResult {
    pub is_financially_independent: bool,
    pub fi_ratio_percentage: f64,
    pub net_fi_corpus_available: f64,
    pub required_fi_corpus: RequiredCorpus,
    pub fi_annual_expenses_used: f64,
    pub swr_percentage_used: f64,
    pub details: FiDetails,
}
