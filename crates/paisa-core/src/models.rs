//! Domain models for Paisa
//!
//! Every stored record carries a synthetic string id (UUID v4) and an
//! explicit `owner_id`. There is no implicit default owner anywhere in the
//! system; callers always say whose data they are touching. Timestamps are
//! RFC 3339 strings in UTC so day and month bucketing can work on string
//! prefixes (`[..10]` and `[..7]`).

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default currency for ledger amounts.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Current moment as an RFC 3339 UTC string, the canonical timestamp format
/// for stored records.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Current month as `YYYY-MM`, the prefix used for budget and recurring
/// period scoping.
pub fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

/// A spending entry in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub owner_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub merchant: Option<String>,
    /// RFC 3339 timestamp of the purchase
    pub date: String,
    pub currency: String,
    /// Flagged by the user as a purchase they regret
    pub is_regret: bool,
}

/// Payload for creating an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub owner_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub merchant: Option<String>,
    /// Defaults to the current moment when omitted
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_regret: bool,
}

/// Payload for updating an expense in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub is_regret: bool,
}

/// An income entry in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub owner_id: String,
    pub amount: f64,
    /// Where the money came from (salary, freelance, ...)
    pub source: String,
    pub description: String,
    pub date: String,
}

/// Payload for creating an income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncome {
    pub owner_id: String,
    pub amount: f64,
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Subscription billing frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown billing cycle: {}", s)),
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    /// RFC 3339 timestamp of the next expected charge
    pub next_billing_date: String,
    pub category: String,
    pub is_active: bool,
}

/// Payload for registering a subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscription {
    pub owner_id: String,
    pub name: String,
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: String,
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Debt lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    Active,
    Closed,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for DebtStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "closed" | "paid" => Ok(Self::Closed),
            _ => Err(format!("Unknown debt status: {}", s)),
        }
    }
}

impl std::fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loan with its derived EMI schedule
///
/// `emi_amount`, `total_interest` and `total_payable` are computed by the
/// amortization engine when the debt is created, never supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub principal_amount: f64,
    /// Annual interest rate in percent
    pub interest_rate: f64,
    pub tenure_months: u32,
    pub start_date: String,
    pub emi_amount: f64,
    pub total_interest: f64,
    pub total_payable: f64,
    pub status: DebtStatus,
}

/// Payload for registering a debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDebt {
    pub owner_id: String,
    pub name: String,
    pub principal_amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
    #[serde(default)]
    pub start_date: Option<String>,
}

/// A monthly spending cap for one category
///
/// Spent-so-far is always derived from the ledger at read time, never
/// stored alongside the limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub owner_id: String,
    pub category: String,
    pub monthly_limit: f64,
    /// Month the cap applies to, as `YYYY-MM`
    pub month: String,
}

/// Payload for setting a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub owner_id: String,
    pub category: String,
    pub monthly_limit: f64,
    /// Defaults to the current month when omitted
    #[serde(default)]
    pub month: Option<String>,
}

/// Which side of the ledger a recurring template materializes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A template that materializes a ledger entry once per month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub kind: EntryKind,
    /// Day of the month (1-31) the template fires on. Days 29-31 simply
    /// never fire in months that are too short.
    pub day_of_month: u32,
    pub currency: String,
    pub is_active: bool,
    /// RFC 3339 timestamp of the last materialization; its `YYYY-MM` prefix
    /// guards against firing twice in one month
    pub last_processed: Option<String>,
}

/// Payload for creating a recurring template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecurringTransaction {
    pub owner_id: String,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub kind: EntryKind,
    pub day_of_month: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// RFC 3339 timestamp of the deadline
    pub target_date: String,
}

/// Payload for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub owner_id: String,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: String,
}

/// An earned achievement. At most one badge per (owner, name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned_date: String,
}

/// One observed price for a watched product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub date: String,
}

/// A product whose price the user wants to watch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceWatch {
    pub id: String,
    pub owner_id: String,
    pub product_name: String,
    pub current_price: f64,
    pub target_price: f64,
    pub product_url: Option<String>,
    /// Every observed price, oldest first, seeded with the initial price
    pub price_history: Vec<PricePoint>,
}

/// Payload for watching a product price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPriceWatch {
    pub owner_id: String,
    pub product_name: String,
    pub current_price: f64,
    pub target_price: f64,
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Per-owner assistant and alerting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub owner_id: String,
    /// Advisor tone: Balanced, Saver, Spender, Minimalist, Adventurous, Foodie
    pub personality_mode: String,
    /// Preferred reply language code: en, hi, te, ta, kn
    pub language: String,
    pub spending_alerts: bool,
    pub email: Option<String>,
}

impl Preferences {
    /// Defaults used when an owner has never saved preferences.
    pub fn default_for(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            personality_mode: "Balanced".to_string(),
            language: "en".to_string(),
            spending_alerts: true,
            email: None,
        }
    }
}

/// Payload for saving preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPreferences {
    pub owner_id: String,
    #[serde(default = "default_personality")]
    pub personality_mode: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub spending_alerts: bool,
    #[serde(default)]
    pub email: Option<String>,
}

fn default_personality() -> String {
    "Balanced".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_billing_cycle_round_trip() {
        assert_eq!(BillingCycle::from_str("monthly"), Ok(BillingCycle::Monthly));
        assert_eq!(BillingCycle::from_str("YEARLY"), Ok(BillingCycle::Yearly));
        assert_eq!(BillingCycle::from_str("annual"), Ok(BillingCycle::Yearly));
        assert!(BillingCycle::from_str("weekly").is_err());
        assert_eq!(BillingCycle::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_entry_kind_round_trip() {
        assert_eq!(EntryKind::from_str("expense"), Ok(EntryKind::Expense));
        assert_eq!(EntryKind::from_str("Income"), Ok(EntryKind::Income));
        assert!(EntryKind::from_str("transfer").is_err());
        assert_eq!(EntryKind::Income.as_str(), "income");
    }

    #[test]
    fn test_debt_status_round_trip() {
        assert_eq!(DebtStatus::from_str("active"), Ok(DebtStatus::Active));
        assert_eq!(DebtStatus::from_str("paid"), Ok(DebtStatus::Closed));
        assert!(DebtStatus::from_str("defaulted").is_err());
    }

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        // Day bucketing relies on the YYYY-MM-DD prefix
        assert!(ts.len() >= 10);
        assert_eq!(ts.as_bytes()[4], b'-');
        assert_eq!(ts.as_bytes()[7], b'-');
        assert!(ts.starts_with(&current_month()));
    }

    #[test]
    fn test_new_expense_deserialization_defaults() {
        let payload = r#"{"owner_id":"u1","amount":120.0,"category":"Food","description":"lunch"}"#;
        let new: NewExpense = serde_json::from_str(payload).unwrap();
        assert_eq!(new.currency, DEFAULT_CURRENCY);
        assert!(!new.is_regret);
        assert!(new.merchant.is_none());
        assert!(new.date.is_none());
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs = Preferences::default_for("u1");
        assert_eq!(prefs.personality_mode, "Balanced");
        assert_eq!(prefs.language, "en");
        assert!(prefs.spending_alerts);
        assert!(prefs.email.is_none());
    }
}
