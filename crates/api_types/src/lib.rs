use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod contract {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ContractType {
        Rental,
        Purchase,
        Maintenance,
        Installation,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum LifecycleStatus {
        Draft,
        Approved,
        Active,
        Expired,
        Completed,
        Cancelled,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentStatus {
        Unpaid,
        PartiallyPaid,
        FullyPaid,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Priority {
        Low,
        Medium,
        High,
    }

    /// Request body for registering a contract.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContractNew {
        pub contract_number: String,
        pub customer_id: Uuid,
        pub customer_name: String,
        pub contract_type: ContractType,
        /// Amount in cents.
        pub total_value_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub priority: Priority,
        pub notes: Option<String>,
    }

    /// Request body for updating a contract. Absent fields are unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ContractUpdate {
        pub contract_number: Option<String>,
        pub customer_id: Option<Uuid>,
        pub customer_name: Option<String>,
        pub contract_type: Option<ContractType>,
        pub total_value_minor: Option<i64>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub priority: Option<Priority>,
        pub notes: Option<String>,
    }

    /// A contract annotated with its resolved status.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContractView {
        pub id: Uuid,
        pub contract_number: String,
        pub customer_id: Uuid,
        pub customer_name: String,
        pub contract_type: ContractType,
        pub lifecycle_status: LifecycleStatus,
        pub payment_status: PaymentStatus,
        pub total_value_minor: i64,
        pub paid_minor: i64,
        pub remaining_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub priority: Priority,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    /// Response body for a cancellation.
    ///
    /// `warning` is set when the contract was cancelled with money still
    /// owed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContractCancelled {
        pub contract: ContractView,
        pub warning: Option<String>,
    }

    /// Query criteria; absent fields do not constrain the result.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ContractQuery {
        pub search: Option<String>,
        pub contract_type: Option<ContractType>,
        pub lifecycle_status: Option<LifecycleStatus>,
        pub min_value_minor: Option<i64>,
        pub max_value_minor: Option<i64>,
        pub start_date_from: Option<NaiveDate>,
        pub start_date_to: Option<NaiveDate>,
        pub end_date_from: Option<NaiveDate>,
        pub end_date_to: Option<NaiveDate>,
        pub has_overdue: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContractQueryResponse {
        pub contracts: Vec<ContractView>,
        /// Aggregated over the filtered selection.
        pub stats: super::stats::StatsView,
    }
}

pub mod payment {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMethod {
        Cash,
        BankTransfer,
        Check,
        CreditCard,
        Installment,
    }

    /// Request body for posting a payment.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub contract_id: Uuid,
        /// Amount in cents, must be > 0.
        pub amount_minor: i64,
        pub method: PaymentMethod,
        pub date: NaiveDate,
        pub reference: Option<String>,
        pub notes: Option<String>,
    }

    /// Request body for reversing a posted payment.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentReverse {
        pub reason: String,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LifecycleCountsView {
        pub draft: u64,
        pub approved: u64,
        pub active: u64,
        pub expired: u64,
        pub completed: u64,
        pub cancelled: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PaymentCountsView {
        pub unpaid: u64,
        pub partially_paid: u64,
        pub fully_paid: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatsView {
        pub total: u64,
        pub lifecycle: LifecycleCountsView,
        pub payment: PaymentCountsView,
        pub total_value_minor: i64,
        pub paid_minor: i64,
        pub remaining_minor: i64,
        pub active_avg_value_minor: Option<i64>,
    }
}

pub mod permission {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PermissionFlag {
        pub id: String,
        pub enabled: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PermissionCategory {
        pub id: String,
        pub name: String,
        pub permissions: Vec<PermissionFlag>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Role {
        pub id: String,
        pub name: String,
        pub categories: Vec<PermissionCategory>,
    }

    /// Request body for a permission check. The active role is passed
    /// explicitly; the server holds no session state.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PermissionCheck {
        pub role: Role,
        pub permission_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PermissionCheckResponse {
        pub allowed: bool,
    }

    /// Request body for the all-or-nothing category toggle.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryToggle {
        pub role: Role,
        pub category_id: String,
    }
}
