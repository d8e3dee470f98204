//! Multi-criteria contract filtering.

use chrono::NaiveDate;

use crate::{
    contracts::{Contract, ContractType},
    status::{LifecycleStatus, PaymentStatus, resolve},
    util::normalize_search,
};

/// Filters for listing contracts.
///
/// All criteria are optional and combined with logical AND. Value and date
/// bounds are inclusive. An empty filter is the identity: every contract is
/// returned in its original registry order.
#[derive(Clone, Debug, Default)]
pub struct ContractFilter {
    /// Case-insensitive substring match against the contract number or the
    /// customer name.
    pub search: Option<String>,
    pub contract_type: Option<ContractType>,
    /// Matched against the **resolved** lifecycle, not the author-set state.
    pub lifecycle_status: Option<LifecycleStatus>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub end_date_from: Option<NaiveDate>,
    pub end_date_to: Option<NaiveDate>,
    /// If true, keeps only contracts past their end date with money still
    /// owed (default: false, no constraint).
    pub has_overdue: bool,
}

impl ContractFilter {
    fn matches(&self, contract: &Contract, now: NaiveDate) -> bool {
        if let Some(search) = &self.search {
            let needle = normalize_search(search);
            let number = normalize_search(&contract.contract_number);
            let customer = normalize_search(&contract.customer_name);
            if !number.contains(&needle) && !customer.contains(&needle) {
                return false;
            }
        }

        if let Some(contract_type) = self.contract_type
            && contract.contract_type != contract_type
        {
            return false;
        }

        let value = contract.total_value.cents();
        if let Some(min) = self.min_value
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max_value
            && value > max
        {
            return false;
        }

        if let Some(from) = self.start_date_from
            && contract.start_date < from
        {
            return false;
        }
        if let Some(to) = self.start_date_to
            && contract.start_date > to
        {
            return false;
        }
        if let Some(from) = self.end_date_from
            && contract.end_date < from
        {
            return false;
        }
        if let Some(to) = self.end_date_to
            && contract.end_date > to
        {
            return false;
        }

        if self.lifecycle_status.is_some() || self.has_overdue {
            let resolved = resolve(contract, now);
            if let Some(lifecycle) = self.lifecycle_status
                && resolved.lifecycle != lifecycle
            {
                return false;
            }
            if self.has_overdue
                && !(resolved.lifecycle == LifecycleStatus::Expired
                    && resolved.payment != PaymentStatus::FullyPaid)
            {
                return false;
            }
        }

        true
    }
}

/// Applies `criteria` lazily over `contracts`, preserving their order.
///
/// Filtering is stable: it never re-sorts, it only drops non-matching items.
pub fn apply<'a, I>(
    contracts: I,
    criteria: &'a ContractFilter,
    now: NaiveDate,
) -> impl Iterator<Item = &'a Contract>
where
    I: IntoIterator<Item = &'a Contract>,
    I::IntoIter: 'a,
{
    contracts
        .into_iter()
        .filter(move |contract| criteria.matches(contract, now))
}
