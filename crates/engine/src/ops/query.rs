//! Read-only queries over the registry snapshot.

use chrono::NaiveDate;

use crate::{
    Contract, ContractFilter, Engine, ResolvedStatus, Stats,
    filter, stats,
    status::resolve,
    store::ContractStore,
};

impl<S: ContractStore> Engine<S> {
    /// Applies `criteria` over the registry and annotates every match with
    /// its resolved status, together with [`Stats`] over the same selection.
    ///
    /// Registry order is preserved; an empty filter returns everything.
    pub fn query(
        &self,
        criteria: &ContractFilter,
        now: NaiveDate,
    ) -> (Vec<(Contract, ResolvedStatus)>, Stats) {
        let matched: Vec<&Contract> =
            filter::apply(self.store.contracts(), criteria, now).collect();
        let stats = stats::summarize(matched.iter().copied(), now);
        let annotated = matched
            .into_iter()
            .map(|contract| (contract.clone(), resolve(contract, now)))
            .collect();

        (annotated, stats)
    }

    /// [`Stats`] over the whole registry.
    pub fn statistics(&self, now: NaiveDate) -> Stats {
        stats::summarize(self.store.contracts(), now)
    }
}
