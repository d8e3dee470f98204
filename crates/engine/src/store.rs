//! Contract registry abstraction.
//!
//! The engine depends on [`ContractStore`] abstractly so a real persistence
//! layer can be substituted without touching the logic above it.
//! [`MemoryStore`] is the bundled implementation; it keeps contracts in
//! insertion order, which the filter engine relies on for stable results.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{contracts::Contract, payments::Payment};

const NO_PAYMENTS: &[Payment] = &[];

/// Storage seam for contracts and their payment histories.
///
/// A contract exclusively owns its payments: removing a contract must remove
/// its history as well (cascade). `contracts()` must preserve the order
/// contracts were inserted in; `payments_of()` must preserve posting order.
pub trait ContractStore {
    fn contract(&self, contract_id: Uuid) -> Option<&Contract>;
    fn contract_mut(&mut self, contract_id: Uuid) -> Option<&mut Contract>;
    fn contract_by_number(&self, contract_number: &str) -> Option<&Contract>;
    fn insert_contract(&mut self, contract: Contract);
    fn remove_contract(&mut self, contract_id: Uuid) -> Option<Contract>;
    fn contracts(&self) -> Vec<&Contract>;

    fn payment(&self, payment_id: Uuid) -> Option<&Payment>;
    fn append_payment(&mut self, payment: Payment);
    fn payments_of(&self, contract_id: Uuid) -> &[Payment];
}

/// In-memory registry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contracts: Vec<Contract>,
    index: HashMap<Uuid, usize>,
    payments: HashMap<Uuid, Vec<Payment>>,
    // payment id -> owning contract id
    payment_index: HashMap<Uuid, Uuid>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.index = self
            .contracts
            .iter()
            .enumerate()
            .map(|(position, contract)| (contract.id, position))
            .collect();
    }
}

impl ContractStore for MemoryStore {
    fn contract(&self, contract_id: Uuid) -> Option<&Contract> {
        self.index
            .get(&contract_id)
            .map(|&position| &self.contracts[position])
    }

    fn contract_mut(&mut self, contract_id: Uuid) -> Option<&mut Contract> {
        self.index
            .get(&contract_id)
            .map(|&position| &mut self.contracts[position])
    }

    fn contract_by_number(&self, contract_number: &str) -> Option<&Contract> {
        self.contracts
            .iter()
            .find(|contract| contract.contract_number == contract_number)
    }

    fn insert_contract(&mut self, contract: Contract) {
        self.index.insert(contract.id, self.contracts.len());
        self.contracts.push(contract);
    }

    fn remove_contract(&mut self, contract_id: Uuid) -> Option<Contract> {
        let position = self.index.remove(&contract_id)?;
        let contract = self.contracts.remove(position);
        self.reindex();

        // Cascade: a payment cannot outlive its contract.
        if let Some(payments) = self.payments.remove(&contract_id) {
            for payment in payments {
                self.payment_index.remove(&payment.id);
            }
        }

        Some(contract)
    }

    fn contracts(&self) -> Vec<&Contract> {
        self.contracts.iter().collect()
    }

    fn payment(&self, payment_id: Uuid) -> Option<&Payment> {
        let contract_id = self.payment_index.get(&payment_id)?;
        self.payments
            .get(contract_id)?
            .iter()
            .find(|payment| payment.id == payment_id)
    }

    fn append_payment(&mut self, payment: Payment) {
        self.payment_index.insert(payment.id, payment.contract_id);
        self.payments
            .entry(payment.contract_id)
            .or_default()
            .push(payment);
    }

    fn payments_of(&self, contract_id: Uuid) -> &[Payment] {
        self.payments
            .get(&contract_id)
            .map_or(NO_PAYMENTS, Vec::as_slice)
    }
}
