//! Registry operations: create, update and transition contracts.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    Contract, ContractPatch, ContractType, Engine, EngineError, ExplicitStatus, LifecycleStatus,
    MoneyCents, Priority, ResultEngine,
    status::resolve,
    store::ContractStore,
    util::normalize_required_name,
};

/// Result of a cancellation.
///
/// Cancelling with money still owed succeeds (collection is a separate
/// concern); `outstanding` lets the caller surface that as a warning.
#[derive(Clone, Debug)]
pub struct CancelOutcome {
    pub contract: Contract,
    pub outstanding: MoneyCents,
}

impl<S: ContractStore> Engine<S> {
    /// Registers a new contract, created as an unpaid `Draft`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_contract(
        &mut self,
        contract_number: &str,
        customer_id: Uuid,
        customer_name: &str,
        contract_type: ContractType,
        total_value: MoneyCents,
        start_date: NaiveDate,
        end_date: NaiveDate,
        priority: Priority,
        notes: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Contract> {
        let contract = Contract::new(
            contract_number,
            customer_id,
            customer_name,
            contract_type,
            total_value,
            start_date,
            end_date,
            priority,
            notes,
            created_at,
        )?;

        if self
            .store
            .contract_by_number(&contract.contract_number)
            .is_some()
        {
            return Err(EngineError::ExistingKey(contract.contract_number));
        }

        self.store.insert_contract(contract.clone());
        Ok(contract)
    }

    /// Return a [`Contract`]
    pub fn contract(&self, contract_id: Uuid) -> ResultEngine<&Contract> {
        self.store
            .contract(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))
    }

    /// Updates the mutable fields of a contract.
    ///
    /// Rejected once the contract resolves `Cancelled` or `Completed`. The
    /// new value can never drop below what has already been collected.
    pub fn update_contract(
        &mut self,
        contract_id: Uuid,
        patch: ContractPatch,
        now: NaiveDate,
    ) -> ResultEngine<Contract> {
        let current = self.contract(contract_id)?;
        let resolved = resolve(current, now);
        if matches!(
            resolved.lifecycle,
            LifecycleStatus::Cancelled | LifecycleStatus::Completed
        ) {
            return Err(EngineError::InvalidTransition(
                "cannot modify a cancelled or completed contract".to_string(),
            ));
        }
        let paid_amount = current.paid_amount;

        let contract_number = match &patch.contract_number {
            Some(number) => {
                let number = normalize_required_name(number, "contract number")?;
                if number != current.contract_number
                    && self.store.contract_by_number(&number).is_some()
                {
                    return Err(EngineError::ExistingKey(number));
                }
                Some(number)
            }
            None => None,
        };
        let customer_name = match &patch.customer_name {
            Some(name) => Some(normalize_required_name(name, "customer")?),
            None => None,
        };

        let total_value = patch.total_value.unwrap_or(current.total_value);
        if total_value.is_negative() {
            return Err(EngineError::InvalidAmount(
                "total_value must be >= 0".to_string(),
            ));
        }
        if total_value < paid_amount {
            return Err(EngineError::InvalidAmount(format!(
                "total_value {total_value} must not drop below paid amount {paid_amount}"
            )));
        }

        let start_date = patch.start_date.unwrap_or(current.start_date);
        let end_date = patch.end_date.unwrap_or(current.end_date);
        if end_date < start_date {
            return Err(EngineError::InvalidDate(
                "end_date must be >= start_date".to_string(),
            ));
        }

        let contract = self
            .store
            .contract_mut(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        if let Some(number) = contract_number {
            contract.contract_number = number;
        }
        if let Some(customer_id) = patch.customer_id {
            contract.customer_id = customer_id;
        }
        if let Some(name) = customer_name {
            contract.customer_name = name;
        }
        if let Some(contract_type) = patch.contract_type {
            contract.contract_type = contract_type;
        }
        contract.total_value = total_value;
        contract.start_date = start_date;
        contract.end_date = end_date;
        if let Some(priority) = patch.priority {
            contract.priority = priority;
        }
        if let Some(notes) = patch.notes {
            let trimmed = notes.trim();
            contract.notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        Ok(contract.clone())
    }

    /// Approves a draft.
    pub fn approve_contract(&mut self, contract_id: Uuid) -> ResultEngine<Contract> {
        let contract = self
            .store
            .contract_mut(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        if contract.explicit_status != ExplicitStatus::Draft {
            return Err(EngineError::InvalidTransition(
                "only draft contracts can be approved".to_string(),
            ));
        }

        contract.explicit_status = ExplicitStatus::Approved;
        Ok(contract.clone())
    }

    /// Marks an approved contract as explicitly started.
    pub fn activate_contract(&mut self, contract_id: Uuid) -> ResultEngine<Contract> {
        let contract = self
            .store
            .contract_mut(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        if contract.explicit_status != ExplicitStatus::Approved {
            return Err(EngineError::InvalidTransition(
                "only approved contracts can be activated".to_string(),
            ));
        }

        contract.explicit_status = ExplicitStatus::Active;
        Ok(contract.clone())
    }

    /// Cancels a contract.
    ///
    /// Succeeds even with an outstanding balance; cancellation does **not**
    /// reverse posted payments (refunding is an independent operation, see
    /// [`Engine::reverse_payment`]).
    pub fn cancel_contract(
        &mut self,
        contract_id: Uuid,
        now: NaiveDate,
    ) -> ResultEngine<CancelOutcome> {
        let current = self.contract(contract_id)?;
        let resolved = resolve(current, now);
        if current.explicit_status == ExplicitStatus::Cancelled {
            return Err(EngineError::InvalidTransition(
                "contract is already cancelled".to_string(),
            ));
        }
        if resolved.lifecycle == LifecycleStatus::Completed {
            return Err(EngineError::InvalidTransition(
                "cannot cancel a completed contract".to_string(),
            ));
        }

        let contract = self
            .store
            .contract_mut(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        contract.explicit_status = ExplicitStatus::Cancelled;
        let outstanding = contract.remaining_amount();

        Ok(CancelOutcome {
            contract: contract.clone(),
            outstanding,
        })
    }

    /// Physically removes a contract from the registry.
    ///
    /// Once a payment exists the history must be kept: the contract can only
    /// be cancelled.
    pub fn delete_contract(&mut self, contract_id: Uuid) -> ResultEngine<()> {
        self.contract(contract_id)?;
        if !self.store.payments_of(contract_id).is_empty() {
            return Err(EngineError::InvalidTransition(
                "contract has payments and can only be cancelled".to_string(),
            ));
        }

        self.store.remove_contract(contract_id);
        Ok(())
    }
}
