//! Ledger operations: post, reverse and list payments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    Engine, EngineError, ExplicitStatus, MoneyCents, Payment, PaymentMethod, ResultEngine,
    store::ContractStore,
};

impl<S: ContractStore> Engine<S> {
    /// Posts a payment against a contract and moves its balance.
    ///
    /// The reconciliation invariant is enforced here: a posting can never
    /// exceed the remaining balance, so `0 <= paid_amount <= total_value`
    /// holds after every accepted call. A rejected call leaves the contract
    /// untouched.
    pub fn post_payment(
        &mut self,
        contract_id: Uuid,
        amount: MoneyCents,
        method: PaymentMethod,
        date: NaiveDate,
        reference: Option<&str>,
        notes: Option<&str>,
    ) -> ResultEngine<Payment> {
        let payment = Payment::new(contract_id, amount, method, date, reference, notes)?;

        let contract = self
            .store
            .contract(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        if contract.explicit_status == ExplicitStatus::Cancelled {
            return Err(EngineError::KeyNotFound(
                "contract is cancelled".to_string(),
            ));
        }
        let remaining = contract.remaining_amount();
        if amount > remaining {
            return Err(EngineError::Overpayment(format!(
                "amount {amount} exceeds remaining balance {remaining}"
            )));
        }

        let contract = self
            .store
            .contract_mut(contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        contract.paid_amount += amount;

        self.store.append_payment(payment.clone());
        Ok(payment)
    }

    /// Reverses a posted payment with a new negative-amount record.
    ///
    /// The original record stays untouched; a payment can be reversed once
    /// and a reversal can not be reversed again. Reversing is allowed on
    /// cancelled contracts (refunding after cancellation).
    pub fn reverse_payment(
        &mut self,
        payment_id: Uuid,
        reason: &str,
        date: NaiveDate,
    ) -> ResultEngine<Payment> {
        let original = self
            .store
            .payment(payment_id)
            .ok_or(EngineError::KeyNotFound("payment not exists".to_string()))?
            .clone();
        if original.is_reversal() {
            return Err(EngineError::InvalidAmount(
                "cannot reverse a reversal".to_string(),
            ));
        }
        if self
            .store
            .payments_of(original.contract_id)
            .iter()
            .any(|payment| payment.reversed_payment_id == Some(payment_id))
        {
            return Err(EngineError::InvalidAmount(
                "payment already reversed".to_string(),
            ));
        }

        let contract = self
            .store
            .contract(original.contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        if (contract.paid_amount - original.amount).is_negative() {
            return Err(EngineError::InvalidAmount(
                "reversal would drive paid amount below 0".to_string(),
            ));
        }

        let reversal = Payment::reversal_of(&original, reason, date);

        let contract = self
            .store
            .contract_mut(original.contract_id)
            .ok_or(EngineError::KeyNotFound("contract not exists".to_string()))?;
        contract.paid_amount -= original.amount;

        self.store.append_payment(reversal.clone());
        Ok(reversal)
    }

    /// Lists the payment history of a contract, oldest date first.
    ///
    /// Same-day records keep their posting order, so re-querying always
    /// returns the same sequence until a new payment is posted.
    pub fn list_payments(&self, contract_id: Uuid) -> ResultEngine<Vec<Payment>> {
        self.contract(contract_id)?;

        let mut payments = self.store.payments_of(contract_id).to_vec();
        payments.sort_by_key(|payment| payment.date);
        Ok(payments)
    }
}
