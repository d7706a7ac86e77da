use fxhash::FxHashMap;
use rust_decimal::Decimal;

use crate::model::{Expense, Money, Participant, ParticipantBalance};

/// Balance aggregation service.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Fold expenses into one paid/owes/net record per participant.
    ///
    /// Records come back in participant input order. Expense references to
    /// unknown participant ids contribute nothing, and an empty share list
    /// distributes nothing; validation is the caller's responsibility.
    pub fn compute(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> Vec<ParticipantBalance> {
        let mut balances: Vec<ParticipantBalance> = participants
            .iter()
            .map(|participant| ParticipantBalance {
                id: participant.id.clone(),
                name: participant.name.clone(),
                paid: Money::ZERO,
                owes: Money::ZERO,
                net_balance: Money::ZERO,
            })
            .collect();

        let index: FxHashMap<&str, usize> = participants
            .iter()
            .enumerate()
            .map(|(idx, participant)| (participant.id.as_str(), idx))
            .collect();

        for expense in expenses {
            if let Some(&payer) = index.get(expense.paid_by.as_str()) {
                balances[payer].paid += expense.amount;
            }

            let sharer_count = expense.shared_by.len();
            if sharer_count == 0 {
                continue;
            }
            // Plain division, no rounding; precision is carried through and
            // only settlement emission rounds.
            let share = Money::new(expense.amount.as_decimal() / Decimal::from(sharer_count as u64));
            for id in &expense.shared_by {
                if let Some(&sharer) = index.get(id.as_str()) {
                    balances[sharer].owes += share;
                }
            }
        }

        for balance in &mut balances {
            balance.net_balance = balance.paid - balance.owes;
        }

        balances
    }
}
