#![warn(clippy::uninlined_format_args)]

//! Settlement-computation core for splitting shared expenses.
//!
//! Two pure, stateless services composed in sequence: [`BalanceAggregator`]
//! turns participants and expenses into per-participant balances, and
//! [`SettlementReducer`] turns those balances into the ordered payments that
//! zero them out. The core performs no I/O and no input validation; malformed
//! references contribute nothing rather than erroring.

pub mod model;
pub mod services;

pub use model::{Expense, Money, Participant, ParticipantBalance, ParticipantId, Settlement};
pub use services::{BalanceAggregator, SettlementReducer};

/// Aggregate per-participant balances from recorded expenses.
pub fn compute_balances(
    participants: &[Participant],
    expenses: &[Expense],
) -> Vec<ParticipantBalance> {
    BalanceAggregator.compute(participants, expenses)
}

/// Reduce net balances to the payments that settle them.
pub fn compute_settlements(balances: &[ParticipantBalance]) -> Vec<Settlement> {
    SettlementReducer.compute(balances)
}
