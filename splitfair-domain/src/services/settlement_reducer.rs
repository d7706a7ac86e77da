use rust_decimal::Decimal;

use crate::model::{Money, ParticipantBalance, ParticipantId, Settlement};

/// One side of the ledger while the reduction runs. Local working state;
/// caller balances are never touched.
struct OpenBalance {
    id: ParticipantId,
    net: Money,
}

/// Residual below which a balance counts as settled.
fn is_settled(net: Money) -> bool {
    net.abs().as_decimal() < Decimal::new(1, 2)
}

/// Greedy settlement service: matches the largest debt against the largest
/// credit until one side runs out.
pub struct SettlementReducer;

impl SettlementReducer {
    /// Reduce net balances to an ordered list of point-to-point payments.
    ///
    /// Output order is the generation order and is reproducible: the sorts
    /// are stable, so equal balances keep their input order. Balances whose
    /// net is already zero take part in no settlement. Residual imbalance in
    /// the input (balances not summing to zero) is left uncorrected; the
    /// loop simply stops when either side is exhausted.
    pub fn compute(&self, balances: &[ParticipantBalance]) -> Vec<Settlement> {
        let mut debtors: Vec<OpenBalance> = balances
            .iter()
            .filter(|balance| balance.net_balance < Money::ZERO)
            .map(|balance| OpenBalance {
                id: balance.id.clone(),
                net: balance.net_balance,
            })
            .collect();
        let mut creditors: Vec<OpenBalance> = balances
            .iter()
            .filter(|balance| balance.net_balance > Money::ZERO)
            .map(|balance| OpenBalance {
                id: balance.id.clone(),
                net: balance.net_balance,
            })
            .collect();

        // Largest debt first, largest credit first.
        debtors.sort_by(|a, b| a.net.cmp(&b.net));
        creditors.sort_by(|a, b| b.net.cmp(&a.net));

        let mut settlements = Vec::new();
        let mut debtor_idx = 0;
        let mut creditor_idx = 0;

        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let debtor = &debtors[debtor_idx];
            let creditor = &creditors[creditor_idx];

            let amount = debtor.net.abs().min(creditor.net);

            // The instruction is rounded to cents; the working balances keep
            // the unrounded amount so precision carries across matches.
            // Amounts that round to zero are dropped rather than emitted.
            let rounded = amount.round_to_cents();
            if rounded > Money::ZERO {
                settlements.push(Settlement {
                    from: debtor.id.clone(),
                    to: creditor.id.clone(),
                    amount: rounded,
                });
            }

            debtors[debtor_idx].net += amount;
            creditors[creditor_idx].net -= amount;

            let debtor_done = is_settled(debtors[debtor_idx].net);
            let creditor_done = is_settled(creditors[creditor_idx].net);
            if debtor_done {
                debtor_idx += 1;
            }
            if creditor_done {
                creditor_idx += 1;
            }
            // Progress guard: opposite-signed sub-cent residues must not
            // spin here forever.
            if !debtor_done && !creditor_done {
                debtor_idx += 1;
            }
        }

        settlements
    }
}
