use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Monetary amount carried at full decimal precision.
///
/// Intermediate sums are never rounded; rounding to cents happens only when a
/// settlement instruction is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to two decimal places, midpoint away from zero.
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Opaque participant identifier. Uniqueness within one computation is the
/// caller's contract; the core never validates it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(SmolStr);

impl ParticipantId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SmolStr>,
}

/// A single recorded payment event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: SmolStr,
    pub title: SmolStr,
    pub amount: Money,
    pub paid_by: ParticipantId,
    /// Duplicate entries count as distinct shares; the core does not dedupe.
    pub shared_by: Vec<ParticipantId>,
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Whether the participant pays for or shares this expense.
    pub fn involves(&self, id: &ParticipantId) -> bool {
        self.paid_by == *id || self.shared_by.contains(id)
    }
}

/// A participant's aggregate position across all expenses. Derived state,
/// recomputed in full on every call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBalance {
    pub id: ParticipantId,
    pub name: SmolStr,
    pub paid: Money,
    pub owes: Money,
    /// Paid minus owed. Positive: the group owes this participant.
    pub net_balance: Money,
}

/// A directed payment instruction: `from` pays `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::midpoint_up(Decimal::new(5, 3), Decimal::new(1, 2))]
    #[case::midpoint_down(Decimal::new(-5, 3), Decimal::new(-1, 2))]
    #[case::below_midpoint(Decimal::new(4, 3), Decimal::ZERO)]
    #[case::already_cents(Decimal::new(667, 2), Decimal::new(667, 2))]
    fn rounds_to_cents(#[case] amount: Decimal, #[case] expected: Decimal) {
        assert_eq!(Money::new(amount).round_to_cents(), Money::new(expected));
    }

    #[test]
    fn money_sums() {
        let amounts = [Money::from_i64(3), Money::from_i64(-1), Money::from_i64(5)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_i64(7));
    }

    #[test]
    fn expense_deserializes_from_stored_wire_shape() {
        let expense: Expense = serde_json::from_str(
            r#"{
                "id": "e1",
                "title": "Dinner",
                "amount": 42.5,
                "paidBy": "p1",
                "sharedBy": ["p1", "p2"],
                "date": "2024-06-01T18:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(expense.paid_by, ParticipantId::from("p1"));
        assert_eq!(expense.shared_by.len(), 2);
        assert_eq!(expense.amount, Money::new(Decimal::new(425, 1)));
        assert!(expense.involves(&ParticipantId::from("p2")));
        assert!(!expense.involves(&ParticipantId::from("p3")));
    }
}
