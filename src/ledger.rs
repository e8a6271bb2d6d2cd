use serde::{Deserialize, Serialize};

/// Money earned per point of effective wealth at the start of a turn.
pub const ACCRUAL_MULTIPLIER: i64 = 10;

/// The money balance. It has no floor; range checks belong to the input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    balance: i64,
}

impl Ledger {
    pub fn new(balance: i64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn adjust(&mut self, amount: i64) -> i64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Adds `effective_value * multiplier` and returns the amount credited.
    pub fn accrue_from_attribute(&mut self, effective_value: i64, multiplier: i64) -> i64 {
        let amount = effective_value.saturating_mul(multiplier);
        self.adjust(amount);
        amount
    }

    pub fn reset(&mut self) {
        self.balance = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_allows_negative_balance() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.adjust(30), 30);
        assert_eq!(ledger.adjust(-50), -20);
    }

    #[test]
    fn accrual_scales_effective_value() {
        let mut ledger = Ledger::new(100);
        assert_eq!(ledger.accrue_from_attribute(5, ACCRUAL_MULTIPLIER), 50);
        assert_eq!(ledger.balance(), 150);

        // Negative wealth drains money.
        assert_eq!(ledger.accrue_from_attribute(-2, ACCRUAL_MULTIPLIER), -20);
        assert_eq!(ledger.balance(), 130);
    }

    #[test]
    fn persisted_as_plain_integer() {
        let ledger: Ledger = serde_json::from_str("250").unwrap();
        assert_eq!(ledger.balance(), 250);
        assert_eq!(serde_json::to_string(&ledger).unwrap(), "250");
    }
}
