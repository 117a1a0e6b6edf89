use rust_decimal::Decimal;

use crate::dates::TxnDate;
use crate::matcher::MatchStage;

/// One cleaned row of the petty-cash log.
#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub pay_type: String,
    pub till_no: String,
    pub date: TxnDate,
    pub detail: String,
    /// Sign is not significant; entries use the absolute value.
    pub amount: Decimal,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    CashPickup,
    DeliveryExpense,
    BankCharge,
    StaffTransport,
    VendorPurchase,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::CashPickup,
        Self::DeliveryExpense,
        Self::BankCharge,
        Self::StaffTransport,
        Self::VendorPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CashPickup => "Cash pickup",
            Self::DeliveryExpense => "Delivery expense",
            Self::BankCharge => "Bank charge",
            Self::StaffTransport => "Staff transport",
            Self::VendorPurchase => "Vendor purchase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Check,
    Transfer,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "CHECK",
            Self::Transfer => "TRANSFER",
        }
    }
}

/// Where a payee name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayeeSource {
    /// Hard-wired counterparty for the category (bank, telecom).
    Fixed,
    Cashier,
    Vendor(MatchStage),
    /// No vendor matched; the title-cased detail stands in.
    Detail,
    /// No vendor and no detail.
    Placeholder,
}

impl PayeeSource {
    pub fn label(&self) -> String {
        match self {
            Self::Fixed => "fixed".to_string(),
            Self::Cashier => "cashier".to_string(),
            Self::Vendor(stage) => stage.label(),
            Self::Detail => "unmatched".to_string(),
            Self::Placeholder => "placeholder".to_string(),
        }
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Detail | Self::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub transaction_type: TransactionType,
    pub debit_account: String,
    pub credit_account: String,
    pub payee: String,
    pub payee_source: PayeeSource,
    pub memo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Trns,
    Spl,
}

impl LineTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trns => "TRNS",
            Self::Spl => "SPL",
        }
    }
}

pub const NOT_CLEARED: &str = "N";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    pub tag: LineTag,
    pub transaction_type: TransactionType,
    pub date: String,
    pub account: String,
    pub name: String,
    pub amount: Decimal,
    pub memo: String,
    pub docnum: String,
    pub cleared: &'static str,
}

impl LedgerLine {
    /// Fields in IIF column order.
    pub fn fields(&self) -> [String; 9] {
        [
            self.tag.as_str().to_string(),
            self.transaction_type.as_str().to_string(),
            self.date.clone(),
            self.account.clone(),
            self.name.clone(),
            self.amount.to_string(),
            self.memo.clone(),
            self.docnum.clone(),
            self.cleared.to_string(),
        ]
    }
}

/// One balanced transaction: a TRNS line against the drawer and its SPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub classification: Classification,
    pub trns: LedgerLine,
    pub spl: LedgerLine,
}

impl LedgerEntry {
    pub fn new(classification: Classification, date: String, docnum: String, amount: Decimal) -> Self {
        let magnitude = amount.abs();
        let (debit, credit) = if magnitude.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (-magnitude, magnitude)
        };
        let line = |tag, account: &str, amount| LedgerLine {
            tag,
            transaction_type: classification.transaction_type,
            date: date.clone(),
            account: account.to_string(),
            name: classification.payee.clone(),
            amount,
            memo: classification.memo.clone(),
            docnum: docnum.clone(),
            cleared: NOT_CLEARED,
        };
        let trns = line(LineTag::Trns, &classification.debit_account, debit);
        let spl = line(LineTag::Spl, &classification.credit_account, credit);
        Self {
            classification,
            trns,
            spl,
        }
    }

    pub fn is_balanced(&self) -> bool {
        (self.trns.amount + self.spl.amount).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn classification() -> Classification {
        Classification {
            category: Category::DeliveryExpense,
            transaction_type: TransactionType::Check,
            debit_account: "Cash in Drawer".to_string(),
            credit_account: "Customer Deliveries".to_string(),
            payee: "Amina".to_string(),
            payee_source: PayeeSource::Cashier,
            memo: "Delivery expense on behalf of customer on 03/01/2024".to_string(),
        }
    }

    #[test]
    fn test_entry_balances_and_keeps_scale() {
        let amount = Decimal::from_str("-12.50").unwrap();
        let entry = LedgerEntry::new(classification(), "03/01/2024".into(), "20240301001".into(), amount);
        assert!(entry.is_balanced());
        assert_eq!(entry.trns.amount.to_string(), "-12.50");
        assert_eq!(entry.spl.amount.to_string(), "12.50");
        assert_eq!(entry.trns.account, "Cash in Drawer");
        assert_eq!(entry.spl.account, "Customer Deliveries");
    }

    #[test]
    fn test_zero_amount_has_no_sign() {
        let entry = LedgerEntry::new(classification(), "d".into(), "n".into(), Decimal::ZERO);
        assert_eq!(entry.trns.amount.to_string(), "0");
        assert_eq!(entry.spl.amount.to_string(), "0");
        assert!(entry.is_balanced());
    }

    #[test]
    fn test_line_fields_order() {
        let entry = LedgerEntry::new(classification(), "03/01/2024".into(), "20240301001".into(), Decimal::from(300));
        assert_eq!(
            entry.spl.fields(),
            [
                "SPL",
                "CHECK",
                "03/01/2024",
                "Customer Deliveries",
                "Amina",
                "300",
                "Delivery expense on behalf of customer on 03/01/2024",
                "20240301001",
                "N",
            ]
            .map(String::from)
        );
    }
}
