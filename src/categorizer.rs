use crate::dates::make_docnum;
use crate::matcher::match_vendor;
use crate::models::{Category, Classification, LedgerEntry, PayeeSource, TransactionRow, TransactionType};
use crate::normalize::{clean_text, normalize, title_case};
use crate::vendors::VendorDirectory;

pub const CASH_IN_DRAWER: &str = "Cash in Drawer";
pub const CUSTOMER_DELIVERIES: &str = "Customer Deliveries";
pub const BANK_CHARGES_MPESA: &str = "Bank Charges - Mpesa";
pub const INTERBRANCH_TRANSPORT: &str = "Interbranch Transport Cost";
pub const ACCOUNTS_PAYABLE: &str = "Accounts Payable";

/// Bank the drawer is swept into on a cash pickup.
pub const BANK_VENDOR: &str = "Diamond Trust Bank";
/// Mobile-money provider charging transaction costs.
pub const TELECOM_VENDOR: &str = "Safaricom";
pub const PLACEHOLDER_PAYEE: &str = "Vendor";

/// Spellings of fare/transport seen in till notes.
const TRANSPORT_KEYWORDS: &[&str] = &["fare", "fair", "transport", "trasport"];

/// Row fields prepared once for the rule chain.
struct RowContext<'a> {
    pay_type: String,
    detail_norm: String,
    detail: String,
    user: String,
    date: String,
    directory: &'a VendorDirectory,
    threshold: u8,
}

struct Rule {
    applies: fn(&RowContext) -> bool,
    build: fn(&RowContext) -> Classification,
}

/// Evaluated top to bottom; the first rule that applies decides the entry.
const RULES: &[Rule] = &[
    Rule {
        applies: |cx| cx.pay_type.contains("cash") && cx.pay_type.contains("pickup"),
        build: |cx| Classification {
            category: Category::CashPickup,
            transaction_type: TransactionType::Transfer,
            debit_account: CASH_IN_DRAWER.to_string(),
            credit_account: BANK_VENDOR.to_string(),
            payee: BANK_VENDOR.to_string(),
            payee_source: PayeeSource::Fixed,
            memo: format!("Cash pick up for deposit on {}", cx.date),
        },
    },
    Rule {
        applies: |cx| cx.detail_norm.contains("deliv"),
        build: |cx| Classification {
            category: Category::DeliveryExpense,
            transaction_type: TransactionType::Check,
            debit_account: CASH_IN_DRAWER.to_string(),
            credit_account: CUSTOMER_DELIVERIES.to_string(),
            payee: cx.user.clone(),
            payee_source: PayeeSource::Cashier,
            memo: format!("Delivery expense on behalf of customer on {}", cx.date),
        },
    },
    Rule {
        applies: |cx| cx.detail_norm.contains("transaction cost"),
        build: |cx| Classification {
            category: Category::BankCharge,
            transaction_type: TransactionType::Check,
            debit_account: CASH_IN_DRAWER.to_string(),
            credit_account: BANK_CHARGES_MPESA.to_string(),
            payee: TELECOM_VENDOR.to_string(),
            payee_source: PayeeSource::Fixed,
            memo: format!("MPESA transaction cost on {}", cx.date),
        },
    },
    Rule {
        applies: |cx| TRANSPORT_KEYWORDS.iter().any(|k| cx.detail_norm.contains(k)),
        build: |cx| Classification {
            category: Category::StaffTransport,
            transaction_type: TransactionType::Check,
            debit_account: CASH_IN_DRAWER.to_string(),
            credit_account: INTERBRANCH_TRANSPORT.to_string(),
            payee: cx.user.clone(),
            payee_source: PayeeSource::Cashier,
            memo: format!("Interbranch transport by {} on {}", cx.user, cx.date),
        },
    },
    Rule {
        applies: |_| true,
        build: vendor_purchase,
    },
];

fn vendor_purchase(cx: &RowContext) -> Classification {
    let (payee, payee_source) = match match_vendor(&cx.detail, cx.directory, cx.threshold) {
        Some(m) => (m.vendor, PayeeSource::Vendor(m.stage)),
        None if cx.detail.is_empty() => (PLACEHOLDER_PAYEE.to_string(), PayeeSource::Placeholder),
        None => (title_case(&cx.detail), PayeeSource::Detail),
    };
    Classification {
        category: Category::VendorPurchase,
        transaction_type: TransactionType::Check,
        debit_account: CASH_IN_DRAWER.to_string(),
        credit_account: ACCOUNTS_PAYABLE.to_string(),
        payee,
        payee_source,
        memo: format!("Petty cash by {} for {} on {}", cx.user, cx.detail, cx.date),
    }
}

/// Turn one row into its balanced ledger entry. `seq` is the 1-based row position.
pub fn classify(
    row: &TransactionRow,
    seq: usize,
    threshold: u8,
    directory: &VendorDirectory,
) -> LedgerEntry {
    let cx = RowContext {
        pay_type: normalize(&row.pay_type),
        detail_norm: normalize(&row.detail),
        detail: clean_text(&row.detail),
        user: clean_text(&row.user_name),
        date: row.date.qb_format(),
        directory,
        threshold,
    };

    let rule = RULES
        .iter()
        .find(|r| (r.applies)(&cx))
        .unwrap_or(&RULES[RULES.len() - 1]);
    let classification = (rule.build)(&cx);

    LedgerEntry::new(classification, cx.date, make_docnum(&row.date, seq), row.amount)
}
