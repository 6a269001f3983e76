//! Default small-business chart of accounts.

use crate::account::AccountType;

/// An account the default chart creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultAccount {
    pub name: &'static str,
    pub account_type: AccountType,
    pub description: &'static str,
}

pub const DEFAULT_CHART: &[DefaultAccount] = &[
    DefaultAccount {
        name: "Cash",
        account_type: AccountType::Assets,
        description: "Cash on hand and in bank accounts",
    },
    DefaultAccount {
        name: "Accounts Receivable",
        account_type: AccountType::Assets,
        description: "Amounts owed by customers",
    },
    DefaultAccount {
        name: "Inventory",
        account_type: AccountType::Assets,
        description: "Goods held for sale",
    },
    DefaultAccount {
        name: "Accounts Payable",
        account_type: AccountType::Liabilities,
        description: "Amounts owed to suppliers",
    },
    DefaultAccount {
        name: "Owner's Equity",
        account_type: AccountType::Equity,
        description: "Capital contributed by the owners",
    },
    DefaultAccount {
        name: "Sales Revenue",
        account_type: AccountType::Income,
        description: "Income from sales of goods and services",
    },
    DefaultAccount {
        name: "Operating Expenses",
        account_type: AccountType::Expense,
        description: "Rent, utilities and other running costs",
    },
];
