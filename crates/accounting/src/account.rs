use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bizledger_core::{DomainError, Entity};

/// Account classification (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountType {
    Assets,
    Liabilities,
    Equity,
    Income,
    Expense,
}

/// Every account type, in chart order.
pub const ACCOUNT_TYPES: [AccountType; 5] = [
    AccountType::Assets,
    AccountType::Liabilities,
    AccountType::Equity,
    AccountType::Income,
    AccountType::Expense,
];

/// Side on which an account's balance grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl AccountType {
    pub fn normal_balance(self) -> NormalBalance {
        match self {
            AccountType::Assets | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liabilities | AccountType::Equity | AccountType::Income => {
                NormalBalance::Credit
            }
        }
    }

    /// Conventional identifier prefix (`AST-1001`, `LIA-1001`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            AccountType::Assets => "AST",
            AccountType::Liabilities => "LIA",
            AccountType::Equity => "EQT",
            AccountType::Income => "INC",
            AccountType::Expense => "EXP",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Assets => "Assets",
            AccountType::Liabilities => "Liabilities",
            AccountType::Equity => "Equity",
            AccountType::Income => "Income",
            AccountType::Expense => "Expense",
        }
    }
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assets" | "asset" => Ok(AccountType::Assets),
            "liabilities" | "liability" => Ok(AccountType::Liabilities),
            "equity" => Ok(AccountType::Equity),
            "income" => Ok(AccountType::Income),
            "expense" => Ok(AccountType::Expense),
            _ => Err(DomainError::UnknownAccountType(s.trim().to_string())),
        }
    }
}

/// Chart-of-accounts record.
///
/// `balance` starts at zero and is only ever changed by journal posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub balance: Decimal,
}

impl Account {
    /// Fresh account with a zero balance.
    pub fn open(new: NewAccount) -> Self {
        Self {
            id: new.id,
            name: new.name,
            account_type: new.account_type,
            description: new.description,
            balance: Decimal::ZERO,
        }
    }

    pub fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }

    /// Case-insensitive name comparison used for uniqueness checks.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl Entity for Account {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewAccount {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_balance_sides() {
        assert_eq!(AccountType::Assets.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liabilities.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Income.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn parses_type_names_case_insensitively() {
        assert_eq!("assets".parse::<AccountType>().unwrap(), AccountType::Assets);
        assert_eq!(" Liability ".parse::<AccountType>().unwrap(), AccountType::Liabilities);
        assert_eq!("INCOME".parse::<AccountType>().unwrap(), AccountType::Income);
        assert_eq!(
            "revenue".parse::<AccountType>(),
            Err(DomainError::UnknownAccountType("revenue".to_string()))
        );
        assert!("expenses".parse::<AccountType>().is_err());

        for t in ACCOUNT_TYPES {
            assert_eq!(t.as_str().parse::<AccountType>().unwrap(), t);
        }
    }

    #[test]
    fn opened_account_starts_at_zero() {
        let account = Account::open(NewAccount::new("AST-1001", "Cash", AccountType::Assets, None));
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.has_name("  cASH "));
        assert!(!account.has_name("Cash on hand"));
    }

    #[test]
    fn serializes_type_field() {
        let account = Account::open(NewAccount::new("INC-1001", "Sales", AccountType::Income, None));
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "Income");
        assert_eq!(json["id"], "INC-1001");
        assert!(json.get("description").is_none());
    }
}
