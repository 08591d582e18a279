//! Local account DTOs and migrator.

use hirify_core::error::Result;
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Migrator, Versioned};

/// A locally stored email/password account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uid: String,
    /// Stored lower-cased; account lookup is case-insensitive
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

/// Account schema V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AccountV1_0_0 {
    pub uid: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl IntoDomain<Account> for AccountV1_0_0 {
    fn into_domain(self) -> Account {
        Account {
            uid: self.uid,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            created_at: self.created_at,
        }
    }
}

impl FromDomain<Account> for AccountV1_0_0 {
    fn from_domain(account: Account) -> Self {
        AccountV1_0_0 {
            uid: account.uid,
            email: account.email,
            password_hash: account.password_hash,
            display_name: account.display_name,
            created_at: account.created_at,
        }
    }
}

/// Creates a migrator for local accounts.
pub fn create_account_migrator() -> Result<Migrator> {
    let mut migrator = Migrator::new();
    migrator.register(
        Migrator::define("account")
            .from::<AccountV1_0_0>()
            .into_with_save::<Account>(),
    )?;
    Ok(migrator)
}
