//! Test accounts a development network is expected to provision.

use std::fmt;

use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};

use crate::errors::NetworkCheckError;
use crate::utils;

/// Role an account plays in the conformance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Heavily pre-funded account
    Whale,
    /// Ordinary funded account
    User,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Whale => write!(f, "whale"),
            AccountRole::User => write!(f, "user"),
        }
    }
}

/// Representation of a provisioned test externally owned account (EOA).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAccount {
    /// Role label of account
    pub role: AccountRole,
    /// Account address
    pub address: Address,
}

impl fmt::Display for TestAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.role, to_checksum(&self.address, None))
    }
}

/// Expected wallet accounts of a network, in provisioning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFixture {
    pub whale: TestAccount,
    pub user: TestAccount,
}

impl AccountFixture {
    pub fn new(whale: Address, user: Address) -> Self {
        Self {
            whale: TestAccount { role: AccountRole::Whale, address: whale },
            user: TestAccount { role: AccountRole::User, address: user },
        }
    }

    /// Build fixture from hex encoded addresses, checksummed or not.
    pub fn from_hex(whale: &str, user: &str) -> Result<Self, NetworkCheckError> {
        Ok(Self::new(utils::parse_address(whale)?, utils::parse_address(user)?))
    }

    /// Accounts in the order the network must return them: whale first, then user.
    pub fn accounts(&self) -> [TestAccount; 2] {
        [self.whale, self.user]
    }

    /// Look up the account with the given role.
    pub fn account(&self, role: AccountRole) -> TestAccount {
        match role {
            AccountRole::Whale => self.whale,
            AccountRole::User => self.user,
        }
    }
}
