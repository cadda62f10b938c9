use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::errors::RepositoryError;
use crate::outbound::store::Collection;
use crate::outbound::store::PostgresDocumentStore;

/// Stored shape of an account document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct AccountDocument {
    id: String,
    username: String,
    password_hash: String,
    role: String,
}

impl From<&Account> for AccountDocument {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.to_string(),
            password_hash: account.password_hash.clone(),
            role: account.role.to_string(),
        }
    }
}

impl TryFrom<AccountDocument> for Account {
    type Error = RepositoryError;

    fn try_from(document: AccountDocument) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::from_string(document.id),
            username: Username::new(&document.username)
                .map_err(|e| RepositoryError::Corrupt(e.to_string()))?,
            password_hash: document.password_hash,
            role: document
                .role
                .parse::<Role>()
                .map_err(|e| RepositoryError::Corrupt(e.to_string()))?,
        })
    }
}

fn decode(document: Value) -> Result<Account, RepositoryError> {
    serde_json::from_value::<AccountDocument>(document)
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))?
        .try_into()
}

pub struct PostgresAccountRepository {
    store: PostgresDocumentStore,
}

impl PostgresAccountRepository {
    pub fn new(store: PostgresDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let document = serde_json::to_value(AccountDocument::from(&account))
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        self.store
            .insert(Collection::Accounts, account.id.as_str(), &document)
            .await
            .map_err(|e| match e {
                // The unique index on username is the only realistic collision.
                RepositoryError::Duplicate(_) => {
                    RepositoryError::Duplicate(account.username.to_string())
                }
                other => other,
            })?;

        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        self.store
            .find_by_field(Collection::Accounts, "username", username.as_str())
            .await?
            .map(decode)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document_shape() {
        let account = Account {
            id: AccountId::from_string("acc-1"),
            username: Username::new("alice").unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Role::Admin,
        };

        let document = serde_json::to_value(AccountDocument::from(&account)).unwrap();

        assert_eq!(
            document,
            json!({
                "id": "acc-1",
                "username": "alice",
                "passwordHash": "$argon2id$hash",
                "role": "admin"
            })
        );
        assert_eq!(decode(document).unwrap(), account);
    }

    #[test]
    fn test_decode_rejects_unknown_role() {
        let document = json!({
            "id": "acc-1",
            "username": "alice",
            "passwordHash": "$argon2id$hash",
            "role": "superuser"
        });

        assert!(matches!(decode(document), Err(RepositoryError::Corrupt(_))));
    }
}
