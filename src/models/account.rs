use serde::Serialize;

use crate::domain::AccountId;

/// Account data as seen outside the store. The password hash never leaves
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub created_at: String,
}
