use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored credential row.
///
/// Does not derive `Serialize` on purpose: the hash must never end up in a
/// response body. Handlers answer with `UserView` instead.
#[derive(Debug, FromRow)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, returned from signup.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
}
