use crate::{
    types::{AccountSummary, Result},
    AppState,
};
use axum::{extract::State, Json};
use uuid::Uuid;

/// Demo accounts created by the seed endpoint. Plaintext secrets exist
/// only here and are hashed before they reach the store.
const SEED_ACCOUNTS: &[(&str, &str, &[&str])] = &[
    ("admin@dci.de", "admin", &["Admin"]),
    ("user1@dci.de", "pw1", &["Guest"]),
    ("user2@dci.de", "pw2", &["Reader", "Editor"]),
];

/// Seed the demo accounts
///
/// Each secret is hashed with a fresh salt before insertion. Inserts are
/// sequential without a transaction: a failure part-way leaves the earlier
/// rows in place. Calling this twice creates duplicate accounts.
#[utoipa::path(
    get,
    path = "/api/accounts/seed",
    responses(
        (status = 200, description = "Accounts created", body = Vec<AccountSummary>),
        (status = 500, description = "Store error")
    ),
    tag = "accounts"
)]
pub async fn seed_accounts(State(state): State<AppState>) -> Result<Json<Vec<AccountSummary>>> {
    let mut created = Vec::with_capacity(SEED_ACCOUNTS.len());

    for (email, password, roles) in SEED_ACCOUNTS {
        let secret_hash = state.auth_service.hash_password(password)?;
        let id = Uuid::new_v4().to_string();
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();

        state
            .store
            .create_account(&id, email, &secret_hash, &roles)
            .await?;

        // Respond with the projection only; the hash stays in the store
        created.push(AccountSummary {
            id,
            email: email.to_string(),
            roles,
        });
    }

    tracing::info!(count = created.len(), "seeded accounts");

    Ok(Json(created))
}
