use axum_test::TestServer;
use doacore_api::auth::password::hash_password;
use doacore_api::state::AppState;
use doacore_core::models::AccountFields;
use doacore_core::Role;
use serde_json::{json, Value};

/// Seeded account with a ready session token
pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Role ids as seeded by the initial migration
pub fn role_id(role: Role) -> i32 {
    match role {
        Role::Administrator => 1,
        Role::Organizer => 2,
        Role::Member => 3,
    }
}

/// Insert an account directly and mint a token for it
pub async fn create_test_user(state: &AppState, email: &str, role: Role) -> TestUser {
    create_named_user(state, "Teste", "Silva", email, role).await
}

pub async fn create_named_user(
    state: &AppState,
    nome: &str,
    sobrenome: &str,
    email: &str,
    role: Role,
) -> TestUser {
    let password = "SenhaForte123!".to_string();
    let fields = AccountFields {
        nome: nome.to_string(),
        sobrenome: sobrenome.to_string(),
        email: email.to_string(),
        senha_hash: Some(hash_password(&password).expect("Failed to hash password")),
        funcao_id: role_id(role),
    };

    let account = state
        .db
        .account_repository
        .create(&fields)
        .await
        .expect("Failed to insert test account");

    let issued = state
        .auth
        .tokens
        .issue(account.id, &account.email, role)
        .expect("Failed to issue token");

    TestUser {
        id: account.id,
        email: account.email,
        password,
        role,
        token: issued.token,
    }
}

/// Login through the API and return the response body
pub async fn login(client: &TestServer, email: &str, password: &str) -> (u16, Value) {
    let response = client
        .post("/api/login")
        .json(&json!({ "email": email, "senha": password }))
        .await;

    (response.status_code().as_u16(), response.json::<Value>())
}
