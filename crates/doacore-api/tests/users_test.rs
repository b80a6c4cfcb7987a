#[path = "helpers/mod.rs"]
mod helpers;

use doacore_core::Role;
use helpers::auth::{create_test_user, login, role_id};
use helpers::setup_test_app;
use serde_json::{json, Value};

fn new_account(email: &str) -> Value {
    json!({
        "nome": "Elisa",
        "sobrenome": "Moura",
        "email": email,
        "senha": "SenhaForte123!",
        "funcao_id": role_id(Role::Member)
    })
}

#[tokio::test]
async fn test_admin_creates_account_that_can_login() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.state, "admin@example.com", Role::Administrator).await;

    let response = app
        .client()
        .post("/api/users")
        .add_header("Authorization", admin.bearer())
        .json(&new_account("elisa@example.com"))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    assert_eq!(body["email"], "elisa@example.com");
    assert_eq!(body["nome_funcao"], "Membro");
    assert!(body.get("senha").is_none());

    let (status, profile) = login(app.client(), "elisa@example.com", "SenhaForte123!").await;
    assert_eq!(status, 200);
    assert_eq!(profile["funcao"], "Membro");

    let accounts = app
        .client()
        .get("/api/users")
        .add_header("Authorization", admin.bearer())
        .await
        .json::<Value>();
    let accounts = accounts.as_array().expect("account array");
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.get("senha").is_none()));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.state, "admin@example.com", Role::Administrator).await;

    let response = app
        .client()
        .post("/api/users")
        .add_header("Authorization", admin.bearer())
        .json(&new_account("admin@example.com"))
        .await;

    assert_eq!(response.status_code(), 409);
    assert_eq!(response.json::<Value>()["message"], "Email já cadastrado");
}

#[tokio::test]
async fn test_unknown_role_and_missing_fields_are_rejected() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.state, "admin@example.com", Role::Administrator).await;

    let mut unknown_role = new_account("elisa@example.com");
    unknown_role["funcao_id"] = json!(99);
    let response = app
        .client()
        .post("/api/users")
        .add_header("Authorization", admin.bearer())
        .json(&unknown_role)
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .client()
        .post("/api/users")
        .add_header("Authorization", admin.bearer())
        .json(&json!({ "nome": "Elisa" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_update_without_secret_keeps_current_one() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.state, "admin@example.com", Role::Administrator).await;
    let member = create_test_user(&app.state, "membro@example.com", Role::Member).await;

    let response = app
        .client()
        .put(&format!("/api/users/{}", member.id))
        .add_header("Authorization", admin.bearer())
        .json(&json!({
            "nome": "Fábio",
            "sobrenome": "Teixeira",
            "email": "membro@example.com",
            "funcao_id": role_id(Role::Organizer)
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["nome"], "Fábio");
    assert_eq!(body["nome_funcao"], "Organizador");

    let (status, _) = login(app.client(), "membro@example.com", &member.password).await;
    assert_eq!(status, 200);

    let missing = app
        .client()
        .put("/api/users/9999")
        .add_header("Authorization", admin.bearer())
        .json(&json!({
            "nome": "X",
            "sobrenome": "Y",
            "email": "x@example.com",
            "funcao_id": role_id(Role::Member)
        }))
        .await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn test_delete_account() {
    let app = setup_test_app().await;
    let admin = create_test_user(&app.state, "admin@example.com", Role::Administrator).await;
    let member = create_test_user(&app.state, "membro@example.com", Role::Member).await;

    let own = app
        .client()
        .delete(&format!("/api/users/{}", admin.id))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(own.status_code(), 409);

    let deleted = app
        .client()
        .delete(&format!("/api/users/{}", member.id))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(deleted.status_code(), 200);

    let again = app
        .client()
        .delete(&format!("/api/users/{}", member.id))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn test_roles_are_listed() {
    let app = setup_test_app().await;
    let member = create_test_user(&app.state, "membro@example.com", Role::Member).await;

    let roles = app
        .client()
        .get("/api/funcoes")
        .add_header("Authorization", member.bearer())
        .await
        .json::<Value>();

    let names: Vec<&str> = roles
        .as_array()
        .expect("role array")
        .iter()
        .filter_map(|r| r["nome_funcao"].as_str())
        .collect();
    assert_eq!(names, vec!["Administrador", "Organizador", "Membro"]);
}
