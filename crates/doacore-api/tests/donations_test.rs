#[path = "helpers/mod.rs"]
mod helpers;

use doacore_core::Role;
use helpers::auth::{create_named_user, create_test_user, TestUser};
use helpers::fixtures::{count_rows, create_test_event, create_test_team};
use helpers::{setup_test_app, TestApp};
use serde_json::{json, Value};

struct Scenario {
    donor: TestUser,
    organizer: TestUser,
    event_id: i32,
    team_id: i32,
}

async fn scenario(app: &TestApp) -> Scenario {
    let organizer = create_test_user(&app.state, "org@example.com", Role::Organizer).await;
    let donor =
        create_named_user(&app.state, "Carla", "Lima", "carla@example.com", Role::Member).await;
    let event_id = create_test_event(&app.state, "Campanha do Agasalho", organizer.id).await;
    let team_id = create_test_team(&app.state, "Arrecadação", organizer.id).await;

    Scenario {
        donor,
        organizer,
        event_id,
        team_id,
    }
}

#[tokio::test]
async fn test_food_donation_stores_parent_and_items() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let response = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id,
            "id_equipe": s.team_id,
            "tipo_doacao": "alimento",
            "itens": [{ "nome_item": "Arroz", "quantidade": 5, "unidade": "kg" }]
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    let id = body["id_doacao"].as_i64().expect("id_doacao in response");
    assert_eq!(body["doacao"]["tipo_doacao"], "alimento");
    assert!(body["doacao"]["valor"].is_null());

    let items = app
        .client()
        .get(&format!("/api/doacoes/{}/itens", id))
        .add_header("Authorization", s.donor.bearer())
        .await;

    assert_eq!(items.status_code(), 200);
    let items = items.json::<Value>();
    let items = items.as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["nome_item"], "Arroz");
    assert_eq!(items[0]["quantidade"], 5);
    assert_eq!(items[0]["unidade"], "kg");
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let response = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id.to_string(),
            "id_evento": s.event_id.to_string(),
            "id_equipe": s.team_id.to_string(),
            "tipo_doacao": "dinheiro",
            "valor": "50.5"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["doacao"]["valor"], 50.5);
    assert_eq!(count_rows(app.pool(), "itens_doacao").await, 0);
}

#[tokio::test]
async fn test_monetary_donation_without_amount_writes_nothing() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let response = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id,
            "id_equipe": s.team_id,
            "tipo_doacao": "dinheiro"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "Campos obrigatórios ausentes: valor"
    );
    assert_eq!(count_rows(app.pool(), "doacoes").await, 0);
}

#[tokio::test]
async fn test_unknown_kind_is_rejected() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let response = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id,
            "id_equipe": s.team_id,
            "tipo_doacao": "roupa",
            "itens": [{ "nome_item": "Casaco", "quantidade": 1 }]
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "Tipo de doação inválido: roupa"
    );
    assert_eq!(count_rows(app.pool(), "doacoes").await, 0);
}

#[tokio::test]
async fn test_unknown_event_rolls_back_everything() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let response = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id + 1000,
            "id_equipe": s.team_id,
            "tipo_doacao": "alimento",
            "itens": [
                { "nome_item": "Feijão", "quantidade": 2, "unidade": "kg" },
                { "nome_item": "Óleo", "quantidade": 1, "unidade": "l" }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(count_rows(app.pool(), "doacoes").await, 0);
    assert_eq!(count_rows(app.pool(), "itens_doacao").await, 0);
}

#[tokio::test]
async fn test_summary_and_listing() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    for body in [
        json!({ "tipo_doacao": "dinheiro", "valor": 100 }),
        json!({ "tipo_doacao": "dinheiro", "valor": 25.5 }),
        json!({ "tipo_doacao": "alimento", "itens": [
            { "nome_item": "Leite", "quantidade": 12, "unidade": "l" },
            { "nome_item": "Macarrão", "quantidade": 4 }
        ]}),
    ] {
        let mut body = body;
        body["id_usuario"] = json!(s.donor.id);
        body["id_evento"] = json!(s.event_id);
        body["id_equipe"] = json!(s.team_id);

        let response = app
            .client()
            .post("/api/doacoes")
            .add_header("Authorization", s.donor.bearer())
            .json(&body)
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let summary = app
        .client()
        .get("/api/doacoes/resumo")
        .add_header("Authorization", s.donor.bearer())
        .await
        .json::<Value>();
    assert_eq!(summary["total_doacoes"], 3);
    assert_eq!(summary["total_valor"].as_f64(), Some(125.5));

    let listing = app
        .client()
        .get("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .await
        .json::<Value>();
    let listing = listing.as_array().expect("donation array");
    assert_eq!(listing.len(), 3);
    assert_eq!(listing[0]["usuario"], "Carla Lima");
    assert_eq!(listing[0]["nome_evento"], "Campanha do Agasalho");

    assert_eq!(count_rows(app.pool(), "itens_doacao").await, 2);
}

#[tokio::test]
async fn test_only_event_managers_delete_donations() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let created = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id,
            "id_equipe": s.team_id,
            "tipo_doacao": "alimento",
            "itens": [{ "nome_item": "Arroz", "quantidade": 5, "unidade": "kg" }]
        }))
        .await
        .json::<Value>();
    let id = created["id_doacao"].as_i64().expect("id_doacao in response");

    let denied = app
        .client()
        .delete(&format!("/api/doacoes/{}", id))
        .add_header("Authorization", s.donor.bearer())
        .await;
    assert_eq!(denied.status_code(), 403);

    let deleted = app
        .client()
        .delete(&format!("/api/doacoes/{}", id))
        .add_header("Authorization", s.organizer.bearer())
        .await;
    assert_eq!(deleted.status_code(), 200);
    assert_eq!(count_rows(app.pool(), "itens_doacao").await, 0);

    let missing = app
        .client()
        .get(&format!("/api/doacoes/{}", id))
        .add_header("Authorization", s.organizer.bearer())
        .await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn test_every_item_references_the_same_donation() {
    let app = setup_test_app().await;
    let s = scenario(&app).await;

    let created = app
        .client()
        .post("/api/doacoes")
        .add_header("Authorization", s.donor.bearer())
        .json(&json!({
            "id_usuario": s.donor.id,
            "id_evento": s.event_id,
            "id_equipe": s.team_id,
            "tipo_doacao": "alimento",
            "itens": [
                { "nome_item": "Arroz", "quantidade": 5, "unidade": "kg" },
                { "nome_item": "Feijão", "quantidade": 3, "unidade": "kg" },
                { "nome_item": "Sabonete", "quantidade": 10 }
            ]
        }))
        .await
        .json::<Value>();
    let id = created["id_doacao"].as_i64().expect("id_doacao in response");

    let detail = app
        .client()
        .get(&format!("/api/doacoes/{}", id))
        .add_header("Authorization", s.donor.bearer())
        .await
        .json::<Value>();

    assert!(detail["valor"].is_null());
    let itens = detail["itens"].as_array().expect("itens array");
    assert_eq!(itens.len(), 3);
    assert!(itens.iter().all(|item| item["id_doacao"] == id));
    assert_eq!(itens[2]["unidade"], "un");
    assert_eq!(count_rows(app.pool(), "itens_doacao").await, 3);
}
