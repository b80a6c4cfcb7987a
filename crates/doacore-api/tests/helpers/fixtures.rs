use chrono::NaiveDate;
use doacore_api::state::AppState;
use doacore_core::models::{DonationKind, NewDonation, NewEvent, NewLineItem, NewTeam};

/// Insert a team created by `creator`
pub async fn create_test_team(state: &AppState, name: &str, creator: i32) -> i32 {
    state
        .db
        .team_repository
        .create(&NewTeam {
            nome_equipe: name.to_string(),
            descricao: None,
            id_criador: creator,
        })
        .await
        .expect("Failed to insert test team")
        .id_equipe
}

/// Insert an event organized by `organizer`
pub async fn create_test_event(state: &AppState, name: &str, organizer: i32) -> i32 {
    state
        .db
        .event_repository
        .create(&NewEvent {
            nome_evento: name.to_string(),
            descricao: None,
            data_inicio: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            data_fim: None,
            local: Some("Ginásio".to_string()),
            id_organizador: organizer,
        })
        .await
        .expect("Failed to insert test event")
        .id_evento
}

/// Store a single-item in-kind donation
pub async fn create_test_food_donation(state: &AppState, donor: i32, event: i32, team: i32) -> i32 {
    state
        .db
        .donation_repository
        .submit(&NewDonation {
            id_usuario: donor,
            id_evento: event,
            id_equipe: team,
            kind: DonationKind::Alimento,
            valor: None,
            observacoes: None,
            itens: vec![NewLineItem {
                nome_item: "Arroz".to_string(),
                quantidade: 5,
                unidade: "kg".to_string(),
            }],
        })
        .await
        .expect("Failed to insert test donation")
        .id_doacao
}

/// Count rows of a table, for checking that rejected writes left nothing behind
pub async fn count_rows(pool: &sqlx::PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
