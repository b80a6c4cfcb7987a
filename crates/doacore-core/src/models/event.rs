use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::validation::{lenient, require_fields};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Event {
    pub id_evento: i32,
    pub nome_evento: String,
    pub descricao: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub local: Option<String>,
    pub id_organizador: i32,
}

/// Event joined with its organizer's full name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EventListing {
    pub id_evento: i32,
    pub nome_evento: String,
    pub descricao: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub local: Option<String>,
    pub organizador: String,
}

/// Request DTO for creating an event. `id_organizador` defaults to the caller.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateEventRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 150, message = "O nome do evento deve ter no máximo 150 caracteres"))]
    pub nome_evento: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub data_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub data_fim: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub local: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_organizador: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub nome_evento: String,
    pub descricao: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub local: Option<String>,
    pub id_organizador: i32,
}

impl CreateEventRequest {
    /// Check required fields and date order, filling the organizer if absent.
    pub fn into_new_event(self, default_organizer: i32) -> Result<NewEvent, AppError> {
        require_fields(&[
            ("nome_evento", self.nome_evento.is_some()),
            ("data_inicio", self.data_inicio.is_some()),
        ])?;

        let (Some(nome_evento), Some(data_inicio)) = (self.nome_evento, self.data_inicio) else {
            return Err(AppError::Internal("required field check out of sync".to_string()));
        };

        if let Some(data_fim) = self.data_fim {
            if data_fim < data_inicio {
                return Err(AppError::InvalidInput(
                    "A data de término não pode ser anterior à data de início".to_string(),
                ));
            }
        }

        Ok(NewEvent {
            nome_evento,
            descricao: self.descricao,
            data_inicio,
            data_fim: self.data_fim,
            local: self.local,
            id_organizador: self.id_organizador.unwrap_or(default_organizer),
        })
    }
}
