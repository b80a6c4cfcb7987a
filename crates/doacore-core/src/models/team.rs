use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::validation::{lenient, require_fields};

/// Label given to a new member when none is supplied
pub const DEFAULT_TEAM_FUNCTION: &str = "Membro";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Team {
    pub id_equipe: i32,
    pub nome_equipe: String,
    pub descricao: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub id_criador: i32,
}

/// Team joined with its creator's full name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TeamListing {
    pub id_equipe: i32,
    pub nome_equipe: String,
    pub descricao: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub criador: String,
}

/// Request DTO for creating a team. `id_criador` defaults to the caller.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 150, message = "O nome da equipe deve ter no máximo 150 caracteres"))]
    pub nome_equipe: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_criador: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub nome_equipe: String,
    pub descricao: Option<String>,
    pub id_criador: i32,
}

impl CreateTeamRequest {
    pub fn into_new_team(self, default_creator: i32) -> Result<NewTeam, AppError> {
        require_fields(&[("nome_equipe", self.nome_equipe.is_some())])?;

        Ok(NewTeam {
            nome_equipe: self.nome_equipe.unwrap_or_default(),
            descricao: self.descricao,
            id_criador: self.id_criador.unwrap_or(default_creator),
        })
    }
}

/// Member of a team as listed under `/equipes/{id}/membros`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TeamMember {
    pub id_usuario: i32,
    pub nome: String,
    pub sobrenome: String,
    pub email: String,
    pub funcao_na_equipe: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct AddMemberRequest {
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_usuario: Option<i32>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 50, message = "A função na equipe deve ter no máximo 50 caracteres"))]
    pub funcao_na_equipe: Option<String>,
}
