use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::validation::{lenient, require_fields};

/// Account as exposed by the API. The stored secret is never selected here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i32,
    pub nome: String,
    pub sobrenome: String,
    pub email: String,
    pub funcao_id: i32,
    pub nome_funcao: String,
}

/// Account row used for credential checks
#[derive(Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AccountCredentials {
    pub id: i32,
    pub nome: String,
    pub sobrenome: String,
    pub email: String,
    /// argon2 PHC string
    pub senha: String,
    pub funcao_id: i32,
    pub nome_funcao: String,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("senha", &"<redacted>")
            .field("funcao_id", &self.funcao_id)
            .finish()
    }
}

/// Team reference included in the login profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TeamSummary {
    pub id_equipe: i32,
    pub nome_equipe: String,
    pub descricao: Option<String>,
}

/// Profile returned on successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub nome: String,
    pub sobrenome: String,
    pub email: String,
    /// Role display name
    pub funcao: String,
    pub funcao_id: i32,
    pub equipes: Vec<TeamSummary>,
}

impl UserProfile {
    pub fn new(credentials: AccountCredentials, equipes: Vec<TeamSummary>) -> Self {
        UserProfile {
            id: credentials.id,
            nome: credentials.nome,
            sobrenome: credentials.sobrenome,
            email: credentials.email,
            funcao: credentials.nome_funcao,
            funcao_id: credentials.funcao_id,
            equipes,
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

/// Request DTO for creating an account
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateAccountRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 100, message = "O nome deve ter no máximo 100 caracteres"))]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 100, message = "O sobrenome deve ter no máximo 100 caracteres"))]
    pub sobrenome: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "A senha deve ter entre 6 e 128 caracteres"))]
    pub senha: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub funcao_id: Option<i32>,
}

impl CreateAccountRequest {
    pub fn check_required(&self) -> Result<(), AppError> {
        require_fields(&[
            ("nome", self.nome.is_some()),
            ("sobrenome", self.sobrenome.is_some()),
            ("email", self.email.is_some()),
            ("senha", self.senha.as_deref().is_some_and(|s| !s.is_empty())),
            ("funcao_id", self.funcao_id.is_some()),
        ])
    }
}

/// Request DTO for updating an account. Omitting `senha` keeps the current one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateAccountRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 100, message = "O nome deve ter no máximo 100 caracteres"))]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(length(max = 100, message = "O sobrenome deve ter no máximo 100 caracteres"))]
    pub sobrenome: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    /// Blank or absent keeps the current secret
    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "A senha deve ter entre 6 e 128 caracteres"))]
    pub senha: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub funcao_id: Option<i32>,
}

impl UpdateAccountRequest {
    /// Check required fields; a blank `senha` is normalised to absent.
    pub fn check_required(&mut self) -> Result<(), AppError> {
        if self.senha.as_deref().is_some_and(str::is_empty) {
            self.senha = None;
        }

        require_fields(&[
            ("nome", self.nome.is_some()),
            ("sobrenome", self.sobrenome.is_some()),
            ("email", self.email.is_some()),
            ("funcao_id", self.funcao_id.is_some()),
        ])
    }
}

/// Account fields ready to be written; `senha_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct AccountFields {
    pub nome: String,
    pub sobrenome: String,
    pub email: String,
    pub senha_hash: Option<String>,
    pub funcao_id: i32,
}
