use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Closed set of account roles.
///
/// Stored by display name in `funcoes.nome_funcao`; an account referencing a
/// role row whose name does not parse here is rejected at write time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "Organizador")]
    Organizer,
    #[serde(rename = "Membro")]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Organizer => "Organizador",
            Role::Member => "Membro",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Administrador" => Ok(Role::Administrator),
            "Organizador" => Ok(Role::Organizer),
            "Membro" => Ok(Role::Member),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

/// Row of the `funcoes` table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RoleRecord {
    pub id: i32,
    pub nome_funcao: String,
}
