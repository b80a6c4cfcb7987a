use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::validation::lenient;

/// Unit recorded for a line item submitted without one.
pub const DEFAULT_UNIT: &str = "un";

/// Kind of donation, stored as text in `doacoes.tipo_doacao`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DonationKind {
    /// Monetary donation; carries `valor`
    Dinheiro,
    /// In-kind donation; carries line items
    Alimento,
}

impl DonationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationKind::Dinheiro => "dinheiro",
            DonationKind::Alimento => "alimento",
        }
    }
}

impl Display for DonationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dinheiro" => Ok(DonationKind::Dinheiro),
            "alimento" => Ok(DonationKind::Alimento),
            _ => Err(anyhow::anyhow!("Invalid donation kind: {}", s)),
        }
    }
}

/// Persisted donation (parent row)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Donation {
    pub id_doacao: i32,
    pub id_usuario: i32,
    pub id_evento: i32,
    pub id_equipe: i32,
    pub tipo_doacao: String,
    pub valor: Option<Decimal>,
    pub observacoes: Option<String>,
    pub data_doacao: DateTime<Utc>,
}

/// Donation joined with donor, event and team names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DonationListing {
    pub id_doacao: i32,
    pub id_usuario: i32,
    pub id_evento: i32,
    pub id_equipe: i32,
    pub tipo_doacao: String,
    pub valor: Option<Decimal>,
    pub data_doacao: DateTime<Utc>,
    pub observacoes: Option<String>,
    /// Donor full name
    pub usuario: String,
    pub nome_evento: String,
    pub nome_equipe: Option<String>,
}

/// In-kind line item owned by one donation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id_item: i32,
    pub id_doacao: i32,
    pub nome_item: String,
    pub quantidade: i32,
    pub unidade: String,
}

/// Donation with its line items
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonationDetail {
    #[serde(flatten)]
    pub doacao: DonationListing,
    pub itens: Vec<LineItem>,
}

/// Raw donation submission as posted by clients.
///
/// Every field is optional here so that omissions can be reported by name;
/// [`crate::validation::validate_donation`] turns it into a [`NewDonation`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DonationSubmission {
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_usuario: Option<i32>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_evento: Option<i32>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub id_equipe: Option<i32>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub tipo_doacao: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub valor: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub itens: Option<Vec<LineItemSubmission>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LineItemSubmission {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub nome_item: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i32")]
    pub quantidade: Option<i32>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub unidade: Option<String>,
}

/// Validated donation ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub id_usuario: i32,
    pub id_evento: i32,
    pub id_equipe: i32,
    pub kind: DonationKind,
    pub valor: Option<Decimal>,
    pub observacoes: Option<String>,
    pub itens: Vec<NewLineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub nome_item: String,
    pub quantidade: i32,
    pub unidade: String,
}

/// Count of donations of one kind
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct KindCount {
    pub tipo_doacao: String,
    pub quantidade: i64,
}

/// Read-side totals, recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DonationSummary {
    pub total_doacoes: i64,
    pub total_valor: Decimal,
    pub por_tipo: Vec<KindCount>,
}
