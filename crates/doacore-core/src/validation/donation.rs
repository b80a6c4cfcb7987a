//! Donation submission checks.
//!
//! Runs before anything is written: required fields first, then the kind,
//! then the kind-specific payload.

use rust_decimal::Decimal;

use super::require_fields;
use crate::error::AppError;
use crate::models::{
    DonationKind, DonationSubmission, LineItemSubmission, NewDonation, NewLineItem, DEFAULT_UNIT,
};

pub fn validate_donation(submission: DonationSubmission) -> Result<NewDonation, AppError> {
    require_fields(&[
        ("id_usuario", submission.id_usuario.is_some()),
        ("id_evento", submission.id_evento.is_some()),
        ("id_equipe", submission.id_equipe.is_some()),
        ("tipo_doacao", submission.tipo_doacao.is_some()),
    ])?;

    let (Some(id_usuario), Some(id_evento), Some(id_equipe), Some(tipo)) = (
        submission.id_usuario,
        submission.id_evento,
        submission.id_equipe,
        submission.tipo_doacao.as_deref(),
    ) else {
        return Err(AppError::Internal("required field check out of sync".to_string()));
    };

    let kind: DonationKind = tipo
        .parse()
        .map_err(|_| AppError::InvalidKind(tipo.to_string()))?;

    let (valor, itens) = match kind {
        DonationKind::Dinheiro => (Some(validate_amount(submission.valor)?), Vec::new()),
        DonationKind::Alimento => (None, validate_items(submission.itens)?),
    };

    Ok(NewDonation {
        id_usuario,
        id_evento,
        id_equipe,
        kind,
        valor,
        observacoes: submission.observacoes,
        itens,
    })
}

/// Largest amount `NUMERIC(12, 2)` holds
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

fn validate_amount(valor: Option<Decimal>) -> Result<Decimal, AppError> {
    let valor = valor
        .ok_or_else(|| AppError::MissingField("valor".to_string()))?
        .round_dp(2);

    if valor <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "O valor da doação deve ser maior que zero".to_string(),
        ));
    }
    if valor > MAX_AMOUNT {
        return Err(AppError::InvalidInput(
            "O valor da doação deve ser no máximo 9999999999.99".to_string(),
        ));
    }
    Ok(valor)
}

fn validate_items(itens: Option<Vec<LineItemSubmission>>) -> Result<Vec<NewLineItem>, AppError> {
    let itens = match itens {
        Some(itens) if !itens.is_empty() => itens,
        _ => return Err(AppError::MissingField("itens".to_string())),
    };

    itens
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let position = index + 1;
            require_fields(&[
                (format!("itens[{}].nome_item", position).as_str(), item.nome_item.is_some()),
                (format!("itens[{}].quantidade", position).as_str(), item.quantidade.is_some()),
            ])?;

            let quantidade = item.quantidade.unwrap_or_default();
            if quantidade <= 0 {
                return Err(AppError::InvalidInput(format!(
                    "A quantidade do item {} deve ser maior que zero",
                    position
                )));
            }

            Ok(NewLineItem {
                nome_item: item.nome_item.unwrap_or_default(),
                quantidade,
                unidade: item.unidade.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(json: &str) -> DonationSubmission {
        serde_json::from_str(json).unwrap()
    }

    fn missing_fields(err: AppError) -> String {
        match err {
            AppError::MissingField(fields) => fields,
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_in_kind_donation_keeps_every_item() {
        let donation = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento",
                "itens":[{"nome_item":"Rice","quantidade":5,"unidade":"kg"},
                         {"nome_item":"Beans","quantidade":"2"}]}"#,
        ))
        .unwrap();

        assert_eq!(donation.kind, DonationKind::Alimento);
        assert!(donation.valor.is_none());
        assert_eq!(
            donation.itens,
            vec![
                NewLineItem {
                    nome_item: "Rice".to_string(),
                    quantidade: 5,
                    unidade: "kg".to_string(),
                },
                NewLineItem {
                    nome_item: "Beans".to_string(),
                    quantidade: 2,
                    unidade: "un".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_in_kind_donation_discards_amount() {
        let donation = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento","valor":50,
                "itens":[{"nome_item":"Rice","quantidade":1}]}"#,
        ))
        .unwrap();
        assert!(donation.valor.is_none());
    }

    #[test]
    fn test_monetary_donation_requires_amount() {
        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro"}"#,
        ))
        .unwrap_err();
        assert_eq!(missing_fields(err), "valor");
    }

    #[test]
    fn test_monetary_donation_rejects_non_positive_amount() {
        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro","valor":"0"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_sub_cent_amount_rounds_to_zero_and_is_rejected() {
        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro","valor":"0.001"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("maior que zero")));
    }

    #[test]
    fn test_amount_limited_to_column_precision() {
        assert_eq!(MAX_AMOUNT.to_string(), "9999999999.99");

        let donation = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro","valor":"9999999999.99"}"#,
        ))
        .unwrap();
        assert_eq!(donation.valor, Some(MAX_AMOUNT));

        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro","valor":10000000000}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("no máximo")));
    }

    #[test]
    fn test_monetary_donation_ignores_items() {
        let donation = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"dinheiro","valor":"25,90",
                "itens":[{"nome_item":"Rice","quantidade":5}]}"#,
        ))
        .unwrap();
        assert_eq!(donation.valor, Some(Decimal::new(2590, 2)));
        assert!(donation.itens.is_empty());
    }

    #[test]
    fn test_missing_fields_reported_before_kind() {
        let err = validate_donation(submission(r#"{"id_usuario":1,"tipo_doacao":"roupa"}"#))
            .unwrap_err();
        assert_eq!(missing_fields(err), "id_evento, id_equipe");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"roupa"}"#,
        ))
        .unwrap_err();
        match err {
            AppError::InvalidKind(kind) => assert_eq!(kind, "roupa"),
            other => panic!("expected InvalidKind, got {:?}", other),
        }
    }

    #[test]
    fn test_in_kind_donation_requires_items() {
        for body in [
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento"}"#,
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento","itens":[]}"#,
        ] {
            let err = validate_donation(submission(body)).unwrap_err();
            assert_eq!(missing_fields(err), "itens");
        }
    }

    #[test]
    fn test_item_fields_checked() {
        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento",
                "itens":[{"nome_item":"Rice","quantidade":1},{"unidade":"kg"}]}"#,
        ))
        .unwrap_err();
        assert_eq!(
            missing_fields(err),
            "itens[2].nome_item, itens[2].quantidade"
        );

        let err = validate_donation(submission(
            r#"{"id_usuario":1,"id_evento":2,"id_equipe":3,"tipo_doacao":"alimento",
                "itens":[{"nome_item":"Rice","quantidade":-3}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
