//! Settlement system wire contract.
//!
//! Field names are the settlement backend's own (Portuguese, camelCase);
//! do not rename them. A batch carries one or more entries; this API only
//! ever submits single-entry batches.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ted::Ted;

/// Fixed values stamped on every outgoing entry.
pub mod defaults {
    /// Entry description shown in the settlement ledger.
    pub const ENTRY_DESCRIPTION: &str = "TED";
    /// Settlement group for wire transfers.
    pub const SETTLEMENT_GROUP: i32 = 17;
    /// Origin (house) bank code.
    pub const ORIGIN_BANK: &str = "467";
    /// Origin branch code.
    pub const ORIGIN_AGENCY: &str = "0001";
    /// Origin account number.
    pub const ORIGIN_ACCOUNT: i32 = 10001;
    /// Checking-account type indicator.
    pub const ACCOUNT_TYPE: &str = "CC";
    /// Situation indicator for submitted entries.
    pub const SITUATION: &str = "E";
    /// Code identifying this system to the settlement backend.
    pub const EXTERNAL_SYSTEM: &str = "SPBX";
}

/// Company/system identification headers sent with every submission.
pub const COMPANY_ID_HEADER: (&str, &str) = ("COMPANY_ID", "83");
pub const ORIGIN_SYSTEM_HEADER: (&str, &str) = ("SISTEMA_ORIGEM", "CCOLE");

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction batch for `POST /tesouraria/api/v2/LancamentosTES`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementBatch {
    #[serde(rename = "listaLancamentos")]
    pub entries: Vec<SettlementEntry>,
}

impl SettlementBatch {
    /// The single-entry batch this API always submits.
    pub fn single(entry: SettlementEntry) -> Self {
        SettlementBatch {
            entries: vec![entry],
        }
    }

    /// Structural validation, run before any network activity (stub mode
    /// included). Collects every violation across all entries.
    pub fn validate(&self, today: NaiveDate) -> Vec<String> {
        let mut errors = Vec::new();
        for entry in &self.entries {
            entry.validate(today, &mut errors);
        }
        errors
    }
}

/// One debit entry against a client account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementEntry {
    pub id_lcto: i64,
    /// Movement (execution) date, `YYYY-MM-DD`.
    pub data_movimento: String,
    /// Reference (request) date, `YYYY-MM-DD`; must not be in the future.
    pub data_referencia: String,
    pub codigo_cliente: i32,
    /// Always negative: a transfer debits the client.
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_lcto: Decimal,
    pub descricao_lcto: String,
    pub codigo_grupo_liquidacao: i32,
    pub codigo_banco: String,
    pub codigo_agencia: String,
    pub numero_conta: i32,
    pub codigo_banco_cliente: String,
    pub codigo_agencia_cliente: String,
    pub digito_agencia_cliente: String,
    pub numero_conta_cliente: String,
    pub digito_conta_cliente: String,
    pub tipo_conta_cliente: String,
    pub indicador_situacao: String,
    pub codigo_sistema_externo: String,
}

impl SettlementEntry {
    /// Build a debit entry for a TED record: house-side defaults plus the
    /// record's client routing, with the value negated.
    pub fn debit(entry_id: i64, ted: &Ted) -> Self {
        let value = if ted.requested_value > Decimal::ZERO {
            -ted.requested_value
        } else {
            ted.requested_value
        };

        SettlementEntry {
            id_lcto: entry_id,
            data_movimento: ted.scheduling_date.format(DATE_FORMAT).to_string(),
            data_referencia: ted.created_at.format(DATE_FORMAT).to_string(),
            codigo_cliente: ted.client_id,
            valor_lcto: value,
            descricao_lcto: defaults::ENTRY_DESCRIPTION.to_string(),
            codigo_grupo_liquidacao: defaults::SETTLEMENT_GROUP,
            codigo_banco: defaults::ORIGIN_BANK.to_string(),
            codigo_agencia: defaults::ORIGIN_AGENCY.to_string(),
            numero_conta: defaults::ORIGIN_ACCOUNT,
            codigo_banco_cliente: ted.bank_number.clone(),
            codigo_agencia_cliente: ted.agency_number.clone(),
            digito_agencia_cliente: String::new(),
            numero_conta_cliente: ted.account_number.clone(),
            digito_conta_cliente: ted.account_digit.clone(),
            tipo_conta_cliente: defaults::ACCOUNT_TYPE.to_string(),
            indicador_situacao: defaults::SITUATION.to_string(),
            codigo_sistema_externo: defaults::EXTERNAL_SYSTEM.to_string(),
        }
    }

    fn validate(&self, today: NaiveDate, errors: &mut Vec<String>) {
        match NaiveDate::parse_from_str(&self.data_referencia, DATE_FORMAT) {
            Ok(reference) => {
                if reference > today {
                    errors.push("The reference date cannot be in the future".to_string());
                }
            }
            Err(_) => errors.push("The reference date is not valid".to_string()),
        }

        if self.codigo_cliente <= 0 {
            errors.push("The client code must be greater than zero".to_string());
        }
        if self.valor_lcto >= Decimal::ZERO {
            errors.push("The entry value must be less than zero".to_string());
        }
        if self.codigo_banco.is_empty() {
            errors.push("The bank code is required".to_string());
        }
        if self.codigo_agencia.is_empty() {
            errors.push("The agency code is required".to_string());
        }
        if self.numero_conta <= 0 {
            errors.push("The account number must be greater than zero".to_string());
        }
        if self.codigo_banco_cliente.is_empty() {
            errors.push("The client bank code is required".to_string());
        }
        if self.codigo_agencia_cliente.is_empty() {
            errors.push("The client agency code is required".to_string());
        }
        if self.numero_conta_cliente.is_empty() {
            errors.push("The client account number is required".to_string());
        }
        if self.digito_conta_cliente.is_empty() {
            errors.push("The client account digit is required".to_string());
        }
        if self.tipo_conta_cliente.is_empty() {
            errors.push("The client account type is required".to_string());
        }
        if self.indicador_situacao.is_empty() {
            errors.push("The situation indicator is required".to_string());
        }
        if self.codigo_sistema_externo.is_empty() {
            errors.push("The external system code is required".to_string());
        }
    }
}

/// Bearer token from the client-credentials exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Submission outcome. On rejection the backend reports per-entry
/// inconsistencies when it got far enough to inspect entries, otherwise
/// request-level ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettlementResponse {
    pub sucesso: bool,
    pub protocolo: i64,
    pub inconsistencias_request: Vec<RequestInconsistency>,
    pub inconsistencias_lancamentos: Vec<EntryInconsistency>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestInconsistency {
    pub descricao: String,
    pub codigo: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntryInconsistency {
    pub descricao: String,
    #[serde(rename = "idErro")]
    pub erro_id: i32,
    pub codigo: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ted::model::now_local;
    use crate::ted::{SubmitTedRequest, today};

    fn sample_ted() -> Ted {
        let req = SubmitTedRequest {
            client_id: 42,
            client_name: "Maria Souza".to_string(),
            scheduling_date: today().and_hms_opt(10, 30, 0).unwrap(),
            requested_value: "1500".parse().unwrap(),
            agency_number: "1234".to_string(),
            account_number: "56789".to_string(),
            account_digit: "0".to_string(),
            bank_number: "341".to_string(),
            bank_name: "Itau".to_string(),
        };
        Ted::draft(req, now_local())
    }

    #[test]
    fn test_debit_entry_defaults_and_sign() {
        let entry = SettlementEntry::debit(7, &sample_ted());

        assert_eq!(entry.id_lcto, 7);
        assert_eq!(entry.valor_lcto, "-1500".parse().unwrap());
        assert_eq!(entry.descricao_lcto, "TED");
        assert_eq!(entry.codigo_grupo_liquidacao, 17);
        assert_eq!(entry.codigo_banco, "467");
        assert_eq!(entry.codigo_agencia, "0001");
        assert_eq!(entry.numero_conta, 10001);
        assert_eq!(entry.codigo_banco_cliente, "341");
        assert_eq!(entry.codigo_agencia_cliente, "1234");
        assert_eq!(entry.numero_conta_cliente, "56789");
        assert_eq!(entry.digito_conta_cliente, "0");
        assert_eq!(entry.tipo_conta_cliente, "CC");
        assert_eq!(entry.indicador_situacao, "E");
        assert_eq!(entry.codigo_sistema_externo, "SPBX");
        assert_eq!(entry.data_movimento, today().format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_wire_field_names() {
        let batch = SettlementBatch::single(SettlementEntry::debit(1, &sample_ted()));
        let value = serde_json::to_value(&batch).unwrap();

        let entries = value.get("listaLancamentos").unwrap().as_array().unwrap();
        let entry = &entries[0];
        for key in [
            "idLcto",
            "dataMovimento",
            "dataReferencia",
            "codigoCliente",
            "valorLcto",
            "descricaoLcto",
            "codigoGrupoLiquidacao",
            "codigoBanco",
            "codigoAgencia",
            "numeroConta",
            "codigoBancoCliente",
            "codigoAgenciaCliente",
            "digitoAgenciaCliente",
            "numeroContaCliente",
            "digitoContaCliente",
            "tipoContaCliente",
            "indicadorSituacao",
            "codigoSistemaExterno",
        ] {
            assert!(entry.get(key).is_some(), "missing wire field {}", key);
        }
        assert!(entry.get("valorLcto").unwrap().is_number());
    }

    #[test]
    fn test_valid_batch_passes() {
        let batch = SettlementBatch::single(SettlementEntry::debit(1, &sample_ted()));
        assert!(batch.validate(today()).is_empty());
    }

    #[test]
    fn test_validation_rejects_positive_value() {
        let mut entry = SettlementEntry::debit(1, &sample_ted());
        entry.valor_lcto = "10".parse().unwrap();
        let errors = SettlementBatch::single(entry).validate(today());
        assert!(errors.iter().any(|e| e.contains("less than zero")));
    }

    #[test]
    fn test_validation_rejects_future_reference_date() {
        let mut entry = SettlementEntry::debit(1, &sample_ted());
        entry.data_referencia = (today() + chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let errors = SettlementBatch::single(entry).validate(today());
        assert!(errors.iter().any(|e| e.contains("future")));
    }

    #[test]
    fn test_validation_rejects_garbled_reference_date() {
        let mut entry = SettlementEntry::debit(1, &sample_ted());
        entry.data_referencia = "07/08/2026".to_string();
        let errors = SettlementBatch::single(entry).validate(today());
        assert!(errors.iter().any(|e| e.contains("not valid")));
    }

    #[test]
    fn test_validation_requires_routing_fields() {
        let mut entry = SettlementEntry::debit(1, &sample_ted());
        entry.codigo_banco_cliente = String::new();
        entry.digito_conta_cliente = String::new();
        let errors = SettlementBatch::single(entry).validate(today());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_response_parses_inconsistencies() {
        let json = r#"{
            "sucesso": false,
            "protocolo": 0,
            "inconsistenciasRequest": [{"descricao": "Lote invalido.", "codigo": 10}],
            "inconsistenciasLancamentos": [
                {"descricao": "Conta inexistente.", "idErro": 4, "codigo": 104}
            ]
        }"#;
        let resp: SettlementResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.sucesso);
        assert_eq!(resp.inconsistencias_request.len(), 1);
        assert_eq!(resp.inconsistencias_lancamentos[0].erro_id, 4);
    }

    #[test]
    fn test_response_tolerates_missing_lists() {
        let resp: SettlementResponse =
            serde_json::from_str(r#"{"sucesso": true, "protocolo": 987654}"#).unwrap();
        assert!(resp.sucesso);
        assert_eq!(resp.protocolo, 987654);
        assert!(resp.inconsistencias_request.is_empty());
    }
}
