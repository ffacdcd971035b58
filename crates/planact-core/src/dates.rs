//! Interpretação e formatação de prazos.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Interpreta um prazo vindo da API ou do usuário.
///
/// Aceita `AAAA-MM-DD` (meia-noite UTC), `AAAA-MM-DDTHH:MM[:SS]` sem fuso
/// (tratado como UTC) e RFC 3339. Texto vazio ou inválido devolve `None`.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formata no padrão brasileiro (`dd/mm/aaaa`); `N/A` quando não há data.
pub fn format_br(raw: &str) -> String {
    parse_due_date(raw)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Data de hoje no padrão brasileiro, usada nos cabeçalhos dos relatórios.
pub fn today_br(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y").to_string()
}

/// Dias de atraso, arredondados para cima.
pub fn days_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - due).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}
