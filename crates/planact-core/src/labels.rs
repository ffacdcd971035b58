//! Tabelas de rótulo e estilo para status e prioridade.

use crate::model::{Priority, Status};
use serde::{Deserialize, Serialize};

/// Tom visual de um selo. Quem renderiza decide a cor concreta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Warning,
    Info,
    Success,
    Danger,
    Neutral,
}

impl Status {
    /// Rótulo em português; valores desconhecidos aparecem crus.
    pub fn label(&self) -> &str {
        match self {
            Status::Pending => "Pendente",
            Status::InProgress => "Em Andamento",
            Status::Completed => "Concluída",
            Status::Canceled => "Cancelada",
            Status::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Status::Pending => Tone::Warning,
            Status::InProgress => Tone::Info,
            Status::Completed => Tone::Success,
            Status::Canceled => Tone::Danger,
            Status::Other(_) => Tone::Neutral,
        }
    }
}

impl Priority {
    pub fn label(&self) -> &str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::High => "Alta",
            Priority::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Priority::Low => Tone::Neutral,
            Priority::Medium => Tone::Warning,
            Priority::High => Tone::Danger,
            Priority::Other(_) => Tone::Neutral,
        }
    }
}
