use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rótulo exibido quando uma atividade aponta para um colaborador inexistente.
pub const NOT_FOUND_LABEL: &str = "N/A";

/// Status de uma atividade.
///
/// Valores desconhecidos vindos da API são preservados em `Other` em vez de
/// falhar a desserialização.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    Canceled,
    Other(String),
}

impl Status {
    /// Os quatro status conhecidos, na ordem de exibição.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Canceled,
    ];

    /// Valor usado no JSON da API.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "pendente",
            Status::InProgress => "em-andamento",
            Status::Completed => "concluida",
            Status::Canceled => "cancelada",
            Status::Other(raw) => raw,
        }
    }

    /// `concluida` e `cancelada` são terminais: nunca contam como atraso.
    pub fn is_done(&self) -> bool {
        matches!(self, Status::Completed | Status::Canceled)
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pendente" => Status::Pending,
            "em-andamento" => Status::InProgress,
            "concluida" => Status::Completed,
            "cancelada" => Status::Canceled,
            _ => Status::Other(raw),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Status::from(s.trim().to_lowercase()) {
            Status::Other(value) => Err(ParseEnumError {
                kind: "status",
                value,
                accepted: "pendente, em-andamento, concluida, cancelada",
            }),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prioridade de uma atividade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "baixa",
            Priority::Medium => "media",
            Priority::High => "alta",
            Priority::Other(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "baixa" => Priority::Low,
            "media" => Priority::Medium,
            "alta" => Priority::High,
            _ => Priority::Other(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Priority::from(s.trim().to_lowercase()) {
            Priority::Other(value) => Err(ParseEnumError {
                kind: "prioridade",
                value,
                accepted: "baixa, media, alta",
            }),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colaborador, como devolvido por `GET /colaboradores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Identificador opaco atribuído pelo servidor
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "nome", default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "telefone", default)]
    pub phone: String,

    #[serde(rename = "cargo", default)]
    pub role: String,

    #[serde(rename = "departamento", default)]
    pub department: String,
}

/// Atividade, como devolvida por `GET /atividades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "titulo", default)]
    pub title: String,

    #[serde(rename = "descricao", default)]
    pub description: String,

    /// Referência ao colaborador; não há garantia de que ele ainda exista
    #[serde(rename = "colaboradorId", default)]
    pub collaborator_id: String,

    #[serde(default)]
    pub status: Status,

    #[serde(rename = "prioridade", default)]
    pub priority: Priority,

    /// Duração em horas
    #[serde(rename = "duracao", default)]
    pub duration: f64,

    /// Prazo, normalmente `AAAA-MM-DD`
    #[serde(rename = "prazo", default)]
    pub due_date: String,
}

/// Nome do colaborador referenciado, ou `N/A` se a referência estiver pendurada.
pub fn collaborator_name<'a>(collaborators: &'a [Collaborator], id: &str) -> &'a str {
    collaborators
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(NOT_FOUND_LABEL)
}
