//! Rascunhos e máquina de estados dos formulários de cadastro/edição.
//!
//! Cada tipo de entidade tem seu próprio `FormState`: fechado, criando ou
//! editando um registro. O estado é um valor serializável comum; quem fala
//! com a API (o controlador do CLI) só consulta `submission()` e chama
//! `finish()` depois que o servidor confirmou a escrita.

use crate::dates::parse_due_date;
use crate::error::DraftError;
use crate::model::{Activity, Collaborator, Priority, Status};
use serde::{Deserialize, Serialize};

/// Contrato comum aos rascunhos de formulário.
pub trait Draft: Clone + Default {
    type Record;

    fn from_record(record: &Self::Record) -> Self;
    fn record_id(record: &Self::Record) -> &str;
    fn validate(&self) -> Result<(), DraftError>;
}

/// Campos editáveis de um colaborador (corpo do POST/PUT).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorDraft {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "departamento")]
    pub department: String,
}

impl CollaboratorDraft {
    /// Monta o registro completo com o identificador dado pelo armazenamento.
    pub fn into_record(self, id: String) -> Collaborator {
        Collaborator {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            department: self.department,
        }
    }
}

impl Draft for CollaboratorDraft {
    type Record = Collaborator;

    fn from_record(record: &Collaborator) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            role: record.role.clone(),
            department: record.department.clone(),
        }
    }

    fn record_id(record: &Collaborator) -> &str {
        &record.id
    }

    fn validate(&self) -> Result<(), DraftError> {
        require("nome", &self.name)?;
        require("email", &self.email)?;
        require("cargo", &self.role)?;
        require("departamento", &self.department)?;

        if !self.email.contains('@') {
            return Err(DraftError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// Campos editáveis de uma atividade (corpo do POST/PUT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "colaboradorId")]
    pub collaborator_id: String,
    pub status: Status,
    #[serde(rename = "prioridade")]
    pub priority: Priority,
    #[serde(rename = "duracao")]
    pub duration: f64,
    #[serde(rename = "prazo")]
    pub due_date: String,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            collaborator_id: String::new(),
            status: Status::Pending,
            priority: Priority::Medium,
            duration: 1.0,
            due_date: String::new(),
        }
    }
}

impl ActivityDraft {
    pub fn into_record(self, id: String) -> Activity {
        Activity {
            id,
            title: self.title,
            description: self.description,
            collaborator_id: self.collaborator_id,
            status: self.status,
            priority: self.priority,
            duration: self.duration,
            due_date: self.due_date,
        }
    }
}

impl Draft for ActivityDraft {
    type Record = Activity;

    fn from_record(record: &Activity) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            collaborator_id: record.collaborator_id.clone(),
            status: record.status.clone(),
            priority: record.priority.clone(),
            duration: record.duration,
            due_date: record.due_date.clone(),
        }
    }

    fn record_id(record: &Activity) -> &str {
        &record.id
    }

    fn validate(&self) -> Result<(), DraftError> {
        require("titulo", &self.title)?;
        require("colaboradorId", &self.collaborator_id)?;
        require("prazo", &self.due_date)?;

        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(DraftError::InvalidDuration(self.duration));
        }
        if parse_due_date(&self.due_date).is_none() {
            return Err(DraftError::InvalidDueDate(self.due_date.clone()));
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(())
}

/// Estado de um formulário.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormState<D> {
    Closed,
    Creating { draft: D },
    Editing { target_id: String, draft: D },
}

impl<D> Default for FormState<D> {
    fn default() -> Self {
        FormState::Closed
    }
}

/// Requisição que o formulário pede ao salvar.
#[derive(Debug, PartialEq)]
pub enum Submission<'a, D> {
    Create(&'a D),
    Update { id: &'a str, draft: &'a D },
}

impl<D: Draft> FormState<D> {
    /// Abre um cadastro novo com valores padrão.
    pub fn open_new(&mut self) {
        *self = FormState::Creating {
            draft: D::default(),
        };
    }

    /// Abre a edição com uma cópia dos campos atuais do registro.
    pub fn open_edit(&mut self, record: &D::Record) {
        *self = FormState::Editing {
            target_id: D::record_id(record).to_string(),
            draft: D::from_record(record),
        };
    }

    /// Descarta o rascunho sem nenhuma chamada de rede.
    pub fn cancel(&mut self) {
        *self = FormState::Closed;
    }

    /// Fecha o formulário depois de uma gravação confirmada.
    pub fn finish(&mut self) {
        *self = FormState::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            FormState::Editing { target_id, .. } => Some(target_id.as_str()),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            FormState::Closed => None,
            FormState::Creating { draft } | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            FormState::Closed => None,
            FormState::Creating { draft } | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Valida o rascunho e decide entre criação e atualização.
    pub fn submission(&self) -> Result<Submission<'_, D>, DraftError> {
        match self {
            FormState::Closed => Err(DraftError::FormClosed),
            FormState::Creating { draft } => {
                draft.validate()?;
                Ok(Submission::Create(draft))
            }
            FormState::Editing { target_id, draft } => {
                draft.validate()?;
                Ok(Submission::Update {
                    id: target_id,
                    draft,
                })
            }
        }
    }
}
