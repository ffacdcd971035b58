use planact_core::{Activity, ActivityDraft, Collaborator, CollaboratorDraft, DraftError};
use thiserror::Error;

/// Falhas do armazenamento remoto. Todas viram um único relatório de
/// "operação falhou" para o usuário; não há distinção entre erro
/// recuperável e fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("falha de comunicação: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("resposta inválida: {0}")]
    Decode(String),

    #[error("registro '{0}' não encontrado")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Coleção exposta pela API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Collaborators,
    Activities,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Collaborators => "colaboradores",
            Resource::Activities => "atividades",
        }
    }
}

/// Armazenamento das duas coleções (API REST ou memória).
pub trait CollectionStore: Send + Sync {
    fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>>;
    fn create_collaborator(&self, draft: &CollaboratorDraft) -> StoreResult<Collaborator>;
    fn update_collaborator(&self, id: &str, draft: &CollaboratorDraft)
        -> StoreResult<Collaborator>;
    fn delete_collaborator(&self, id: &str) -> StoreResult<()>;

    fn list_activities(&self) -> StoreResult<Vec<Activity>>;
    fn create_activity(&self, draft: &ActivityDraft) -> StoreResult<Activity>;
    fn update_activity(&self, id: &str, draft: &ActivityDraft) -> StoreResult<Activity>;
    fn delete_activity(&self, id: &str) -> StoreResult<()>;
}

/// Causa de uma operação que falhou.
#[derive(Debug, Error)]
pub enum OperationCause {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// Relatório único exibido ao usuário: nome da operação + causa.
#[derive(Debug, Error)]
#[error("Falha ao {operation}: {source}")]
pub struct OperationError {
    pub operation: &'static str,
    #[source]
    pub source: OperationCause,
}

impl OperationError {
    pub fn new(operation: &'static str, source: impl Into<OperationCause>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_message() {
        let err = OperationError::new("salvar colaborador", StoreError::Status(500));
        assert_eq!(
            err.to_string(),
            "Falha ao salvar colaborador: HTTP error! status: 500"
        );

        let err = OperationError::new("salvar atividade", DraftError::MissingField("titulo"));
        assert_eq!(
            err.to_string(),
            "Falha ao salvar atividade: campo obrigatório não preenchido: titulo"
        );
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Collaborators.path(), "colaboradores");
        assert_eq!(Resource::Activities.path(), "atividades");
    }
}
