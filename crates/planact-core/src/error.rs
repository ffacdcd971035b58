use thiserror::Error;

/// Erros de validação de um rascunho de formulário.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("campo obrigatório não preenchido: {0}")]
    MissingField(&'static str),

    #[error("email inválido: '{0}'")]
    InvalidEmail(String),

    #[error("duração deve ser um número não negativo (recebido {0})")]
    InvalidDuration(f64),

    #[error("prazo inválido: '{0}' (use AAAA-MM-DD)")]
    InvalidDueDate(String),

    #[error("nenhum formulário aberto")]
    FormClosed,
}

/// Valor de status/prioridade não reconhecido ao interpretar texto do usuário.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} desconhecido: '{value}' (valores aceitos: {accepted})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub accepted: &'static str,
}
