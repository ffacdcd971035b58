//! Núcleo do PlanAct: modelo de colaboradores e atividades, estatísticas
//! derivadas, filtros, formulários de edição e montagem de relatórios.
//!
//! Tudo aqui é puro (sem rede, sem disco). O cliente de linha de comando
//! (`planact-cli`) fornece o armazenamento remoto e renderiza os relatórios.

pub mod dates;
pub mod error;
pub mod filter;
pub mod form;
pub mod labels;
pub mod model;
pub mod report;
pub mod stats;

pub use error::{DraftError, ParseEnumError};
pub use filter::ActivityFilter;
pub use form::{ActivityDraft, CollaboratorDraft, Draft, FormState, Submission};
pub use labels::Tone;
pub use model::{collaborator_name, Activity, Collaborator, Priority, Status, NOT_FOUND_LABEL};
pub use stats::DashboardStats;
