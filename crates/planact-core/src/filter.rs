use crate::model::{Activity, Priority, Status};
use serde::{Deserialize, Serialize};

/// Filtros da lista de atividades. Campos `None` sempre casam; os definidos
/// são combinados com E.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFilter {
    pub collaborator_id: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl ActivityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texto vazio equivale a "Todos".
    pub fn collaborator(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.collaborator_id = if id.trim().is_empty() { None } else { Some(id) };
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.collaborator_id.is_none() && self.status.is_none() && self.priority.is_none()
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        let collaborator_match = self
            .collaborator_id
            .as_ref()
            .map_or(true, |id| &activity.collaborator_id == id);
        let status_match = self.status.as_ref().map_or(true, |s| &activity.status == s);
        let priority_match = self
            .priority
            .as_ref()
            .map_or(true, |p| &activity.priority == p);

        collaborator_match && status_match && priority_match
    }

    /// Visão filtrada, na ordem original. Não altera a coleção.
    pub fn apply<'a>(&self, activities: &'a [Activity]) -> Vec<&'a Activity> {
        activities.iter().filter(|a| self.matches(a)).collect()
    }
}
