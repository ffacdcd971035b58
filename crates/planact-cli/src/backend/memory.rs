use super::store::{CollectionStore, StoreError, StoreResult};
use planact_core::{Activity, ActivityDraft, Collaborator, CollaboratorDraft, Priority, Status};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    collaborators: Vec<Collaborator>,
    activities: Vec<Activity>,
    next_id: u64,
}

impl Collections {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Armazenamento só em memória, sem API. Usado pelo modo `--demo` e pelos
/// testes. Excluir um colaborador não mexe nas atividades dele.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dados de exemplo do painel.
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        {
            let mut data = store.data();
            data.collaborators = vec![
                Collaborator {
                    id: "1".to_string(),
                    name: "Ana Silva".to_string(),
                    email: "ana.silva@empresa.com".to_string(),
                    phone: "(11) 99999-1111".to_string(),
                    role: "Desenvolvedora Frontend".to_string(),
                    department: "Tecnologia".to_string(),
                },
                Collaborator {
                    id: "2".to_string(),
                    name: "Carlos Santos".to_string(),
                    email: "carlos.santos@empresa.com".to_string(),
                    phone: "(11) 99999-2222".to_string(),
                    role: "Gerente de Projetos".to_string(),
                    department: "Gestão".to_string(),
                },
            ];
            data.activities = vec![
                Activity {
                    id: "1".to_string(),
                    title: "Desenvolver interface de login".to_string(),
                    description: "Criar tela de login responsiva com validação".to_string(),
                    collaborator_id: "1".to_string(),
                    status: Status::InProgress,
                    priority: Priority::High,
                    duration: 8.0,
                    due_date: "2024-12-25".to_string(),
                },
                Activity {
                    id: "2".to_string(),
                    title: "Reunião de planejamento".to_string(),
                    description: "Definir escopo do próximo sprint".to_string(),
                    collaborator_id: "2".to_string(),
                    status: Status::Completed,
                    priority: Priority::Medium,
                    duration: 2.0,
                    due_date: "2024-12-20".to_string(),
                },
            ];
            data.next_id = 2;
        }
        store
    }

    fn data(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CollectionStore for InMemoryStore {
    fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>> {
        Ok(self.data().collaborators.clone())
    }

    fn create_collaborator(&self, draft: &CollaboratorDraft) -> StoreResult<Collaborator> {
        let mut data = self.data();
        let record = draft.clone().into_record(data.allocate_id());
        data.collaborators.push(record.clone());
        Ok(record)
    }

    fn update_collaborator(
        &self,
        id: &str,
        draft: &CollaboratorDraft,
    ) -> StoreResult<Collaborator> {
        let mut data = self.data();
        let slot = data
            .collaborators
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = draft.clone().into_record(id.to_string());
        Ok(slot.clone())
    }

    fn delete_collaborator(&self, id: &str) -> StoreResult<()> {
        let mut data = self.data();
        let before = data.collaborators.len();
        data.collaborators.retain(|c| c.id != id);
        if data.collaborators.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn list_activities(&self) -> StoreResult<Vec<Activity>> {
        Ok(self.data().activities.clone())
    }

    fn create_activity(&self, draft: &ActivityDraft) -> StoreResult<Activity> {
        let mut data = self.data();
        let record = draft.clone().into_record(data.allocate_id());
        data.activities.push(record.clone());
        Ok(record)
    }

    fn update_activity(&self, id: &str, draft: &ActivityDraft) -> StoreResult<Activity> {
        let mut data = self.data();
        let slot = data
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = draft.clone().into_record(id.to_string());
        Ok(slot.clone())
    }

    fn delete_activity(&self, id: &str) -> StoreResult<()> {
        let mut data = self.data();
        let before = data.activities.len();
        data.activities.retain(|a| a.id != id);
        if data.activities.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CollaboratorDraft {
        CollaboratorDraft {
            name: name.to_string(),
            email: format!("{}@empresa.com", name.to_lowercase()),
            role: "Analista".to_string(),
            department: "Tecnologia".to_string(),
            ..CollaboratorDraft::default()
        }
    }

    #[test]
    fn test_create_assigns_ids() {
        let store = InMemoryStore::new();
        let a = store.create_collaborator(&draft("Ana")).unwrap();
        let b = store.create_collaborator(&draft("Bia")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_collaborators().unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_missing_record() {
        let store = InMemoryStore::new();
        let created = store.create_collaborator(&draft("Ana")).unwrap();

        let updated = store
            .update_collaborator(&created.id, &draft("Ana Maria"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ana Maria");

        let err = store.update_collaborator("nope", &draft("X")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(matches!(
            store.delete_activity("nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_collaborator_keeps_activities() {
        let store = InMemoryStore::with_sample_data();
        store.delete_collaborator("1").unwrap();

        assert_eq!(store.list_collaborators().unwrap().len(), 1);
        let activities = store.list_activities().unwrap();
        assert_eq!(activities.len(), 2);
        assert!(activities.iter().any(|a| a.collaborator_id == "1"));
    }

    #[test]
    fn test_sample_ids_do_not_collide() {
        let store = InMemoryStore::with_sample_data();
        let created = store.create_collaborator(&draft("Bia")).unwrap();
        assert_eq!(created.id, "3");
    }
}
