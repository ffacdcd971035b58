//! Controladores de cadastro/edição: ligam o `FormState` de cada entidade
//! ao armazenamento remoto.

use super::state::{AppState, DataCache};
use super::store::{CollectionStore, OperationError, StoreError, StoreResult};
use planact_core::{
    Activity, ActivityDraft, Collaborator, CollaboratorDraft, Draft, FormState, Submission,
};
use tracing::{info, warn};

/// Operações de armazenamento específicas de cada tipo de rascunho.
pub trait Entity: Draft {
    const SAVE_OPERATION: &'static str;
    const DELETE_OPERATION: &'static str;
    const EDIT_OPERATION: &'static str;

    fn find<'a>(cache: &'a DataCache, id: &str) -> Option<&'a Self::Record>;
    fn create(store: &dyn CollectionStore, draft: &Self) -> StoreResult<()>;
    fn update(store: &dyn CollectionStore, id: &str, draft: &Self) -> StoreResult<()>;
    fn delete(store: &dyn CollectionStore, id: &str) -> StoreResult<()>;

    /// Releitura depois de criar ou atualizar.
    fn refresh_after_save(state: &mut AppState) -> Result<(), OperationError>;

    /// Releitura depois de excluir.
    fn refresh_after_delete(state: &mut AppState) -> Result<(), OperationError> {
        Self::refresh_after_save(state)
    }

    /// Registros que ficaram apontando para o excluído.
    fn orphans_after_delete(_cache: &DataCache, _id: &str) -> usize {
        0
    }
}

impl Entity for CollaboratorDraft {
    const SAVE_OPERATION: &'static str = "salvar colaborador";
    const DELETE_OPERATION: &'static str = "excluir colaborador";
    const EDIT_OPERATION: &'static str = "editar colaborador";

    fn find<'a>(cache: &'a DataCache, id: &str) -> Option<&'a Collaborator> {
        cache.collaborator(id)
    }

    fn create(store: &dyn CollectionStore, draft: &Self) -> StoreResult<()> {
        store.create_collaborator(draft).map(drop)
    }

    fn update(store: &dyn CollectionStore, id: &str, draft: &Self) -> StoreResult<()> {
        store.update_collaborator(id, draft).map(drop)
    }

    fn delete(store: &dyn CollectionStore, id: &str) -> StoreResult<()> {
        store.delete_collaborator(id)
    }

    fn refresh_after_save(state: &mut AppState) -> Result<(), OperationError> {
        state.refresh_collaborators()
    }

    // A exclusão pode deixar atividades órfãs, então as duas coleções são relidas.
    fn refresh_after_delete(state: &mut AppState) -> Result<(), OperationError> {
        state.refresh_collaborators()?;
        state.refresh_activities()
    }

    fn orphans_after_delete(cache: &DataCache, id: &str) -> usize {
        cache.activities_of(id)
    }
}

impl Entity for ActivityDraft {
    const SAVE_OPERATION: &'static str = "salvar atividade";
    const DELETE_OPERATION: &'static str = "excluir atividade";
    const EDIT_OPERATION: &'static str = "editar atividade";

    fn find<'a>(cache: &'a DataCache, id: &str) -> Option<&'a Activity> {
        cache.activity(id)
    }

    fn create(store: &dyn CollectionStore, draft: &Self) -> StoreResult<()> {
        store.create_activity(draft).map(drop)
    }

    fn update(store: &dyn CollectionStore, id: &str, draft: &Self) -> StoreResult<()> {
        store.update_activity(id, draft).map(drop)
    }

    fn delete(store: &dyn CollectionStore, id: &str) -> StoreResult<()> {
        store.delete_activity(id)
    }

    fn refresh_after_save(state: &mut AppState) -> Result<(), OperationError> {
        state.refresh_activities()
    }
}

/// Resultado de um pedido de exclusão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// O usuário não confirmou; nenhuma requisição foi feita
    Declined,
    Deleted { orphaned: usize },
}

/// Controlador de formulário de uma entidade.
pub struct EditController<D> {
    form: FormState<D>,
}

pub type CollaboratorController = EditController<CollaboratorDraft>;
pub type ActivityController = EditController<ActivityDraft>;

impl<D: Entity> Default for EditController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Entity> EditController<D> {
    pub fn new() -> Self {
        Self {
            form: FormState::Closed,
        }
    }

    pub fn form(&self) -> &FormState<D> {
        &self.form
    }

    pub fn open_new(&mut self) -> &mut D {
        self.form.open_new();
        self.draft_slot()
    }

    /// Abre a edição de um registro presente no cache.
    pub fn open_edit(&mut self, state: &mut AppState, id: &str) -> Result<&mut D, OperationError> {
        match D::find(&state.cache, id) {
            Some(record) => self.form.open_edit(record),
            None => {
                return Err(state.fail(D::EDIT_OPERATION, StoreError::NotFound(id.to_string())))
            }
        }
        Ok(self.draft_slot())
    }

    fn draft_slot(&mut self) -> &mut D {
        match &mut self.form {
            FormState::Creating { draft } | FormState::Editing { draft, .. } => draft,
            FormState::Closed => unreachable!("formulário acabou de ser aberto"),
        }
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Grava o rascunho. O formulário só fecha depois que o servidor
    /// confirmou a escrita; em caso de falha o rascunho fica intacto.
    pub fn save(&mut self, state: &mut AppState) -> Result<(), OperationError> {
        let submission = match self.form.submission() {
            Ok(submission) => submission,
            Err(err) => return Err(state.fail(D::SAVE_OPERATION, err)),
        };

        match submission {
            Submission::Create(draft) => {
                state.run(D::SAVE_OPERATION, |store| D::create(store, draft))?;
                info!(operation = D::SAVE_OPERATION, "registro criado");
            }
            Submission::Update { id, draft } => {
                state.run(D::SAVE_OPERATION, |store| D::update(store, id, draft))?;
                info!(operation = D::SAVE_OPERATION, id, "registro atualizado");
            }
        }

        // Escrita confirmada: o formulário fecha mesmo se a releitura falhar,
        // senão uma nova tentativa duplicaria o registro.
        self.form.finish();
        D::refresh_after_save(state)
    }

    /// Exclui um registro; exige confirmação explícita.
    pub fn delete(
        &self,
        state: &mut AppState,
        id: &str,
        confirmed: bool,
    ) -> Result<DeleteOutcome, OperationError> {
        if !confirmed {
            return Ok(DeleteOutcome::Declined);
        }

        state.run(D::DELETE_OPERATION, |store| D::delete(store, id))?;
        info!(operation = D::DELETE_OPERATION, id, "registro excluído");
        D::refresh_after_delete(state)?;

        let orphaned = D::orphans_after_delete(&state.cache, id);
        if orphaned > 0 {
            warn!(id, orphaned, "atividades ficaram sem colaborador");
        }
        Ok(DeleteOutcome::Deleted { orphaned })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryStore;
    use planact_core::{collaborator_name, Status, NOT_FOUND_LABEL};

    fn loaded_state(store: InMemoryStore) -> AppState {
        let mut state = AppState::new(Box::new(store));
        state.load().unwrap();
        state
    }

    fn fill_collaborator(draft: &mut CollaboratorDraft, name: &str) {
        draft.name = name.to_string();
        draft.email = "pessoa@empresa.com".to_string();
        draft.role = "Analista".to_string();
        draft.department = "Tecnologia".to_string();
    }

    #[test]
    fn test_create_refreshes_cache_and_closes_form() {
        let mut state = loaded_state(InMemoryStore::new());
        let mut controller = CollaboratorController::new();

        fill_collaborator(controller.open_new(), "Ana");
        controller.save(&mut state).unwrap();

        assert!(!controller.form().is_open());
        assert_eq!(state.cache.collaborators.len(), 1);
        assert_eq!(state.cache.collaborators[0].name, "Ana");
    }

    #[test]
    fn test_edit_updates_target() {
        let mut state = loaded_state(InMemoryStore::with_sample_data());
        let mut controller = ActivityController::new();

        let draft = controller.open_edit(&mut state, "1").unwrap();
        assert_eq!(draft.title, "Desenvolver interface de login");
        draft.status = Status::Completed;
        controller.save(&mut state).unwrap();

        assert_eq!(state.cache.activity("1").unwrap().status, Status::Completed);
        assert_eq!(state.cache.activities.len(), 2);
    }

    #[test]
    fn test_edit_unknown_record_fails() {
        let mut state = loaded_state(InMemoryStore::new());
        let mut controller = CollaboratorController::new();

        let err = controller.open_edit(&mut state, "404").unwrap_err();
        assert!(err.to_string().starts_with("Falha ao editar colaborador"));
        assert!(state.status.error.is_some());
        assert!(!controller.form().is_open());
    }

    #[test]
    fn test_invalid_draft_is_not_sent() {
        let mut state = loaded_state(InMemoryStore::new());
        let mut controller = ActivityController::new();
        controller.open_new().title = "Sem responsável".to_string();

        let err = controller.save(&mut state).unwrap_err();
        assert!(err.to_string().contains("colaboradorId"));
        assert!(controller.form().is_open());
        assert!(state.cache.activities.is_empty());
    }

    #[test]
    fn test_failed_save_preserves_draft() {
        let mut state = loaded_state(InMemoryStore::with_sample_data());
        let mut controller = CollaboratorController::new();
        fill_collaborator(controller.open_edit(&mut state, "1").unwrap(), "Ana Maria");

        // o registro some no servidor antes do salvamento
        state
            .run("preparar teste", |store| store.delete_collaborator("1"))
            .unwrap();

        let err = controller.save(&mut state).unwrap_err();
        assert!(err.to_string().starts_with("Falha ao salvar colaborador"));
        assert!(controller.form().is_open());
        assert_eq!(controller.form().draft().unwrap().name, "Ana Maria");
    }

    #[test]
    fn test_cancel_makes_no_request() {
        let mut state = loaded_state(InMemoryStore::new());
        let mut controller = CollaboratorController::new();
        fill_collaborator(controller.open_new(), "Ana");
        controller.cancel();

        assert!(!controller.form().is_open());
        state.refresh_collaborators().unwrap();
        assert!(state.cache.collaborators.is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = loaded_state(InMemoryStore::with_sample_data());
        let controller = ActivityController::new();

        let outcome = controller.delete(&mut state, "1", false).unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(state.cache.activities.len(), 2);

        let outcome = controller.delete(&mut state, "1", true).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { orphaned: 0 });
        assert_eq!(state.cache.activities.len(), 1);
    }

    #[test]
    fn test_deleting_collaborator_leaves_dangling_activity() {
        let mut state = loaded_state(InMemoryStore::new());
        let mut collaborators = CollaboratorController::new();
        let mut activities = ActivityController::new();

        fill_collaborator(collaborators.open_new(), "Ana");
        collaborators.save(&mut state).unwrap();
        let ana_id = state.cache.collaborators[0].id.clone();

        let draft = activities.open_new();
        draft.title = "Revisar contrato".to_string();
        draft.collaborator_id = ana_id.clone();
        draft.due_date = "2024-12-20".to_string();
        activities.save(&mut state).unwrap();

        let outcome = collaborators.delete(&mut state, &ana_id, true).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { orphaned: 1 });

        assert_eq!(state.cache.activities.len(), 1);
        let activity = &state.cache.activities[0];
        assert_eq!(
            collaborator_name(&state.cache.collaborators, &activity.collaborator_id),
            NOT_FOUND_LABEL
        );
    }
}
