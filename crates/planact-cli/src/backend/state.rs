use super::store::{CollectionStore, OperationCause, OperationError, StoreResult};
use chrono::{DateTime, Utc};
use planact_core::{Activity, ActivityFilter, Collaborator, DashboardStats};
use serde::Serialize;
use tracing::debug;

/// Cópia local das duas coleções. Só é substituída por inteiro, depois de
/// uma leitura bem-sucedida.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataCache {
    pub collaborators: Vec<Collaborator>,
    pub activities: Vec<Activity>,
}

impl DataCache {
    pub fn collaborator(&self, id: &str) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.id == id)
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activities_of(&self, collaborator_id: &str) -> usize {
        self.activities
            .iter()
            .filter(|a| a.collaborator_id == collaborator_id)
            .count()
    }
}

/// Indicadores globais de carregamento e erro.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Estado compartilhado do cliente: armazenamento + cache + indicadores.
///
/// Só os controladores e a carga inicial escrevem no cache; estatísticas,
/// filtros e exportação apenas leem.
pub struct AppState {
    store: Box<dyn CollectionStore>,
    pub cache: DataCache,
    pub status: SyncStatus,
}

impl AppState {
    pub fn new(store: Box<dyn CollectionStore>) -> Self {
        Self {
            store,
            cache: DataCache::default(),
            status: SyncStatus::default(),
        }
    }

    /// Carga inicial das duas coleções.
    pub fn load(&mut self) -> Result<(), OperationError> {
        self.refresh_collaborators()?;
        self.refresh_activities()
    }

    pub fn refresh_collaborators(&mut self) -> Result<(), OperationError> {
        let collaborators = self.run("carregar colaboradores", |store| store.list_collaborators())?;
        self.cache.collaborators = collaborators;
        Ok(())
    }

    pub fn refresh_activities(&mut self) -> Result<(), OperationError> {
        let activities = self.run("carregar atividades", |store| store.list_activities())?;
        self.cache.activities = activities;
        Ok(())
    }

    /// Executa uma chamada ao armazenamento com os indicadores globais:
    /// `loading` durante a chamada, `error` limpo no início e preenchido só
    /// em caso de falha.
    pub fn run<T>(
        &mut self,
        operation: &'static str,
        call: impl FnOnce(&dyn CollectionStore) -> StoreResult<T>,
    ) -> Result<T, OperationError> {
        self.run_observed(operation, |store, _| call(store))
    }

    /// Como `run`, mas a chamada também enxerga os indicadores em vigor.
    pub fn run_observed<T>(
        &mut self,
        operation: &'static str,
        call: impl FnOnce(&dyn CollectionStore, &SyncStatus) -> StoreResult<T>,
    ) -> Result<T, OperationError> {
        self.status.loading = true;
        self.status.error = None;

        let result = call(self.store.as_ref(), &self.status);
        self.status.loading = false;

        result.map_err(|source| self.fail(operation, source))
    }

    /// Registra uma falha no indicador de erro e devolve o relatório.
    pub fn fail(
        &mut self,
        operation: &'static str,
        cause: impl Into<OperationCause>,
    ) -> OperationError {
        let err = OperationError::new(operation, cause);
        // Quem chamou decide como exibir; aqui só fica o rastro.
        debug!("{err}");
        self.status.error = Some(err.to_string());
        err
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.cache.collaborators, &self.cache.activities, now)
    }

    pub fn filtered(&self, filter: &ActivityFilter) -> Vec<&Activity> {
        filter.apply(&self.cache.activities)
    }
}
