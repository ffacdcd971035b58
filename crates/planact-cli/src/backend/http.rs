//! Cliente REST da API de colaboradores e atividades.

use super::store::{CollectionStore, Resource, StoreError, StoreResult};
use anyhow::{Context, Result};
use planact_core::{Activity, ActivityDraft, Collaborator, CollaboratorDraft};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Armazenamento remoto acessado via HTTP. Cada chamada é uma única
/// tentativa; qualquer status fora de 2xx é falha e o corpo do erro não é
/// interpretado.
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Falha ao criar cliente HTTP")?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    /// URL de um registro. O id entra como um único segmento codificado,
    /// então `/` e `..` dentro dele não mudam o caminho.
    fn item_url(&self, resource: Resource, id: &str) -> StoreResult<Url> {
        let collection = self.collection_url(resource);
        let mut url = Url::parse(&collection)
            .map_err(|e| StoreError::Transport(format!("URL inválida {collection}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Transport(format!("URL sem caminho: {collection}")))?
            .push(id);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = request
            .send()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        response
            .json::<T>()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn fetch_all<T: DeserializeOwned>(&self, resource: Resource) -> StoreResult<Vec<T>> {
        let url = self.collection_url(resource);
        debug!(%url, "GET");
        Self::decode(self.send(self.client.get(&url))?)
    }

    fn create<B, T>(&self, resource: Resource, body: &B) -> StoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.collection_url(resource);
        debug!(%url, "POST");
        Self::decode(self.send(self.client.post(&url).json(body))?)
    }

    fn update<B, T>(&self, resource: Resource, id: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.item_url(resource, id)?;
        debug!(%url, "PUT");
        Self::decode(self.send(self.client.put(url).json(body))?)
    }

    fn remove(&self, resource: Resource, id: &str) -> StoreResult<()> {
        let url = self.item_url(resource, id)?;
        debug!(%url, "DELETE");
        self.send(self.client.delete(url))?;
        Ok(())
    }
}

impl CollectionStore for HttpStore {
    fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>> {
        self.fetch_all(Resource::Collaborators)
    }

    fn create_collaborator(&self, draft: &CollaboratorDraft) -> StoreResult<Collaborator> {
        self.create(Resource::Collaborators, draft)
    }

    fn update_collaborator(
        &self,
        id: &str,
        draft: &CollaboratorDraft,
    ) -> StoreResult<Collaborator> {
        self.update(Resource::Collaborators, id, draft)
    }

    fn delete_collaborator(&self, id: &str) -> StoreResult<()> {
        self.remove(Resource::Collaborators, id)
    }

    fn list_activities(&self) -> StoreResult<Vec<Activity>> {
        self.fetch_all(Resource::Activities)
    }

    fn create_activity(&self, draft: &ActivityDraft) -> StoreResult<Activity> {
        self.create(Resource::Activities, draft)
    }

    fn update_activity(&self, id: &str, draft: &ActivityDraft) -> StoreResult<Activity> {
        self.update(Resource::Activities, id, draft)
    }

    fn delete_activity(&self, id: &str) -> StoreResult<()> {
        self.remove(Resource::Activities, id)
    }
}
