//! Bridge from the generic controller seam to the HTTP client.

use std::marker::PhantomData;
use std::sync::Arc;

use backdesk_api::{Error as ApiError, ResourceKind, ShopClient};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::resource::{Resource, ResourceClient};

/// [`ResourceClient`] backed by a [`ShopClient`] and one endpoint
/// descriptor. Cloning shares the underlying HTTP client, so one
/// authenticated session can serve any number of collections.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    client: Arc<ShopClient>,
    kind: ResourceKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RemoteCollection<T> {
    pub fn new(client: Arc<ShopClient>, kind: ResourceKind) -> Self {
        Self {
            client,
            kind,
            _marker: PhantomData,
        }
    }
}

impl<T> ResourceClient<T> for RemoteCollection<T>
where
    T: Resource + DeserializeOwned,
    T::Input: Serialize,
{
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        self.client.fetch_all(&self.kind).await
    }

    async fn create(&self, input: &T::Input) -> Result<T, ApiError> {
        self.client.create(&self.kind, input).await
    }

    async fn update(&self, id: &str, input: &T::Input) -> Result<T, ApiError> {
        self.client.update(&self.kind, id, input).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&self.kind, id).await
    }
}
