// ── Resource trait seams ──
//
// `Resource` describes one entity kind to the generic controller;
// `ResourceClient` abstracts the remote endpoint so controllers can be
// unit-tested against scripted fakes.

use std::future::Future;

use backdesk_api::Error as ApiError;

/// One managed entity kind: a typed record with an opaque unique id.
///
/// Entities are immutable snapshots -- a mutation produces a replacement
/// from the server's canonical representation, never an in-place edit.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Partial entity submitted on create/update; lacks the id.
    type Input: Clone + Send + Sync + 'static;

    /// Lowercase singular label used in notifications ("subject").
    const KIND_LABEL: &'static str;

    /// The server-assigned identifier, unique within a collection.
    fn id(&self) -> &str;

    /// The text the search query matches against.
    fn search_text(&self) -> String;

    /// Seed an edit draft from this entity's current field values.
    fn edit_input(&self) -> Self::Input;

    /// Local validation predicate; runs before any network call.
    fn validate(input: &Self::Input) -> Result<(), String>;
}

/// Remote endpoint for one resource kind.
///
/// The real implementation is [`RemoteCollection`](crate::RemoteCollection)
/// over `backdesk_api::ShopClient`; tests substitute scripted fakes.
pub trait ResourceClient<T: Resource>: Send + Sync {
    /// Fetch the full collection.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<T>, ApiError>> + Send;

    /// Create an entity; returns the server's canonical representation
    /// including the server-assigned id.
    fn create(&self, input: &T::Input) -> impl Future<Output = Result<T, ApiError>> + Send;

    /// Update the entity identified by `id`; returns the canonical
    /// post-normalization representation.
    fn update(
        &self,
        id: &str,
        input: &T::Input,
    ) -> impl Future<Output = Result<T, ApiError>> + Send;

    /// Delete the entity identified by `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}
