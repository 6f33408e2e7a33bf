// ── Resource controller ──
//
// Owns one entity collection and keeps it consistent with the remote
// server-of-record. Mutations are confirm-then-apply: local state only
// changes after the server returns its canonical representation, so the
// collection never contains an entity the server has not confirmed and
// no rollback machinery is needed.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::notify::Notifier;
use crate::resource::{Resource, ResourceClient};

/// Which remote operation a controller currently has in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Claim on the controller's in-flight slot. The slot is released in
/// `Drop`, so it clears even when the owning operation future is
/// cancelled mid-await (caller-side timeouts, abandoned tasks).
#[derive(Debug)]
struct InFlightGuard {
    slot: Arc<Mutex<Option<Operation>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Exclusive edit state: the target's id plus its uncommitted draft.
#[derive(Debug, Clone)]
struct EditState<I> {
    id: String,
    draft: I,
}

/// Synchronization controller for one entity collection.
///
/// The collection is owned exclusively by the controller; consumers read
/// through [`items()`](Self::items) or [`filtered()`](Self::filtered) and
/// mutate only through the operations below. A `watch` revision counter
/// bumps on every collection change so reactive consumers can re-render
/// without polling.
pub struct ResourceController<T: Resource, C: ResourceClient<T>> {
    client: C,
    notifier: Arc<dyn Notifier>,
    items: Vec<T>,
    query: String,
    edit: Option<EditState<T::Input>>,
    in_flight: Arc<Mutex<Option<Operation>>>,
    revision: watch::Sender<u64>,
}

impl<T: Resource, C: ResourceClient<T>> ResourceController<T, C> {
    pub fn new(client: C, notifier: Arc<dyn Notifier>) -> Self {
        let (revision, _) = watch::channel(0u64);
        Self {
            client,
            notifier,
            items: Vec::new(),
            query: String::new(),
            edit: None,
            in_flight: Arc::new(Mutex::new(None)),
            revision,
        }
    }

    // ── Remote operations ────────────────────────────────────────────

    /// Fetch the full collection and replace local state wholesale.
    ///
    /// On failure the collection keeps its previous contents; the error
    /// is reported to the notification sink and returned. No retry.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let guard = self.begin(Operation::Load)?;
        let result = self.client.fetch_all().await;
        drop(guard);

        match result {
            Ok(items) => {
                debug!(kind = T::KIND_LABEL, count = items.len(), "collection loaded");
                self.items = items;
                self.bump();
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Create an entity from `input`.
    ///
    /// Validation runs first; blank/invalid input is rejected locally and
    /// no network call is made. On server success the returned canonical
    /// entity is appended to the collection. Create is not optimistic:
    /// a failure leaves the collection untouched.
    pub async fn create(&mut self, input: T::Input) -> Result<(), CoreError> {
        if let Err(message) = T::validate(&input) {
            return Err(self.report(CoreError::Validation { message }));
        }

        let guard = self.begin(Operation::Create)?;
        let result = self.client.create(&input).await;
        drop(guard);

        match result {
            Ok(entity) => {
                self.apply(entity);
                self.notifier
                    .success(&format!("{} created", T::KIND_LABEL));
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Mark the entity with `id` as the exclusive edit target and seed
    /// the draft from its current field values.
    ///
    /// Entering edit on a new target silently discards any previous
    /// uncommitted draft; callers wanting to warn first can inspect
    /// [`edit_target()`](Self::edit_target) before calling.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), CoreError> {
        let entity = self
            .items
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| CoreError::validation(format!("no {} with id {id}", T::KIND_LABEL)))?;
        self.edit = Some(EditState {
            id: id.to_owned(),
            draft: entity.edit_input(),
        });
        Ok(())
    }

    /// Mutable access to the pending draft, if edit mode is active.
    pub fn draft_mut(&mut self) -> Option<&mut T::Input> {
        self.edit.as_mut().map(|e| &mut e.draft)
    }

    /// The id of the current edit target, if any.
    pub fn edit_target(&self) -> Option<&str> {
        self.edit.as_ref().map(|e| e.id.as_str())
    }

    /// Abandon the current draft without contacting the server.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Commit the pending draft to the server.
    ///
    /// On success the collection member is replaced with the server's
    /// returned representation (not the locally typed draft) and edit
    /// mode is cleared. On failure edit mode stays active with the draft
    /// intact and the member is unchanged.
    pub async fn commit_edit(&mut self) -> Result<(), CoreError> {
        let Some(edit) = self.edit.clone() else {
            return Err(self.report(CoreError::validation("nothing is being edited")));
        };
        if let Err(message) = T::validate(&edit.draft) {
            return Err(self.report(CoreError::Validation { message }));
        }

        let guard = self.begin(Operation::Update)?;
        let result = self.client.update(&edit.id, &edit.draft).await;
        drop(guard);

        match result {
            Ok(entity) => {
                self.apply(entity);
                self.edit = None;
                self.notifier
                    .success(&format!("{} updated", T::KIND_LABEL));
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Delete the entity with `id`.
    ///
    /// The member is removed only after server confirmation; failure
    /// leaves the collection unchanged.
    pub async fn delete(&mut self, id: &str) -> Result<(), CoreError> {
        let guard = self.begin(Operation::Delete)?;
        let result = self.client.delete(id).await;
        drop(guard);

        match result {
            Ok(()) => {
                self.items.retain(|t| t.id() != id);
                if self.edit.as_ref().is_some_and(|e| e.id == id) {
                    self.edit = None;
                }
                self.bump();
                self.notifier
                    .success(&format!("{} deleted", T::KIND_LABEL));
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    // ── Search projection ────────────────────────────────────────────

    /// Store the search query. The collection itself is never mutated by
    /// filtering.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Members whose search text contains the query as a case-insensitive
    /// substring, in original collection order. An empty query yields the
    /// full collection.
    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(move |t| needle.is_empty() || t.search_text().to_lowercase().contains(&needle))
    }

    // ── State observation ────────────────────────────────────────────

    /// Read-only view of the full collection.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The operation currently awaiting server confirmation, if any.
    /// Callers should disable the triggering control while this is set.
    pub fn in_flight(&self) -> Option<Operation> {
        *self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to collection revisions (bumped on every mutation).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Claim the in-flight slot for `op`, rejecting the call if another
    /// operation already holds it. The returned guard releases the slot
    /// on drop, whether or not the operation ran to completion.
    fn begin(&self, op: Operation) -> Result<InFlightGuard, CoreError> {
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = *slot {
            drop(slot);
            return Err(self.report(CoreError::Busy {
                operation: current.name(),
            }));
        }
        *slot = Some(op);
        drop(slot);
        Ok(InFlightGuard {
            slot: Arc::clone(&self.in_flight),
        })
    }

    /// Reconcile one server-confirmed entity into the collection:
    /// replace the member with the same id, or append when new.
    fn apply(&mut self, entity: T) {
        match self.items.iter_mut().find(|t| t.id() == entity.id()) {
            Some(slot) => *slot = entity,
            None => self.items.push(entity),
        }
        self.bump();
    }

    fn bump(&self) {
        self.revision.send_modify(|v| *v += 1);
    }

    /// Route an error to the notification sink and hand it back.
    fn report(&self, err: CoreError) -> CoreError {
        warn!(kind = T::KIND_LABEL, error = %err, "operation failed");
        self.notifier.error(&err.to_string());
        err
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use backdesk_api::Error as ApiError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Subject, SubjectInput};
    use crate::notify::Notifier;

    // Scripted fake client: pops pre-loaded results and records calls.
    #[derive(Default)]
    struct FakeClient {
        list: Mutex<VecDeque<Result<Vec<Subject>, ApiError>>>,
        create: Mutex<VecDeque<Result<Subject, ApiError>>>,
        update: Mutex<VecDeque<Result<Subject, ApiError>>>,
        delete: Mutex<VecDeque<Result<(), ApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    fn remote_err() -> ApiError {
        ApiError::Api {
            message: "rejected by server".into(),
            status: Some(500),
        }
    }

    impl FakeClient {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_owned());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ResourceClient<Subject> for &FakeClient {
        async fn fetch_all(&self) -> Result<Vec<Subject>, ApiError> {
            self.record("list");
            self.list.lock().unwrap().pop_front().unwrap_or(Ok(vec![]))
        }

        async fn create(&self, _input: &SubjectInput) -> Result<Subject, ApiError> {
            self.record("create");
            self.create
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(remote_err()))
        }

        async fn update(&self, _id: &str, _input: &SubjectInput) -> Result<Subject, ApiError> {
            self.record("update");
            self.update
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(remote_err()))
        }

        async fn delete(&self, _id: &str) -> Result<(), ApiError> {
            self.record("delete");
            self.delete
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(remote_err()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(bool, String)>>,
    }

    impl Notifier for Recorder {
        fn success(&self, message: &str) {
            self.events.lock().unwrap().push((true, message.to_owned()));
        }
        fn error(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((false, message.to_owned()));
        }
    }

    fn subject(id: &str, name: &str) -> Subject {
        Subject {
            id: id.into(),
            name: name.into(),
        }
    }

    fn controller<'a>(
        client: &'a FakeClient,
    ) -> (ResourceController<Subject, &'a FakeClient>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let ctl = ResourceController::new(client, recorder.clone());
        (ctl, recorder)
    }

    // ── load ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn load_replaces_collection_wholesale() {
        let client = FakeClient::default();
        client.list.lock().unwrap().extend([
            Ok(vec![subject("1", "Billing")]),
            Ok(vec![subject("2", "Shipping"), subject("3", "Returns")]),
        ]);
        let (mut ctl, _) = controller(&client);

        ctl.load().await.unwrap();
        assert_eq!(ctl.items().len(), 1);

        ctl.load().await.unwrap();
        assert_eq!(ctl.items().len(), 2);
        assert_eq!(ctl.items()[0].id, "2");
    }

    #[tokio::test]
    async fn load_failure_leaves_previous_state() {
        let client = FakeClient::default();
        client.list.lock().unwrap().extend([
            Ok(vec![subject("1", "Billing")]),
            Err(remote_err()),
        ]);
        let (mut ctl, recorder) = controller(&client);

        ctl.load().await.unwrap();
        let before = ctl.items().to_vec();

        let err = ctl.load().await.unwrap_err();
        assert!(matches!(err, CoreError::Remote { .. }));
        assert_eq!(ctl.items(), &before[..]);
        assert!(recorder.events.lock().unwrap().iter().any(|(ok, _)| !ok));
    }

    #[tokio::test]
    async fn load_is_idempotent_against_unchanged_server() {
        let client = FakeClient::default();
        let snapshot = vec![subject("1", "Billing"), subject("2", "Shipping")];
        client
            .list
            .lock()
            .unwrap()
            .extend([Ok(snapshot.clone()), Ok(snapshot.clone())]);
        let (mut ctl, _) = controller(&client);

        ctl.load().await.unwrap();
        let first = ctl.items().to_vec();
        ctl.load().await.unwrap();
        assert_eq!(ctl.items(), &first[..]);
    }

    // ── create ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_appends_server_entity_exactly_once() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        client
            .create
            .lock()
            .unwrap()
            .push_back(Ok(subject("2", "Shipping")));
        let (mut ctl, recorder) = controller(&client);

        ctl.load().await.unwrap();
        ctl.create(SubjectInput {
            name: "Shipping".into(),
        })
        .await
        .unwrap();

        assert_eq!(
            ctl.items(),
            &[subject("1", "Billing"), subject("2", "Shipping")]
        );
        assert!(recorder.events.lock().unwrap().iter().any(|(ok, _)| *ok));
    }

    #[tokio::test]
    async fn blank_create_is_rejected_before_any_network_call() {
        let client = FakeClient::default();
        let (mut ctl, recorder) = controller(&client);

        let err = ctl
            .create(SubjectInput { name: "  ".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(ctl.items().is_empty());
        assert!(client.calls().is_empty(), "no network call expected");
        assert!(recorder.events.lock().unwrap().iter().any(|(ok, _)| !ok));
    }

    #[tokio::test]
    async fn create_failure_leaves_collection_unchanged() {
        let client = FakeClient::default();
        client
            .create
            .lock()
            .unwrap()
            .push_back(Err(remote_err()));
        let (mut ctl, _) = controller(&client);

        let err = ctl
            .create(SubjectInput {
                name: "Shipping".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Remote { .. }));
        assert!(ctl.items().is_empty());
    }

    // ── edit ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn begin_edit_seeds_draft_from_entity() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.begin_edit("1").unwrap();
        assert_eq!(ctl.edit_target(), Some("1"));
        assert_eq!(ctl.draft_mut().unwrap().name, "Billing");
    }

    #[tokio::test]
    async fn switching_edit_targets_discards_previous_draft() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing"), subject("2", "Shipping")]));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.begin_edit("1").unwrap();
        ctl.draft_mut().unwrap().name = "Invoicing".into();

        ctl.begin_edit("2").unwrap();
        assert_eq!(ctl.edit_target(), Some("2"));
        assert_eq!(ctl.draft_mut().unwrap().name, "Shipping");
    }

    #[tokio::test]
    async fn commit_edit_reconciles_with_server_representation() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing"), subject("2", "Shipping")]));
        // Server normalizes the typed draft ("  Invoicing ") on its side.
        client
            .update
            .lock()
            .unwrap()
            .push_back(Ok(subject("1", "Invoicing")));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.begin_edit("1").unwrap();
        ctl.draft_mut().unwrap().name = "  Invoicing ".into();
        ctl.commit_edit().await.unwrap();

        assert_eq!(
            ctl.items(),
            &[subject("1", "Invoicing"), subject("2", "Shipping")]
        );
        assert_eq!(ctl.edit_target(), None);
    }

    #[tokio::test]
    async fn commit_failure_preserves_edit_mode_and_collection() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        client
            .update
            .lock()
            .unwrap()
            .push_back(Err(remote_err()));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();
        let before = ctl.items().to_vec();

        ctl.begin_edit("1").unwrap();
        ctl.draft_mut().unwrap().name = "Invoicing".into();
        let err = ctl.commit_edit().await.unwrap_err();

        assert!(matches!(err, CoreError::Remote { .. }));
        assert_eq!(ctl.items(), &before[..]);
        assert_eq!(ctl.edit_target(), Some("1"));
        assert_eq!(ctl.draft_mut().unwrap().name, "Invoicing");
    }

    #[tokio::test]
    async fn blank_draft_commit_is_rejected_locally() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.begin_edit("1").unwrap();
        ctl.draft_mut().unwrap().name = "   ".into();
        let err = ctl.commit_edit().await.unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(ctl.edit_target(), Some("1"));
        assert_eq!(client.calls(), vec!["list"], "no update call expected");
    }

    // ── delete ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_removes_member_preserving_order() {
        let client = FakeClient::default();
        client.list.lock().unwrap().push_back(Ok(vec![
            subject("1", "Billing"),
            subject("2", "Shipping"),
            subject("3", "Returns"),
        ]));
        client.delete.lock().unwrap().push_back(Ok(()));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.delete("2").await.unwrap();

        assert_eq!(
            ctl.items(),
            &[subject("1", "Billing"), subject("3", "Returns")]
        );
    }

    #[tokio::test]
    async fn delete_failure_leaves_collection_unchanged() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        client.delete.lock().unwrap().push_back(Err(remote_err()));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();
        let before = ctl.items().to_vec();

        let err = ctl.delete("1").await.unwrap_err();

        assert!(matches!(err, CoreError::Remote { .. }));
        assert_eq!(ctl.items(), &before[..]);
    }

    // ── search ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn filter_is_case_insensitive_and_order_preserving() {
        let client = FakeClient::default();
        client.list.lock().unwrap().push_back(Ok(vec![
            subject("1", "Billing"),
            subject("2", "Shipping"),
            subject("3", "Bulk orders"),
        ]));
        let (mut ctl, _) = controller(&client);
        ctl.load().await.unwrap();

        ctl.set_query("ING");
        let hits: Vec<&str> = ctl.filtered().map(|s| s.name.as_str()).collect();
        assert_eq!(hits, vec!["Billing", "Shipping"]);

        ctl.set_query("");
        assert_eq!(ctl.filtered().count(), 3);
        // Filtering never mutates the collection.
        assert_eq!(ctl.items().len(), 3);
    }

    // ── revision counter ─────────────────────────────────────────────

    #[tokio::test]
    async fn revision_bumps_on_collection_mutations_only() {
        let client = FakeClient::default();
        client
            .list
            .lock()
            .unwrap()
            .push_back(Ok(vec![subject("1", "Billing")]));
        let (mut ctl, _) = controller(&client);
        let rx = ctl.subscribe();
        assert_eq!(*rx.borrow(), 0);

        ctl.load().await.unwrap();
        assert_eq!(*rx.borrow(), 1);

        ctl.set_query("b");
        assert_eq!(*rx.borrow(), 1, "search must not bump the revision");
    }

    // ── in-flight guard ──────────────────────────────────────────────

    // Client whose list call never resolves, standing in for a server
    // that stops answering.
    struct StalledList;

    impl ResourceClient<Subject> for StalledList {
        async fn fetch_all(&self) -> Result<Vec<Subject>, ApiError> {
            std::future::pending().await
        }

        async fn create(&self, input: &SubjectInput) -> Result<Subject, ApiError> {
            Ok(subject("9", &input.name))
        }

        async fn update(&self, _id: &str, _input: &SubjectInput) -> Result<Subject, ApiError> {
            Err(remote_err())
        }

        async fn delete(&self, _id: &str) -> Result<(), ApiError> {
            Err(remote_err())
        }
    }

    #[test]
    fn overlapping_operations_are_rejected_as_busy() {
        let client = FakeClient::default();
        let (ctl, recorder) = controller(&client);

        let claim = ctl.begin(Operation::Load).unwrap();
        let err = ctl.begin(Operation::Delete).unwrap_err();
        assert!(matches!(err, CoreError::Busy { operation: "load" }));
        assert_eq!(ctl.in_flight(), Some(Operation::Load));
        assert!(recorder.events.lock().unwrap().iter().any(|(ok, _)| !ok));

        drop(claim);
        assert_eq!(ctl.in_flight(), None);
        assert!(ctl.begin(Operation::Delete).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_operation_releases_the_in_flight_flag() {
        let mut ctl: ResourceController<Subject, StalledList> =
            ResourceController::new(StalledList, Arc::new(Recorder::default()));

        let waited = tokio::time::timeout(Duration::from_millis(50), ctl.load()).await;
        assert!(waited.is_err(), "load should still be awaiting the server");

        // Dropping the timed-out future must not wedge the controller.
        assert_eq!(ctl.in_flight(), None);
        ctl.create(SubjectInput {
            name: "Billing".into(),
        })
        .await
        .unwrap();
        assert_eq!(ctl.items().len(), 1);
    }
}
