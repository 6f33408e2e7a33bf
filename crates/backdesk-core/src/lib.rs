//! Synchronization and navigation core for the backdesk admin console.
//!
//! This crate owns the state machines behind every management screen:
//!
//! - **[`ResourceController`]** — keeps one in-memory entity collection
//!   consistent with the remote server-of-record. Every mutation confirms
//!   with the server before local state changes: nothing is applied
//!   optimistically, so the collection never contains an entity the server
//!   has not confirmed. Exposes an exclusive edit draft, a case-insensitive
//!   search projection, and an explicit in-flight flag.
//!
//! - **[`NavState`]** — the sidebar navigation state machine: per-group
//!   expansion, a full/compact display mode orthogonal to expansion, and
//!   exact-path active-item computation.
//!
//! - **Domain model** ([`model`]) — typed records per entity kind
//!   ([`Subject`], [`Customer`]) with explicit validation predicates.
//!
//! - **Trait seams** — [`ResourceClient`] abstracts the HTTP layer
//!   (implemented for real by [`RemoteCollection`] over
//!   `backdesk_api::ShopClient`), [`Notifier`] the toast/notification
//!   presenter. Both are injected at construction; operations never reach
//!   into ambient state for credentials or sinks.

pub mod controller;
pub mod error;
pub mod model;
pub mod nav;
pub mod notify;
pub mod remote;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{Operation, ResourceController};
pub use error::CoreError;
pub use nav::{NavGroup, NavItem, NavState, SidebarMode};
pub use notify::{Notifier, NullNotifier};
pub use remote::RemoteCollection;
pub use resource::{Resource, ResourceClient};

pub use model::{
    CUSTOMER_KIND, Customer, CustomerInput, CustomerRole, SUBJECT_KIND, Subject, SubjectInput,
};
