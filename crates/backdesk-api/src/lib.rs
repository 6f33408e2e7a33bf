//! Async HTTP client for the backdesk commerce admin API.
//!
//! The remote API exposes one CRUD surface per entity kind, all sharing the
//! same URL and envelope conventions:
//!
//! - `GET  /{resource}/all{Kind}`        → `{ success, {kind}s: [Entity] }`
//! - `POST /{resource}/add{Kind}`        → `{ success, {kind}|data: Entity, message? }`
//! - `PUT  /{resource}/edit{Kind}/{id}`  → same shape
//! - `DELETE /{resource}/delete{Kind}/{id}` → success/failure only
//!
//! [`ShopClient`] handles bearer authentication, request timeouts, and
//! envelope unwrapping; [`ResourceKind`] parameterizes the path and key
//! names per entity kind. Callers never see the envelope — methods return
//! unwrapped entities or a typed [`Error`].

pub mod client;
pub mod error;
pub mod kind;

pub use client::ShopClient;
pub use error::Error;
pub use kind::ResourceKind;
