//! Canonical domain types, one declared record per entity kind.
//!
//! Field shapes follow the remote API's camelCase wire names; validation
//! rules are explicit predicates on the `Input` types, never ad hoc
//! truthiness checks.

mod customer;
mod subject;

pub use customer::{CUSTOMER_KIND, Customer, CustomerInput, CustomerRole};
pub use subject::{SUBJECT_KIND, Subject, SubjectInput};
