use backdesk_api::ResourceKind;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Endpoint descriptor for subjects (support/ticketing categories).
pub const SUBJECT_KIND: ResourceKind = ResourceKind {
    resource: "subjects",
    kind: "Subject",
    collection_key: "subjects",
    entity_key: "subject",
};

/// A support subject as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

/// Create/update payload for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInput {
    pub name: String,
}

impl Resource for Subject {
    type Input = SubjectInput;

    const KIND_LABEL: &'static str = "subject";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }

    fn edit_input(&self) -> SubjectInput {
        SubjectInput {
            name: self.name.clone(),
        }
    }

    fn validate(input: &SubjectInput) -> Result<(), String> {
        if input.name.trim().is_empty() {
            return Err("subject name must not be blank".into());
        }
        Ok(())
    }
}
