// ── Resource kind descriptors ──
//
// Every entity kind uses the same endpoint grammar; the descriptor holds
// the path segment and the JSON key names that vary per kind.

use std::fmt;

/// Static description of one remote resource kind.
///
/// `resource` is the base path segment, `kind` the CamelCase name embedded
/// in the operation paths (`all{Kind}`, `add{Kind}`, ...), and the two key
/// fields name where entities live inside response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Base path segment, e.g. `"subjects"`.
    pub resource: &'static str,
    /// CamelCase kind name, e.g. `"Subject"`.
    pub kind: &'static str,
    /// Key holding the entity array in list responses, e.g. `"subjects"`.
    pub collection_key: &'static str,
    /// Key holding the entity in mutation responses, e.g. `"subject"`.
    /// Some deployments use `"data"` instead; the client tries both.
    pub entity_key: &'static str,
}

impl ResourceKind {
    pub(crate) fn all_path(&self) -> String {
        format!("{}/all{}", self.resource, self.kind)
    }

    pub(crate) fn add_path(&self) -> String {
        format!("{}/add{}", self.resource, self.kind)
    }

    pub(crate) fn edit_path(&self, id: &str) -> String {
        format!("{}/edit{}/{id}", self.resource, self.kind)
    }

    pub(crate) fn delete_path(&self, id: &str) -> String {
        format!("{}/delete{}/{id}", self.resource, self.kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECTS: ResourceKind = ResourceKind {
        resource: "subjects",
        kind: "Subject",
        collection_key: "subjects",
        entity_key: "subject",
    };

    #[test]
    fn paths_follow_endpoint_grammar() {
        assert_eq!(SUBJECTS.all_path(), "subjects/allSubject");
        assert_eq!(SUBJECTS.add_path(), "subjects/addSubject");
        assert_eq!(SUBJECTS.edit_path("42"), "subjects/editSubject/42");
        assert_eq!(SUBJECTS.delete_path("42"), "subjects/deleteSubject/42");
    }
}
