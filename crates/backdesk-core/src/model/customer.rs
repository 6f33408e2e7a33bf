use std::fmt;
use std::str::FromStr;

use backdesk_api::ResourceKind;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Endpoint descriptor for customer accounts.
pub const CUSTOMER_KIND: ResourceKind = ResourceKind {
    resource: "customers",
    kind: "Customer",
    collection_key: "customers",
    entity_key: "customer",
};

/// Access role attached to a customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerRole {
    Admin,
    Staff,
    Customer,
}

impl fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Customer => "customer",
        };
        f.write_str(s)
    }
}

impl FromStr for CustomerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "customer" => Ok(Self::Customer),
            other => Err(format!(
                "unknown role '{other}' (expected admin, staff, or customer)"
            )),
        }
    }
}

/// A customer account as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: CustomerRole,
}

/// Create/update payload for a customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: CustomerRole,
}

impl Resource for Customer {
    type Input = CustomerInput;

    const KIND_LABEL: &'static str = "customer";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.email)
    }

    fn edit_input(&self) -> CustomerInput {
        CustomerInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    fn validate(input: &CustomerInput) -> Result<(), String> {
        if input.first_name.trim().is_empty() {
            return Err("first name must not be blank".into());
        }
        if input.last_name.trim().is_empty() {
            return Err("last name must not be blank".into());
        }
        let email = input.email.trim();
        if email.is_empty() {
            return Err("email must not be blank".into());
        }
        if !email.contains('@') {
            return Err(format!("'{email}' is not a valid email address"));
        }
        Ok(())
    }
}
