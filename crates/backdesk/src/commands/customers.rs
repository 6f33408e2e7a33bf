//! Customer command handlers.

use tabled::Tabled;

use backdesk_core::{CUSTOMER_KIND, Customer, CustomerInput};

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            name: format!("{} {}", c.first_name, c.last_name),
            email: c.email.clone(),
            role: c.role.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CustomersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ctl = util::controller::<Customer>(CUSTOMER_KIND, global)?;

    match args.command {
        CustomersCommand::List(list) => {
            ctl.load().await?;
            if let Some(search) = list.search {
                ctl.set_query(search);
            }
            let hits: Vec<Customer> = ctl.filtered().cloned().collect();
            let out = output::render_list(
                &global.output,
                &hits,
                |c| CustomerRow::from(c),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Add {
            first_name,
            last_name,
            email,
            role,
        } => {
            ctl.create(CustomerInput {
                first_name,
                last_name,
                email,
                role: role.into(),
            })
            .await?;
            Ok(())
        }

        CustomersCommand::Edit {
            id,
            first_name,
            last_name,
            email,
            role,
        } => {
            ctl.load().await?;
            util::require_member(&ctl, &id, "customers list")?;
            ctl.begin_edit(&id)?;
            if let Some(draft) = ctl.draft_mut() {
                if let Some(v) = first_name {
                    draft.first_name = v;
                }
                if let Some(v) = last_name {
                    draft.last_name = v;
                }
                if let Some(v) = email {
                    draft.email = v;
                }
                if let Some(v) = role {
                    draft.role = v.into();
                }
            }
            ctl.commit_edit().await?;
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete customer '{id}'? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            ctl.delete(&id).await?;
            Ok(())
        }
    }
}
