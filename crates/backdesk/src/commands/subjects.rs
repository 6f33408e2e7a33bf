//! Subject command handlers.

use tabled::Tabled;

use backdesk_core::{SUBJECT_KIND, Subject, SubjectInput};

use crate::cli::{GlobalOpts, SubjectsArgs, SubjectsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Subject> for SubjectRow {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: SubjectsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ctl = util::controller::<Subject>(SUBJECT_KIND, global)?;

    match args.command {
        SubjectsCommand::List(list) => {
            ctl.load().await?;
            if let Some(search) = list.search {
                ctl.set_query(search);
            }
            let hits: Vec<Subject> = ctl.filtered().cloned().collect();
            let out = output::render_list(
                &global.output,
                &hits,
                |s| SubjectRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubjectsCommand::Add { name } => {
            ctl.create(SubjectInput { name }).await?;
            Ok(())
        }

        SubjectsCommand::Rename { id, name } => {
            ctl.load().await?;
            util::require_member(&ctl, &id, "subjects list")?;
            ctl.begin_edit(&id)?;
            if let Some(draft) = ctl.draft_mut() {
                draft.name = name;
            }
            ctl.commit_edit().await?;
            Ok(())
        }

        SubjectsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete subject '{id}'?"), global.yes)? {
                return Ok(());
            }
            ctl.delete(&id).await?;
            Ok(())
        }
    }
}
