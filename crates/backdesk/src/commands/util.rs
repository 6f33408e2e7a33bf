//! Shared helpers for command handlers.

use std::sync::Arc;

use backdesk_api::ResourceKind;
use backdesk_core::{Notifier, RemoteCollection, Resource, ResourceController};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::notify::ConsoleNotifier;
use crate::output;

/// Build a controller for one entity kind, wired to the active profile's
/// API client and a colored stderr notifier.
pub fn controller<T>(
    kind: ResourceKind,
    global: &GlobalOpts,
) -> Result<ResourceController<T, RemoteCollection<T>>, CliError>
where
    T: Resource + serde::de::DeserializeOwned,
    T::Input: serde::Serialize,
{
    let client = config::build_client(global)?;
    let notifier: Arc<dyn Notifier> =
        Arc::new(ConsoleNotifier::new(output::should_color(&global.color), global.quiet));
    Ok(ResourceController::new(
        RemoteCollection::new(client, kind),
        notifier,
    ))
}

/// Fail with a not-found diagnostic unless `id` is present in the
/// loaded collection.
pub fn require_member<T>(
    ctl: &ResourceController<T, RemoteCollection<T>>,
    id: &str,
    list_command: &str,
) -> Result<(), CliError>
where
    T: Resource + serde::de::DeserializeOwned,
    T::Input: serde::Serialize,
{
    if ctl.items().iter().any(|t| t.id() == id) {
        return Ok(());
    }
    Err(CliError::NotFound {
        resource_type: T::KIND_LABEL.into(),
        identifier: id.into(),
        list_command: list_command.into(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
