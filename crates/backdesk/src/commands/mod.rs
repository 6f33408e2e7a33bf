//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod customers;
pub mod nav;
pub mod subjects;
pub mod util;
