//! Navigation tree rendering.
//!
//! Prints the same sidebar tree the admin console renders, mostly useful
//! for checking which path a menu entry routes to.

use std::fmt::Write;

use owo_colors::OwoColorize;

use backdesk_core::nav::default_tree;

use crate::cli::{GlobalOpts, NavArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &NavArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut nav = default_tree();

    if args.all {
        let labels: Vec<String> = nav.groups().iter().map(|g| g.label.clone()).collect();
        for label in labels {
            if !nav.is_expanded(&label) {
                nav.toggle(&label);
            }
        }
    }

    let color = output::should_color(&global.color);
    let current = args.active.as_deref().unwrap_or("");

    let mut out = String::new();
    for group in nav.groups() {
        let expanded = nav.is_expanded(&group.label);
        let marker = if expanded { "▾" } else { "▸" };
        let _ = writeln!(out, "{marker} {}", group.label);
        if !expanded {
            continue;
        }
        for item in &group.items {
            let active = nav.is_active(item, current);
            let label = if active && color {
                item.label.bold().to_string()
            } else {
                item.label.clone()
            };
            let mark = if active { "*" } else { " " };
            let _ = writeln!(out, "  {mark} {label}  {}", item.path);
        }
    }

    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}
