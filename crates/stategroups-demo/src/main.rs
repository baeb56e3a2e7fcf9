//! State Groups Demo - Main Entry Point
//!
//! Usage: `stategroups-demo <page.html> [command...]`
//!
//! Commands run in order after the initial scan:
//! - `busy:<group>` / `idle:<group>`: programmatic requests
//! - `fire:<element id>:<event>`: DOM event on the element with that `id`
//! - `remove:<element id>`: detach an element, then sweep

use anyhow::{Context, bail};
use stategroups::{EngineConfig, StateGroupsService, StatePage};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: stategroups-demo <page.html> [busy:<group> | idle:<group> | fire:<id>:<event> | remove:<id>]...");
    };

    let html = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let mut page = StatePage::from_html(&html, EngineConfig::default())?;

    let report = page.setup_elements().context("initial scan")?;
    tracing::info!(
        "{} set up, {} waiting for their group",
        report.initialized.len(),
        report.deferred.len()
    );

    for command in args {
        run(&mut page, &command).with_context(|| format!("command {command}"))?;
    }

    for (node, group_id) in page.engine().waiting_elements() {
        tracing::warn!("Node {} still waits for group {}", node, group_id);
    }

    println!("{}", page.body_html());
    Ok(())
}

fn run(page: &mut StatePage, command: &str) -> anyhow::Result<()> {
    let mut parts = command.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("busy"), Some(group), None) => page.set_busy(group, None)?,
        (Some("idle"), Some(group), None) => page.set_idle(group)?,
        (Some("fire"), Some(id), Some(event)) => {
            let target = element_by_id(page, id)?;
            let fired = page.dispatch_event(target, event)?;
            tracing::info!("{} trigger(s) fired", fired);
        }
        (Some("remove"), Some(id), None) => {
            let target = element_by_id(page, id)?;
            page.remove(target);
            let swept = page.sweep();
            tracing::info!("{} entries swept", swept);
        }
        _ => bail!("unknown command"),
    }
    Ok(())
}

fn element_by_id(page: &StatePage, id: &str) -> anyhow::Result<stategroups::dom::NodeId> {
    page.document()
        .get_element_by_id(id)
        .with_context(|| format!("no element with id {id}"))
}
