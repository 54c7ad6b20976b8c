//! # Task Subcommand
//!
//! Drives assessment tasks on a running server.
//!
//! ## Subcommands
//!
//! - `create`: Create a task from a template and print how its items are
//!   spread over the template's dimensions.
//! - `show`: Print a task header and its items.
//! - `result`: Print the scored result of a task.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sas_core::{AssessmentResult, Template, TemplateCatalog};

use crate::client::{ApiClient, NewTask, TaskDetail};
use crate::{truncate, DEFAULT_TEMPLATE};

/// Arguments for the `sas task` subcommand.
#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

/// Task subcommands.
#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create a new task in draft status.
    Create {
        /// Task name.
        #[arg(long)]
        name: String,
        /// Template id to copy control items from.
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: String,
        /// Organization being assessed.
        #[arg(long)]
        organization: Option<String>,
    },

    /// Show a task and its items.
    Show {
        /// Task id.
        id: i64,
    },

    /// Show the scored result of a task.
    Result {
        /// Task id.
        id: i64,
    },
}

/// Execute the task subcommand against the API at `client`.
pub fn run_task(args: &TaskArgs, client: &ApiClient) -> Result<u8> {
    match &args.command {
        TaskCommand::Create {
            name,
            template,
            organization,
        } => cmd_create(client, name, template, organization.as_deref()),
        TaskCommand::Show { id } => cmd_show(client, *id),
        TaskCommand::Result { id } => cmd_result(client, *id),
    }
}

fn cmd_create(
    client: &ApiClient,
    name: &str,
    template_id: &str,
    organization: Option<&str>,
) -> Result<u8> {
    let created = client.create_task(&NewTask {
        name,
        template_id,
        organization,
    })?;
    tracing::info!(task_id = created.id, "{}", created.message);

    let detail = client
        .task(created.id)
        .with_context(|| format!("task {} was created but could not be read back", created.id))?;

    let catalog = TemplateCatalog::builtin().context("built-in catalog is invalid")?;
    print!("{}", render_created(&detail, catalog.get(template_id)));
    Ok(0)
}

fn cmd_show(client: &ApiClient, id: i64) -> Result<u8> {
    let detail = client.task(id)?;
    print!("{}", render_task(&detail));
    Ok(0)
}

fn cmd_result(client: &ApiClient, id: i64) -> Result<u8> {
    let result = client.task_result(id)?;
    print!("{}", render_result(id, &result));
    Ok(0)
}

/// Confirmation for a new task with its item count per dimension. Dimensions
/// follow template order when the template is known locally.
pub fn render_created(detail: &TaskDetail, template: Option<&Template>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "OK: created task {} ({})", detail.id, detail.name);
    let _ = writeln!(out, "  Template: {} [{}]", detail.template_name, detail.template_id);
    let _ = writeln!(out, "  Items: {}", detail.items.len());

    let counts = detail.items_per_dimension();
    let rows: Vec<(String, usize)> = match template {
        Some(t) => t
            .dimensions
            .iter()
            .filter_map(|d| counts.get(d.id.as_str()).map(|n| (d.name.clone(), *n)))
            .collect(),
        None => counts.iter().map(|(id, n)| (id.to_string(), *n)).collect(),
    };
    for (dimension, count) in rows {
        let _ = writeln!(out, "    {dimension}: {count}");
    }
    out
}

/// Task header followed by one line per item.
pub fn render_task(detail: &TaskDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Task: {}", detail.id);
    let _ = writeln!(out, "  Name: {}", detail.name);
    let _ = writeln!(out, "  Template: {} [{}]", detail.template_name, detail.template_id);
    if let Some(org) = &detail.organization {
        let _ = writeln!(out, "  Organization: {org}");
    }
    let _ = writeln!(out, "  Status: {}", detail.status);
    let _ = writeln!(out, "  Total score: {:.2}", detail.total_score);
    let _ = writeln!(out, "  Compliance rate: {:.2}%", detail.compliance_rate);
    let _ = writeln!(out, "  Created: {}", detail.created_at);
    let _ = writeln!(out, "  Updated: {}", detail.updated_at);
    let _ = writeln!(out, "  Items ({}):", detail.items.len());
    for item in &detail.items {
        let _ = writeln!(
            out,
            "    [{}] {:<10} {:>4.1}/{:<4.1} {}{} {}",
            item.id,
            item.dimension,
            item.score,
            item.max_score,
            item.rating_label,
            if item.has_attachment { " +file" } else { "" },
            truncate(&item.control_item, 40)
        );
    }
    out
}

/// Summary figures, per-dimension percentages, and the rating distribution.
pub fn render_result(task_id: i64, result: &AssessmentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Result for task {task_id}:");
    let _ = writeln!(
        out,
        "  Completed: {}/{}",
        result.completed_items, result.total_items
    );
    let _ = writeln!(
        out,
        "  Score: {:.2}/{:.2}",
        result.total_score, result.max_score
    );
    let _ = writeln!(out, "  Compliance rate: {:.2}%", result.compliance_rate);
    let _ = writeln!(out, "  Weighted score: {:.2}", result.weighted_score);

    if !result.dimension_scores.is_empty() {
        let _ = writeln!(out, "  Dimensions:");
        for dim in &result.dimension_scores {
            let _ = writeln!(
                out,
                "    {:<14} {:>6.2}%  {:.2}/{:.2}  ({} items, weight {:.2})",
                dim.name, dim.percentage, dim.score, dim.max_score, dim.item_count, dim.weight
            );
        }
    }

    let d = &result.rating_distribution;
    let _ = writeln!(
        out,
        "  Ratings: compliant={} partial={} non_compliant={} not_applicable={} not_started={}",
        d.compliant, d.partial, d.non_compliant, d.not_applicable, d.not_started
    );
    out
}
