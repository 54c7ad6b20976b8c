//! # Templates Subcommand
//!
//! Prints the built-in template catalog. Runs offline: the catalog is
//! compiled into `sas-core`, the same one the server seeds from.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::Args;

use sas_core::{Template, TemplateCatalog};

/// Arguments for the `sas templates` subcommand.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Show the dimensions and item counts of a single template.
    #[arg(long)]
    pub id: Option<String>,
}

/// Execute the templates subcommand.
pub fn run_templates(args: &TemplatesArgs) -> Result<u8> {
    let catalog = TemplateCatalog::builtin().context("built-in catalog is invalid")?;

    match &args.id {
        None => print!("{}", render_catalog(&catalog)),
        Some(id) => {
            let template = catalog.require(id)?;
            print!("{}", render_template(template));
        }
    }
    Ok(0)
}

/// One line per template: id, standard number, item count, name.
pub fn render_catalog(catalog: &TemplateCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Templates ({}):", catalog.len());
    for t in catalog.templates() {
        let _ = writeln!(
            out,
            "  {:<18} {:<16} {:>3} items  {}",
            t.id,
            t.standard_no,
            t.item_count(),
            t.name
        );
    }
    out
}

/// Header plus one line per dimension with its weight and item count.
pub fn render_template(template: &Template) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Template: {}", template.id);
    let _ = writeln!(out, "  Name: {}", template.name);
    let _ = writeln!(out, "  Standard: {} ({})", template.standard_no, template.version);
    let _ = writeln!(out, "  Description: {}", template.description);
    let _ = writeln!(out, "  Items: {}", template.item_count());
    let _ = writeln!(out, "  Dimensions ({}):", template.dimensions.len());
    for dim in &template.dimensions {
        let _ = writeln!(
            out,
            "    {:<14} weight {:.2}  {:>3} items  {}",
            dim.id,
            dim.weight,
            template.items_in(&dim.id).count(),
            dim.name
        );
    }
    out
}
