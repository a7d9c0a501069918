//! CLI command definitions and execution.
//!
//! Both commands run an offline composition pass over files: a template
//! (YAML or JSON), a composite resource, and optionally an existing
//! composed resource. Connection secret fetching needs a live store and is
//! not exercised here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use weft_compose::{
    Configurator, DefaultConfigurator, DefaultReadinessChecker, OverlayApplicator,
    PatchingOverlay, ReadinessChecker,
};
use weft_resource::{Composed, CompositeResource};
use weft_template::{validate, Template, TemplateReader};

#[derive(Parser)]
#[command(name = "weft", version, about = "Template-driven resource composition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure and patch a composed resource from a template
    Render(RenderArgs),
    /// Render a composed resource and evaluate its readiness checks
    Ready(RenderArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Template file (YAML or JSON)
    #[arg(long)]
    pub template: PathBuf,

    /// Composite (parent) resource as a JSON file
    #[arg(long)]
    pub composite: PathBuf,

    /// Existing composed (child) resource as a JSON file, if any
    #[arg(long)]
    pub composed: Option<PathBuf>,
}

pub async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let (template, composite, mut composed) = load(&args)?;
    render_composed(&template, &composite, &mut composed)?;
    println!("{}", serde_json::to_string_pretty(composed.document().as_value())?);
    Ok(())
}

pub async fn ready(args: RenderArgs) -> anyhow::Result<()> {
    let (template, composite, mut composed) = load(&args)?;
    render_composed(&template, &composite, &mut composed)?;

    let ready = DefaultReadinessChecker
        .is_ready(&composed, &template)
        .await?;
    info!(ready, "Evaluated readiness checks");

    println!("{}", serde_json::to_string_pretty(composed.document().as_value())?);
    if !ready {
        anyhow::bail!("composed resource is not ready");
    }
    Ok(())
}

fn load(args: &RenderArgs) -> anyhow::Result<(Template, CompositeResource, Composed)> {
    let template = TemplateReader::read_file(&args.template)
        .with_context(|| format!("cannot read template {}", args.template.display()))?;

    let validation = validate(&template);
    for warning in &validation.warnings {
        warn!("Template warning: {}", warning);
    }
    if !validation.is_valid() {
        anyhow::bail!("template validation failed: {}", validation.errors.join("; "));
    }

    let composite = CompositeResource::from_value(read_json(&args.composite)?)
        .with_context(|| format!("cannot load composite {}", args.composite.display()))?;

    let composed = match &args.composed {
        Some(path) => Composed::from_value(read_json(path)?)
            .with_context(|| format!("cannot load composed {}", path.display()))?,
        None => Composed::new(),
    };

    Ok((template, composite, composed))
}

fn render_composed(
    template: &Template,
    composite: &CompositeResource,
    composed: &mut Composed,
) -> anyhow::Result<()> {
    DefaultConfigurator.configure(composite, composed, template)?;
    PatchingOverlay::default().overlay(composite, composed, template)?;
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    Ok(value)
}
