//! Convert command handler: rewrite a manifest in another format.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use krawl_core::model::SourcingProcedure;
use krawl_core::normalizer::{ValidationLevel, validate};
use krawl_core::rdf::{Provenance, project_namespace};
use krawl_core::{CanonicalManifest, ManifestNormalizer, ProjectRef, RdfSerializer, to_ntriples, to_turtle};

use super::manifest_file::{extract_manifest, project_ref_from_repo, read_manifest};
use crate::cli::ConvertArgs;

/// Output encodings `convert` can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Yaml,
    Toml,
    Json,
    Turtle,
    NTriples,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "ttl" => Some(Self::Turtle),
            "nt" => Some(Self::NTriples),
            _ => None,
        }
    }
}

pub fn run_convert_command(args: &ConvertArgs, normalizer: &ManifestNormalizer) -> Result<()> {
    let Some(output_format) = OutputFormat::from_path(&args.output) else {
        bail!(
            "Cannot infer output format of '{}': expected .yaml, .yml, .toml, .json, .ttl or .nt",
            args.output.display()
        );
    };
    if args.output.exists() && !args.force {
        bail!(
            "Output '{}' already exists; pass --force to overwrite",
            args.output.display()
        );
    }

    let payload = read_manifest(&args.input)?;
    let normalized = extract_manifest(normalizer, &args.input, &payload)
        .with_context(|| format!("Failed to read manifest '{}'", args.input.display()))?;
    for warning in &normalized.warnings {
        warn!(warning = %warning, "normalization warning");
    }
    validate(&normalized.manifest, ValidationLevel::Required)
        .with_context(|| format!("Manifest '{}' is not valid", args.input.display()))?;
    let project = project_ref_from_repo(&normalized.manifest)?;

    let rendered = render(output_format, &project, &normalized.manifest)?;
    std::fs::write(&args.output, rendered)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        project = %project,
        "manifest converted"
    );
    Ok(())
}

fn render(format: OutputFormat, project: &ProjectRef, manifest: &CanonicalManifest) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(manifest)?,
        OutputFormat::Toml => toml::to_string(manifest)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(manifest)?;
            json.push('\n');
            json
        }
        OutputFormat::Turtle | OutputFormat::NTriples => {
            let provenance = Provenance::new(SourcingProcedure::Manifest, None);
            let triples = RdfSerializer::new().serialize(project, &provenance, manifest)?;
            if format == OutputFormat::Turtle {
                let namespace = project_namespace(project);
                to_turtle(&triples, &[("", namespace.as_str())])
            } else {
                to_ntriples(&triples)
            }
        }
    };
    Ok(text)
}
