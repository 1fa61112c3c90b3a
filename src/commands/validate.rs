//! Validate command handler: check a manifest file.

use anyhow::Result;

use krawl_core::ManifestNormalizer;
use krawl_core::normalizer::{ValidationLevel, validate};

use super::manifest_file::{extract_manifest, read_manifest};
use crate::cli::ValidateManifestArgs;

/// Prints the problems of one manifest and returns whether it is valid.
pub fn run_validate_manifest_command(
    args: &ValidateManifestArgs,
    normalizer: &ManifestNormalizer,
    quiet: bool,
) -> Result<bool> {
    let level = if args.strict {
        ValidationLevel::Strict
    } else {
        ValidationLevel::Required
    };
    let payload = read_manifest(&args.file)?;
    let label = args.file.display();

    let normalized = match extract_manifest(normalizer, &args.file, &payload) {
        Ok(normalized) => normalized,
        Err(error) => {
            if !quiet {
                println!("{label}: invalid");
                println!("  {error}");
            }
            return Ok(false);
        }
    };

    let result = validate(&normalized.manifest, level);
    if quiet {
        return Ok(result.is_ok());
    }
    match &result {
        Ok(()) => println!("{label}: valid"),
        Err(error) => {
            println!("{label}: invalid");
            for report in &error.reports {
                println!("  {report}");
            }
        }
    }
    for warning in &normalized.warnings {
        println!("  warning: {warning}");
    }
    Ok(result.is_ok())
}
