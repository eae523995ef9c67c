//! Generate command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::loader::{load_config, merge_cli_overrides, CliOverrides};
use crate::generate::{write_documents, Generator};
use crate::schema::DocumentKind;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the generate command
pub fn run_generate(
    config_path: Option<&Path>,
    out_dir: Option<PathBuf>,
    only: &[DocumentKind],
    max_particles: Option<i64>,
    max_speed: Option<f64>,
    dry_run: bool,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let overrides = CliOverrides { out_dir, max_particles, max_speed };
    merge_cli_overrides(&mut config, &overrides);

    // Overrides bypass file validation, so re-check them
    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let documents = match Generator::from_config(&config).with_only(only.iter().copied()).generate(&config) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if documents.is_empty() {
        eprintln!("Warning: no documents to generate");
        return ExitCode::from(EXIT_SUCCESS);
    }

    if dry_run {
        let bundle: serde_json::Map<String, serde_json::Value> = documents
            .iter()
            .map(|doc| (doc.file_name().to_string(), doc.value().clone()))
            .collect();
        return match serde_json::to_string_pretty(&bundle) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    match write_documents(&documents, &config.output.dir) {
        Ok(paths) => {
            for (doc, path) in documents.iter().zip(&paths) {
                println!("wrote {}: {}", doc.kind(), path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
