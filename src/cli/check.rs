//! Check command implementation

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use crate::config::loader::load_config;
use crate::generate::{GenerateError, Generator};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the check command
pub fn run_check(config_path: &Path, json: bool) -> ExitCode {
    if !json {
        println!("Checking {}...", config_path.display());
    }

    let config = match load_config(Some(config_path)) {
        Ok(config) => config,
        Err(e) => {
            if json {
                let report = json!({
                    "valid": false,
                    "documents": [],
                    "error": { "message": e.to_string() },
                });
                println!("{:#}", report);
            } else {
                eprintln!("Error: {}", e);
            }
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = Generator::from_config(&config).generate(&config);

    if json {
        let report = match &result {
            Ok(documents) => json!({
                "valid": true,
                "documents": documents.iter().map(|d| d.kind().to_string()).collect::<Vec<_>>(),
            }),
            Err(e) => {
                let mut error = json!({ "message": e.to_string() });
                if let GenerateError::Validation { kind, source } = e {
                    error["kind"] = json!(kind.to_string());
                    error["field"] = json!(source.field);
                    error["violation"] = json!(source.violation.to_string());
                }
                json!({ "valid": false, "documents": [], "error": error })
            }
        };
        println!("{:#}", report);
    } else {
        match &result {
            Ok(documents) => {
                for document in documents {
                    println!("  ok  {}", document.kind());
                }
                println!("Valid: {} document(s)", documents.len());
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if result.is_ok() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}
