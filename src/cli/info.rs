//! Info command implementations (defaults, kinds)

use std::process::ExitCode;

use crate::config::loader::default_config;
use crate::schema::DocumentKind;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the defaults command
pub fn run_defaults() -> ExitCode {
    match serde_json::to_string_pretty(&default_config()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the kinds command
pub fn run_kinds() -> ExitCode {
    println!("Document kinds (in generation order):");
    println!();
    for kind in DocumentKind::ALL {
        println!("  {:<12} {}", kind.section(), kind.file_name());
    }
    ExitCode::from(EXIT_SUCCESS)
}
