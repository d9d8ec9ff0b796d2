//! Generate the builtin catalog as JSON and as a markdown reference.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog [OUTPUT_DIR]
//! ```
//!
//! Writes `equations.json` and `EQUATIONS.md` into `OUTPUT_DIR`
//! (default: `eqref_core/catalog`).

use std::fs;
use std::path::PathBuf;

use eqref_core::catalog::save_catalog;
use eqref_core::equations::{builtin_catalog, DEFAULT_BUILTIN_COUNT};
use eqref_core::markdown::generate_catalog_markdown;
use eqref_core::registry::EquationRegistry;

fn main() {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("eqref_core/catalog"));

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Error creating {}: {}", output_dir.display(), e);
        std::process::exit(1);
    }

    println!("Generating builtin catalog ({} equations)...", DEFAULT_BUILTIN_COUNT);
    let equations = builtin_catalog(DEFAULT_BUILTIN_COUNT);

    let json_path = output_dir.join("equations.json");
    match save_catalog(&json_path, &equations) {
        Ok(()) => println!("Successfully wrote {}", json_path.display()),
        Err(e) => {
            eprintln!("Error writing catalog: {}", e);
            std::process::exit(1);
        }
    }

    let registry = match EquationRegistry::new(equations) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Builtin catalog is invalid: {}", e);
            std::process::exit(1);
        }
    };
    let markdown = generate_catalog_markdown(&registry);

    let md_path = output_dir.join("EQUATIONS.md");
    match fs::write(&md_path, &markdown) {
        Ok(()) => println!("Successfully wrote {} bytes to {}", markdown.len(), md_path.display()),
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
