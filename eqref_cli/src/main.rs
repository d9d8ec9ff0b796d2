//! # eqref CLI
//!
//! Terminal front end for the engineering equation reference: browse the
//! catalog, solve for a single unknown, and rewrite spreadsheet formulas.
//!
//! ```bash
//! eqref list --category "Fluid Mechanics"
//! eqref solve eq_1 --set I=2 --set R=100
//! eqref formula eq_6 --cell V_L=D3 --cell '\phi=E5'
//! eqref --json related R
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use eqref_core::catalog::save_catalog;
use eqref_core::markdown::generate_catalog_markdown;
use eqref_core::registry::{CatalogLoad, CatalogOrigin, EquationRegistry, DEFAULT_SUGGESTION_LIMIT};
use eqref_core::solvability::{evaluate, Evaluation};
use eqref_core::{EngineSettings, EqRefError, EqRefResult, EquationDefinition};

#[derive(Parser)]
#[command(name = "eqref")]
#[command(about = "Engineering equation reference - browse formulas and solve for one unknown", long_about = None)]
struct Cli {
    /// Catalog document to load instead of the builtin catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Base URL of a catalog service (needs the `remote` feature)
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Decimal places for results
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List equations, optionally filtered
    List {
        /// Category name ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive text matched against name, category and symbols
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List categories
    Categories,
    /// Show one equation in full
    Show {
        /// Equation id (e.g. eq_1)
        id: String,
    },
    /// Equations containing a variable symbol (exact match)
    Related {
        /// Variable symbol (e.g. R)
        symbol: String,
    },
    /// Search suggestions
    Suggest {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
    /// Solve an equation for its single unknown
    Solve {
        /// Equation id
        id: String,
        /// Known value as SYMBOL=VALUE or VARIABLE_ID=VALUE (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
    /// Render the spreadsheet formula with your own cell references
    Formula {
        /// Equation id
        id: String,
        /// Cell as SYMBOL=CELL or VARIABLE_ID=CELL (repeatable)
        #[arg(long = "cell", value_parser = parse_assignment)]
        cells: Vec<(String, String)>,
    },
    /// Write the loaded catalog as a JSON document
    Export {
        /// Output file path
        path: PathBuf,
    },
    /// Print the catalog as a markdown reference
    Markdown {
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", text)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EqRefResult<()> {
    let settings = resolve_settings(&cli)?;
    let load = settings.load_registry()?;
    if let Some(note) = fallback_note(&load) {
        eprintln!("{}", note);
    }
    let registry = load.registry;
    let out = Output {
        json: cli.json,
        precision: settings.display_precision,
    };

    match cli.command {
        Commands::List { category, search } => {
            out.equations(&registry.list_equations(category.as_deref(), search.as_deref()))
        }
        Commands::Categories => out.categories(&registry.categories()),
        Commands::Show { id } => out.equation(registry.require(&id)?),
        Commands::Related { symbol } => out.equations(&registry.equations_by_symbol(&symbol)),
        Commands::Suggest { query, limit } => out.equations(&registry.suggest(&query, limit)),
        Commands::Solve { id, values } => cmd_solve(&out, registry.require(&id)?, &values),
        Commands::Formula { id, cells } => cmd_formula(&out, registry.require(&id)?, &cells),
        Commands::Export { path } => cmd_export(&registry, &path),
        Commands::Markdown { output } => cmd_markdown(&registry, output.as_deref()),
    }
}

/// Settings file first, then command-line overrides
/// Stderr note for a catalog load that did not come from the primary source
fn fallback_note(load: &CatalogLoad) -> Option<String> {
    match &load.origin {
        CatalogOrigin::Primary => None,
        CatalogOrigin::Fallback { error } if load.registry.is_empty() => {
            Some(format!("Note: {}; no catalog available", error))
        }
        CatalogOrigin::Fallback { error } => Some(format!("Note: {}; using the builtin catalog", error)),
    }
}

fn resolve_settings(cli: &Cli) -> EqRefResult<EngineSettings> {
    let mut settings = match &cli.settings {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    if let Some(path) = &cli.catalog {
        settings.catalog_path = Some(path.clone());
    }
    if let Some(url) = &cli.remote {
        settings.remote_url = Some(url.clone());
    }
    if let Some(precision) = cli.precision {
        settings.display_precision = precision;
    }
    debug!(?settings, "resolved settings");
    Ok(settings)
}

/// Map SYMBOL/ID keys onto variable ids
fn by_variable_id(equation: &EquationDefinition, pairs: &[(String, String)]) -> EqRefResult<HashMap<String, String>> {
    pairs
        .iter()
        .map(|(key, value)| {
            equation
                .find_variable(key)
                .map(|var| (var.id.clone(), value.clone()))
                .ok_or_else(|| EqRefError::variable_not_found(&equation.id, key))
        })
        .collect()
}

fn cmd_solve(out: &Output, equation: &EquationDefinition, values: &[(String, String)]) -> EqRefResult<()> {
    let raw = by_variable_id(equation, values)?;
    let evaluation = evaluate(equation, &raw);

    if out.json {
        return print_json(&evaluation);
    }

    println!("{}", equation.name);
    println!("  {}", equation.latex);
    println!();
    for var in &equation.variables {
        let value = if var.is_constant {
            var.fixed_value().map(|v| format!("{} (constant)", v)).unwrap_or_default()
        } else {
            raw.get(&var.id).cloned().unwrap_or_default()
        };
        println!("  {:<10} {:<24} {}", var.symbol, var.name, value);
    }
    println!();

    match &evaluation {
        Evaluation::AwaitingInput { unknowns } => {
            let symbols: Vec<&str> = unknowns
                .iter()
                .filter_map(|id| equation.variable(id))
                .map(|v| v.symbol.as_str())
                .collect();
            println!("Result: {}  (unknown: {})", evaluation.headline(out.precision), symbols.join(", "));
        }
        Evaluation::CannotCalculate { reason } => {
            println!("Result: {}  ({})", evaluation.headline(out.precision), reason);
        }
        _ => println!("Result: {}", evaluation.headline(out.precision)),
    }
    Ok(())
}

fn cmd_formula(out: &Output, equation: &EquationDefinition, cells: &[(String, String)]) -> EqRefResult<()> {
    let assignments = by_variable_id(equation, cells)?;
    let formula = equation.render_formula(&assignments);

    if out.json {
        return print_json(&serde_json::json!({
            "id": equation.id,
            "template": equation.excel_formula,
            "formula": formula,
        }));
    }
    println!("{}", formula);
    Ok(())
}

fn cmd_export(registry: &EquationRegistry, path: &Path) -> EqRefResult<()> {
    save_catalog(path, registry.all())?;
    println!("Wrote {} equations to {}", registry.len(), path.display());
    Ok(())
}

fn cmd_markdown(registry: &EquationRegistry, output: Option<&Path>) -> EqRefResult<()> {
    let markdown = generate_catalog_markdown(registry);
    match output {
        Some(path) => {
            std::fs::write(path, &markdown)
                .map_err(|e| EqRefError::file_error("write", path.display().to_string(), e.to_string()))?;
            println!("Wrote {} bytes to {}", markdown.len(), path.display());
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> EqRefResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| EqRefError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

/// Plain-text or JSON rendering of query results
struct Output {
    json: bool,
    precision: usize,
}

impl Output {
    fn equations(&self, equations: &[&EquationDefinition]) -> EqRefResult<()> {
        if self.json {
            return print_json(&equations);
        }
        if equations.is_empty() {
            println!("No equations found");
            return Ok(());
        }
        for eq in equations {
            println!("{:<8} {:<36} {}", eq.id, eq.name, eq.category);
        }
        println!();
        println!("{} equation(s)", equations.len());
        Ok(())
    }

    fn categories(&self, categories: &[String]) -> EqRefResult<()> {
        if self.json {
            return print_json(&categories);
        }
        for category in categories {
            println!("{}", category);
        }
        Ok(())
    }

    fn equation(&self, eq: &EquationDefinition) -> EqRefResult<()> {
        if self.json {
            return print_json(eq);
        }

        println!("═══════════════════════════════════════");
        println!("  {}  ({})", eq.name, eq.id);
        println!("═══════════════════════════════════════");
        println!("{} / {}", eq.category, eq.subcategory);
        println!();
        println!("{}", eq.description);
        println!();
        println!("Formula:     {}", eq.latex);
        println!("Spreadsheet: {}", eq.excel_formula);
        println!();
        println!("Variables:");
        for var in &eq.variables {
            let unit = if var.unit.is_empty() { "-" } else { var.unit.as_str() };
            let marker = if var.is_constant { " [constant]" } else { "" };
            println!("  {:<10} {:<24} {:<10} {}{}", var.symbol, var.name, unit, var.description, marker);
        }

        let constants: Vec<_> = eq.constants().collect();
        if !constants.is_empty() {
            println!();
            println!("Constants:");
            for var in constants {
                let value = var.fixed_value().map(|v| v.to_string()).unwrap_or_default();
                println!("  {} = {}", var.symbol, value);
                if let Some(derivation) = &var.constant_derivation {
                    println!("    {}", derivation);
                }
            }
        }

        if !eq.steps.is_empty() {
            println!();
            println!("Steps:");
            for (i, step) in eq.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
        }

        if let Some(example) = &eq.example {
            println!();
            println!("Example:");
            println!("  Given:  {}", example.given);
            println!("  Result: {}", example.result);
        }
        Ok(())
    }
}
