//! amdlint CLI
//!
//! Lints JavaScript files for AMD `define`/`require` callback arity
//! mismatches.
//!
//! # Usage
//!
//! ```bash
//! # Lint files or directories
//! amdlint src/ app.js
//!
//! # JSON output
//! amdlint --format json src/
//!
//! # Rule options (same shape as the eslint options object)
//! amdlint --options '{"allowExtraDependencies": true}' src/
//! ```
//!
//! Exit codes: 0 clean, 1 findings reported, 2 host error.

use amdlint_core::{Diagnostic, LintConfig, Linter, OutputFormat};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

#[derive(Parser)]
#[command(name = "amdlint")]
#[command(about = "AMD module-loader callback arity linter", long_about = None)]
struct Cli {
    /// Files or directories to lint
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: FormatArg,

    /// Rule options as a JSON object
    #[arg(long)]
    options: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Human,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn is_js_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JS_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Expand CLI paths into lintable files, recursing into directories
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && is_js_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

fn run(cli: Cli) -> Result<Vec<Diagnostic>, amdlint_core::LintError> {
    let rule_options = match &cli.options {
        Some(raw) => vec![serde_json::from_str(raw)?],
        None => Vec::new(),
    };

    let config = LintConfig {
        rule_options,
        format: cli.format.into(),
    };
    let linter = Linter::new(config)?;

    let mut diagnostics = Vec::new();
    for file in collect_files(&cli.paths) {
        diagnostics.extend(linter.lint_file(&file)?);
    }

    print!("{}", linter.render(&diagnostics));
    Ok(diagnostics)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(diagnostics) if diagnostics.is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("amdlint: {}", err);
            ExitCode::from(2)
        }
    }
}
