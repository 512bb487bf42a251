//! CLI logic for the NSS script tool.
//!
//! This module contains the core CLI logic: it reads a script, runs it
//! through the front end and writes what [`Emit`] asks for.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Emit};

use std::{fmt::Write as _, fs, io::Write as _};

use log::{info, warn};

use nss::{NssError, ScriptParser, syntax::dump_tree};
use nss_parser::error::{Diagnostic, ParseError, Severity};

use error_adapter::render_diagnostics;

/// Run the NSS CLI application
///
/// Dumps (`tokens`, `tree`, `source`) are written even when the script has
/// errors; the errors are returned afterwards.
///
/// # Errors
///
/// Returns `NssError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scripts with errors, or with warnings under `warnings_as_errors`
pub fn run(args: &Args) -> Result<(), NssError> {
    info!(
        input_path = args.input,
        emit:? = args.emit;
        "Processing script"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;
    let parser = ScriptParser::new(app_config);

    match args.emit {
        Emit::Diagnostics => {
            let script = parser
                .parse(&source)
                .map_err(|err| truncate_reported(&parser, err))?;
            for report in render_diagnostics(parser.reported(script.warnings()), &source) {
                warn!("{report}");
            }

            let root = script.root();
            let summary = format!(
                "{}: {} chapter(s), {} scene(s), {} function(s), {} warning(s)\n",
                args.input,
                root.chapter_count,
                root.scene_count,
                root.function_count,
                script.warnings().len()
            );
            write_output(args, &summary)?;
        }
        Emit::Tokens => {
            let (tokens, diagnostics) = parser.tokenize(&source);
            let mut out = String::new();
            for token in &tokens {
                // Writing into a String cannot fail.
                let _ = writeln!(out, "{token} {:?}", token.text(&source));
            }
            write_output(args, &out)?;
            fail_on_errors(&parser, diagnostics, &source)?;
        }
        Emit::Tree => {
            let parsed = parser.parse_lenient(&source);
            write_output(args, &dump_tree(&parsed.root))?;
            fail_on_errors(&parser, parsed.diagnostics.into_vec(), &source)?;
        }
        Emit::Source => {
            let parsed = parser.parse_lenient(&source);
            write_output(args, &parser.write_source(&parsed.root))?;
            fail_on_errors(&parser, parsed.diagnostics.into_vec(), &source)?;
        }
    }

    info!(input_path = args.input; "Script processed successfully");
    Ok(())
}

/// Write `text` to the output file, or to stdout when none was given.
fn write_output(args: &Args, text: &str) -> Result<(), NssError> {
    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path.as_str(); "Output written");
        }
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

/// Fail when `diagnostics` would fail a parse under the current configuration.
/// Warnings that do not fail are logged.
fn fail_on_errors(
    parser: &ScriptParser,
    diagnostics: Vec<Diagnostic>,
    source: &str,
) -> Result<(), NssError> {
    let warnings_as_errors = parser.config().diagnostics().warnings_as_errors();
    let failed = diagnostics
        .iter()
        .any(|d| d.severity().is_error() || warnings_as_errors);
    if failed {
        let mut reported = parser.reported(&diagnostics).to_vec();
        if warnings_as_errors {
            reported = reported
                .into_iter()
                .map(|d| d.with_severity(Severity::Error))
                .collect();
        }
        return Err(NssError::new_parse_error(ParseError::new(reported), source));
    }

    for report in render_diagnostics(parser.reported(&diagnostics), source) {
        warn!("{report}");
    }
    Ok(())
}

fn truncate_reported(parser: &ScriptParser, err: NssError) -> NssError {
    match err {
        NssError::Parse { err, src } => {
            let reported = parser.reported(err.diagnostics()).to_vec();
            NssError::new_parse_error(ParseError::new(reported), src)
        }
        other => other,
    }
}
