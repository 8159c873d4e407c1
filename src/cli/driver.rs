//! Runs one translation for the binary and renders the outcome as the text
//! to print. Every failure becomes a single `EXCEPTION: ` line.

use anyhow::Result;
use tracing::debug;

use crate::cli::args::CliArgs;
use crate::config::TranslatorConfig;
use crate::frontend::JsonFrontEnd;
use crate::translator::Translator;
use j2k_common::TranslationMode;

pub const EXCEPTION_PREFIX: &str = "EXCEPTION: ";
pub const WRONG_ARGUMENT_COUNT: &str = "EXCEPTION: wrong number of arguments (should be 1).";
pub const EMPTY_OUTPUT: &str = "EXCEPTION: generated code is empty.";

/// `EXCEPTION: <message>` on one line.
pub fn exception_line(message: &str) -> String {
    let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{EXCEPTION_PREFIX}{message}")
}

/// Configuration file (if any) with the command-line overrides applied.
pub fn resolve_config(args: &CliArgs) -> Result<TranslatorConfig> {
    let mut config = match &args.config {
        Some(path) => TranslatorConfig::load(path)?,
        None => TranslatorConfig::default(),
    };
    config.library_roots.extend(args.library_roots.iter().cloned());
    if args.raw {
        config.normalize = false;
    }
    Ok(config)
}

pub fn translate_input(args: &CliArgs, input: &str) -> Result<String> {
    let config = resolve_config(args)?;
    let front_end = JsonFrontEnd::new(config.frontend())?;
    let unit = front_end.load(input)?;
    let mode = if args.compat {
        TranslationMode::with_compatibility_imports()
    } else {
        TranslationMode::plain()
    };
    let text = Translator::new(config).translate(&unit, mode)?;
    Ok(text)
}

/// Text the binary prints for `args`.
pub fn render(args: &CliArgs) -> String {
    let [input] = args.inputs.as_slice() else {
        return WRONG_ARGUMENT_COUNT.to_string();
    };
    match translate_input(args, input) {
        Ok(text) if text.trim().is_empty() => EMPTY_OUTPUT.to_string(),
        Ok(text) => text,
        Err(err) => {
            debug!(error = %err, "translation failed");
            exception_line(&err.to_string())
        }
    }
}
