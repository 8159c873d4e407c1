//! Pipeline facade: index, convert, assemble, normalize.

use rayon::prelude::*;
use tracing::{debug, info_span};

use j2k_binder::IdentifierIndex;
use j2k_common::TranslationMode;
use j2k_emitter::{
    AssemblyOptions, ConversionContext, TranslationUnitResult, assemble, convert_unit, normalize,
};
use j2k_syntax::CompilationUnit;

use crate::config::TranslatorConfig;
use crate::errors::TranslationError;

/// Translates compilation units.
///
/// Holds configuration only. Every call builds its own identifier index and
/// conversion context, so one translator can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translated text of `unit`; normalized unless the configuration says
    /// otherwise.
    pub fn translate(
        &self,
        unit: &CompilationUnit,
        mode: TranslationMode,
    ) -> Result<String, TranslationError> {
        Ok(self.translate_unit(unit, mode)?.text)
    }

    /// Translated text together with its ordered import list.
    pub fn translate_unit(
        &self,
        unit: &CompilationUnit,
        mode: TranslationMode,
    ) -> Result<TranslationUnitResult, TranslationError> {
        let span = info_span!(
            "translate",
            package = unit.package.as_deref().unwrap_or(""),
            compatibility_imports = mode.compatibility_imports,
        );
        let _guard = span.enter();

        let index = IdentifierIndex::build(unit);
        debug!(declared = index.len(), "identifier index built");

        let mut ctx = ConversionContext::new(&index, mode, &self.config.compatibility_package);
        let kotlin = convert_unit(unit, &mut ctx)?;
        let placeholders = ctx.placeholder_count();
        let imports = ctx.into_imports();

        let options = AssemblyOptions::new(mode, self.config.compatibility_imports.clone());
        let mut result = assemble(&kotlin, &imports, &options);
        if self.config.normalize {
            result.text = normalize(&result.text);
        }
        debug!(
            imports = result.imports.len(),
            placeholders,
            bytes = result.text.len(),
            "unit translated"
        );
        Ok(result)
    }

    /// Independent requests in parallel. Results keep the input order.
    pub fn translate_batch(
        &self,
        units: &[CompilationUnit],
        mode: TranslationMode,
    ) -> Vec<Result<String, TranslationError>> {
        units
            .par_iter()
            .map(|unit| self.translate(unit, mode))
            .collect()
    }
}
