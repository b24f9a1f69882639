//! Translation service
//!
//! Reads a source document, loads it into a tree, translates it and writes
//! the result. Nothing is written unless every step succeeds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::Translator;
use crate::infrastructure::traits::{FileSystem, TreeLoader};

/// Summary of a completed file translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Top-level elements translated
    pub elements: usize,
    /// Lines written (excluding a configured trailing newline)
    pub lines: usize,
}

/// Service translating source documents into configuration text.
pub struct TranslateService {
    fs: Arc<dyn FileSystem>,
    loader: Arc<dyn TreeLoader>,
    translator: Translator,
    trailing_newline: bool,
}

impl TranslateService {
    /// Create a new translation service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        loader: Arc<dyn TreeLoader>,
        translator: Translator,
    ) -> Self {
        Self {
            fs,
            loader,
            translator,
            trailing_newline: false,
        }
    }

    /// Terminate the written output with a newline.
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }

    /// Load and translate a source document held in memory.
    pub fn translate_source(&self, source: &str) -> ApplicationResult<String> {
        Ok(self.render(source)?.0)
    }

    /// Translate `input` and write the result to `output`.
    ///
    /// The output is written atomically; on any failure an existing output
    /// file is left untouched.
    #[instrument(skip(self))]
    pub fn translate_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> ApplicationResult<TranslateReport> {
        let source = self.fs.read_to_string(input).with_input_context(input)?;
        debug!("translate_file: read {} bytes", source.len());

        let (text, elements) = self.render(&source)?;
        let lines = text.lines().count();

        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write_atomic(output, &text)
            .with_path_context("write output", output)?;
        debug!("translate_file: wrote {} lines", lines);

        Ok(TranslateReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            elements,
            lines,
        })
    }

    fn render(&self, source: &str) -> ApplicationResult<(String, usize)> {
        let root = self.loader.load(source)?;
        debug!("render: root <{}> with {} children", root.tag, root.children.len());
        let mut text = self.translator.translate(&root)?;
        if self.trailing_newline && !text.is_empty() {
            text.push('\n');
        }
        Ok((text, root.children.len()))
    }
}
