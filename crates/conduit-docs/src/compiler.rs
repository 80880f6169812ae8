//! # Document Compiler
//!
//! Turns a saved `.tex` file into a PDF by running an external program.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{DocsError, DocsResult};

/// Compiles a source document into its rendered form.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// Compiles `source` into `output_dir` and returns the rendered file.
    async fn compile(&self, source: &Path, output_dir: &Path) -> DocsResult<PathBuf>;
}

/// Runs `<program> -output-directory <dir> <file.tex>`.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        LatexCompiler::new("pdflatex")
    }
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        LatexCompiler {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `<dir>/<stem>.pdf`
    pub fn pdf_path(source: &Path, output_dir: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        output_dir.join(format!("{}.pdf", stem))
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, source: &Path, output_dir: &Path) -> DocsResult<PathBuf> {
        debug!(program = %self.program, source = %source.display(), "Compiling document");

        let output = Command::new(&self.program)
            .arg("-output-directory")
            .arg(output_dir)
            .arg(source)
            .output()
            .await
            .map_err(|e| DocsError::CompilerUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, "Document compilation failed");
            return Err(DocsError::CompileFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let pdf = Self::pdf_path(source, output_dir);
        info!(pdf = %pdf.display(), "Document compiled");
        Ok(pdf)
    }
}
