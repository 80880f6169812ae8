//! # Motion Generator
//!
//! Loads a template, fills it for one motion and writes the result to the
//! output directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

use crate::config::{MotionParams, MotionType};
use crate::error::{DocsError, DocsResult};
use crate::template::fill_template;

pub const DEFAULT_TEMPLATE: &str = "hawaii_motion_template";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Generates motion documents from a template directory.
#[derive(Debug, Clone)]
pub struct MotionGenerator {
    templates_dir: PathBuf,
    output_dir: PathBuf,
    template_name: String,
}

impl Default for MotionGenerator {
    fn default() -> Self {
        MotionGenerator::new(DEFAULT_TEMPLATES_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl MotionGenerator {
    pub fn new(templates_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        MotionGenerator {
            templates_dir: templates_dir.into(),
            output_dir: output_dir.into(),
            template_name: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Reads `<templates_dir>/<name>.tex`.
    pub fn load_template(&self, name: &str) -> DocsResult<String> {
        let path = self.templates_dir.join(format!("{}.tex", name));
        if !path.exists() {
            return Err(DocsError::TemplateNotFound {
                name: name.to_string(),
                path,
            });
        }
        debug!(path = %path.display(), "Loading template");
        Ok(std::fs::read_to_string(&path)?)
    }

    /// Fills the configured template for one motion, dated today.
    pub fn generate_motion(&self, motion_type: MotionType, params: &MotionParams) -> DocsResult<String> {
        self.generate_motion_on(motion_type, params, Local::now().date_naive())
    }

    /// Fills the configured template with an explicit date.
    pub fn generate_motion_on(
        &self,
        motion_type: MotionType,
        params: &MotionParams,
        date: NaiveDate,
    ) -> DocsResult<String> {
        let template = self.load_template(&self.template_name)?;
        debug!(motion_type = %motion_type, template = %self.template_name, "Generating motion");
        Ok(fill_template(&template, params, date))
    }

    /// Writes `content` to `<output_dir>/<filename>`, creating the directory.
    pub fn save_motion(&self, content: &str, filename: &str) -> DocsResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        std::fs::write(&path, content)?;
        info!(path = %path.display(), "Motion saved");
        Ok(path)
    }

    /// `motion_<type>_<YYYYmmdd_HHMMSS>.tex`
    pub fn output_filename(motion_type: MotionType, now: DateTime<Local>) -> String {
        format!("motion_{}_{}.tex", motion_type, now.format("%Y%m%d_%H%M%S"))
    }
}
