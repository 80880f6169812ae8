//! # conduit-docs: Motion Document Generator
//!
//! Produces court motion documents by literal placeholder substitution in a
//! LaTeX template, then optionally compiles them with an external program.
//!
//! ## Module Organization
//! - [`config`] - Motion types and the JSON parameter file
//! - [`template`] - Placeholder tokens and substitution
//! - [`generator`] - Template loading and document saving
//! - [`compiler`] - External compiler invocation
//! - [`pipeline`] - One motion from parameter file to saved/compiled document
//! - [`error`] - Document error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use conduit_docs::{DocumentCompiler, LatexCompiler, MotionConfig, MotionGenerator, MotionType};
//!
//! let config = MotionConfig::load("config/motion_config.json")?;
//! let generator = MotionGenerator::default();
//!
//! let document = generator.generate_motion(MotionType::Compel, &config.params_for(MotionType::Compel))?;
//! let filename = MotionGenerator::output_filename(MotionType::Compel, chrono::Local::now());
//! let tex = generator.save_motion(&document, &filename)?;
//!
//! let pdf = LatexCompiler::default().compile(&tex, generator.output_dir()).await?;
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod template;

pub use compiler::{DocumentCompiler, LatexCompiler};
pub use config::{MotionConfig, MotionParams, MotionType};
pub use error::{DocsError, DocsResult};
pub use generator::MotionGenerator;
pub use pipeline::{run_motion, MotionJob, MotionOutput};
pub use template::{fill_template, Placeholder};
