//! # Motion Pipeline
//!
//! One motion from parameter file to saved (and optionally compiled)
//! document.
//!
//! ```text
//! config.json ──► MotionConfig::load ──► params_for(type)
//!                                             │
//!          templates/<name>.tex ──► generate_motion_on(date)
//!                                             │
//!                       output/motion_<type>_<stamp>.tex ◄── save_motion
//!                                             │
//!                          (compiler given) ──► compile(tex, output_dir)
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::info;

use crate::compiler::DocumentCompiler;
use crate::config::{MotionConfig, MotionType};
use crate::error::DocsResult;
use crate::generator::MotionGenerator;

/// Inputs for one motion run.
#[derive(Debug, Clone)]
pub struct MotionJob {
    pub motion_type: MotionType,
    pub config_path: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Files produced by a motion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionOutput {
    pub tex: PathBuf,
    pub pdf: Option<PathBuf>,
}

/// Generates and saves one motion stamped with `now`, then compiles it
/// when a compiler is given.
pub async fn run_motion(
    job: &MotionJob,
    now: DateTime<Local>,
    compiler: Option<&dyn DocumentCompiler>,
) -> DocsResult<MotionOutput> {
    let config = MotionConfig::load(&job.config_path)?;
    let params = config.params_for(job.motion_type);

    let generator = MotionGenerator::new(&job.templates_dir, &job.output_dir);
    let document = generator.generate_motion_on(job.motion_type, &params, now.date_naive())?;

    let filename = MotionGenerator::output_filename(job.motion_type, now);
    let tex = generator.save_motion(&document, &filename)?;
    info!(motion_type = %job.motion_type, tex = %tex.display(), "Motion generated");

    let pdf = match compiler {
        Some(compiler) => Some(compiler.compile(&tex, generator.output_dir()).await?),
        None => None,
    };

    Ok(MotionOutput { tex, pdf })
}
