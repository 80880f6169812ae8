//! `conduit motion`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use conduit_docs::{run_motion, DocumentCompiler, LatexCompiler, MotionJob, MotionType};

pub struct MotionArgs {
    pub motion_type: String,
    pub config: PathBuf,
    pub templates: PathBuf,
    pub output: PathBuf,
    pub compile: bool,
}

pub async fn run(args: MotionArgs) -> Result<()> {
    let motion_type: MotionType = args.motion_type.parse()?;
    let job = MotionJob {
        motion_type,
        config_path: args.config,
        templates_dir: args.templates,
        output_dir: args.output,
    };

    let latex = LatexCompiler::default();
    let compiler = if args.compile {
        Some(&latex as &dyn DocumentCompiler)
    } else {
        None
    };

    let output = run_motion(&job, Local::now(), compiler)
        .await
        .with_context(|| format!("Failed to generate {} motion", motion_type))?;

    println!("Motion generated: {}", output.tex.display());
    if let Some(pdf) = output.pdf {
        println!("PDF compiled: {}", pdf.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_motion_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(MotionArgs {
            motion_type: "appeal".into(),
            config: dir.path().join("motion_config.json"),
            templates: dir.path().join("templates"),
            output: dir.path().join("output"),
            compile: false,
        })
        .await
        .unwrap_err();

        assert!(err.to_string().contains("appeal"));
        assert!(!dir.path().join("output").exists());
    }

    #[tokio::test]
    async fn test_motion_written_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("hawaii_motion_template.tex"), "[MOTION_TITLE]").unwrap();
        let config = dir.path().join("motion_config.json");
        std::fs::write(&config, r#"{ "modify": { "title": "MOTION TO MODIFY ORDER" } }"#).unwrap();

        run(MotionArgs {
            motion_type: "modify".into(),
            config,
            templates,
            output: dir.path().join("output"),
            compile: false,
        })
        .await
        .unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path().join("output"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "MOTION TO MODIFY ORDER");
    }
}
