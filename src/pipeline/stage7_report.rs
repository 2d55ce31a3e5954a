use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::EvaluationReport;
use crate::report::json::{
    EVALUATION_FILE, PIPELINE_STEP_FILE, render_evaluation_json, render_pipeline_step_json,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Standalone,
    Pipeline,
}

#[derive(Debug, Clone)]
pub struct Stage7Input<'a> {
    pub report: &'a EvaluationReport<'a>,
    pub run_mode: RunMode,
}

pub fn write_reports(input: &Stage7Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let json = render_evaluation_json(input.report).map_err(std::io::Error::other)?;
    write_text(&out_dir.join(EVALUATION_FILE), &json)?;

    if input.run_mode == RunMode::Pipeline {
        let step = render_pipeline_step_json(input.report).map_err(std::io::Error::other)?;
        write_text(&out_dir.join(PIPELINE_STEP_FILE), &step)?;
    }

    crate::info!("wrote reports to {}", out_dir.display());
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
