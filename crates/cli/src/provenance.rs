//! `<artifact>.provenance.json` sidecars recording which build wrote a CSV
//! and with what settings.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Settings of a run and, optionally, what it measured.
pub struct Payload {
    pub params: Value,
    pub summary: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            summary: Value::Null,
        }
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    artifact: String,
    code_rev: String,
    dots_version: &'static str,
    written_by: Callsite,
    params: &'a Value,
    #[serde(skip_serializing_if = "is_null")]
    summary: &'a Value,
}

fn is_null(v: &&Value) -> bool {
    v.is_null()
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Write the sidecar next to `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    let doc = Sidecar {
        artifact: artifact.to_string_lossy().into_owned(),
        code_rev: current_git_rev(),
        dots_version: dots::VERSION,
        written_by: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params: &payload.params,
        summary: &payload.summary,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance written");
    Ok(path)
}

/// `out/kept.csv` becomes `out/kept.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Revision from `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()));
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_the_csv_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/kept.csv")),
            Path::new("/tmp/output/kept.provenance.json")
        );
        assert_eq!(sidecar_path(Path::new("walk")), Path::new("walk.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_summary() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("kept.csv");
        let payload =
            Payload::new(json!({"error_threshold": 5.0})).with_summary(json!({"output_points": 2}));
        let path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["artifact"], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["error_threshold"], 5.0);
        assert_eq!(parsed["summary"]["output_points"], 2);
        assert_eq!(parsed["dots_version"], dots::VERSION);
        assert!(parsed["written_by"]["line"].as_u64().is_some());
    }

    #[test]
    fn summary_is_omitted_when_absent() {
        let dir = tempdir().unwrap();
        let path = write_sidecar(dir.path().join("walk.csv"), Payload::new(json!({"seed": 3}))).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert!(parsed.get("summary").is_none());
        assert_eq!(parsed["params"]["seed"], 3);
    }
}
