//! Writing rendered timelines to disk.
//!
//! Every save produces four files sharing one base name,
//! `{prefix}_{YYYYMMDD_HHMMSS}`, in the configured directory:
//!
//! | key    | contents                              |
//! |--------|---------------------------------------|
//! | `json` | the timeline document, pretty-printed |
//! | `txt`  | the text diagram                      |
//! | `mmd`  | the `graph TD` flowchart              |
//! | `html` | the self-contained HTML report        |
//!
//! Files are written one at a time. A failure stops the save and is returned
//! to the caller; files already written by the same call are left in place.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use crate::config::DEFAULT_OUTPUT_DIR;

use crate::config::PersistConfig;
use crate::render;
use crate::timeline::{Timeline, TimelineRecord};
use crate::{Error, Result};

/// The four report formats produced by a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Json,
    Txt,
    Mmd,
    Html,
}

impl ArtifactKind {
    /// Every artifact, in the order they are written.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Json,
        ArtifactKind::Txt,
        ArtifactKind::Mmd,
        ArtifactKind::Html,
    ];

    /// File extension, which doubles as the manifest key.
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Json => "json",
            ArtifactKind::Txt => "txt",
            ArtifactKind::Mmd => "mmd",
            ArtifactKind::Html => "html",
        }
    }

    /// Render this artifact, reporting `duration` as the run duration.
    fn render(self, timeline: &Timeline, duration: f64) -> Result<String> {
        Ok(match self {
            ArtifactKind::Json => {
                let mut record = timeline.to_record();
                record.duration_seconds = duration;
                serde_json::to_string_pretty(&record)?
            }
            ArtifactKind::Txt => render::text::render_at(timeline, duration),
            ArtifactKind::Mmd => render::graph::render(timeline),
            ArtifactKind::Html => render::html::render_at(timeline, duration),
        })
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Paths written by a save, keyed by artifact kind.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    files: BTreeMap<ArtifactKind, PathBuf>,
}

impl Manifest {
    /// Path of the `kind` artifact, if it was written.
    pub fn get(&self, kind: ArtifactKind) -> Option<&Path> {
        self.files.get(&kind).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &Path)> {
        self.files.iter().map(|(kind, path)| (*kind, path.as_path()))
    }

    fn insert(&mut self, kind: ArtifactKind, path: PathBuf) {
        self.files.insert(kind, path);
    }
}

/// Write every rendering of `timeline` into `output_dir`, creating the
/// directory if needed.
///
/// # Example
///
/// ```rust,no_run
/// use workflow_trace::{persist, StepKind, Timeline};
///
/// let mut timeline = Timeline::new("Research");
/// timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
/// timeline.complete();
///
/// let manifest = persist::save(&timeline, persist::DEFAULT_OUTPUT_DIR)?;
/// for (kind, path) in manifest.iter() {
///     println!("{kind}: {}", path.display());
/// }
/// # Ok::<(), workflow_trace::Error>(())
/// ```
pub fn save(timeline: &Timeline, output_dir: impl AsRef<Path>) -> Result<Manifest> {
    let config = PersistConfig::default().with_output_dir(output_dir.as_ref());
    save_with(timeline, &config)
}

/// Like [`save`], with the directory and file prefix taken from `config`.
pub fn save_with(timeline: &Timeline, config: &PersistConfig) -> Result<Manifest> {
    let dir = config.output_dir();
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    // One reading of the clock, so an in-progress run reports the same
    // duration in every artifact.
    let duration = timeline.duration();
    let base = base_name(config.file_prefix(), Local::now());
    let mut manifest = Manifest::default();
    for kind in ArtifactKind::ALL {
        let contents = kind.render(timeline, duration)?;
        let path = artifact_path(dir, &base, kind);
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(artifact = %kind, path = %path.display(), "workflow artifact written");
        manifest.insert(kind, path);
    }

    Ok(manifest)
}

/// Async variant of [`save_with`] writing through `tokio::fs`.
///
/// All artifacts are rendered up front so the timeline is not borrowed across
/// any await point.
pub async fn save_async(timeline: &Timeline, config: &PersistConfig) -> Result<Manifest> {
    let duration = timeline.duration();
    let rendered = ArtifactKind::ALL
        .into_iter()
        .map(|kind| kind.render(timeline, duration).map(|contents| (kind, contents)))
        .collect::<Result<Vec<_>>>()?;

    let dir = config.output_dir();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io(dir, e))?;

    let base = base_name(config.file_prefix(), Local::now());
    let mut manifest = Manifest::default();
    for (kind, contents) in rendered {
        let path = artifact_path(dir, &base, kind);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| Error::io(&path, e))?;
        tracing::debug!(artifact = %kind, path = %path.display(), "workflow artifact written");
        manifest.insert(kind, path);
    }

    Ok(manifest)
}

/// Rebuild a timeline from a saved `.json` document.
pub fn load(path: impl AsRef<Path>) -> Result<Timeline> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let record: TimelineRecord = serde_json::from_str(&contents)?;
    Ok(Timeline::from_record(record))
}

fn base_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{prefix}_{}", now.format("%Y%m%d_%H%M%S"))
}

fn artifact_path(dir: &Path, base: &str, kind: ArtifactKind) -> PathBuf {
    dir.join(format!("{base}.{}", kind.extension()))
}
