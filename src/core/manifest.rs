//! YOLO data manifest (`data.yaml` style) describing where each split lives
//! and which classes the detector is trained on.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::dataset::DatasetSplit;
use crate::error::{SplitterError, SplitterResult};

/// Split root the training script expects, relative to its working directory
pub const DEFAULT_MANIFEST_ROOT: &str = "../splits";

/// Single class of the fingerprint detection dataset
pub const DEFAULT_CLASS_NAME: &str = "fingerprint";

/// Manifest document. Field order is the key order in the written YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataManifest {
    pub train: String,
    pub val: String,
    pub test: String,
    /// Number of classes, always `names.len()` when built through `new`
    pub nc: usize,
    pub names: Vec<String>,
}

impl Default for DataManifest {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_ROOT, vec![DEFAULT_CLASS_NAME.to_string()])
    }
}

impl DataManifest {
    /// Build a manifest whose split paths sit under `root`,
    /// e.g. `../splits` gives `../splits/train/images`.
    pub fn new(root: &str, names: Vec<String>) -> Self {
        let root = root.trim_end_matches('/');
        let path = |split: DatasetSplit| {
            if root.is_empty() {
                split.images_subfolder()
            } else {
                format!("{}/{}", root, split.images_subfolder())
            }
        };

        Self {
            train: path(DatasetSplit::Train),
            val: path(DatasetSplit::Valid),
            test: path(DatasetSplit::Test),
            nc: names.len(),
            names,
        }
    }

    /// Render as block-style YAML with keys in declaration order
    pub fn to_yaml(&self) -> SplitterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Write `manifest` to `path`, replacing any existing file.
pub fn write_manifest(path: &Path, manifest: &DataManifest) -> SplitterResult<()> {
    let yaml = manifest.to_yaml()?;
    fs::write(path, yaml).map_err(|e| SplitterError::io(path, e))?;

    info!("{:?} created successfully", path);
    Ok(())
}
