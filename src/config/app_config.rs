use std::path::{Path, PathBuf};

use crate::core::dataset::{DatasetSplit, SplitRatio};
use crate::core::manifest::{DataManifest, DEFAULT_CLASS_NAME, DEFAULT_MANIFEST_ROOT};

/// Configuration for one split run
///
/// The defaults reproduce the fingerprint dataset layout: `.tif` scans in
/// `images/` split 80/10/10 into `splits/{train,test,valid}/images`, with the
/// manifest written to `data_fp.yaml`.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub source_dir: PathBuf,
    pub output_root: PathBuf,
    /// Destination folders relative to `output_root`, ordered train, test, valid
    pub subfolders: [String; 3],
    pub split_ratio: SplitRatio,
    /// Substring a file name must contain to be split
    pub extension_filter: String,
    pub manifest_path: PathBuf,
    /// Split root written into the manifest, as seen by the training script
    pub manifest_root: String,
    pub class_names: Vec<String>,
    /// Seed for the shuffle; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Directory for a timestamped log file, in addition to stdout
    pub log_dir: Option<PathBuf>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images"),
            output_root: PathBuf::from("splits"),
            subfolders: DatasetSplit::all().map(|split| split.images_subfolder()),
            split_ratio: SplitRatio::default(),
            extension_filter: ".tif".to_string(),
            manifest_path: PathBuf::from("data_fp.yaml"),
            manifest_root: DEFAULT_MANIFEST_ROOT.to_string(),
            class_names: vec![DEFAULT_CLASS_NAME.to_string()],
            seed: None,
            log_dir: None,
        }
    }
}

impl SplitterConfig {
    /// Full destination folder paths, ordered train, test, valid
    pub fn destination_folders(&self) -> [PathBuf; 3] {
        self.subfolders
            .each_ref()
            .map(|folder| self.output_root.join(folder))
    }

    /// Manifest describing this configuration's splits
    pub fn manifest(&self) -> DataManifest {
        DataManifest::new(&self.manifest_root, self.class_names.clone())
    }

    /// Manifest root for a given output root, assuming the training script
    /// runs from a sibling directory: `splits` becomes `../splits`.
    pub fn manifest_root_for(output_root: &Path) -> String {
        let name = output_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| output_root.to_string_lossy().into_owned());
        format!("../{}", name)
    }
}
