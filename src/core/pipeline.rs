//! The split run: scaffold destination folders, split and copy the source
//! files, then write the manifest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{info, info_span};

use crate::config::SplitterConfig;
use crate::core::dataset::DatasetSplit;
use crate::core::manifest::write_manifest;
use crate::core::operations::{create_subfolders, split_and_copy_files};
use crate::error::SplitterResult;

/// What one split received
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub split: DatasetSplit,
    pub destination: PathBuf,
    pub files: Vec<String>,
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct SplitSummary {
    pub train: SplitOutcome,
    pub test: SplitOutcome,
    pub valid: SplitOutcome,
    pub manifest_path: PathBuf,
}

impl SplitSummary {
    pub fn get(&self, split: DatasetSplit) -> &SplitOutcome {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
            DatasetSplit::Valid => &self.valid,
        }
    }

    pub fn total_files(&self) -> usize {
        self.train.files.len() + self.test.files.len() + self.valid.files.len()
    }
}

/// Run with the configured seed, or the thread RNG when none is set
pub fn run(config: &SplitterConfig) -> SplitterResult<SplitSummary> {
    match config.seed {
        Some(seed) => {
            info!("Shuffling with seed {}", seed);
            run_with_rng(config, &mut StdRng::seed_from_u64(seed))
        }
        None => run_with_rng(config, &mut rand::thread_rng()),
    }
}

/// Run the three steps in order. The first failure aborts the run and
/// leaves whatever was already copied in place.
pub fn run_with_rng<R>(config: &SplitterConfig, rng: &mut R) -> SplitterResult<SplitSummary>
where
    R: Rng + ?Sized,
{
    let _span = info_span!("split_dataset").entered();
    info!(
        "Splitting {:?} into {:?} with ratio {} (filter {:?})",
        config.source_dir, config.output_root, config.split_ratio, config.extension_filter
    );

    create_subfolders(&config.output_root, &config.subfolders)?;

    let destinations = config.destination_folders();
    let plan = split_and_copy_files(
        &config.source_dir,
        &destinations,
        &config.split_ratio,
        &config.extension_filter,
        rng,
    )?;

    write_manifest(&config.manifest_path, &config.manifest())?;

    let [train_dir, test_dir, valid_dir] = destinations;
    let outcome = |split: DatasetSplit, destination: PathBuf| SplitOutcome {
        split,
        destination,
        files: plan
            .get(split)
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect(),
    };

    Ok(SplitSummary {
        train: outcome(DatasetSplit::Train, train_dir),
        test: outcome(DatasetSplit::Test, test_dir),
        valid: outcome(DatasetSplit::Valid, valid_dir),
        manifest_path: config.manifest_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::SplitRatio;
    use crate::core::manifest::DataManifest;
    use crate::error::SplitterError;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> SplitterConfig {
        SplitterConfig {
            source_dir: dir.join("images"),
            output_root: dir.join("splits"),
            manifest_path: dir.join("data_fp.yaml"),
            seed: Some(3),
            ..SplitterConfig::default()
        }
    }

    fn populate(source: &Path, names: &[&str]) {
        fs::create_dir_all(source).unwrap();
        for name in names {
            fs::write(source.join(name), name.as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_full_run_reference_scenario() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config = config_in(temp.path());
        populate(&config.source_dir, &["a.tif", "b.tif", "c.txt", "d.tif", "e.tif"]);

        let summary = run(&config).unwrap();

        assert_eq!(summary.train.files.len(), 3);
        assert!(summary.test.files.is_empty());
        assert_eq!(summary.valid.files.len(), 1);
        assert_eq!(summary.total_files(), 4);

        for split in DatasetSplit::all() {
            let outcome = summary.get(split);
            for name in &outcome.files {
                assert!(outcome.destination.join(name).is_file());
            }
        }
        assert!(!temp.path().join("splits/train/images/c.txt").exists());

        let manifest: DataManifest =
            serde_yaml::from_str(&fs::read_to_string(&config.manifest_path).unwrap()).unwrap();
        assert_eq!(manifest, DataManifest::default());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let first = tempfile::tempdir().expect("create temp dir");
        let second = tempfile::tempdir().expect("create temp dir");
        let names: Vec<String> = (0..30).map(|i| format!("{}.tif", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let config_a = config_in(first.path());
        let config_b = config_in(second.path());
        populate(&config_a.source_dir, &refs);
        populate(&config_b.source_dir, &refs);

        let a = run(&config_a).unwrap();
        let b = run(&config_b).unwrap();
        for split in DatasetSplit::all() {
            assert_eq!(a.get(split).files, b.get(split).files);
        }
    }

    #[test]
    fn test_splits_are_disjoint_and_cover_source() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut config = config_in(temp.path());
        config.split_ratio = SplitRatio::new(0.6, 0.3, 0.3);
        let names: Vec<String> = (0..41).map(|i| format!("scan_{}.tif", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        populate(&config.source_dir, &refs);

        let summary = run(&config).unwrap();

        assert_eq!(summary.train.files.len(), 24);
        assert_eq!(summary.test.files.len(), 12);
        assert_eq!(summary.valid.files.len(), 5);

        let mut seen = HashSet::new();
        for split in DatasetSplit::all() {
            for name in &summary.get(split).files {
                assert!(seen.insert(name.clone()));
            }
        }
        assert_eq!(seen, names.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn test_empty_source_produces_empty_splits_and_manifest() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config = config_in(temp.path());
        fs::create_dir_all(&config.source_dir).unwrap();

        let summary = run(&config).unwrap();

        assert_eq!(summary.total_files(), 0);
        for folder in config.destination_folders() {
            assert!(folder.is_dir());
            assert_eq!(fs::read_dir(folder).unwrap().count(), 0);
        }
        assert!(config.manifest_path.is_file());
    }

    #[test]
    fn test_missing_source_directory_aborts() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config = config_in(temp.path());

        let result = run(&config);
        assert!(matches!(result, Err(SplitterError::Io { .. })));
        // Scaffolding happens before the source is read
        assert!(temp.path().join("splits/valid/images").is_dir());
        assert!(!config.manifest_path.exists());
    }

    #[test]
    fn test_manifest_ignores_copy_destinations() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut config = config_in(temp.path());
        config.output_root = temp.path().join("elsewhere");
        populate(&config.source_dir, &["a.tif"]);

        run(&config).unwrap();

        // manifest_root was not changed, so the manifest keeps the reference paths
        let manifest: DataManifest =
            serde_yaml::from_str(&fs::read_to_string(&config.manifest_path).unwrap()).unwrap();
        assert_eq!(manifest, DataManifest::default());
        // One file: floor(1 * 0.8) == 0, so it falls through to valid
        assert!(temp.path().join("elsewhere/valid/images/a.tif").is_file());
        assert!(!temp.path().join("splits").exists());
    }
}
