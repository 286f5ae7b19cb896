//! Command line surface. Every flag is optional and defaults to the
//! fingerprint dataset layout, so a bare invocation performs the standard
//! split.

use clap::Parser;
use std::path::PathBuf;

use crate::config::SplitterConfig;
use crate::core::dataset::SplitRatio;
use crate::core::manifest::DEFAULT_CLASS_NAME;

#[derive(Parser, Debug)]
#[command(
    name = "dataset-splitter",
    version,
    about = "Split a folder of images into train/test/valid sets and write a YOLO data manifest."
)]
pub struct Cli {
    /// Folder containing the source images (not searched recursively)
    #[arg(long, default_value = "images")]
    pub source_dir: PathBuf,

    /// Folder that receives train/images, test/images and valid/images
    #[arg(long, default_value = "splits")]
    pub output_root: PathBuf,

    /// Train, test and valid fractions; valid receives whatever train and test leave
    #[arg(long, default_value = "0.8,0.1,0.1", allow_hyphen_values = true)]
    pub ratio: SplitRatio,

    /// Substring a file name must contain to be split
    #[arg(long, default_value = ".tif")]
    pub filter: String,

    /// Where to write the data manifest
    #[arg(long, default_value = "data_fp.yaml")]
    pub manifest: PathBuf,

    /// Split root written into the manifest [default: ../<output-root name>]
    #[arg(long)]
    pub manifest_root: Option<String>,

    /// Class name for the manifest, repeat for several classes [default: fingerprint]
    #[arg(long = "class", value_name = "NAME")]
    pub classes: Vec<String>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write logs to a timestamped file in this folder
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl From<Cli> for SplitterConfig {
    fn from(a: Cli) -> Self {
        let manifest_root = a
            .manifest_root
            .unwrap_or_else(|| SplitterConfig::manifest_root_for(&a.output_root));
        let class_names = if a.classes.is_empty() {
            vec![DEFAULT_CLASS_NAME.to_string()]
        } else {
            a.classes
        };

        SplitterConfig {
            source_dir: a.source_dir,
            output_root: a.output_root,
            split_ratio: a.ratio,
            extension_filter: a.filter,
            manifest_path: a.manifest,
            manifest_root,
            class_names,
            seed: a.seed,
            log_dir: a.log_dir,
            ..SplitterConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_gives_default_config() {
        let config: SplitterConfig = Cli::try_parse_from(["dataset-splitter"]).unwrap().into();
        let default = SplitterConfig::default();

        assert_eq!(config.source_dir, default.source_dir);
        assert_eq!(config.output_root, default.output_root);
        assert_eq!(config.subfolders, default.subfolders);
        assert_eq!(config.split_ratio, default.split_ratio);
        assert_eq!(config.extension_filter, default.extension_filter);
        assert_eq!(config.manifest_path, default.manifest_path);
        assert_eq!(config.manifest(), default.manifest());
        assert_eq!(config.seed, None);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_output_root_moves_manifest_root() {
        let config: SplitterConfig =
            Cli::try_parse_from(["dataset-splitter", "--output-root", "fp_splits"])
                .unwrap()
                .into();
        assert_eq!(config.manifest().train, "../fp_splits/train/images");
    }

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::try_parse_from([
            "dataset-splitter",
            "--ratio",
            "0.7,0.2,0.1",
            "--filter",
            ".png",
            "--manifest-root",
            "/data/splits",
            "--class",
            "fingerprint",
            "--class",
            "palm",
            "--seed",
            "11",
        ])
        .unwrap();
        let config: SplitterConfig = cli.into();

        assert_eq!(config.split_ratio, SplitRatio::new(0.7, 0.2, 0.1));
        assert_eq!(config.extension_filter, ".png");
        assert_eq!(config.seed, Some(11));
        let manifest = config.manifest();
        assert_eq!(manifest.val, "/data/splits/valid/images");
        assert_eq!(manifest.nc, 2);
        assert_eq!(manifest.names, vec!["fingerprint".to_string(), "palm".to_string()]);
    }

    #[test]
    fn test_bad_ratio_is_rejected() {
        assert!(Cli::try_parse_from(["dataset-splitter", "--ratio", "0.8,0.2"]).is_err());
    }
}
