use rand::Rng;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::core::dataset::{shuffle_and_split, DatasetSplit, SplitPlan, SplitRatio};
use crate::error::{SplitterError, SplitterResult};

/// Create each `subfolders` entry under `root_folder`, including any missing
/// parents. Existing directories are left untouched.
///
/// # Arguments
/// * `root_folder` - Root output folder
/// * `subfolders` - Relative paths to create under the root
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` with the full path of every folder, in input order
/// * `Err(SplitterError)` on the first folder that could not be created
pub fn create_subfolders<S>(root_folder: &Path, subfolders: &[S]) -> SplitterResult<Vec<PathBuf>>
where
    S: AsRef<Path>,
{
    let mut created = Vec::with_capacity(subfolders.len());

    for folder in subfolders {
        let folder_path = root_folder.join(folder);
        fs::create_dir_all(&folder_path).map_err(|e| {
            error!("Failed to create directory {:?}: {}", folder_path, e);
            SplitterError::io(&folder_path, e)
        })?;
        debug!("Ensured directory {:?}", folder_path);
        created.push(folder_path);
    }

    info!("Directories created successfully under {:?}", root_folder);
    Ok(created)
}

/// List the names of files directly inside `source_folder` whose name
/// contains `filter` anywhere (a substring match, not an extension match).
///
/// Subdirectories are skipped. Names are returned sorted so that a seeded
/// shuffle gives the same split regardless of directory iteration order.
pub fn list_source_files(source_folder: &Path, filter: &str) -> SplitterResult<Vec<OsString>> {
    let entries = fs::read_dir(source_folder).map_err(|e| {
        error!("Failed to read source directory {:?}: {}", source_folder, e);
        SplitterError::io(source_folder, e)
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SplitterError::io(source_folder, e))?;
        let name = entry.file_name();

        if !name.to_string_lossy().contains(filter) {
            continue;
        }

        // Follows symlinks so a linked image still counts as a file
        let is_file = fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .map_err(|e| SplitterError::io(entry.path(), e))?;
        if is_file {
            files.push(name);
        }
    }

    files.sort();
    info!(
        "Found {} files matching {:?} in {:?}",
        files.len(),
        filter,
        source_folder
    );
    Ok(files)
}

/// Copy each named file from `source_folder` into `destination_folder`,
/// keeping its name and overwriting any file already there.
///
/// Stops at the first failure; files copied before it stay in place.
pub fn copy_files(
    source_folder: &Path,
    file_names: &[OsString],
    destination_folder: &Path,
) -> SplitterResult<Vec<PathBuf>> {
    let mut copied = Vec::with_capacity(file_names.len());

    for file_name in file_names {
        let src_path = source_folder.join(file_name);
        let dest_path = destination_folder.join(file_name);

        if let Err(e) = fs::copy(&src_path, &dest_path) {
            error!(
                "Failed to copy file from {:?} to {:?}: {}",
                src_path, dest_path, e
            );
            return Err(SplitterError::Copy {
                from: src_path,
                to: dest_path,
                source: e,
            });
        }

        debug!("Copied {:?} to {:?}", src_path, dest_path);
        copied.push(dest_path);
    }

    Ok(copied)
}

/// Filter, shuffle, partition and copy the source files into the three
/// destination folders, ordered train, test, valid.
///
/// # Arguments
/// * `source_folder` - Folder containing the source images (not recursed)
/// * `destination_folders` - Train, test and valid destination folders
/// * `split_ratio` - Fractions for train and test; valid takes the rest
/// * `filter` - Substring a file name must contain to take part
/// * `rng` - Randomness source for the shuffle
///
/// # Returns
/// * `Ok(SplitPlan)` with the file names assigned to each split
/// * `Err(SplitterError)` on the first listing or copy failure
pub fn split_and_copy_files<R>(
    source_folder: &Path,
    destination_folders: &[PathBuf; 3],
    split_ratio: &SplitRatio,
    filter: &str,
    rng: &mut R,
) -> SplitterResult<SplitPlan<OsString>>
where
    R: Rng + ?Sized,
{
    let files = list_source_files(source_folder, filter)?;
    let plan = shuffle_and_split(files, split_ratio, rng);

    for (split, destination) in DatasetSplit::all().into_iter().zip(destination_folders) {
        let names = plan.get(split);
        info!("Copying {} files to {:?}", names.len(), destination);
        copy_files(source_folder, names, destination)?;
    }

    Ok(plan)
}
