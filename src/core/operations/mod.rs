mod file_ops;

pub use file_ops::{copy_files, create_subfolders, list_source_files, split_and_copy_files};
