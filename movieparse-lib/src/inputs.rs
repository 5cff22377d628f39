use std::path::PathBuf;

use movieparse_core::{ConfigError, MappingTable};

use crate::error::PipelineError;

/// Where the names of a batch come from.
#[derive(Debug, Clone)]
pub enum MovieSource {
    /// Free-text titles; each entry is its own canonical name.
    List(Vec<String>),
    /// A directory whose subdirectories are movies.
    RootDir(PathBuf),
}

impl MovieSource {
    /// Build the fresh mapping rows for this batch.
    ///
    /// Root directory entries use the full path as `input` and the directory
    /// name as `canonical_input`. Plain files are ignored and directories are
    /// taken in name order.
    pub fn fresh_mapping(&self) -> Result<MappingTable, PipelineError> {
        let table = match self {
            MovieSource::List(titles) => MappingTable::from_titles(titles.iter().cloned()),
            MovieSource::RootDir(root) => {
                if !root.is_dir() {
                    return Err(ConfigError::InvalidRootDir(root.clone()).into());
                }
                let entries = std::fs::read_dir(root).map_err(|e| PipelineError::io(root, e))?;
                let mut dirs = Vec::new();
                for entry in entries {
                    let entry = entry.map_err(|e| PipelineError::io(root, e))?;
                    let path = entry.path();
                    if !path.is_dir() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().into_owned();
                    dirs.push((path.to_string_lossy().into_owned(), name));
                }
                dirs.sort_by(|a, b| a.1.cmp(&b.1));
                MappingTable::from_entries(dirs)
            }
        };

        if table.is_empty() {
            return Err(ConfigError::EmptyInput.into());
        }
        Ok(table)
    }
}
