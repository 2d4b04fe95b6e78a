//! All-or-nothing application of a batch of edits.
//!
//! New contents for every affected file are computed in memory first and
//! written to sibling temp files. Originals are replaced by rename only once
//! every temp file is on disk; a failed rename rolls back the files already
//! replaced.

use crate::core::Edit;
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const TEMP_SUFFIX: &str = ".docref-tmp";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub files: usize,
    pub edits: usize,
}

/// Edits staged against files under one project root.
#[derive(Debug)]
pub struct Transaction {
    root: PathBuf,
    label: String,
    files: BTreeMap<PathBuf, BTreeMap<usize, Edit>>,
}

struct StagedFile {
    target: PathBuf,
    temp: PathBuf,
    original: String,
    updated: String,
}

impl Transaction {
    pub fn new(root: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            label: label.into(),
            files: BTreeMap::new(),
        }
    }

    /// Stage an edit. A second edit at the same file and offset is dropped.
    pub fn stage(&mut self, edit: Edit) -> bool {
        let offsets = self.files.entry(edit.file.clone()).or_default();
        if offsets.contains_key(&edit.offset) {
            return false;
        }
        offsets.insert(edit.offset, edit);
        true
    }

    pub fn len(&self) -> usize {
        self.files.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Apply every staged edit, or none of them.
    pub fn commit(self, dry_run: bool) -> Result<CommitSummary> {
        let summary = CommitSummary {
            files: self.files.len(),
            edits: self.len(),
        };

        let staged = self.prepare()?;
        if dry_run || staged.is_empty() {
            return Ok(summary);
        }

        self.write_temp_files(&staged)?;
        self.replace_originals(&staged)?;

        debug!(
            label = %self.label,
            files = summary.files,
            edits = summary.edits,
            "committed edits"
        );
        Ok(summary)
    }

    fn prepare(&self) -> Result<Vec<StagedFile>> {
        self.files
            .iter()
            .map(|(file, edits)| {
                let target = self.root.join(file);
                let original = fs::read_to_string(&target).map_err(|e| {
                    self.failure(format!("cannot read {}: {}", target.display(), e))
                })?;
                let updated = apply_edits(&original, edits.values())
                    .map_err(|message| self.failure(format!("{}: {}", target.display(), message)))?;
                Ok(StagedFile {
                    temp: temp_path(&target),
                    target,
                    original,
                    updated,
                })
            })
            .collect()
    }

    fn write_temp_files(&self, staged: &[StagedFile]) -> Result<()> {
        for (idx, file) in staged.iter().enumerate() {
            if let Err(e) = fs::write(&file.temp, &file.updated) {
                remove_temp_files(&staged[..=idx]);
                return Err(self.failure(format!(
                    "cannot write temporary file {}: {}",
                    file.temp.display(),
                    e
                )));
            }
        }
        Ok(())
    }

    fn replace_originals(&self, staged: &[StagedFile]) -> Result<()> {
        for (idx, file) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(&file.temp, &file.target) {
                restore_originals(&staged[..idx]);
                remove_temp_files(&staged[idx..]);
                return Err(self.failure(format!(
                    "cannot replace {}: {}",
                    file.target.display(),
                    e
                )));
            }
        }
        Ok(())
    }

    fn failure(&self, message: String) -> Error {
        Error::commit(self.label.clone(), message)
    }
}

/// Insert edits, given in ascending offset order.
fn apply_edits<'a>(
    original: &str,
    edits: impl Iterator<Item = &'a Edit>,
) -> std::result::Result<String, String> {
    let mut updated = String::with_capacity(original.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.offset > original.len() {
            return Err(format!(
                "offset {} is past the end of the file ({} bytes)",
                edit.offset,
                original.len()
            ));
        }
        if !original.is_char_boundary(edit.offset) {
            return Err(format!("offset {} splits a character", edit.offset));
        }
        updated.push_str(&original[cursor..edit.offset]);
        updated.push_str(&edit.text);
        cursor = edit.offset;
    }
    updated.push_str(&original[cursor..]);
    Ok(updated)
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_SUFFIX);
    target.with_file_name(name)
}

fn remove_temp_files(staged: &[StagedFile]) {
    for file in staged {
        let _ = fs::remove_file(&file.temp);
    }
}

fn restore_originals(staged: &[StagedFile]) {
    for file in staged {
        if let Err(e) = fs::write(&file.target, &file.original) {
            tracing::error!(
                path = %file.target.display(),
                error = %e,
                "failed to roll back file"
            );
        }
    }
}
