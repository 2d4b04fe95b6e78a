//! Documentation store with copy-on-miss migration.
//!
//! The store maps `(namespace, unit)` pairs onto artifact files under the
//! current documentation root. When an artifact is missing it is copied from
//! the legacy store and every occurrence of the legacy namespace root in its
//! content is rewritten to the current root.
//!
//! ## Thread Safety
//!
//! All filesystem state changes happen inside one store-wide mutex, and the
//! existence probe runs inside the same section. Concurrent resolvers of the
//! same artifact therefore see exactly one copy-and-rewrite, and a handle is
//! only handed out once the rewritten content is on disk.

pub mod artifact;

pub use artifact::{parse_members, MemberEntry};

use crate::config::ArtifactLayout;
use crate::errors::{Error, Result};
use crate::namespace::NamespaceMapper;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// An artifact that exists under the current documentation root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactHandle {
    pub path: PathBuf,
    /// Namespace after mapping to the current root
    pub namespace: String,
    pub unit_name: String,
}

impl ArtifactHandle {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.unit_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.unit_name)
        }
    }
}

/// Why a lookup produced no artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unresolved {
    /// Namespace lies outside both the legacy and the current root
    OutsideMapping,
    /// Neither store has an artifact for the unit
    NoArtifact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(ArtifactHandle),
    Unresolved(Unresolved),
}

impl Resolution {
    pub fn found(self) -> Option<ArtifactHandle> {
        match self {
            Self::Found(handle) => Some(handle),
            Self::Unresolved(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct DocumentationStore {
    mapper: NamespaceMapper,
    docs_root: PathBuf,
    legacy_docs_root: PathBuf,
    extension: String,
    layout: ArtifactLayout,
    /// Serializes probe + copy + rewrite
    guard: Mutex<()>,
    migrations: AtomicUsize,
    /// Parsed member entries; artifacts are immutable once handed out
    members: RwLock<HashMap<PathBuf, Arc<Vec<MemberEntry>>>>,
}

impl DocumentationStore {
    pub fn new(
        mapper: NamespaceMapper,
        docs_root: impl Into<PathBuf>,
        legacy_docs_root: impl Into<PathBuf>,
        extension: impl Into<String>,
        layout: ArtifactLayout,
    ) -> Self {
        Self {
            mapper,
            docs_root: docs_root.into(),
            legacy_docs_root: legacy_docs_root.into(),
            extension: extension.into(),
            layout,
            guard: Mutex::new(()),
            migrations: AtomicUsize::new(0),
            members: RwLock::new(HashMap::new()),
        }
    }

    pub fn mapper(&self) -> &NamespaceMapper {
        &self.mapper
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Number of artifacts copied from the legacy store so far.
    pub fn migrations(&self) -> usize {
        self.migrations.load(Ordering::SeqCst)
    }

    /// Locate the artifact for a unit, migrating it from the legacy store on a miss.
    pub fn resolve(&self, namespace: &str, unit_name: &str) -> Result<Resolution> {
        let Some(current_ns) = self.mapper.to_current(namespace) else {
            trace!(namespace, unit_name, "namespace outside mapping");
            return Ok(Resolution::Unresolved(Unresolved::OutsideMapping));
        };
        let destination = self.artifact_path(&self.docs_root, &current_ns, unit_name);
        let handle = ArtifactHandle {
            path: destination.clone(),
            namespace: current_ns,
            unit_name: unit_name.to_string(),
        };

        let _section = self.guard.lock();

        if destination.is_file() {
            return Ok(Resolution::Found(handle));
        }

        let Some(legacy_ns) = self.mapper.to_legacy(namespace) else {
            return Ok(Resolution::Unresolved(Unresolved::OutsideMapping));
        };
        let source = self.artifact_path(&self.legacy_docs_root, &legacy_ns, unit_name);
        if !source.is_file() {
            trace!(path = %source.display(), "no artifact in either store");
            return Ok(Resolution::Unresolved(Unresolved::NoArtifact));
        }

        if self.migrate(&source, &destination)? {
            self.migrations.fetch_add(1, Ordering::SeqCst);
            debug!(
                from = %source.display(),
                to = %destination.display(),
                "migrated legacy artifact"
            );
        }
        Ok(Resolution::Found(handle))
    }

    /// Member entries of an artifact, parsed once per run.
    pub fn members(&self, handle: &ArtifactHandle) -> Result<Arc<Vec<MemberEntry>>> {
        if let Some(entries) = self.members.read().get(&handle.path) {
            return Ok(Arc::clone(entries));
        }
        let content = fs::read_to_string(&handle.path)
            .map_err(|e| Error::io("Failed to read artifact", &handle.path, e))?;
        let entries = Arc::new(parse_members(&content));
        self.members
            .write()
            .entry(handle.path.clone())
            .or_insert_with(|| Arc::clone(&entries));
        Ok(entries)
    }

    fn artifact_path(&self, root: &Path, namespace: &str, unit_name: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        match self.layout {
            ArtifactLayout::Nested => path.extend(namespace.split('.').filter(|s| !s.is_empty())),
            ArtifactLayout::Flat if !namespace.is_empty() => path.push(namespace),
            ArtifactLayout::Flat => {}
        }
        path.push(format!("{unit_name}.{}", self.extension));
        path
    }

    /// Write the legacy artifact, already rewritten to the current root, to
    /// `destination`. Returns false if the destination appeared in the
    /// meantime. Nothing is left on disk when the copy fails.
    fn migrate(&self, source: &Path, destination: &Path) -> Result<bool> {
        let bytes =
            fs::read(source).map_err(|e| Error::io("Failed to read legacy artifact", source, e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            Error::io(
                "Artifact is not valid UTF-8",
                source,
                std::io::Error::new(ErrorKind::InvalidData, e),
            )
        })?;
        let rewritten = content.replace(self.mapper.legacy_root(), self.mapper.current_root());

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io("Failed to create artifact directory", parent, e))?;
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(Error::io("Failed to create artifact", destination, e)),
        };
        let written = file
            .write_all(rewritten.as_bytes())
            .and_then(|_| file.sync_all());
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(destination);
            return Err(Error::io("Failed to copy artifact", destination, e));
        }
        Ok(true)
    }
}
