//! Whole-project batch runs.
//!
//! Declarations are classified up front and split into type-level and
//! member-level partitions. Each partition is analyzed on the rayon pool,
//! turned into edits, and committed as one transaction. A failed partition
//! is recorded and the next one still runs; a structural violation in the
//! declaration feed aborts the run before anything is written.

use crate::classify::{classify, Classification, Target};
use crate::config::{DocrefConfig, ProjectConfig, RunConfig};
use crate::core::{Declaration, DeclarationId, Finding, FindingKind, Locator, ResolvedPointer};
use crate::disambiguate::{disambiguate, OverloadIndex};
use crate::edits::{plan, Transaction};
use crate::errors::Result;
use crate::feed::DeclarationSet;
use crate::store::{ArtifactHandle, DocumentationStore, Resolution};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug_span, info, trace, warn};

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PartitionFailure {
    pub kind: FindingKind,
    pub message: String,
}

/// Outcome of one project run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub project: String,
    /// Declarations that received a reference
    pub fixed: usize,
    /// Eligible declarations with no documentation in either store
    pub skipped_unresolved: usize,
    /// Documented or non-public declarations
    pub ineligible: usize,
    /// References emitted without an overload index although one was needed
    pub ambiguous: usize,
    /// Artifacts copied from the legacy store during this run
    pub migrated_artifacts: usize,
    pub failed_partitions: Vec<PartitionFailure>,
    /// Set when the run stopped early between partitions
    pub cancelled: bool,
    #[serde(skip)]
    pub fixed_ids: Vec<DeclarationId>,
}

enum Analysis<'a> {
    Found {
        finding: Finding<'a>,
        overload: OverloadIndex,
    },
    Unresolved,
}

pub struct Orchestrator<'a> {
    project_root: PathBuf,
    include_base: PathBuf,
    store: &'a DocumentationStore,
    parallel: bool,
    dry_run: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(project: &ProjectConfig, store: &'a DocumentationStore, run: &RunConfig) -> Self {
        Self {
            project_root: project.root.clone(),
            include_base: project.include_base().to_path_buf(),
            store,
            parallel: run.parallel,
            dry_run: run.dry_run,
            cancel: None,
        }
    }

    /// Stop before the next partition once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run(&self, declarations: &DeclarationSet) -> Result<RunReport> {
        let mut report = RunReport::default();
        let migrations_before = self.store.migrations();

        let all: Vec<&Declaration> = declarations.iter().collect();
        let classified = self.map(&all, |decl| {
            classify(decl, declarations).map(|c| (*decl, c))
        });

        let mut partitions: BTreeMap<FindingKind, Vec<(&Declaration, Target)>> = BTreeMap::new();
        for entry in classified {
            match entry? {
                (decl, Classification::Eligible(target)) => partitions
                    .entry(target.finding_kind())
                    .or_default()
                    .push((decl, target)),
                (_, Classification::Ineligible(_)) => report.ineligible += 1,
            }
        }

        for kind in FindingKind::ALL {
            if self.is_cancelled() {
                report.cancelled = true;
                break;
            }
            let Some(targets) = partitions.get(&kind) else {
                continue;
            };
            let _span = debug_span!("partition", %kind, declarations = targets.len()).entered();

            if let Err(e) = self.run_partition(kind, targets, &mut report) {
                warn!(%kind, error = %e, "partition skipped");
                report.failed_partitions.push(PartitionFailure {
                    kind,
                    message: e.to_string(),
                });
            }
        }

        report.migrated_artifacts = self.store.migrations() - migrations_before;
        Ok(report)
    }

    fn run_partition<'d>(
        &self,
        kind: FindingKind,
        targets: &[(&'d Declaration, Target)],
        report: &mut RunReport,
    ) -> Result<()> {
        let analyses = self
            .map(targets, |(decl, target)| self.analyze(*decl, target))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut transaction = Transaction::new(&self.project_root, kind.as_str());
        let mut fixed_ids = Vec::new();
        let mut unresolved = 0;
        let mut ambiguous = 0;

        for analysis in analyses {
            match analysis {
                Analysis::Found { finding, overload } => {
                    if transaction.stage(plan(finding.declaration, &finding.pointer)) {
                        fixed_ids.push(finding.declaration.id);
                        if overload.is_ambiguous() {
                            ambiguous += 1;
                        }
                    }
                }
                Analysis::Unresolved => unresolved += 1,
            }
        }

        let summary = transaction.commit(self.dry_run)?;

        report.fixed += summary.edits;
        report.skipped_unresolved += unresolved;
        report.ambiguous += ambiguous;
        report.fixed_ids.extend(fixed_ids);
        Ok(())
    }

    fn analyze<'d>(&self, decl: &'d Declaration, target: &Target) -> Result<Analysis<'d>> {
        let handle = match self.store.resolve(&target.namespace, &target.unit_name)? {
            Resolution::Found(handle) => handle,
            Resolution::Unresolved(reason) => {
                trace!(declaration = %decl.id, name = %decl.name, ?reason, "no documentation");
                return Ok(Analysis::Unresolved);
            }
        };

        let (locator, overload) = match &target.member {
            None => (
                Locator::Type {
                    full_name: handle.full_name(),
                },
                OverloadIndex::NotNeeded,
            ),
            Some(member) => {
                let entries = self.store.members(&handle)?;
                let overload = disambiguate(&decl.parameters, &entries, &member.name);
                (
                    Locator::Member {
                        name: member.name.clone(),
                        index: overload.index(),
                    },
                    overload,
                )
            }
        };

        Ok(Analysis::Found {
            finding: Finding {
                declaration: decl,
                pointer: ResolvedPointer {
                    artifact_relative_path: self.relative_artifact_path(&handle),
                    locator,
                },
            },
            overload,
        })
    }

    fn relative_artifact_path(&self, handle: &ArtifactHandle) -> String {
        let relative = pathdiff::diff_paths(&handle.path, &self.include_base)
            .unwrap_or_else(|| handle.path.clone());
        to_slash(&relative)
    }

    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Path with `/` separators regardless of platform.
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            Component::ParentDir => Some("..".to_string()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Run every configured project in order.
pub fn run_projects(config: &DocrefConfig) -> Result<Vec<RunReport>> {
    config
        .projects
        .iter()
        .map(|project| -> Result<RunReport> {
            let declarations = DeclarationSet::load(&project.declarations)?;
            let store = DocumentationStore::new(
                project.mapper(),
                &project.docs_root,
                &config.legacy_docs_root,
                &config.artifact_extension,
                config.layout,
            );
            let mut report = Orchestrator::new(project, &store, &config.run).run(&declarations)?;
            report.project = project.display_name();
            info!(
                project = %report.project,
                fixed = report.fixed,
                skipped = report.skipped_unresolved,
                ambiguous = report.ambiguous,
                "project complete"
            );
            Ok(report)
        })
        .collect()
}
