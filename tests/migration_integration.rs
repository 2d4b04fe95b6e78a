//! End-to-end runs of the orchestrator against temporary projects.

mod common;

use common::{mark_documented, pen_declarations, FeedBuilder, Workspace, PEN_SOURCE};
use docref::config::RunConfig;
use docref::{
    Accessibility, DeclarationSet, Error, FindingKind, MemberKind, Orchestrator, TypeKind,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const PEN_ARTIFACT: &str = "../docs/New/Forms/Pen.xml";
const COLOR_ARTIFACT: &str = "../docs/New/Forms/Color.xml";

fn include(file: &str, path: &str) -> String {
    format!("/// <include file=\"{file}\" path=\"{path}\" />")
}

fn run(ws: &Workspace, declarations: &DeclarationSet, run: &RunConfig) -> docref::RunReport {
    let store = ws.store();
    Orchestrator::new(&ws.project(), &store, run)
        .run(declarations)
        .expect("run should succeed")
}

#[test]
fn test_run_inserts_references_for_undocumented_public_declarations() {
    let ws = Workspace::with_pen_fixture();
    let declarations = DeclarationSet::new(pen_declarations()).unwrap();

    let report = run(&ws, &declarations, &RunConfig::default());
    let source = ws.read("src/Pen.cs");

    assert_eq!(report.fixed, 9);
    assert_eq!(report.ineligible, 4);
    assert_eq!(report.skipped_unresolved, 1);
    assert_eq!(report.ambiguous, 1);
    assert_eq!(report.migrated_artifacts, 2);
    assert!(report.failed_partitions.is_empty());

    let expected_snippets = [
        format!(
            "    {}\n    public class Pen",
            include(PEN_ARTIFACT, "Type[@FullName='New.Forms.Pen']/Docs")
        ),
        format!(
            "        {}\n        public Pen()",
            include(PEN_ARTIFACT, "//Member[@MemberName='.ctor']/Docs")
        ),
        format!(
            "        {}\n        public void Draw(int width)",
            include(PEN_ARTIFACT, "//Member[@MemberName='Draw'][0]/Docs")
        ),
        format!(
            "        {}\n        public void Draw(int width, string? label)",
            include(PEN_ARTIFACT, "//Member[@MemberName='Draw'][1]/Docs")
        ),
        format!(
            "        {}\n        public void Map(List<int> items)",
            include(PEN_ARTIFACT, "//Member[@MemberName='Map']/Docs")
        ),
        format!(
            "        {}\n        public void Map(int[] items)",
            include(PEN_ARTIFACT, "//Member[@MemberName='Map'][1]/Docs")
        ),
        format!(
            "    {}\n    public enum Color",
            include(COLOR_ARTIFACT, "Type[@FullName='New.Forms.Color']/Docs")
        ),
        format!(
            "        {}\n        Red,",
            include(COLOR_ARTIFACT, "//Member[@MemberName='Red']/Docs")
        ),
    ];
    for snippet in &expected_snippets {
        assert!(source.contains(snippet.as_str()), "missing:\n{snippet}\n\nin:\n{source}");
    }

    assert!(source.contains("\n        internal void Hidden()"));
    assert!(source.contains("\n    internal enum Shade"));
    assert!(source.contains("\n    public class Undocumented"));
    assert_eq!(source.matches("/// <include").count(), 9);
}

#[test]
fn test_migrated_artifacts_are_rewritten_to_current_namespace() {
    let ws = Workspace::with_pen_fixture();
    let declarations = DeclarationSet::new(pen_declarations()).unwrap();

    run(&ws, &declarations, &RunConfig::default());

    let pen = ws.read("docs/New/Forms/Pen.xml");
    assert!(pen.contains(r#"FullName="New.Forms.Pen""#));
    assert!(!pen.contains("Old.Forms"));
    assert!(!ws.path().join("docs/New/Forms/Shade.xml").exists());
    assert!(!ws.path().join("docs/New/Forms/Undocumented.xml").exists());
}

#[test]
fn test_second_run_is_idempotent() {
    let ws = Workspace::with_pen_fixture();
    let mut declarations = pen_declarations();

    let first = run(
        &ws,
        &DeclarationSet::new(declarations.clone()).unwrap(),
        &RunConfig::default(),
    );
    let after_first = ws.read("src/Pen.cs");

    mark_documented(&mut declarations, &first.fixed_ids);
    let second = run(
        &ws,
        &DeclarationSet::new(declarations).unwrap(),
        &RunConfig::default(),
    );

    assert_eq!(first.fixed_ids.len(), 9);
    assert_eq!(second.fixed, 0);
    assert_eq!(second.migrated_artifacts, 0);
    assert_eq!(ws.read("src/Pen.cs"), after_first);
}

#[test]
fn test_sequential_and_parallel_runs_agree() {
    let parallel = Workspace::with_pen_fixture();
    let sequential = Workspace::with_pen_fixture();

    run(
        &parallel,
        &DeclarationSet::new(pen_declarations()).unwrap(),
        &RunConfig::default(),
    );
    run(
        &sequential,
        &DeclarationSet::new(pen_declarations()).unwrap(),
        &RunConfig::sequential(),
    );

    assert_eq!(parallel.read("src/Pen.cs"), sequential.read("src/Pen.cs"));
}

#[test]
fn test_dry_run_leaves_sources_untouched() {
    let ws = Workspace::with_pen_fixture();
    let declarations = DeclarationSet::new(pen_declarations()).unwrap();
    let run_config = RunConfig {
        dry_run: true,
        ..RunConfig::default()
    };

    let report = run(&ws, &declarations, &run_config);

    assert_eq!(report.fixed, 9);
    assert_eq!(ws.read("src/Pen.cs"), PEN_SOURCE);
}

#[test]
fn test_namespace_outside_mapping_is_skipped_not_reported() {
    let ws = Workspace::with_pen_fixture();
    let declarations = FeedBuilder::new("Pen.cs", PEN_SOURCE)
        .namespace("System.Drawing")
        .ty(TypeKind::Class, "Pen", Accessibility::Public, "public class Pen")
        .build_set();

    let report = run(&ws, &declarations, &RunConfig::default());

    assert_eq!(report.fixed, 0);
    assert_eq!(report.skipped_unresolved, 1);
    assert!(report.failed_partitions.is_empty());
    assert_eq!(ws.read("src/Pen.cs"), PEN_SOURCE);
}

#[test]
fn test_member_without_container_aborts_run() {
    let ws = Workspace::with_pen_fixture();
    let declarations = FeedBuilder::new("Pen.cs", PEN_SOURCE)
        .ty(TypeKind::Class, "Pen", Accessibility::Public, "public class Pen")
        .build();
    let mut declarations = declarations;
    let mut orphan = declarations[0].clone();
    orphan.id = docref::DeclarationId(2);
    orphan.kind = docref::DeclarationKind::Member(MemberKind::Method);
    orphan.name = "Draw".to_string();
    declarations.push(orphan);

    let store = ws.store();
    let result = Orchestrator::new(&ws.project(), &store, &RunConfig::default())
        .run(&DeclarationSet::new(declarations).unwrap());

    assert!(matches!(result, Err(Error::Structural { .. })));
    assert_eq!(ws.read("src/Pen.cs"), PEN_SOURCE);
    assert_eq!(store.migrations(), 0);
}

#[test]
fn test_failed_partition_does_not_block_others() {
    let ws = Workspace::with_pen_fixture();
    let mut declarations = pen_declarations();
    // Draw(int): offset past the end of the file fails the member-level commit
    declarations[2].source.offset = PEN_SOURCE.len() + 10;

    let report = run(
        &ws,
        &DeclarationSet::new(declarations).unwrap(),
        &RunConfig::default(),
    );
    let source = ws.read("src/Pen.cs");

    assert_eq!(report.failed_partitions.len(), 1);
    assert_eq!(report.failed_partitions[0].kind, FindingKind::MemberLevel);
    assert_eq!(report.fixed, 2);
    assert!(source.contains("Type[@FullName='New.Forms.Pen']/Docs"));
    assert!(!source.contains("//Member"));
}

#[test]
fn test_cancelled_run_stops_before_first_partition() {
    let ws = Workspace::with_pen_fixture();
    let declarations = DeclarationSet::new(pen_declarations()).unwrap();
    let store = ws.store();

    let report = Orchestrator::new(&ws.project(), &store, &RunConfig::default())
        .with_cancellation(Arc::new(AtomicBool::new(true)))
        .run(&declarations)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.fixed, 0);
    assert_eq!(ws.read("src/Pen.cs"), PEN_SOURCE);
}

#[test]
fn test_run_projects_reads_feed_from_config() {
    let ws = Workspace::with_pen_fixture();
    ws.write_feed(&pen_declarations());

    let reports = docref::run_projects(&ws.config()).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].project, "forms");
    assert_eq!(reports[0].fixed, 9);
}
