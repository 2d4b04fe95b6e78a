// Shared fixtures for docref integration tests
#![allow(dead_code)]

use docref::config::{ArtifactLayout, DocrefConfig, ProjectConfig, RunConfig};
use docref::{
    Accessibility, Declaration, DeclarationId, DeclarationKind, DeclarationSet, DocumentationStore,
    MemberKind, SourceLocation, TypeKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LEGACY_NS: &str = "Old.Forms";
pub const CURRENT_NS: &str = "New.Forms";

pub const PEN_SOURCE: &str = r#"namespace New.Forms
{
    public class Pen
    {
        public Pen() { }

        public void Draw(int width) { }

        public void Draw(int width, string? label) { }

        public void Map(List<int> items) { }

        public void Map(int[] items) { }

        internal void Hidden() { }

        /// <summary>Already documented.</summary>
        public int Width { get; set; }
    }

    public enum Color
    {
        Red,
        Green,
    }

    internal enum Shade
    {
        Dark,
    }

    public class Undocumented { }
}
"#;

pub const PEN_XML: &str = r#"<Type Name="Pen" FullName="Old.Forms.Pen">
  <Docs><summary>Draws lines.</summary></Docs>
  <Members>
    <Member MemberName=".ctor">
      <MemberSignature Language="C#" Value="public Pen ();" />
      <Docs />
    </Member>
    <Member MemberName="Draw">
      <MemberSignature Language="C#" Value="public void Draw (int width);" />
      <Docs />
    </Member>
    <Member MemberName="Draw">
      <MemberSignature Language="C#" Value="public void Draw (int width, string label);" />
      <Docs />
    </Member>
    <Member MemberName="Map">
      <MemberSignature Language="C#" Value="public void Map (System.Collections.Generic.List&lt;int&gt; items);" />
      <Docs />
    </Member>
    <Member MemberName="Map">
      <MemberSignature Language="C#" Value="public void Map (int[] items);" />
      <Docs />
    </Member>
  </Members>
</Type>
"#;

pub const COLOR_XML: &str = r#"<Type Name="Color" FullName="Old.Forms.Color">
  <Members>
    <Member MemberName="Red"><MemberSignature Language="C#" Value="Red" /></Member>
    <Member MemberName="Green"><MemberSignature Language="C#" Value="Green" /></Member>
  </Members>
</Type>
"#;

pub const SHADE_XML: &str = r#"<Type Name="Shade" FullName="Old.Forms.Shade">
  <Members>
    <Member MemberName="Dark"><MemberSignature Language="C#" Value="Dark" /></Member>
  </Members>
</Type>
"#;

/// Temporary project with a source tree, legacy docs and an empty current docs root.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Source file `src/Pen.cs` plus legacy artifacts for Pen, Color and Shade.
    pub fn with_pen_fixture() -> Self {
        let ws = Self::new();
        ws.write("src/Pen.cs", PEN_SOURCE);
        ws.write("legacy/Old/Forms/Pen.xml", PEN_XML);
        ws.write("legacy/Old/Forms/Color.xml", COLOR_XML);
        ws.write("legacy/Old/Forms/Shade.xml", SHADE_XML);
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read test file")
    }

    pub fn project(&self) -> ProjectConfig {
        ProjectConfig {
            name: Some("forms".to_string()),
            root: self.path().join("src"),
            declarations: self.path().join("declarations.json"),
            docs_root: self.path().join("docs"),
            legacy_namespace: LEGACY_NS.to_string(),
            current_namespace: CURRENT_NS.to_string(),
            include_base: None,
        }
    }

    pub fn config(&self) -> DocrefConfig {
        DocrefConfig {
            legacy_docs_root: self.path().join("legacy"),
            artifact_extension: "xml".to_string(),
            layout: ArtifactLayout::Nested,
            projects: vec![self.project()],
            run: RunConfig::default(),
        }
    }

    pub fn store(&self) -> DocumentationStore {
        let project = self.project();
        DocumentationStore::new(
            project.mapper(),
            project.docs_root,
            self.path().join("legacy"),
            "xml",
            ArtifactLayout::Nested,
        )
    }

    /// Write the feed as the front end would.
    pub fn write_feed(&self, declarations: &[Declaration]) -> PathBuf {
        let json = serde_json::json!({ "declarations": declarations });
        self.write(
            "declarations.json",
            &serde_json::to_string_pretty(&json).expect("Failed to serialize feed"),
        )
    }
}

/// Builds declarations for a source text, locating each by a unique needle.
pub struct FeedBuilder<'s> {
    source: &'s str,
    file: PathBuf,
    namespace: String,
    declarations: Vec<Declaration>,
}

impl<'s> FeedBuilder<'s> {
    pub fn new(file: &str, source: &'s str) -> Self {
        Self {
            source,
            file: PathBuf::from(file),
            namespace: CURRENT_NS.to_string(),
            declarations: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn ty(
        self,
        kind: TypeKind,
        name: &str,
        accessibility: Accessibility,
        needle: &str,
    ) -> Self {
        self.push(None, DeclarationKind::Type(kind), name, accessibility, needle, &[])
    }

    pub fn member(
        self,
        parent: u32,
        kind: MemberKind,
        name: &str,
        accessibility: Accessibility,
        needle: &str,
        parameters: &[&str],
    ) -> Self {
        self.push(
            Some(parent),
            DeclarationKind::Member(kind),
            name,
            accessibility,
            needle,
            parameters,
        )
    }

    pub fn documented(mut self) -> Self {
        if let Some(last) = self.declarations.last_mut() {
            last.has_inline_doc = true;
        }
        self
    }

    /// Id the next declaration will receive.
    pub fn next_id(&self) -> u32 {
        self.declarations.len() as u32 + 1
    }

    pub fn build(self) -> Vec<Declaration> {
        self.declarations
    }

    pub fn build_set(self) -> DeclarationSet {
        DeclarationSet::new(self.declarations).expect("valid feed")
    }

    fn push(
        mut self,
        parent: Option<u32>,
        kind: DeclarationKind,
        name: &str,
        accessibility: Accessibility,
        needle: &str,
        parameters: &[&str],
    ) -> Self {
        let offset = self
            .source
            .find(needle)
            .unwrap_or_else(|| panic!("needle not found: {needle}"));
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let id = self.next_id();
        self.declarations.push(Declaration {
            id: DeclarationId(id),
            parent: parent.map(DeclarationId),
            kind,
            name: name.to_string(),
            namespace: self.namespace.clone(),
            accessibility,
            has_inline_doc: false,
            source: SourceLocation {
                file: self.file.clone(),
                offset,
                indent: self.source[line_start..offset].to_string(),
            },
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        });
        self
    }
}

/// Declarations for [`PEN_SOURCE`]. Ids: 1 Pen, 2 ctor, 3-4 Draw, 5-6 Map,
/// 7 Hidden, 8 Width, 9 Color, 10 Red, 11 Green, 12 Shade, 13 Dark, 14 Undocumented.
pub fn pen_declarations() -> Vec<Declaration> {
    use Accessibility::{Internal, Public, Unspecified};

    FeedBuilder::new("Pen.cs", PEN_SOURCE)
        .ty(TypeKind::Class, "Pen", Public, "public class Pen")
        .member(1, MemberKind::Constructor, "Pen", Public, "public Pen()", &[])
        .member(1, MemberKind::Method, "Draw", Public, "public void Draw(int width)", &["int"])
        .member(
            1,
            MemberKind::Method,
            "Draw",
            Public,
            "public void Draw(int width, string? label)",
            &["int", "string?"],
        )
        .member(
            1,
            MemberKind::Method,
            "Map",
            Public,
            "public void Map(List<int> items)",
            &["List<int>"],
        )
        .member(1, MemberKind::Method, "Map", Public, "public void Map(int[] items)", &["int[]"])
        .member(1, MemberKind::Method, "Hidden", Internal, "internal void Hidden()", &[])
        .member(1, MemberKind::Property, "Width", Public, "public int Width", &[])
        .documented()
        .ty(TypeKind::Enum, "Color", Public, "public enum Color")
        .member(9, MemberKind::EnumMember, "Red", Unspecified, "Red,", &[])
        .member(9, MemberKind::EnumMember, "Green", Unspecified, "Green,", &[])
        .ty(TypeKind::Enum, "Shade", Internal, "internal enum Shade")
        .member(12, MemberKind::EnumMember, "Dark", Unspecified, "Dark,", &[])
        .ty(TypeKind::Class, "Undocumented", Public, "public class Undocumented")
        .build()
}

/// Mark the given declarations as carrying an inline comment, as a re-parse would.
pub fn mark_documented(declarations: &mut [Declaration], ids: &[DeclarationId]) {
    for decl in declarations.iter_mut() {
        if ids.contains(&decl.id) {
            decl.has_inline_doc = true;
        }
    }
}
