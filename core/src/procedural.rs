//! Procedural text: project names, button labels, pseudo-code output and
//! the per-project file tree.
//!
//! Project names and pseudo-code draw from the narrative stream. Button
//! labels are a pure function of the project name, so a restored game
//! shows the same labels it saved.

use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ButtonLabel {
    pub action: String,
    pub target: String,
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.target)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub kind: NodeKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
    pub is_open: bool,
}

impl FileNode {
    fn file(parent: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::File,
            path: format!("{parent}/{name}"),
            children: Vec::new(),
            is_open: false,
        }
    }

    fn dir(path: String, name: &str, is_open: bool, children: Vec<FileNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Directory,
            path,
            children,
            is_open,
        }
    }

    /// Depth-first count of file leaves.
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Directory => self.children.iter().map(FileNode::file_count).sum(),
        }
    }
}

/// Curated word lists and the generators built on them.
pub struct ProjectGenerator;

impl ProjectGenerator {
    /// "PrefixTheme Suffix", e.g. "QuantumSync Studio".
    pub fn project_name(rng: &mut dyn RandomSource) -> String {
        let prefix = Self::pick(Self::prefixes(), rng);
        let theme = Self::pick(Self::themes(), rng);
        let suffix = Self::pick(Self::suffixes(), rng);
        format!("{prefix}{theme} {suffix}")
    }

    /// Three verb/target labels seeded by the project name, then the
    /// fixed end-to-end test label.
    pub fn button_labels(project_name: &str) -> Vec<ButtonLabel> {
        let mut rng = NameSeededRng::from_name(project_name);
        let mut labels: Vec<ButtonLabel> = (0..3)
            .map(|_| ButtonLabel {
                action: Self::pick(Self::action_verbs(), &mut rng).to_string(),
                target: Self::pick(Self::code_targets(), &mut rng).to_string(),
            })
            .collect();
        labels.push(ButtonLabel {
            action: "Run".into(),
            target: "E2E Tests".into(),
        });
        labels
    }

    /// Terminal output for one click of `action` at project `level`.
    pub fn pseudo_code(action: &str, level: u32, rng: &mut dyn RandomSource) -> Vec<String> {
        let snake = action.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
        let lower = action.to_lowercase();
        let hash = Self::short_hash(rng);
        let files = rng.range_u32_inclusive(1, 20);
        let insertions = rng.range_u32_inclusive(50, 249);
        vec![
            format!("// {action} initiated at level {level}"),
            format!("function {snake}() {{"),
            "  const result = await process.execute();".to_string(),
            "  if (result.success) {".to_string(),
            format!("    console.log(\"✓ {action} completed\");"),
            format!("    return {{ status: 'success', level: {level} }};"),
            "  }".to_string(),
            "}".to_string(),
            String::new(),
            format!("$ git commit -m \"feat: {lower}\""),
            format!("[main {hash}] feat: {lower}"),
            format!(" {files} files changed, {insertions} insertions(+)"),
        ]
    }

    /// Lowercase, whitespace collapsed to dashes.
    pub fn slug(name: &str) -> String {
        name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
    }

    /// The project directory shown beside the terminal.
    pub fn file_tree(project_name: &str) -> FileNode {
        let base = Self::slug(project_name);
        let root = format!("/projects/{base}");
        let src = format!("{root}/src");
        let tests = format!("{root}/tests");

        let project = FileNode::dir(
            root.clone(),
            &base,
            true,
            vec![
                FileNode::dir(
                    src.clone(),
                    "src",
                    false,
                    vec![
                        FileNode::file(&src, "main.ts"),
                        FileNode::file(&src, "core.ts"),
                        FileNode::file(&src, "utils.ts"),
                    ],
                ),
                FileNode::dir(tests.clone(), "tests", false, vec![FileNode::file(&tests, "e2e.test.ts")]),
                FileNode::file(&root, "package.json"),
                FileNode::file(&root, "tsconfig.json"),
                FileNode::file(&root, "README.md"),
            ],
        );
        FileNode::dir(
            "/".into(),
            "/",
            true,
            vec![FileNode::dir("/projects".into(), "projects", true, vec![project])],
        )
    }

    fn short_hash(rng: &mut dyn RandomSource) -> String {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        (0..7)
            .map(|_| ALPHABET[rng.index_below(ALPHABET.len())] as char)
            .collect()
    }

    fn pick(list: &'static [&'static str], rng: &mut dyn RandomSource) -> &'static str {
        list[rng.index_below(list.len())]
    }

    fn prefixes() -> &'static [&'static str] {
        &[
            "Neo", "Quantum", "Cyber", "Holo", "Neural", "Void",
            "Apex", "Prime", "Ultra", "Meta", "Hyper", "Nexus",
            "Stellar", "Cosmic", "Nebula", "Aurora", "Eclipse", "Zenith",
        ]
    }

    fn themes() -> &'static [&'static str] {
        &[
            "Task", "Sync", "Flow", "Wave", "Pulse", "Shift",
            "Link", "Hub", "Net", "Core", "Forge", "Grid",
            "Cloud", "Matrix", "Vault", "Portal", "Stream", "Beacon",
        ]
    }

    fn suffixes() -> &'static [&'static str] {
        &[
            "AI", "Pro", "Suite", "Lab", "Engine", "System",
            "Platform", "Framework", "Studio", "Workspace", "App", "OS",
        ]
    }

    fn action_verbs() -> &'static [&'static str] {
        &[
            "Debug", "Optimize", "Refactor", "Deploy", "Compile", "Test",
            "Scan", "Fix", "Patch", "Update", "Build", "Analyze",
        ]
    }

    fn code_targets() -> &'static [&'static str] {
        &[
            "NeuralNet", "Algorithm", "Module", "Pipeline", "Database", "API",
            "Interface", "Backend", "Frontend", "Middleware", "Cache", "Service",
            "Framework", "Library", "Component", "Function", "Schema", "Query",
        ]
    }
}

/// Small LCG keyed by the character sum of a name.
struct NameSeededRng {
    state: u64,
}

impl NameSeededRng {
    const MUL: u64 = 9301;
    const INC: u64 = 49297;
    const MODULUS: u64 = 233_280;

    fn from_name(name: &str) -> Self {
        let seed = name.chars().map(|c| c as u64).sum::<u64>() % Self::MODULUS;
        Self { state: seed }
    }
}

impl RandomSource for NameSeededRng {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * Self::MUL + Self::INC) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn project_names_are_deterministic() {
        let mut a = RngBank::new(12345).stream(StreamSlot::Narrative);
        let mut b = RngBank::new(12345).stream(StreamSlot::Narrative);
        for _ in 0..20 {
            assert_eq!(ProjectGenerator::project_name(&mut a), ProjectGenerator::project_name(&mut b));
        }
    }

    #[test]
    fn project_name_has_two_words() {
        let mut rng = RngBank::new(9).stream(StreamSlot::Narrative);
        for _ in 0..100 {
            let name = ProjectGenerator::project_name(&mut rng);
            assert_eq!(name.split_whitespace().count(), 2, "bad name: {name}");
        }
    }

    #[test]
    fn labels_depend_only_on_name() {
        let a = ProjectGenerator::button_labels("QuantumSync Studio");
        let b = ProjectGenerator::button_labels("QuantumSync Studio");
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        assert_eq!(a[3].to_string(), "Run E2E Tests");
    }

    #[test]
    fn pseudo_code_shape() {
        let mut rng = RngBank::new(1).stream(StreamSlot::Narrative);
        let lines = ProjectGenerator::pseudo_code("Debug Cache", 3, &mut rng);
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "// Debug Cache initiated at level 3");
        assert_eq!(lines[1], "function debug_cache() {");
        assert!(lines[4].contains('✓'));
        assert!(lines[10].starts_with("[main "));
    }

    #[test]
    fn file_tree_layout() {
        let tree = ProjectGenerator::file_tree("NeoSync App");
        assert_eq!(tree.file_count(), 7);
        let project = &tree.children[0].children[0];
        assert_eq!(project.path, "/projects/neosync-app");
        assert_eq!(project.children[0].children[0].path, "/projects/neosync-app/src/main.ts");
    }
}
