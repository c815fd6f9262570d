use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use compositor::Config;
use compositor::events::EventRecord;
use compositor::pane::PaneContext;
use storykeep::parser::ParseError;
use storykeep::payload::MarkdownPayload;

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    /// Body is markdown; output is the rendered pane HTML.
    #[default]
    Pane,
    /// Body is an action expression; output is the resolved href.
    Action,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedWarning {
    /// Substring that must appear in the warning message.
    pub contains: String,

    /// If set, the warning's span must start on this 1-based source line.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    /// `CLICKED` or `WATCHED`.
    pub verb: String,
    pub target: String,
    /// `StoryFragment` or `Pane`; unchecked when omitted.
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub kind: FixtureKind,

    /// Slug of the page the pane or action is on.
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub is_context: bool,

    /// Pane ID recorded on click events.
    #[serde(default = "default_id")]
    pub id: String,

    /// Expected HTML or href (trimmed comparison).
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Expected click events, in order. Unchecked when omitted.
    #[serde(default)]
    pub expect_events: Option<Vec<ExpectedEvent>>,

    /// Expected lexer warnings (action fixtures). If present (even empty),
    /// warning count and content are checked.
    #[serde(default)]
    pub expect_warnings: Option<Vec<ExpectedWarning>>,

    /// Markdown payload applied to pane fixtures.
    #[serde(default)]
    pub payload: MarkdownPayload,
}

fn default_id() -> String {
    "pane".to_string()
}

/// Parse a `.test.md` file into its TOML config and body.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}'); // strip BOM

    if !content.starts_with("---") {
        return Err("missing opening --- frontmatter delimiter".into());
    }

    let after_open = &content[3..];
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest_start = close_pos + 4; // skip \n---
    let body = after_open[rest_start..]
        .strip_prefix("\r\n")
        .or_else(|| after_open[rest_start..].strip_prefix('\n'))
        .unwrap_or(&after_open[rest_start..]);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, body))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

/// What a fixture produced.
struct Produced {
    output: String,
    events: Vec<EventRecord>,
    warnings: Vec<ParseError>,
}

fn run_single_test(path: &Path, site: &Config) -> TestResult {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("cannot read file: {}", e)),
            };
        }
    };

    let (config, body) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("frontmatter error: {}", e)),
            };
        }
    };

    let description = config.description.clone();
    let produced = match config.kind {
        FixtureKind::Pane => {
            let doc = storykeep::parser::parse_markdown(body);
            let ctx = PaneContext {
                id: &config.id,
                slug: &config.slug,
                is_context: config.is_context,
            };
            let rendered = compositor::render_pane(&doc, &config.payload, &ctx, site);
            Produced {
                output: rendered.html,
                events: rendered.events,
                warnings: Vec::new(),
            }
        }
        FixtureKind::Action => {
            let lexed = storykeep::parser::lex(body.trim_end(), 0);
            let output = compositor::pre_parse_action(&lexed.nodes, &config.slug, config.is_context);
            let events = compositor::pre_parse_clicked(&config.id, &lexed.nodes, site)
                .into_iter()
                .collect();
            Produced {
                output,
                events,
                warnings: lexed.diagnostics,
            }
        }
    };

    let checks = [
        config
            .expect_output
            .as_deref()
            .and_then(|expected| check_output(expected, &produced.output)),
        config
            .expect_events
            .as_deref()
            .and_then(|expected| check_events(expected, &produced.events)),
        config
            .expect_warnings
            .as_deref()
            .and_then(|expected| check_warnings(body, &produced.warnings, expected)),
    ];

    let outcome = match checks.into_iter().flatten().next() {
        Some(reason) => TestOutcome::Fail(reason),
        None => TestOutcome::Pass,
    };

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome,
    }
}

fn check_output(expected: &str, actual: &str) -> Option<String> {
    let expected = expected.trim();
    let actual = actual.trim();
    if expected == actual {
        None
    } else {
        Some(format!(
            "output mismatch\n  expected:\n{}\n  actual:\n{}",
            indent(expected),
            indent(actual)
        ))
    }
}

fn indent(text: &str) -> String {
    text.lines().map(|l| format!("    {}", l)).collect::<Vec<_>>().join("\n")
}

/// Check that recorded events match expectations. Returns `Some(reason)` on mismatch.
fn check_events(expected: &[ExpectedEvent], actual: &[EventRecord]) -> Option<String> {
    let described: Vec<serde_json::Value> = actual
        .iter()
        .filter_map(|event| serde_json::to_value(event).ok())
        .collect();

    if described.len() != expected.len() {
        let actual_msgs: Vec<String> = described.iter().map(|e| format!("  - {}", e)).collect();
        return Some(format!(
            "expected {} event(s), got {}\n  actual events:\n{}",
            expected.len(),
            described.len(),
            if actual_msgs.is_empty() {
                "    (none)".to_string()
            } else {
                actual_msgs.join("\n")
            }
        ));
    }

    for (i, (actual, expected)) in described.iter().zip(expected.iter()).enumerate() {
        let type_matches = expected
            .event_type
            .as_deref()
            .is_none_or(|t| actual["type"] == t);
        if actual["verb"] != expected.verb.as_str() || actual["targetSlug"] != expected.target.as_str() || !type_matches {
            return Some(format!(
                "event[{}]: expected {} {}{}, got: {}",
                i,
                expected.verb,
                expected.target,
                expected.event_type.as_deref().map(|t| format!(" ({})", t)).unwrap_or_default(),
                actual
            ));
        }
    }

    None
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Check that actual warnings match expectations. Returns `Some(reason)` on mismatch.
fn check_warnings(
    source: &str,
    diagnostics: &[ParseError],
    expected: &[ExpectedWarning],
) -> Option<String> {
    let actual_warnings: Vec<&ParseError> =
        diagnostics.iter().filter(|d| d.is_warning()).collect();

    if actual_warnings.len() != expected.len() {
        let actual_msgs: Vec<String> = actual_warnings
            .iter()
            .map(|w| format!("  - {}", w.message))
            .collect();
        return Some(format!(
            "expected {} warning(s), got {}\n  actual warnings:\n{}",
            expected.len(),
            actual_warnings.len(),
            if actual_msgs.is_empty() {
                "    (none)".to_string()
            } else {
                actual_msgs.join("\n")
            }
        ));
    }

    for (i, (actual, expected)) in actual_warnings.iter().zip(expected.iter()).enumerate() {
        let msg = &actual.message;

        if !msg.contains(expected.contains.as_str()) {
            return Some(format!(
                "warning[{}]: expected message containing \"{}\", got: {}",
                i, expected.contains, msg
            ));
        }

        if let Some(expected_line) = expected.line {
            let actual_line = byte_offset_to_line(source, actual.span.start);
            if actual_line != expected_line {
                return Some(format!(
                    "warning[{}]: expected on line {}, but span is on line {}",
                    i, expected_line, actual_line
                ));
            }
        }
    }

    None
}

/// Fixture files grouped by category: the subfolder path relative to the
/// root, `""` for files directly in it. Sorted by category, then file.
fn discover(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with(".test.md")) {
                let category = dir
                    .strip_prefix(root)
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                categories.entry(category).or_default().push(path);
            }
        }
    }

    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover(path);
    if categories.is_empty() {
        eprintln!("no .test.md files found in {}", path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(category), files.len());
    }
}

/// ANSI styling for the report, or none.
#[derive(Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn pass(self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(self) -> String {
        self.paint("31", "FAIL")
    }

    fn header(self, text: &str) -> String {
        self.paint("1", text)
    }
}

/// Select the categories to run. Requested names match a category and all
/// of its subcategories.
fn select<'a>(all: &'a BTreeMap<String, Vec<PathBuf>>, requested: &[String]) -> Vec<(&'a str, &'a [PathBuf])> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
    }

    let mut selected = BTreeMap::new();
    for request in requested {
        let request = request.trim_matches('/');
        let prefix = format!("{}/", request);
        let before = selected.len();
        for (category, files) in all {
            if category == request || category.starts_with(&prefix) {
                selected.insert(category.as_str(), files.as_slice());
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                request,
                available.join(", ")
            );
        }
    }
    selected.into_iter().collect()
}

/// Run all `.test.md` files under `path` (or a single file).
/// Returns the exit code: 0 when every fixture passes.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String], site: &Config) -> i32 {
    let style = Style { color: !no_color };

    let single;
    let all;
    let groups: Vec<(Option<&str>, &[PathBuf])> = if path.is_file() {
        single = [path.to_path_buf()];
        vec![(None, &single[..])]
    } else {
        all = discover(path);
        if all.is_empty() {
            eprintln!("no .test.md files found in {}", path.display());
            return 1;
        }
        let selected = select(&all, categories);
        if selected.is_empty() {
            eprintln!("no matching categories found");
            return 1;
        }
        selected.into_iter().map(|(c, files)| (Some(c), files)).collect()
    };

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (category, files) in groups {
        if let Some(category) = category {
            eprintln!();
            eprintln!("{}", style.header(category_label(category)));
        }
        for file in files {
            let result = run_single_test(file, site);
            let label = result
                .description
                .clone()
                .unwrap_or_else(|| file.file_stem().and_then(|s| s.to_str()).unwrap_or("?").to_string());
            match result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), label);
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), label);
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let TestOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("32", "ok"), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("31", "FAILED"),
            passed,
            failed,
            passed + failed
        );
        1
    }
}
