//! Test utilities for stratum
//!
//! Temporary directories under `.tmp/` and helpers to lay out site fixtures
//! (a `stratum.toml` plus its template files) for integration tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name used for site fixtures
pub const SITE_FILE: &str = "stratum.toml";

/// Outer template used by most fixtures
pub const HTML_TEMPLATE: &str = "<html>{{ content }}</html>";

/// Inner template used by most fixtures; note the trailing newline
pub const DIV_TEMPLATE: &str = "<div>{{ content }}</div>\n";

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory is unavailable or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use stratum_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("a.html"), "{{ content }}").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Writes a site fixture into `dir`
///
/// `templates` are `(relative path, source)` pairs; parent directories are
/// created as needed. Returns the path of the written site file.
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn write_site(dir: &Path, site_toml: &str, templates: &[(&str, &str)]) -> PathBuf {
    for (name, source) in templates {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create template directory");
        }
        std::fs::write(&path, source)
            .unwrap_or_else(|e| panic!("Failed to write template {}: {}", name, e));
    }

    let site = dir.join(SITE_FILE);
    std::fs::write(&site, site_toml).expect("Failed to write site file");
    site
}

/// Site with a `test` layout (parent `.`) and a root-level default layout
///
/// Tree: root `""` of type `root` with a `context` child `page`.
pub fn basic_site(dir: &Path) -> PathBuf {
    let toml = r#"
[[types]]
name = "context"

[[layouts]]
name = "test"
parent = "."
template = "templates/div.html"

[[layouts]]
context = "root"
template = "templates/html.html"

[tree]
type = "root"

[[tree.children]]
name = "page"
type = "context"
"#;
    write_site(
        dir,
        toml,
        &[
            ("templates/div.html", DIV_TEMPLATE),
            ("templates/html.html", HTML_TEMPLATE),
        ],
    )
}
