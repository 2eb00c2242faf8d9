//! Filesystem Project Resolver Adapter
//!
//! Reads projects from a directory laid out as:
//!
//! ```text
//! <root>/
//!   <project_id>.smss                      # key=value project properties
//!   <project_id>/app_root/version/assets/  # asset directory
//! ```
//!
//! Properties use the Java properties format: `key=value`, `key: value` or
//! `key value`, `#`/`!` comments, and `\` line continuations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::ProjectId;
use crate::ports::{ProjectContextResolver, ProjectLookupError};

const ASSET_SUBPATH: [&str; 3] = ["app_root", "version", "assets"];

/// File-based project store.
#[derive(Debug, Clone)]
pub struct FilesystemProjectResolver {
    root: PathBuf,
}

impl FilesystemProjectResolver {
    /// Create a resolver rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rejects ids that would escape the root directory.
    fn checked_name<'a>(&self, project_id: &'a ProjectId) -> Result<&'a str, ProjectLookupError> {
        let name = project_id.as_str();
        if name == "." || name == ".." || name.contains(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(ProjectLookupError::Malformed(format!(
                "project id '{}' is not a valid directory name",
                name
            )));
        }
        Ok(name)
    }

    fn smss_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.smss", name))
    }

    fn asset_path(&self, name: &str) -> PathBuf {
        ASSET_SUBPATH
            .iter()
            .fold(self.root.join(name), |path, part| path.join(part))
    }
}

#[async_trait]
impl ProjectContextResolver for FilesystemProjectResolver {
    async fn get_config(
        &self,
        project_id: &ProjectId,
    ) -> Result<HashMap<String, String>, ProjectLookupError> {
        let name = self.checked_name(project_id)?;
        let path = self.smss_path(name);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProjectLookupError::NotFound(project_id.clone()));
            }
            Err(e) => {
                return Err(ProjectLookupError::Io(format!("{}: {}", path.display(), e)));
            }
        };

        tracing::debug!(project_id = %project_id, path = %path.display(), "Loaded project properties");
        parse_properties(&content)
    }

    async fn get_asset_directory(
        &self,
        project_id: &ProjectId,
    ) -> Result<String, ProjectLookupError> {
        let name = self.checked_name(project_id)?;
        if !fs::try_exists(self.smss_path(name))
            .await
            .map_err(|e| ProjectLookupError::Io(e.to_string()))?
        {
            return Err(ProjectLookupError::NotFound(project_id.clone()));
        }
        Ok(self.asset_path(name).to_string_lossy().into_owned())
    }
}

/// Parses Java-style properties text.
pub fn parse_properties(content: &str) -> Result<HashMap<String, String>, ProjectLookupError> {
    let mut properties = HashMap::new();
    let mut logical = String::new();

    for (number, line) in content.lines().enumerate() {
        let piece = if logical.is_empty() { line.trim() } else { line.trim_start() };

        if logical.is_empty() && (piece.is_empty() || piece.starts_with('#') || piece.starts_with('!')) {
            continue;
        }

        if ends_with_continuation(piece) {
            logical.push_str(&piece[..piece.len() - 1]);
            continue;
        }
        logical.push_str(piece);

        let (key, value) = split_entry(&logical);
        if key.is_empty() {
            return Err(ProjectLookupError::Malformed(format!(
                "line {}: entry has no key",
                number + 1
            )));
        }
        properties.insert(unescape(key), unescape(value));
        logical.clear();
    }

    if !logical.is_empty() {
        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key), unescape(value));
    }

    Ok(properties)
}

/// A trailing backslash continues the line unless it is itself escaped.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (line[..i].trim_end(), line[i + 1..].trim()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest.trim());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
