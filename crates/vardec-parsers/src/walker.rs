use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;

use vardec_core::types::LanguageId;

pub const IGNORE_FILE: &str = ".vardecignore";

pub struct WalkEntry {
    pub path: PathBuf,
    pub language: LanguageId,
}

/// Finds analyzable source files under a root, honoring `.gitignore`,
/// `.vardecignore`, and configured glob patterns.
pub struct FileWalker {
    root: PathBuf,
    excludes: GlobSet,
    root_ignores: Gitignore,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            excludes: GlobSet::empty(),
            root_ignores: root_ignores(root),
        }
    }

    /// Skip files whose root-relative path matches any of `patterns`.
    /// Invalid patterns are logged and dropped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern"),
            }
        }
        self.excludes = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build ignore patterns");
            GlobSet::empty()
        });
        self
    }

    pub fn walk(&self) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE)
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.excludes.is_match(relative) {
                continue;
            }
            if let Some(language) = LanguageId::from_path(&path) {
                entries.push(WalkEntry { path, language });
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Whether a single changed `path` would be picked up by [`walk`](Self::walk).
    /// Only the root's `.gitignore` and `.vardecignore` are consulted.
    pub fn accepts(&self, path: &Path) -> bool {
        if LanguageId::from_path(path).is_none() {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return !self.excludes.is_match(path);
        };
        let hidden = relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
        if hidden || self.excludes.is_match(relative) {
            return false;
        }
        !self
            .root_ignores
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }
}

fn root_ignores(root: &Path) -> Gitignore {
    let mut builder = GitignoreBuilder::new(root);
    for name in [".gitignore", IGNORE_FILE] {
        let file = root.join(name);
        if !file.is_file() {
            continue;
        }
        if let Some(e) = builder.add(&file) {
            tracing::warn!(path = %file.display(), error = %e, "failed to read ignore file");
        }
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to build ignore rules");
        Gitignore::empty()
    })
}
