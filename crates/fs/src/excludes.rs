use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Gitignore-style exclusion patterns supplied by the user, anchored at the
/// scan root.
pub struct ExcludeMatcher {
    matcher: Gitignore,
}

impl Default for ExcludeMatcher {
    fn default() -> Self {
        ExcludeMatcher {
            matcher: Gitignore::empty(),
        }
    }
}

impl ExcludeMatcher {
    /// Build a matcher rooted at `root` from `patterns` (`target/`, `*.tmp`, ...).
    pub fn new<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Self, ignore::Error> {
        let mut builder = GitignoreBuilder::new(root);

        for pat in patterns {
            builder.add_line(None, pat.as_ref())?;
        }

        Ok(ExcludeMatcher {
            matcher: builder.build()?,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// `path` must live under the root the matcher was built with.
    #[inline]
    #[must_use]
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        if self.matcher.is_empty() {
            return false;
        }

        self.matcher
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;
