//! Role-to-resume selection

use std::path::{Path, PathBuf};

/// One keyword-to-file rule.
///
/// Rules are evaluated in the order they were added; the first keyword
/// contained in the lowercased role wins.
#[derive(Clone, Debug)]
pub struct ResumeRule {
    keyword: String,
    path: PathBuf,
}

impl ResumeRule {
    /// Create a rule matching roles that contain `keyword`
    /// (case-insensitively).
    pub fn new(keyword: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            path: path.into(),
        }
    }
}

/// Maps a free-text job role to a resume file.
#[derive(Clone, Debug)]
pub struct ResumeSelector {
    rules: Vec<ResumeRule>,
    default_path: PathBuf,
}

impl ResumeSelector {
    /// Create a selector from an ordered rule list and a default file
    pub fn new(rules: Vec<ResumeRule>, default_path: impl Into<PathBuf>) -> Self {
        Self {
            rules,
            default_path: default_path.into(),
        }
    }

    /// The stock rule set over a resume directory.
    ///
    /// "mern" is listed before "react" and "node" so that a combined role
    /// picks the full-stack resume.
    pub fn with_default_rules(resume_dir: &Path) -> Self {
        Self::new(
            vec![
                ResumeRule::new("mern", resume_dir.join("mern.pdf")),
                ResumeRule::new("react", resume_dir.join("reactjs.pdf")),
                ResumeRule::new("node", resume_dir.join("nodejs.pdf")),
                ResumeRule::new("java", resume_dir.join("java.pdf")),
            ],
            resume_dir.join("default.pdf"),
        )
    }

    /// Resolve a resume for `job_role`.
    ///
    /// Falls back to the default file only if it exists at call time, so a
    /// removed default downgrades to sending without an attachment rather
    /// than failing the send.
    pub fn select(&self, job_role: &str) -> Option<PathBuf> {
        let normalized = job_role.to_lowercase();

        for rule in &self.rules {
            if normalized.contains(&rule.keyword) {
                return Some(rule.path.clone());
            }
        }

        self.default_path
            .exists()
            .then(|| self.default_path.clone())
    }
}
