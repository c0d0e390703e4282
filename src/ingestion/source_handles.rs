use anyhow::Context;
use std::{collections::HashSet, path::Path};

/// Header names accepted as the first line of the handles file.
const HEADER_NAMES: [&str; 2] = ["handle", "twitter handle"];

/// Ordered list of unique source handles to collect records for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceHandles(Vec<String>);

impl SourceHandles {
    /// Parses handles, one per line. Leading `@` is stripped, blank lines and `#` comments are
    /// skipped, optional header line is dropped and duplicates are removed keeping the first
    /// occurrence.
    pub fn parse(content: &str) -> Self {
        let mut seen = HashSet::new();
        let handles = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .enumerate()
            .filter(|(index, line)| {
                *index > 0
                    || !HEADER_NAMES
                        .iter()
                        .any(|header| line.eq_ignore_ascii_case(header))
            })
            .map(|(_, line)| line.trim_start_matches('@').trim().to_string())
            .filter(|handle| !handle.is_empty() && seen.insert(handle.to_lowercase()))
            .collect();

        Self(handles)
    }

    /// Loads handles from the file at the specified path.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read source handles ({}).", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
