//! Input pattern resolution using glob

use super::{Source, STDIN_MARKER};
use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

/// Resolve file patterns to existing files, sorted and deduplicated
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !has_glob_meta(pattern) {
            let path = Path::new(pattern);
            if !path.is_file() {
                return Err(CliError::FileNotFound(pattern.clone()).into());
            }
            files.push(path.to_path_buf());
            continue;
        }

        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    files.sort();
    files.dedup();

    Ok(files)
}

/// Resolve `-i` arguments, where `-` stands for standard input
///
/// Standard input, when requested, comes first; files follow in sorted order.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<Source>> {
    let (stdin, patterns): (Vec<&String>, Vec<&String>) =
        inputs.iter().partition(|input| input.as_str() == STDIN_MARKER);

    let mut sources = Vec::new();
    if !stdin.is_empty() {
        sources.push(Source::Stdin);
    }
    if !patterns.is_empty() {
        let patterns: Vec<String> = patterns.into_iter().cloned().collect();
        sources.extend(resolve_patterns(&patterns)?.into_iter().map(Source::File));
    }

    Ok(sources)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, "text").unwrap();
        path
    }

    #[test]
    fn test_glob_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let b = touch(&dir, "b.md");
        let a = touch(&dir, "a.md");
        touch(&dir, "c.txt");

        let pattern = format!("{}/*.md", dir.path().display());
        let files = resolve_patterns(&[pattern.clone(), pattern]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_missing_literal_path() {
        let err = resolve_patterns(&["/nonexistent/notes.md".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[unclosed*".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_pattern_without_matches() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.md", dir.path().display());
        let err = resolve_patterns(&[pattern]).unwrap_err();
        assert!(err.to_string().contains("No files found"));
    }

    #[test]
    fn test_stdin_marker_comes_first() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.md");

        let inputs = vec![a.display().to_string(), "-".to_string()];
        let sources = resolve_inputs(&inputs).unwrap();
        assert_eq!(sources, vec![Source::Stdin, Source::File(a)]);
        assert_eq!(resolve_inputs(&["-".to_string()]).unwrap(), vec![Source::Stdin]);
    }
}
