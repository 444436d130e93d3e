// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write file content, creating parent directories as needed
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Inline text wins over a file path; `None` when neither is given
pub async fn text_or_file(text: Option<&str>, path: Option<&Path>) -> Result<Option<String>> {
    match (text, path) {
        (Some(text), _) => Ok(Some(text.to_string())),
        (None, Some(path)) => read_file_content(path).await.map(Some),
        (None, None) => Ok(None),
    }
}

/// Split a REPL line into its command word and the trimmed remainder
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}
