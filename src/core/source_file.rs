//! Source file representation.

use std::path::{Path, PathBuf};

use super::Result;

/// A source file with its content loaded.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,
    /// File content as bytes.
    pub content: Vec<u8>,
}

impl SourceFile {
    /// Load a source file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Create from existing content.
    pub fn from_content(path: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Get content as string (lossy conversion).
    pub fn content_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Iterate over lines with both `\n` and `\r\n` terminators normalized away.
    pub fn lines(&self) -> Vec<String> {
        self.content_str().lines().map(str::to_owned).collect()
    }

    /// Count total lines.
    pub fn total_lines(&self) -> usize {
        self.content_str().lines().count()
    }

    /// Path as a displayable string.
    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_from_content() {
        let content = b"fn main() {\n    println!(\"Hello\");\n}\n".to_vec();
        let file = SourceFile::from_content("test.rs", content);

        assert_eq!(file.total_lines(), 3);
        assert_eq!(file.lines()[0], "fn main() {");
    }

    #[test]
    fn test_crlf_normalized() {
        let file = SourceFile::from_content("a.php", b"one\r\ntwo\r\nthree".to_vec());
        assert_eq!(file.lines(), vec!["one", "two", "three"]);
        assert_eq!(file.total_lines(), 3);
    }

    #[test]
    fn test_empty_file() {
        let file = SourceFile::from_content("empty.php", Vec::new());
        assert_eq!(file.total_lines(), 0);
        assert!(file.lines().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SourceFile::load("/nonexistent/definitely/missing.php").unwrap_err();
        assert!(matches!(err, crate::core::Error::Io(_)));
    }
}
