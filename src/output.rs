//! Markdown document output.
//!
//! A document is an index of every collected path followed by the body: either
//! each file's content in a fenced block, or just the paths again. Entries are
//! written in the order they were collected, never filtered or reordered.

use crate::error::{KslistError, Result};
use crate::types::FileDescriptor;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Index heading of tree and list documents.
pub const INDEX_HEADING: &str = "File Index";
/// Index heading of the document holding the files directly in a root.
pub const ROOT_INDEX_HEADING: &str = "Root File Index";

/// Renders a document into a string.
pub fn format_document(files: &[FileDescriptor], paths_only: bool) -> io::Result<String> {
    format_with_heading(files, INDEX_HEADING, paths_only)
}

pub fn format_with_heading(
    files: &[FileDescriptor],
    heading: &str,
    paths_only: bool,
) -> io::Result<String> {
    let mut buf = Vec::with_capacity(1024);
    render(&mut buf, files, heading, paths_only)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a document to `path`, replacing any existing file.
pub fn write_document(
    files: &[FileDescriptor],
    path: impl AsRef<Path>,
    paths_only: bool,
) -> Result<()> {
    write_with_heading(files, path, INDEX_HEADING, paths_only)
}

pub fn write_with_heading(
    files: &[FileDescriptor],
    path: impl AsRef<Path>,
    heading: &str,
    paths_only: bool,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| KslistError::io(path, e))?;
    let mut out = BufWriter::new(file);
    render(&mut out, files, heading, paths_only).map_err(|e| KslistError::io(path, e))?;
    out.flush().map_err(|e| KslistError::io(path, e))?;
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn render<W: Write>(
    out: &mut W,
    files: &[FileDescriptor],
    heading: &str,
    paths_only: bool,
) -> io::Result<()> {
    writeln!(out, "# {}\n", heading)?;
    writeln!(out, "**Total files:** {}\n", files.len())?;
    for (idx, file) in files.iter().enumerate() {
        writeln!(out, "{}. `{}`", idx + 1, file.path.display())?;
    }
    out.write_all(b"\n---\n\n# File Contents\n\n")?;

    if paths_only {
        for file in files {
            writeln!(out, "{}", file.path.display())?;
        }
        return Ok(());
    }
    for file in files {
        let content = file.content.as_deref().unwrap_or("");
        write!(out, "## {}\n\n```{}\n", file.path.display(), file.language)?;
        out.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.write_all(b"```\n\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn descriptor(path: &str, language: &str, content: Option<&str>) -> FileDescriptor {
        FileDescriptor {
            path: PathBuf::from(path),
            language: language.to_string(),
            content: content.map(str::to_string),
            encoding: None,
        }
    }

    #[test]
    fn content_document_layout() {
        let files = vec![
            descriptor("src/a.py", "python", Some("print(1)\n")),
            descriptor("b.rs", "rust", Some("fn main() {}")),
        ];
        let doc = format_document(&files, false).unwrap();
        let expected = "# File Index\n\n\
                        **Total files:** 2\n\n\
                        1. `src/a.py`\n\
                        2. `b.rs`\n\
                        \n---\n\n\
                        # File Contents\n\n\
                        ## src/a.py\n\n```python\nprint(1)\n```\n\n\
                        ## b.rs\n\n```rust\nfn main() {}\n```\n\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn paths_only_document_layout() {
        let files = vec![descriptor("x/1.txt", "text", None), descriptor("x/2.txt", "text", None)];
        let doc = format_with_heading(&files, ROOT_INDEX_HEADING, true).unwrap();
        assert!(doc.starts_with("# Root File Index\n\n**Total files:** 2\n\n"));
        assert!(doc.ends_with("# File Contents\n\nx/1.txt\nx/2.txt\n"));
        assert!(!doc.contains("```"));
    }

    #[test]
    fn empty_document() {
        let doc = format_document(&[], false).unwrap();
        assert_eq!(doc, "# File Index\n\n**Total files:** 0\n\n\n---\n\n# File Contents\n\n");
    }
}
