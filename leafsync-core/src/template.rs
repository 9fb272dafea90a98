use std::path::{Path, PathBuf};

use crate::text::prefix_to_unescaped;

#[derive(Debug)]
pub enum RenderError {
    CreateDir(PathBuf, std::io::Error),
    Write(PathBuf, std::io::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::CreateDir(p, e) => {
                write!(f, "Failed to create directory {}: {}", p.display(), e)
            }
            RenderError::Write(p, e) => write!(f, "Failed to write {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Wrap an escaped body in the fixed Leaf envelope: a title block, the
/// body in one container element, and the shared base layout include.
/// The byte layout is load-bearing for the downstream template engine.
pub fn render_envelope(title: &str, escaped_body: &str) -> String {
    format!(
        "#set(\"title\") {{{title}}}\n\
         \n\
         #set(\"body\") {{\n\
         <div class=\"blogpage\">\n\
         {escaped_body}\n\
         </div>\n\
         }}\n\
         \n\
         #embed(\"Base\")"
    )
}

/// Materialize the envelope at `dest`, creating intermediate directories
/// first. Overwrites an existing file; the write is not atomic.
pub fn write_artifact(dest: &Path, title: &str, escaped_body: &str) -> Result<(), RenderError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| RenderError::CreateDir(parent.to_path_buf(), e))?;
    }

    let envelope = render_envelope(title, escaped_body);
    std::fs::write(dest, envelope).map_err(|e| RenderError::Write(dest.to_path_buf(), e))?;
    Ok(())
}

/// Read the title back out of a rendered envelope. The title block ends
/// at the first unescaped closing brace.
pub(crate) fn title_of(envelope: &str) -> Option<&str> {
    let rest = envelope.strip_prefix("#set(\"title\") {")?;
    Some(prefix_to_unescaped(rest, '}'))
}
