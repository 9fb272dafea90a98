use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

#[derive(Debug)]
pub enum ConvertError {
    Launch(PathBuf, std::io::Error),
    Failed { program: PathBuf, status: Option<i32>, stderr: String },
    InvalidUtf8(std::string::FromUtf8Error),
}

impl From<std::string::FromUtf8Error> for ConvertError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ConvertError::InvalidUtf8(err)
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Launch(p, e) => write!(f, "Failed to launch {}: {}", p.display(), e),
            ConvertError::Failed { program, status, stderr } => write!(
                f,
                "{} exited with status {:?}: {}",
                program.display(),
                status,
                stderr.trim()
            ),
            ConvertError::InvalidUtf8(e) => write!(f, "Converter output is not UTF-8: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Document-to-markup conversion as an injected capability, so the sync
/// engine and its tests never depend on an external binary being
/// installed.
pub trait MarkupConverter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError>;
}

/// Pandoc reader extensions recognized by this tool. Enumerated rather
/// than concatenated strings so the option set is validated at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PandocExtension {
    Strikeout,
    PipeTables,
    FencedCodeBlocks,
    BacktickCodeBlocks,
    Footnotes,
    TexMathDollars,
    TexMathDoubleBackslash,
}

impl PandocExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            PandocExtension::Strikeout => "strikeout",
            PandocExtension::PipeTables => "pipe_tables",
            PandocExtension::FencedCodeBlocks => "fenced_code_blocks",
            PandocExtension::BacktickCodeBlocks => "backtick_code_blocks",
            PandocExtension::Footnotes => "footnotes",
            PandocExtension::TexMathDollars => "tex_math_dollars",
            PandocExtension::TexMathDoubleBackslash => "tex_math_double_backslash",
        }
    }
}

/// Pandoc invocation settings. Starts from the markdown_strict baseline
/// and adds the preferred extensions on top.
#[derive(Debug, Clone)]
pub struct PandocOptions {
    extensions: Vec<PandocExtension>,
}

impl Default for PandocOptions {
    fn default() -> Self {
        Self {
            extensions: vec![
                PandocExtension::Strikeout,
                PandocExtension::PipeTables,
                PandocExtension::FencedCodeBlocks,
                PandocExtension::BacktickCodeBlocks,
                PandocExtension::Footnotes,
                PandocExtension::TexMathDollars,
                PandocExtension::TexMathDoubleBackslash,
            ],
        }
    }
}

impl PandocOptions {
    pub fn new(extensions: Vec<PandocExtension>) -> Self {
        Self { extensions }
    }

    /// The `--from=` argument: baseline format plus `+extension` markers.
    pub fn from_arg(&self) -> String {
        let mut arg = String::from("--from=markdown_strict");
        for ext in &self.extensions {
            arg.push('+');
            arg.push_str(ext.as_str());
        }
        arg
    }
}

/// Converts a markdown document to HTML by running pandoc and reading
/// its standard output.
pub struct PandocConverter {
    program: PathBuf,
    options: PandocOptions,
}

impl PandocConverter {
    pub fn new<P: AsRef<Path>>(program: P, options: PandocOptions) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            options,
        }
    }

    fn build_args(&self, source: &Path) -> Vec<std::ffi::OsString> {
        vec![
            self.options.from_arg().into(),
            "--no-highlight".into(), // no pandoc highlighting
            "--to=html5".into(),
            "--mathjax".into(),
            source.as_os_str().to_os_string(),
        ]
    }
}

impl MarkupConverter for PandocConverter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError> {
        let work_dir = source.parent().unwrap_or_else(|| Path::new("."));
        debug!("converting {} via {}", source.display(), self.program.display());

        let output = Command::new(&self.program)
            .args(self.build_args(source))
            .current_dir(work_dir)
            .output()
            .map_err(|e| ConvertError::Launch(self.program.clone(), e))?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
