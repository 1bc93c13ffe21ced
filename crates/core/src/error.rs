use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised while loading, parsing or rendering case-study content.
#[derive(Debug, Error)]
pub enum FolioError {
    /// IO error while reading content.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// No content document exists for the requested slug.
    #[error("No content found for slug '{slug}'")]
    NotFound {
        /// Requested slug
        slug: String,
    },
    /// A document did not match the expected shape.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the mismatch, including the offending file
        message: String,
    },
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Rendering error while emitting HTML.
    #[error("Render error at {location}: {message}")]
    Render {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Component used in MDX that is not in the substitution table.
    #[error("Unknown component at {location}: {name}")]
    UnknownComponent {
        /// Component name
        name: String,
        /// Source location
        location: SourceLocation,
    },
}

impl FolioError {
    /// Create a not-found error for a slug
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a parse error at `location`
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Parse {
            message: message.into(),
            location,
        }
    }

    /// Create a render error at `location`
    pub fn render_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Render {
            message: message.into(),
            location,
        }
    }

    /// Create an unknown component error at `location`
    pub fn unknown_component(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnknownComponent {
            name: name.into(),
            location,
        }
    }

    /// True when the error means the content file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Non-fatal warnings that don't prevent rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// Frontmatter could not be parsed; header fields fall back to empty.
    MalformedFrontmatter {
        /// Parser message
        message: String,
    },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::MalformedFrontmatter { message } => {
                write!(f, "malformed frontmatter: {}", message)
            }
        }
    }
}

/// Collection of diagnostics gathered while producing a page
#[derive(Debug, Clone, Default)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
