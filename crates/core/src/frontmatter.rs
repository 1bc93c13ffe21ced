use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Result returned after extracting frontmatter from an MDX document.
#[derive(Debug)]
pub struct FrontmatterExtraction {
    /// Parsed frontmatter as a JSON value.
    pub value: JsonValue,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    /// Opening `---` without a closing fence.
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Header metadata of a case-study document.
///
/// Missing keys default to empty strings so a page can always render its
/// header, even if the fields come out blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseStudyFrontmatter {
    /// Page title shown as the `<h1>`.
    pub title: String,
    /// Free-text description, conventionally a `By <name>` byline.
    pub description: String,
    /// Explicit byline; wins over the one derived from `description`.
    pub author: Option<String>,
    /// Every other key, untouched.
    pub extra: Map<String, JsonValue>,
}

impl CaseStudyFrontmatter {
    /// Builds typed frontmatter out of the JSON mapping produced by [`extract_frontmatter`].
    pub fn from_value(value: &JsonValue) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let mut extra = map.clone();
        let title = extra.remove("title").map(scalar_to_string).unwrap_or_default();
        let description = extra
            .remove("description")
            .map(scalar_to_string)
            .unwrap_or_default();
        let author = extra
            .remove("author")
            .map(scalar_to_string)
            .filter(|author| !author.trim().is_empty());

        Self {
            title,
            description,
            author,
            extra,
        }
    }

    /// Byline displayed in the page header.
    ///
    /// Uses the `author` key when present, otherwise the description with a
    /// leading `By ` removed. Returns `None` when the result is empty.
    pub fn author(&self) -> Option<&str> {
        if let Some(author) = self.author.as_deref() {
            return Some(author.trim());
        }
        let byline = self.description.strip_prefix("By ").unwrap_or(self.description.as_str());
        let byline = byline.trim();
        (!byline.is_empty()).then_some(byline)
    }
}

fn scalar_to_string(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Outcome of lenient frontmatter parsing.
#[derive(Debug)]
pub struct FrontmatterParse {
    /// Parsed metadata, defaulted when `error` is set.
    pub frontmatter: CaseStudyFrontmatter,
    /// Byte offset where the body begins.
    pub body_start: usize,
    /// The failure that forced the defaults, if any.
    pub error: Option<FrontmatterError>,
}

impl FrontmatterParse {
    /// Body text following the frontmatter block.
    pub fn body<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.body_start..).unwrap_or("")
    }
}

/// Extracts YAML frontmatter from an input document.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    match locate_block(input)? {
        Some(block) => Ok(FrontmatterExtraction {
            value: parse_yaml(block.yaml)?,
            body_start: block.body_start,
        }),
        None => Ok(FrontmatterExtraction {
            value: JsonValue::Object(Map::new()),
            body_start: 0,
        }),
    }
}

/// Parses case-study frontmatter, falling back to empty fields on failure.
///
/// The body is always returned: an unterminated block leaves the whole
/// document as body, a malformed block is skipped.
pub fn parse_case_study(input: &str) -> FrontmatterParse {
    let block = match locate_block(input) {
        Ok(Some(block)) => block,
        Ok(None) => {
            return FrontmatterParse {
                frontmatter: CaseStudyFrontmatter::default(),
                body_start: 0,
                error: None,
            };
        }
        Err(err) => {
            return FrontmatterParse {
                frontmatter: CaseStudyFrontmatter::default(),
                body_start: 0,
                error: Some(err),
            };
        }
    };

    match parse_yaml(block.yaml) {
        Ok(value) => FrontmatterParse {
            frontmatter: CaseStudyFrontmatter::from_value(&value),
            body_start: block.body_start,
            error: None,
        },
        Err(err) => FrontmatterParse {
            frontmatter: CaseStudyFrontmatter::default(),
            body_start: block.body_start,
            error: Some(err),
        },
    }
}

fn parse_yaml(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Map::new()));
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    let json =
        serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match json {
        JsonValue::Null => Ok(JsonValue::Object(Map::new())),
        JsonValue::Object(_) => Ok(json),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

struct YamlBlock<'a> {
    yaml: &'a str,
    body_start: usize,
}

/// Finds a `---` fenced block preceded only by a BOM and blank lines.
fn locate_block(input: &str) -> Result<Option<YamlBlock<'_>>, FrontmatterError> {
    let offset = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut lines = LineCursor::new(input, offset);
    let opened = loop {
        match lines.next() {
            Some((line, _)) if line.trim().is_empty() => continue,
            Some((line, end)) if is_fence(line) => break end,
            _ => return Ok(None),
        }
    };

    let mut yaml_end = opened;
    for (line, end) in lines {
        if is_fence(line) {
            let yaml = input[opened..yaml_end].trim_end_matches(['\r', '\n']);
            return Ok(Some(YamlBlock {
                yaml,
                body_start: end,
            }));
        }
        yaml_end = end;
    }
    Err(FrontmatterError::Unterminated)
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

/// Iterates lines (with terminators) along with the byte offset just past each.
struct LineCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str, pos: usize) -> Self {
        Self { input, pos }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let rest = &self.input[self.pos..];
        let len = rest.find('\n').map_or(rest.len(), |idx| idx + 1);
        self.pos += len;
        Some((&rest[..len], self.pos))
    }
}
