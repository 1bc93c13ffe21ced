//! MDX parsing pipeline built on markdown-rs.

use crate::{FolioError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Which markdown-rs constructs are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// GitHub Flavored Markdown (tables, strikethrough, autolinks, task lists).
    pub gfm: bool,
    /// Leading `---` YAML block becomes a `Yaml` node.
    pub frontmatter: bool,
}

impl ParseOptions {
    /// Case-study defaults: MDX with GFM tables and frontmatter recognition.
    pub const fn case_study() -> Self {
        Self {
            mdx: true,
            gfm: true,
            frontmatter: true,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            // Indented JSX children would otherwise turn into code blocks.
            constructs.code_indented = false;
            constructs.html_flow = false;
            constructs.html_text = false;
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::case_study()
    }
}

/// Mutates the parsed MDAST after parsing.
pub trait AstTransform: Send + Sync {
    /// Mutate the tree in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node) + Send + Sync,
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Parser with optional tree transforms, applied in insertion order.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    ast_transforms: Vec<Box<dyn AstTransform>>,
}

impl ParserPipeline {
    /// Create a pipeline without transforms.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options: options.to_markdown(),
            ast_transforms: Vec::new(),
        }
    }

    /// Pipeline used for case-study bodies: MDX + GFM, with images lifted out
    /// of their paragraphs.
    pub fn case_study() -> Self {
        let mut pipeline = Self::new(ParseOptions::case_study());
        pipeline.add_ast_transform(unwrap_images);
        pipeline
    }

    /// Add an AST transform.
    pub fn add_ast_transform<T: AstTransform + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Parse source into MDAST, failing on any syntax error.
    pub fn parse(&self, input: &str) -> Result<Node, FolioError> {
        let mut root = parse_mdast_with_options(input, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }
        Ok(root)
    }
}

/// Parse source into an MDAST tree using folio options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, FolioError> {
    parse_mdast_with_options(input, &options.to_markdown())
}

/// Parse source into an MDAST tree using markdown-rs `ParseOptions`.
///
/// With MDX enabled, a JSX tag that never closes is an error even though
/// markdown-rs falls back to reading it as text.
pub fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, FolioError> {
    let root = markdown::to_mdast(input, options)
        .map_err(|err| FolioError::parse_error(err.reason.clone(), message_location(&err)))?;
    if (options.constructs.mdx_jsx_flow || options.constructs.mdx_jsx_text)
        && let Some(location) = find_unterminated_tag(&root, input)
    {
        return Err(FolioError::parse_error(
            "Unexpected end of file in JSX tag, expected `>` or `/>`",
            location,
        ));
    }
    Ok(root)
}

/// First text node that starts with a raw `<name`, i.e. a tag markdown-rs
/// gave up on. Escaped `\<` is skipped by checking the source at the node.
fn find_unterminated_tag(node: &Node, input: &str) -> Option<SourceLocation> {
    if let Node::Text(text) = node {
        let position = text.position.as_ref()?;
        let raw = input.get(position.start.offset..)?;
        return (text.value.starts_with('<') && starts_with_tag(raw))
            .then(|| SourceLocation::new(position.start.line, position.start.column));
    }
    node.children()?
        .iter()
        .find_map(|child| find_unterminated_tag(child, input))
}

fn starts_with_tag(raw: &str) -> bool {
    let mut chars = raw.chars();
    chars.next() == Some('<')
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
}

fn message_location(message: &Message) -> SourceLocation {
    match message.place.as_deref() {
        Some(Place::Point(point)) => SourceLocation::new(point.line, point.column),
        Some(Place::Position(position)) => {
            SourceLocation::new(position.start.line, position.start.column)
        }
        None => SourceLocation::new(1, 1),
    }
}

/// Lifts images out of paragraphs that contain nothing else.
///
/// A paragraph holding only images (plus whitespace) is replaced by the
/// images themselves, so a figure with its caption can render as a block.
/// Paragraphs mixing images with text are left alone.
pub fn unwrap_images(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };

    let mut rewritten = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        if let Node::Paragraph(paragraph) = &mut child
            && is_image_only(&paragraph.children)
        {
            rewritten.extend(
                paragraph
                    .children
                    .drain(..)
                    .filter(|inline| !is_blank_text(inline)),
            );
            continue;
        }
        unwrap_images(&mut child);
        rewritten.push(child);
    }
    *children = rewritten;
}

fn is_image_only(children: &[Node]) -> bool {
    let mut saw_image = false;
    for child in children {
        match child {
            Node::Image(_) => saw_image = true,
            Node::MdxJsxTextElement(el) if el.name.as_deref() == Some("img") => saw_image = true,
            other if is_blank_text(other) => {}
            _ => return false,
        }
    }
    saw_image
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_children(node: &Node) -> &[Node] {
        match node {
            Node::Root(root) => &root.children,
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn frontmatter_becomes_yaml_node() {
        let tree = parse_mdast("---\ntitle: Foo\n---\nHello", &ParseOptions::case_study())
            .expect("parse should succeed");
        let children = root_children(&tree);
        assert!(matches!(children[0], Node::Yaml(_)));
        assert!(matches!(children[1], Node::Paragraph(_)));
    }

    #[test]
    fn gfm_tables_are_parsed() {
        let tree = parse_mdast("| a | b |\n| - | - |\n| 1 | 2 |", &ParseOptions::case_study())
            .expect("parse should succeed");
        assert!(matches!(root_children(&tree)[0], Node::Table(_)));
    }

    #[test]
    fn malformed_jsx_is_a_parse_error() {
        let err = parse_mdast("<Video src=\"a\"\n", &ParseOptions::case_study()).unwrap_err();
        assert!(matches!(err, FolioError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn tag_cut_off_at_end_of_file_is_located() {
        let err = parse_mdast("Intro\n\n<Video src=\"https://v\"", &ParseOptions::case_study())
            .unwrap_err();
        match err {
            FolioError::Parse { location, .. } => {
                assert_eq!((location.line, location.column), (3, 1));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn escaped_angle_bracket_is_text() {
        let tree = parse_mdast("\\<Video> is a component", &ParseOptions::case_study())
            .expect("escaped tag should parse");
        assert!(matches!(root_children(&tree)[0], Node::Paragraph(_)));
    }

    #[test]
    fn image_only_paragraph_is_unwrapped() {
        let tree = ParserPipeline::case_study()
            .parse("Intro\n\n![one](/a.png) ![two](/b.png)\n\nOutro")
            .expect("parse should succeed");
        let children = root_children(&tree);
        assert_eq!(children.len(), 4);
        assert!(matches!(children[0], Node::Paragraph(_)));
        assert!(matches!(children[1], Node::Image(_)));
        assert!(matches!(children[2], Node::Image(_)));
        assert!(matches!(children[3], Node::Paragraph(_)));
    }

    #[test]
    fn mixed_paragraph_keeps_image_inline() {
        let tree = ParserPipeline::case_study()
            .parse("See ![inline](/a.png) here")
            .expect("parse should succeed");
        let children = root_children(&tree);
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Node::Paragraph(_)));
    }
}
