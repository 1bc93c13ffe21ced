//! Rendering context for the MDX renderer.

use crate::config::RenderOptions;
use crate::registry::ComponentRegistry;

/// The kind of element currently being rendered.
///
/// Components consult the stack to pick block or inline markup: a `<figure>`
/// must not end up inside a `<p>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Document root.
    Root,
    /// Inside `<p>`.
    Paragraph,
    /// Inside `<ul>`/`<ol>`.
    List {
        /// Loose list: items keep their `<p>` wrappers.
        spread: bool,
    },
    /// Inside `<table>`.
    Table,
    /// Inside `<a>`.
    Link,
    /// Inside a heading.
    Heading,
}

/// Output buffer and state threaded through the tree walk.
pub struct Context<'a> {
    html: String,
    stack: Vec<Scope>,
    options: &'a RenderOptions,
    registry: &'a ComponentRegistry,
}

impl<'a> Context<'a> {
    /// Creates an empty context.
    pub fn new(options: &'a RenderOptions, registry: &'a ComponentRegistry) -> Self {
        Self {
            html: String::with_capacity(4096),
            stack: vec![Scope::Root],
            options,
            registry,
        }
    }

    /// Markup options.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Component substitution table.
    pub fn registry(&self) -> &'a ComponentRegistry {
        self.registry
    }

    /// Appends trusted markup.
    pub fn push_raw(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Appends escaped text content.
    pub fn push_text(&mut self, s: &str) {
        html_escape::encode_text_to_string(s, &mut self.html);
    }

    /// Appends an escaped value for a double-quoted attribute.
    pub fn push_attr_value(&mut self, s: &str) {
        html_escape::encode_double_quoted_attribute_to_string(s, &mut self.html);
    }

    /// Appends ` name="value"`.
    pub fn push_attr(&mut self, name: &str, value: &str) {
        self.html.push(' ');
        self.html.push_str(name);
        self.html.push_str("=\"");
        self.push_attr_value(value);
        self.html.push('"');
    }

    /// Innermost scope.
    pub fn current_scope(&self) -> Scope {
        self.stack.last().copied().unwrap_or(Scope::Root)
    }

    /// True inside any list.
    pub fn is_in_list(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::List { .. }))
    }

    /// True when the nearest enclosing list is tight.
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// True inside a table.
    pub fn is_in_table(&self) -> bool {
        self.stack.contains(&Scope::Table)
    }

    /// True where only phrasing content is allowed.
    pub fn is_inline(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::Paragraph | Scope::Link | Scope::Heading))
            || self.is_in_table()
    }

    /// Enters a scope.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Leaves the innermost scope.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Consumes the context, returning the markup.
    pub fn finish(self) -> String {
        self.html
    }
}
