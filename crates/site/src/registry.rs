//! Component substitution table.
//!
//! Maps an element name (`img`, `a`, `Video`, `Slider`) to the function that
//! renders it. Markdown images and links are routed through the same table as
//! their JSX spellings, so overriding `img` changes both `![]()` and `<img>`.

use crate::components;
use crate::renderer::Context;
use folio_core::{FolioError, SourceLocation};
use markdown::mdast::Node;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A prop value - either a literal string or a JS expression.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropValue {
    /// `key="value"`.
    Literal {
        /// The string value.
        value: String,
    },
    /// `key={expression}`.
    Expression {
        /// Source text between the braces.
        value: String,
    },
    /// Bare `key`.
    Flag,
}

impl PropValue {
    /// Creates a literal string prop value.
    pub fn literal(value: impl Into<String>) -> Self {
        PropValue::Literal {
            value: value.into(),
        }
    }

    /// Creates an expression prop value.
    pub fn expression(value: impl Into<String>) -> Self {
        PropValue::Expression {
            value: value.into(),
        }
    }

    /// The literal string, if this is one.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            PropValue::Literal { value } => Some(value),
            _ => None,
        }
    }
}

/// An element handed to a component renderer.
#[derive(Debug, Clone)]
pub struct Element<'n> {
    /// Tag or component name.
    pub name: &'n str,
    /// Props in name order.
    pub props: BTreeMap<String, PropValue>,
    /// Child nodes, rendered on demand.
    pub children: &'n [Node],
    /// Where the element starts in the source.
    pub location: SourceLocation,
}

impl<'n> Element<'n> {
    /// Literal value of `name`, if present and non-empty.
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.props
            .get(name)
            .and_then(PropValue::as_literal)
            .filter(|value| !value.is_empty())
    }

    /// Literal value of a prop the component cannot do without.
    pub fn required_literal(&self, name: &str) -> Result<&str, FolioError> {
        self.literal(name).ok_or_else(|| {
            self.error(format!(
                "<{}> requires a non-empty `{}` prop",
                self.name, name
            ))
        })
    }

    /// Render error located at this element.
    pub fn error(&self, message: impl Into<String>) -> FolioError {
        FolioError::render_error(message, self.location.clone())
    }
}

/// Signature of a component renderer.
pub type ComponentRenderer = fn(&Element<'_>, &mut Context<'_>) -> Result<(), FolioError>;

static DEFAULT_REGISTRY: Lazy<ComponentRegistry> = Lazy::new(ComponentRegistry::with_defaults);

/// Tag name to renderer lookup.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    renderers: HashMap<String, ComponentRenderer>,
}

impl ComponentRegistry {
    /// A table with no substitutions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The case-study table: custom image, link, video and slider.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("img", components::image::render);
        registry.register("a", components::link::render);
        registry.register("Video", components::video::render);
        registry.register("Slider", components::slider::render);
        registry
    }

    /// Shared instance of [`ComponentRegistry::with_defaults`].
    pub fn shared() -> &'static ComponentRegistry {
        &DEFAULT_REGISTRY
    }

    /// Adds or replaces the renderer for `name`.
    pub fn register(&mut self, name: impl Into<String>, renderer: ComponentRenderer) {
        self.renderers.insert(name.into(), renderer);
    }

    /// Renderer for `name`.
    pub fn get(&self, name: &str) -> Option<ComponentRenderer> {
        self.renderers.get(name).copied()
    }

    /// True if `name` has a renderer.
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}
