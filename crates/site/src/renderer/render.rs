//! Tree walk from MDAST to HTML.

use super::context::{Context, Scope};
use crate::registry::{Element, PropValue};
use folio_core::{FolioError, SourceLocation};
use markdown::mdast::{self, AttributeContent, AttributeValue, Node};
use markdown::unist::Position;
use std::collections::BTreeMap;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "source", "track", "wbr",
];

pub(crate) fn location_of(position: Option<&Position>) -> SourceLocation {
    position
        .map(|p| SourceLocation::new(p.start.line, p.start.column))
        .unwrap_or_else(|| SourceLocation::new(1, 1))
}

/// Renders each node in order.
pub fn render_children(children: &[Node], ctx: &mut Context<'_>) -> Result<(), FolioError> {
    for child in children {
        render_node(child, ctx)?;
    }
    Ok(())
}

/// Renders one node and its subtree.
pub fn render_node(node: &Node, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    match node {
        Node::Root(root) => render_children(&root.children, ctx)?,
        // Frontmatter is extracted separately before rendering.
        Node::Yaml(_) | Node::Toml(_) => {}
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx)?,
        Node::Heading(heading) => render_heading(heading, ctx)?,
        Node::Strong(strong) => wrap("strong", &strong.children, ctx)?,
        Node::Emphasis(em) => wrap("em", &em.children, ctx)?,
        Node::Delete(del) => wrap("del", &del.children, ctx)?,
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Blockquote(quote) => wrap("blockquote", &quote.children, ctx)?,
        Node::List(list) => render_list(list, ctx)?,
        Node::ListItem(item) => render_list_item(item, ctx)?,
        Node::Code(code) => render_code(code, ctx),
        Node::Table(table) => render_table(table, ctx)?,
        Node::TableRow(_) | Node::TableCell(_) => {}
        Node::Image(img) => render_image(img, ctx)?,
        Node::Link(link) => render_link(link, ctx)?,
        Node::MdxJsxFlowElement(el) => render_jsx(
            el.name.as_deref(),
            &el.attributes,
            &el.children,
            el.position.as_ref(),
            ctx,
        )?,
        Node::MdxJsxTextElement(el) => render_jsx(
            el.name.as_deref(),
            &el.attributes,
            &el.children,
            el.position.as_ref(),
            ctx,
        )?,
        Node::MdxjsEsm(esm) => {
            log::debug!("Skipping ESM block (imports/exports are not evaluated): {}", esm.value);
        }
        Node::MdxFlowExpression(_) | Node::MdxTextExpression(_) => {
            log::debug!("Skipping MDX expression");
        }
        Node::Definition(_) => {}
        Node::LinkReference(reference) => {
            log::warn!("Unresolved link reference '{}'", reference.identifier);
            render_children(&reference.children, ctx)?;
        }
        Node::ImageReference(reference) => {
            log::warn!("Unresolved image reference '{}'", reference.identifier);
            ctx.push_text(&reference.alt);
        }
        Node::Html(html) => ctx.push_text(&html.value),
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
    Ok(())
}

fn wrap(tag: &str, children: &[Node], ctx: &mut Context<'_>) -> Result<(), FolioError> {
    ctx.push_raw("<");
    ctx.push_raw(tag);
    ctx.push_raw(">");
    render_children(children, ctx)?;
    ctx.push_raw("</");
    ctx.push_raw(tag);
    ctx.push_raw(">");
    Ok(())
}

/// Renders a paragraph, dropping the `<p>` inside tight lists.
fn render_paragraph(para: &mdast::Paragraph, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    if ctx.is_in_tight_list() {
        return render_children(&para.children, ctx);
    }
    ctx.push_raw("<p>");
    ctx.enter(Scope::Paragraph);
    render_children(&para.children, ctx)?;
    ctx.exit();
    ctx.push_raw("</p>");
    Ok(())
}

fn render_heading(heading: &mdast::Heading, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let tag = format!("h{}", heading.depth);
    ctx.push_raw(&format!("<{tag}>"));
    ctx.enter(Scope::Heading);
    render_children(&heading.children, ctx)?;
    ctx.exit();
    ctx.push_raw(&format!("</{tag}>"));
    Ok(())
}

fn render_list(list: &mdast::List, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let tag = if list.ordered { "ol" } else { "ul" };
    ctx.push_raw("<");
    ctx.push_raw(tag);
    if let Some(start) = list.start.filter(|start| list.ordered && *start != 1) {
        ctx.push_attr("start", &start.to_string());
    }
    ctx.push_raw(">");
    ctx.enter(Scope::List {
        spread: list.spread,
    });
    render_children(&list.children, ctx)?;
    ctx.exit();
    ctx.push_raw(&format!("</{tag}>"));
    Ok(())
}

fn render_list_item(item: &mdast::ListItem, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    match item.checked {
        Some(checked) => {
            ctx.push_raw("<li class=\"task-list-item\"><input type=\"checkbox\" disabled");
            if checked {
                ctx.push_raw(" checked");
            }
            ctx.push_raw(" /> ");
        }
        None => ctx.push_raw("<li>"),
    }
    render_children(&item.children, ctx)?;
    ctx.push_raw("</li>");
    Ok(())
}

fn render_code(code: &mdast::Code, ctx: &mut Context<'_>) {
    ctx.push_raw("<pre><code");
    if let Some(lang) = &code.lang {
        ctx.push_attr("class", &format!("language-{lang}"));
    }
    ctx.push_raw(">");
    ctx.push_text(&code.value);
    ctx.push_raw("</code></pre>");
}

fn render_table(table: &mdast::Table, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    ctx.enter(Scope::Table);
    ctx.push_raw("<table><thead>");
    let mut rows = table.children.iter().filter_map(|row| match row {
        Node::TableRow(row) => Some(row),
        _ => None,
    });
    if let Some(header) = rows.next() {
        render_table_row(header, "th", &table.align, ctx)?;
    }
    ctx.push_raw("</thead>");

    let mut body_open = false;
    for row in rows {
        if !body_open {
            ctx.push_raw("<tbody>");
            body_open = true;
        }
        render_table_row(row, "td", &table.align, ctx)?;
    }
    if body_open {
        ctx.push_raw("</tbody>");
    }
    ctx.push_raw("</table>");
    ctx.exit();
    Ok(())
}

fn render_table_row(
    row: &mdast::TableRow,
    cell_tag: &str,
    aligns: &[mdast::AlignKind],
    ctx: &mut Context<'_>,
) -> Result<(), FolioError> {
    ctx.push_raw("<tr>");
    for (i, cell) in row.children.iter().enumerate() {
        let Node::TableCell(cell) = cell else {
            continue;
        };
        ctx.push_raw("<");
        ctx.push_raw(cell_tag);
        match aligns.get(i) {
            Some(mdast::AlignKind::Left) => ctx.push_raw(" align=\"left\""),
            Some(mdast::AlignKind::Right) => ctx.push_raw(" align=\"right\""),
            Some(mdast::AlignKind::Center) => ctx.push_raw(" align=\"center\""),
            _ => {}
        }
        ctx.push_raw(">");
        render_children(&cell.children, ctx)?;
        ctx.push_raw(&format!("</{cell_tag}>"));
    }
    ctx.push_raw("</tr>");
    Ok(())
}

/// Routes a markdown image through the `img` entry of the component table.
fn render_image(img: &mdast::Image, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let mut props = BTreeMap::new();
    props.insert("src".to_string(), PropValue::literal(img.url.clone()));
    props.insert("alt".to_string(), PropValue::literal(img.alt.clone()));
    if let Some(title) = &img.title {
        props.insert("title".to_string(), PropValue::literal(title.clone()));
    }
    dispatch(
        Element {
            name: "img",
            props,
            children: &[],
            location: location_of(img.position.as_ref()),
        },
        ctx,
    )
}

/// Routes a markdown link through the `a` entry of the component table.
fn render_link(link: &mdast::Link, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    let mut props = BTreeMap::new();
    props.insert("href".to_string(), PropValue::literal(link.url.clone()));
    if let Some(title) = &link.title {
        props.insert("title".to_string(), PropValue::literal(title.clone()));
    }
    dispatch(
        Element {
            name: "a",
            props,
            children: &link.children,
            location: location_of(link.position.as_ref()),
        },
        ctx,
    )
}

/// Renders a JSX element: fragments are transparent, everything else is
/// looked up in the component table.
fn render_jsx(
    name: Option<&str>,
    attributes: &[AttributeContent],
    children: &[Node],
    position: Option<&Position>,
    ctx: &mut Context<'_>,
) -> Result<(), FolioError> {
    let Some(name) = name else {
        return render_children(children, ctx);
    };
    let location = location_of(position);

    let mut props = BTreeMap::new();
    for attr in attributes {
        match attr {
            AttributeContent::Property(prop) => {
                let value = match &prop.value {
                    Some(AttributeValue::Literal(s)) => PropValue::literal(s.clone()),
                    Some(AttributeValue::Expression(expr)) => {
                        PropValue::expression(expr.value.clone())
                    }
                    None => PropValue::Flag,
                };
                props.insert(prop.name.clone(), value);
            }
            AttributeContent::Expression(_) => {
                return Err(FolioError::render_error(
                    format!("spread attributes are not supported on <{name}>"),
                    location,
                ));
            }
        }
    }

    dispatch(
        Element {
            name,
            props,
            children,
            location,
        },
        ctx,
    )
}

/// Renders an element with its registered component, or as plain HTML when
/// it is a lowercase tag.
pub(crate) fn dispatch(element: Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    if let Some(renderer) = ctx.registry().get(element.name) {
        return renderer(&element, ctx);
    }
    if is_html_tag(element.name) {
        return render_plain_element(&element, ctx);
    }
    Err(FolioError::unknown_component(element.name, element.location))
}

fn is_html_tag(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn render_plain_element(element: &Element<'_>, ctx: &mut Context<'_>) -> Result<(), FolioError> {
    ctx.push_raw("<");
    ctx.push_raw(element.name);
    for (key, value) in &element.props {
        let attr = match key.as_str() {
            "className" => "class",
            "htmlFor" => "for",
            other => other,
        };
        match value {
            PropValue::Literal { value } => ctx.push_attr(attr, value),
            PropValue::Flag => {
                ctx.push_raw(" ");
                ctx.push_raw(attr);
            }
            PropValue::Expression { .. } => {
                return Err(element.error(format!(
                    "expression values are not supported on <{}> (prop `{}`)",
                    element.name, key
                )));
            }
        }
    }

    if VOID_ELEMENTS.contains(&element.name) {
        ctx.push_raw(" />");
        return Ok(());
    }

    ctx.push_raw(">");
    let scope = match element.name {
        "p" => Some(Scope::Paragraph),
        "a" => Some(Scope::Link),
        _ => None,
    };
    if let Some(scope) = scope {
        ctx.enter(scope);
    }
    render_children(element.children, ctx)?;
    if scope.is_some() {
        ctx.exit();
    }
    ctx.push_raw("</");
    ctx.push_raw(element.name);
    ctx.push_raw(">");
    Ok(())
}
