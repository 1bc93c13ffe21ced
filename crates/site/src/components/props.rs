//! Static JS literal props.
//!
//! Component props such as `images={[{ src: "/a.png", alt: 'A' }]}` are
//! object/array literals, not arbitrary code. They are rewritten to JSON and
//! handed to serde. Anything that would need evaluation (identifiers other
//! than `true`/`false`/`null`/`undefined`, template substitutions, calls) is
//! rejected.

use serde::de::DeserializeOwned;
use std::iter::Peekable;
use std::str::Chars;

/// Parses a JS literal expression into `T`.
pub fn from_js_literal<T: DeserializeOwned>(source: &str) -> Result<T, String> {
    let json = js_literal_to_json(source)?;
    serde_json::from_str(&json).map_err(|err| err.to_string())
}

/// Rewrites a JS object/array literal as JSON text.
pub fn js_literal_to_json(source: &str) -> Result<String, String> {
    let mut out = String::with_capacity(source.len() + 16);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                copy_double_quoted(&mut chars, &mut out)?;
            }
            '\'' | '`' => {
                let value = read_quoted(&mut chars, c)?;
                out.push_str(&serde_json::to_string(&value).map_err(|err| err.to_string())?);
            }
            ',' => {
                // Trailing commas are dropped; comments may sit before the bracket.
                if !matches!(next_significant(&chars), Some(']' | '}') | None) {
                    out.push(',');
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    prev = c;
                }
                if !closed {
                    return Err("unterminated comment".to_string());
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '$' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let mut gap = String::new();
                skip_whitespace(&mut chars, &mut gap);
                if chars.peek() == Some(&':') {
                    out.push_str(&serde_json::to_string(&ident).map_err(|err| err.to_string())?);
                } else {
                    match ident.as_str() {
                        "true" | "false" | "null" => out.push_str(&ident),
                        "undefined" => out.push_str("null"),
                        other => return Err(format!("`{other}` cannot be evaluated statically")),
                    }
                }
                out.push_str(&gap);
            }
            c if c.is_ascii_digit() || c == '.' => {
                push_number(c, &mut chars, &mut out)?;
            }
            '+' if chars.peek().is_some_and(|&next| next.is_ascii_digit() || next == '.') => {}
            c if c.is_whitespace() || "[]{}:-".contains(c) => {
                out.push(c);
            }
            other => return Err(format!("unexpected `{other}` in literal")),
        }
    }
    Ok(out)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(&c) = chars.peek() {
        if !c.is_whitespace() {
            break;
        }
        out.push(c);
        chars.next();
    }
}

/// Next character that is neither whitespace nor inside a comment, without
/// consuming anything.
fn next_significant(chars: &Peekable<Chars<'_>>) -> Option<char> {
    let mut ahead = chars.clone();
    while let Some(c) = ahead.next() {
        match c {
            c if c.is_whitespace() => {}
            '/' if ahead.peek() == Some(&'/') => {
                ahead.find(|&c| c == '\n');
            }
            '/' if ahead.peek() == Some(&'*') => {
                ahead.next();
                let mut prev = '\0';
                ahead.find(|&c| std::mem::replace(&mut prev, c) == '*' && c == '/');
            }
            c => return Some(c),
        }
    }
    None
}

/// Reads a numeric literal starting with `first` and writes it as a JSON
/// number. Exponents are kept; a bare leading or trailing `.` gets its zero.
fn push_number(
    first: char,
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
) -> Result<(), String> {
    let mut literal = String::from(first);
    while let Some(&next) = chars.peek() {
        let exponent_sign =
            (next == '-' || next == '+') && literal.ends_with(|c: char| c == 'e' || c == 'E');
        if next.is_ascii_alphanumeric() || next == '.' || next == '_' || exponent_sign {
            literal.push(next);
            chars.next();
        } else {
            break;
        }
    }

    let mut number = literal.replace('_', "");
    if number.starts_with('.') {
        number.insert(0, '0');
    }
    if let Some(dot) = number.find('.')
        && !number[dot + 1..].starts_with(|c: char| c.is_ascii_digit())
    {
        number.insert(dot + 1, '0');
    }
    if number.parse::<f64>().is_err() {
        return Err(format!("`{literal}` is not a plain number"));
    }
    out.push_str(&number);
    Ok(())
}

/// Copies the rest of a double-quoted string, escapes included.
fn copy_double_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), String> {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => break,
            },
            '"' => return Ok(()),
            _ => {}
        }
    }
    Err("unterminated string".to_string())
}

/// Reads the value of a single-quoted or backtick string.
fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, String> {
    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(escaped) => value.push(escaped),
                None => break,
            },
            '$' if quote == '`' && chars.peek() == Some(&'{') => {
                return Err("template substitutions cannot be evaluated statically".to_string());
            }
            c if c == quote => return Ok(value),
            c => value.push(c),
        }
    }
    Err("unterminated string".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn converts_object_literals() {
        let value: Value = from_js_literal(
            r#"[
                { src: "/a.png", alt: 'It\'s A', width: 800, height: 600 },
                { src: `/b.png`, alt: "B", },
            ]"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!([
                { "src": "/a.png", "alt": "It's A", "width": 800, "height": 600 },
                { "src": "/b.png", "alt": "B" }
            ])
        );
    }

    #[test]
    fn keeps_keywords_and_quoted_keys() {
        let value: Value =
            from_js_literal(r#"{ "quoted": true, plain: false, gone: undefined, n: -1.5 }"#)
                .unwrap();
        assert_eq!(
            value,
            json!({ "quoted": true, "plain": false, "gone": null, "n": -1.5 })
        );
    }

    #[test]
    fn strips_comments() {
        let value: Value = from_js_literal("[\n  // first\n  1, /* second */ 2\n]").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn comment_after_trailing_comma() {
        let value: Value = from_js_literal("[{ src: \"/a.png\" }, // hero\n]").unwrap();
        assert_eq!(value, json!([{ "src": "/a.png" }]));
        let value: Value = from_js_literal("{ a: 1, /* last */ }").unwrap();
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[test]
    fn exponent_numbers() {
        let value: Value = from_js_literal("{ width: 1e3, small: 2.5E-1 }").unwrap();
        assert_eq!(value, json!({ "width": 1000.0, "small": 0.25 }));
    }

    #[test]
    fn leading_dot_numbers() {
        let value: Value = from_js_literal("[.5, -.25, +3, 1_000]").unwrap();
        assert_eq!(value, json!([0.5, -0.25, 3, 1000]));
        assert!(js_literal_to_json("[0x10]").is_err());
    }

    #[test]
    fn rejects_references_and_calls() {
        let err = js_literal_to_json("[{ src: heroImage }]").unwrap_err();
        assert!(err.contains("heroImage"), "{err}");
        assert!(js_literal_to_json("[load()]").is_err());
        assert!(js_literal_to_json("[`${base}/a.png`]").is_err());
    }

    #[test]
    fn rejects_unterminated_strings() {
        assert!(js_literal_to_json("[\"open").is_err());
        assert!(js_literal_to_json("['open").is_err());
    }
}
