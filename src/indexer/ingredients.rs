//! Ingredient field parsing.
//!
//! Source datasets store ingredients either as a real list, as a string
//! holding a list literal (`["1 cup rice", "2 eggs"]` or the single-quoted
//! `['1 cup rice', '2 eggs']`), or as a plain comma-separated string.
//! Nested lists and dicts inside a literal come back in their printed form
//! (`['a', 'b']`). Parsing never fails; malformed input degrades to comma
//! splitting or an empty list.

use serde_json::Value;
use std::iter::Peekable;
use std::str::Chars;
use tracing::trace;

/// The shape an ingredient field was stored in.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientField {
    /// Already an ordered list
    Lines(Vec<String>),
    /// A string that looks like a list literal
    Literal(String),
    /// Free text, one ingredient per comma
    CommaSeparated(String),
    /// Anything else (null, numbers, objects)
    Missing,
}

impl IngredientField {
    /// Inspect a raw JSON value and tag its shape
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Lines(
                items
                    .iter()
                    .map(|item| Literal::from_json(item).into_line())
                    .collect(),
            ),
            Value::String(text) if text.trim_start().starts_with('[') => {
                Self::Literal(text.clone())
            }
            Value::String(text) => Self::CommaSeparated(text.clone()),
            _ => Self::Missing,
        }
    }

    /// Ordered ingredient strings for this field
    pub fn parse(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines,
            Self::Literal(text) => parse_list_literal(&text).unwrap_or_else(|| {
                trace!("List literal did not parse, falling back to comma split");
                split_commas(&text)
            }),
            Self::CommaSeparated(text) => split_commas(&text),
            Self::Missing => Vec::new(),
        }
    }
}

/// Parse a raw ingredient value into an ordered list of strings
pub fn parse_ingredients(value: &Value) -> Vec<String> {
    IngredientField::classify(value).parse()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Nesting limit for hand-scanned literals
const MAX_LITERAL_DEPTH: usize = 64;

/// One element of a parsed list literal.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Text(String),
    /// Numbers and the `True`/`False`/`None` keywords, as written
    Bare(String),
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Dict(
                map.iter()
                    .map(|(key, value)| (Self::Text(key.clone()), Self::from_json(value)))
                    .collect(),
            ),
            other => Self::Bare(scalar_to_string(other)),
        }
    }

    /// Text and scalars stay as they are; containers become their repr
    fn into_line(self) -> String {
        match self {
            Self::Text(s) | Self::Bare(s) => s,
            container => container.repr(),
        }
    }

    fn repr(&self) -> String {
        match self {
            Self::Text(s) => quote_text(s),
            Self::Bare(s) => s.clone(),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Self::repr).collect();
                format!("[{}]", items.join(", "))
            }
            Self::Dict(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.repr(), value.repr()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}

/// Quote a string the way `['a', "b's"]` prints: single quotes unless the
/// text holds a single quote and no double quote.
fn quote_text(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Structural parse of a list literal. Nested lists and dicts are kept as
/// their printed form. Returns `None` when the text is not a list literal.
fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    if let Ok(items) = serde_json::from_str::<Vec<Value>>(text) {
        return Some(
            items
                .iter()
                .map(|item| Literal::from_json(item).into_line())
                .collect(),
        );
    }

    let mut chars = text.trim().chars().peekable();
    if chars.next() != Some('[') {
        return None;
    }
    let items = read_list(&mut chars, 1)?;

    skip_whitespace(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(items.into_iter().map(Literal::into_line).collect())
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn read_value(chars: &mut Peekable<Chars<'_>>, depth: usize) -> Option<Literal> {
    skip_whitespace(chars);
    match *chars.peek()? {
        '[' | '{' if depth >= MAX_LITERAL_DEPTH => None,
        '[' => {
            chars.next();
            read_list(chars, depth + 1).map(Literal::List)
        }
        '{' => {
            chars.next();
            read_dict(chars, depth + 1)
        }
        '\'' | '"' => read_quoted(chars).map(Literal::Text),
        _ => read_bare(chars).map(Literal::Bare),
    }
}

/// Items up to and including the closing `]`
fn read_list(chars: &mut Peekable<Chars<'_>>, depth: usize) -> Option<Vec<Literal>> {
    let mut items = Vec::new();
    loop {
        skip_whitespace(chars);
        if chars.peek() == Some(&']') {
            chars.next();
            return Some(items);
        }
        items.push(read_value(chars, depth)?);

        skip_whitespace(chars);
        match chars.next()? {
            ',' => continue,
            ']' => return Some(items),
            _ => return None,
        }
    }
}

/// Entries up to and including the closing `}`
fn read_dict(chars: &mut Peekable<Chars<'_>>, depth: usize) -> Option<Literal> {
    let mut entries = Vec::new();
    loop {
        skip_whitespace(chars);
        if chars.peek() == Some(&'}') {
            chars.next();
            return Some(Literal::Dict(entries));
        }

        let key = read_value(chars, depth)?;
        // Containers are not hashable
        if matches!(key, Literal::List(_) | Literal::Dict(_)) {
            return None;
        }
        skip_whitespace(chars);
        if chars.next()? != ':' {
            return None;
        }
        let value = read_value(chars, depth)?;
        entries.push((key, value));

        skip_whitespace(chars);
        match chars.next()? {
            ',' => continue,
            '}' => return Some(Literal::Dict(entries)),
            _ => return None,
        }
    }
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

/// Bare scalars: numbers and the `True`/`False`/`None` keywords
fn read_bare(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut token = String::new();
    while let Some(&c) = chars.peek() {
        if matches!(c, ',' | ']' | '}' | ':') {
            break;
        }
        token.push(c);
        chars.next();
    }

    let token = token.trim();
    let is_keyword = matches!(token, "True" | "False" | "None");
    let is_number = token.parse::<f64>().is_ok() && token.bytes().any(|b| b.is_ascii_digit());
    if is_keyword || is_number {
        Some(token.to_string())
    } else {
        None
    }
}
