//! Minimal WKT reader: builds a keyword tree out of a WKT1 or WKT2 CRS definition.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AdvisorError, Result};

lazy_static! {
    static ref WKT_TOKEN: Regex =
        Regex::new(r#""(?:[^"]|"")*"|[\[\](),]|[^\[\](),"\s]+"#).expect("valid regex");
}

/// Keywords of unit nodes, both WKT1 and WKT2 flavours.
const UNIT_KEYWORDS: [&str; 3] = ["UNIT", "LENGTHUNIT", "ANGLEUNIT"];

/// Node of a WKT definition, e.g. `UNIT["metre",1]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WktNode {
    keyword: String,
    args: Vec<WktValue>,
}

#[derive(Debug, Clone, PartialEq)]
enum WktValue {
    /// Quoted string with the quotes removed.
    Text(String),
    /// Number or enumeration value, e.g. `6378137` or `east`.
    Token(String),
    Node(WktNode),
}

impl WktNode {
    /// Parses the whole definition, failing if anything follows the root node.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut cursor = Cursor {
            tokens: tokenize(text)?,
            position: 0,
        };
        let root = parse_node(&mut cursor)?;

        match cursor.next() {
            None => Ok(root),
            Some(extra) => Err(malformed(format!(
                "unexpected {extra:?} after the end of WKT definition"
            ))),
        }
    }

    /// Upper-cased keyword of the node.
    pub(crate) fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Nested nodes that are direct children of this one.
    fn children(&self) -> impl Iterator<Item = &WktNode> {
        self.args.iter().filter_map(|arg| match arg {
            WktValue::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Text or token value of the argument at `index`.
    fn value(&self, index: usize) -> Option<&str> {
        match self.args.get(index)? {
            WktValue::Text(value) | WktValue::Token(value) => Some(value),
            WktValue::Node(_) => None,
        }
    }

    fn is_unit(&self) -> bool {
        UNIT_KEYWORDS.contains(&self.keyword.as_str())
    }

    /// Units of the coordinate system of this CRS.
    ///
    /// In WKT1 this is the `UNIT` of the root node. In WKT2 it is the unit given for the whole coordinate system
    /// right after `CS[...]`, or the units of the individual axes. Units of the datum, ellipsoid, prime meridian,
    /// base CRS and conversion parameters are not included.
    pub(crate) fn coordinate_units(&self) -> Vec<String> {
        let mut units = Vec::new();
        for child in self.children() {
            if child.is_unit() {
                units.extend(child.value(0).map(str::to_string));
            } else if child.keyword == "AXIS" {
                units.extend(
                    child
                        .children()
                        .filter(|node| node.is_unit())
                        .filter_map(|node| node.value(0).map(str::to_string)),
                );
            }
        }

        units
    }

    /// EPSG code from the `AUTHORITY` (WKT1) or `ID` (WKT2) of the root node itself.
    pub(crate) fn epsg_code(&self) -> Result<Option<u32>> {
        let authority = self.children().find(|node| {
            (node.keyword == "AUTHORITY" || node.keyword == "ID")
                && node
                    .value(0)
                    .is_some_and(|name| name.eq_ignore_ascii_case("EPSG"))
        });

        let Some(authority) = authority else {
            return Ok(None);
        };

        let code = authority.value(1).unwrap_or_default();
        code.trim()
            .parse()
            .map(Some)
            .map_err(|_| malformed(format!("invalid EPSG code {code:?} in WKT")))
    }
}

fn tokenize(text: &str) -> Result<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for token in WKT_TOKEN.find_iter(text) {
        let gap = &text[last_end..token.start()];
        if !gap.trim().is_empty() {
            return Err(malformed(format!("unexpected {gap:?} in WKT definition")));
        }

        tokens.push(token.as_str());
        last_end = token.end();
    }

    let rest = &text[last_end..];
    if !rest.trim().is_empty() {
        return Err(malformed(format!("unexpected {rest:?} in WKT definition")));
    }

    Ok(tokens)
}

/// Position in the token list of a definition.
struct Cursor<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.position + offset).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek_at(0)?;
        self.position += 1;
        Some(token)
    }
}

fn parse_node(cursor: &mut Cursor<'_>) -> Result<WktNode> {
    let keyword = match cursor.next() {
        Some(token) if is_bare(token) => token.to_ascii_uppercase(),
        Some(token) => {
            return Err(malformed(format!("expected WKT keyword, got {token:?}")));
        }
        None => return Err(unexpected_end()),
    };

    match cursor.next() {
        Some("[" | "(") => {}
        _ => return Err(malformed(format!("expected '[' after {keyword}"))),
    }

    let mut args = Vec::new();
    if matches!(cursor.peek_at(0), Some("]" | ")")) {
        cursor.next();
        return Ok(WktNode { keyword, args });
    }

    loop {
        args.push(parse_value(cursor)?);

        match cursor.next() {
            Some(",") => {}
            Some("]" | ")") => return Ok(WktNode { keyword, args }),
            Some(token) => {
                return Err(malformed(format!(
                    "expected ',' or ']' in {keyword}, got {token:?}"
                )))
            }
            None => return Err(unexpected_end()),
        }
    }
}

fn parse_value(cursor: &mut Cursor<'_>) -> Result<WktValue> {
    let Some(token) = cursor.peek_at(0) else {
        return Err(unexpected_end());
    };

    if let Some(quoted) = token.strip_prefix('"') {
        cursor.next();
        let text = quoted.strip_suffix('"').unwrap_or(quoted);
        return Ok(WktValue::Text(text.replace("\"\"", "\"")));
    }

    if !is_bare(token) {
        return Err(malformed(format!("unexpected {token:?} in WKT definition")));
    }

    // a bare word is either a nested node or a plain value, depending on what follows it
    if matches!(cursor.peek_at(1), Some("[" | "(")) {
        return Ok(WktValue::Node(parse_node(cursor)?));
    }

    cursor.next();
    Ok(WktValue::Token(token.to_string()))
}

fn is_bare(token: &str) -> bool {
    !matches!(token, "[" | "]" | "(" | ")" | ",") && !token.starts_with('"')
}

fn unexpected_end() -> AdvisorError {
    malformed("unbalanced brackets in WKT definition")
}

fn malformed(message: impl Into<String>) -> AdvisorError {
    AdvisorError::MalformedCrs(message.into())
}
