//! JSONPath subset used to locate version data in a document
//!
//! Supports:
//! - `$` — the document root
//! - `$.results`, `$['results']`, `$["results"]` — child access
//! - `$.results[0]`, `$.results[-1]` — array index (negative counts from the end)
//! - `$.results[*]`, `$.results.*` — wildcard over array elements or map values
//! - `$..name`, `$..*` — recursive descent

use serde_json::Value;

use crate::document::error::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Child(String),
    Index(i64),
    Wildcard,
    Descendant(String),
    DescendantWildcard,
}

impl Segment {
    fn is_definite(&self) -> bool {
        matches!(self, Segment::Child(_) | Segment::Index(_))
    }
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    expr: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(expr: &str) -> Result<Self, QueryError> {
        let segments = Parser::new(expr).parse()?;
        Ok(Self {
            expr: expr.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A definite path addresses at most one node.
    pub fn is_definite(&self) -> bool {
        self.segments.iter().all(Segment::is_definite)
    }

    /// Every node the path selects, in document order.
    pub fn select<'a>(&self, document: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![document];
        for segment in &self.segments {
            let mut next = Vec::new();
            for node in current {
                apply_segment(segment, node, &mut next);
            }
            current = next;
        }
        current
    }
}

/// Run `path` against `document` and return the selected nodes as a flat
/// sequence.
///
/// A definite path that lands on an array yields the array's elements and one
/// that lands on a map yields that map alone. Any other definite result is
/// rejected. Matching nothing is always an error.
pub fn query(document: &Value, path: &str) -> Result<Vec<Value>, QueryError> {
    let json_path = JsonPath::parse(path)?;
    let selected = json_path.select(document);

    let nodes = if json_path.is_definite() {
        match selected.first().copied() {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(node @ Value::Object(_)) => vec![node.clone()],
            Some(other) => {
                return Err(QueryError::UnexpectedResult {
                    path: path.to_string(),
                    node: render(other),
                });
            }
        }
    } else {
        selected.into_iter().cloned().collect()
    };

    if nodes.is_empty() {
        return Err(QueryError::NoMatch {
            path: path.to_string(),
            document: render(document),
        });
    }

    Ok(nodes)
}

pub(crate) fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

fn apply_segment<'a>(segment: &Segment, node: &'a Value, out: &mut Vec<&'a Value>) {
    match segment {
        Segment::Child(name) => {
            if let Some(child) = node.as_object().and_then(|map| map.get(name)) {
                out.push(child);
            }
        }
        Segment::Index(index) => {
            if let Some(items) = node.as_array() {
                let len = items.len() as i64;
                let resolved = if *index < 0 { len + index } else { *index };
                if (0..len).contains(&resolved) {
                    out.push(&items[resolved as usize]);
                }
            }
        }
        Segment::Wildcard => out.extend(children(node)),
        Segment::Descendant(name) => collect_named(node, name, out),
        Segment::DescendantWildcard => collect_all(node, out),
    }
}

fn children(node: &Value) -> Vec<&Value> {
    match node {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn collect_named<'a>(node: &'a Value, name: &str, out: &mut Vec<&'a Value>) {
    if let Some(child) = node.as_object().and_then(|map| map.get(name)) {
        out.push(child);
    }
    for child in children(node) {
        collect_named(child, name, out);
    }
}

fn collect_all<'a>(node: &'a Value, out: &mut Vec<&'a Value>) {
    for child in children(node) {
        out.push(child);
        collect_all(child, out);
    }
}

struct Parser<'a> {
    expr: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            expr,
            chars: expr.trim().chars().peekable(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> QueryError {
        QueryError::InvalidPath {
            path: self.expr.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(mut self) -> Result<Vec<Segment>, QueryError> {
        if self.chars.next() != Some('$') {
            return Err(self.error("expression must start with '$'"));
        }

        let mut segments = Vec::new();
        while let Some(c) = self.chars.next() {
            let segment = match c {
                '.' if self.chars.peek() == Some(&'.') => {
                    self.chars.next();
                    if self.chars.peek() == Some(&'*') {
                        self.chars.next();
                        Segment::DescendantWildcard
                    } else {
                        Segment::Descendant(self.name()?)
                    }
                }
                '.' if self.chars.peek() == Some(&'*') => {
                    self.chars.next();
                    Segment::Wildcard
                }
                '.' => Segment::Child(self.name()?),
                '[' => self.bracket()?,
                other => return Err(self.error(format!("unexpected character {:?}", other))),
            };
            segments.push(segment);
        }

        Ok(segments)
    }

    fn name(&mut self) -> Result<String, QueryError> {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '.' || c == '[' {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        if name.is_empty() {
            return Err(self.error("empty field name"));
        }
        Ok(name)
    }

    fn bracket(&mut self) -> Result<Segment, QueryError> {
        self.skip_whitespace();
        let segment = match self.chars.peek().copied() {
            Some('*') => {
                self.chars.next();
                Segment::Wildcard
            }
            Some(quote @ ('\'' | '"')) => {
                self.chars.next();
                Segment::Child(self.quoted(quote)?)
            }
            Some(_) => Segment::Index(self.index()?),
            None => return Err(self.error("unterminated '['")),
        };
        self.skip_whitespace();
        if self.chars.next() != Some(']') {
            return Err(self.error("expected ']'"));
        }
        Ok(segment)
    }

    fn quoted(&mut self, quote: char) -> Result<String, QueryError> {
        let mut name = String::new();
        loop {
            match self.chars.next() {
                Some('\\') => match self.chars.next() {
                    Some(escaped) => name.push(escaped),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) if c == quote => return Ok(name),
                Some(c) => name.push(c),
                None => return Err(self.error("unterminated quoted name")),
            }
        }
    }

    fn index(&mut self) -> Result<i64, QueryError> {
        let mut digits = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || (c == '-' && digits.is_empty()) {
                digits.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("invalid index {:?}", digits)))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("$", vec![])]
    #[case("$.results", vec![Segment::Child("results".to_string())])]
    #[case("$['tag name']", vec![Segment::Child("tag name".to_string())])]
    #[case(r#"$["a.b"]"#, vec![Segment::Child("a.b".to_string())])]
    #[case("$[*].tag_name", vec![Segment::Wildcard, Segment::Child("tag_name".to_string())])]
    #[case("$.results[ -1 ]", vec![Segment::Child("results".to_string()), Segment::Index(-1)])]
    #[case("$.versions.*", vec![Segment::Child("versions".to_string()), Segment::Wildcard])]
    #[case("$..name", vec![Segment::Descendant("name".to_string())])]
    #[case("$..*", vec![Segment::DescendantWildcard])]
    fn parse_accepts_supported_syntax(#[case] expr: &str, #[case] expected: Vec<Segment>) {
        assert_eq!(JsonPath::parse(expr).unwrap().segments(), expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("results")]
    #[case("$.")]
    #[case("$[")]
    #[case("$[abc]")]
    #[case("$['unterminated]")]
    #[case("$[0")]
    #[case("$x")]
    fn parse_rejects_invalid_expressions(#[case] expr: &str) {
        assert!(matches!(
            JsonPath::parse(expr),
            Err(QueryError::InvalidPath { .. })
        ));
    }

    #[test]
    fn query_wildcard_collects_fields_in_order() {
        let doc = json!({"results": [{"name": "v1.0.0"}, {"name": "v1.1.0"}]});

        let result = query(&doc, "$.results[*].name").unwrap();

        assert_eq!(result, vec![json!("v1.0.0"), json!("v1.1.0")]);
    }

    #[test]
    fn query_wildcard_skips_elements_without_the_field() {
        let doc = json!([{"tag_name": "v2.0.0"}, {"draft": true}, {"tag_name": "v1.0.0"}]);

        let result = query(&doc, "$[*].tag_name").unwrap();

        assert_eq!(result, vec![json!("v2.0.0"), json!("v1.0.0")]);
    }

    #[test]
    fn query_definite_path_to_array_yields_elements() {
        let doc = json!({"versions": ["1.0.0", "1.1.0"]});

        let result = query(&doc, "$.versions").unwrap();

        assert_eq!(result, vec![json!("1.0.0"), json!("1.1.0")]);
    }

    #[test]
    fn query_definite_path_to_map_yields_singleton() {
        let doc = json!({"releases": {"1.0.0": {}, "2.0.0": {}}});

        let result = query(&doc, "$.releases").unwrap();

        assert_eq!(result, vec![json!({"1.0.0": {}, "2.0.0": {}})]);
    }

    #[test]
    fn query_definite_path_to_scalar_is_rejected() {
        let doc = json!({"latest": "1.0.0"});

        assert_eq!(
            query(&doc, "$.latest"),
            Err(QueryError::UnexpectedResult {
                path: "$.latest".to_string(),
                node: r#""1.0.0""#.to_string(),
            })
        );
    }

    #[test]
    fn query_negative_index_counts_from_end() {
        let doc = json!({"channels": [["0.1.0"], ["1.0.0", "1.1.0"]]});

        let result = query(&doc, "$.channels[-1]").unwrap();

        assert_eq!(result, vec![json!("1.0.0"), json!("1.1.0")]);
    }

    #[test]
    fn query_recursive_descent_finds_nested_fields() {
        let doc = json!({
            "stable": {"name": "1.2.0"},
            "channels": [{"name": "1.3.0-rc.1"}, {"meta": {"name": "0.9.0"}}]
        });

        let result = query(&doc, "$..name").unwrap();

        assert_eq!(
            result,
            vec![json!("1.2.0"), json!("1.3.0-rc.1"), json!("0.9.0")]
        );
    }

    #[test]
    fn query_matching_nothing_reports_path_and_document() {
        let doc = json!({"results": []});

        let err = query(&doc, "$.results[*].name").unwrap_err();

        assert_eq!(
            err,
            QueryError::NoMatch {
                path: "$.results[*].name".to_string(),
                document: r#"{"results":[]}"#.to_string(),
            }
        );
    }

    #[test]
    fn query_missing_definite_key_is_no_match() {
        let doc = json!({"items": ["1.0.0"]});

        assert!(matches!(
            query(&doc, "$.versions"),
            Err(QueryError::NoMatch { .. })
        ));
    }

    #[test]
    fn query_empty_definite_array_is_no_match() {
        let doc = json!({"versions": []});

        assert!(matches!(
            query(&doc, "$.versions"),
            Err(QueryError::NoMatch { .. })
        ));
    }
}
