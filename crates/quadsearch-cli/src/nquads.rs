//! Line-oriented N-Quads reader.
//!
//! Accepts one statement per line, `#` comments and blank lines. Escapes in
//! IRIs (`\uXXXX`, `\UXXXXXXXX`) and string literals (`\t \b \n \r \f \" \' \\`
//! plus the unicode forms) are decoded.

use quadsearch_core::{Iri, Literal, Quad, Term};
use thiserror::Error;

/// Syntax error with a 1-based position.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    /// Line within the document, 1 for single-line parses
    pub line: usize,
    /// Character column
    pub column: usize,
    /// What went wrong
    pub message: String,
}

/// Parse every statement in a document.
pub fn parse_document(input: &str) -> Result<Vec<Quad>, ParseError> {
    let mut quads = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let parsed = parse_line(line).map_err(|mut err| {
            err.line = index + 1;
            err
        })?;
        quads.extend(parsed);
    }
    Ok(quads)
}

/// Parse one line; `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Quad>, ParseError> {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();
    if cursor.at_statement_end() {
        return Ok(None);
    }

    let subject = cursor.resource("subject")?;
    cursor.skip_whitespace();
    let predicate = cursor.iri()?;
    cursor.skip_whitespace();
    let object = match cursor.peek() {
        Some('"') => Term::Literal(cursor.literal()?),
        _ => cursor.resource("object")?,
    };
    cursor.skip_whitespace();

    let graph = match cursor.peek() {
        Some('<') | Some('_') => {
            let graph = cursor.resource("graph")?;
            cursor.skip_whitespace();
            Some(graph)
        }
        _ => None,
    };

    cursor.expect('.')?;
    cursor.skip_whitespace();
    if !cursor.at_statement_end() {
        return Err(cursor.error("unexpected content after '.'"));
    }

    Ok(Some(Quad {
        subject,
        predicate,
        object,
        graph,
    }))
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(self.peek(), None | Some('#'))
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: 1,
            column: self.pos + 1,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of line", expected))),
        }
    }

    /// IRI or blank node
    fn resource(&mut self, slot: &str) -> Result<Term, ParseError> {
        match self.peek() {
            Some('<') => Ok(Term::Iri(self.iri()?)),
            Some('_') => self.blank_node(),
            _ => Err(self.error(format!("expected IRI or blank node {}", slot))),
        }
    }

    fn iri(&mut self) -> Result<Iri, ParseError> {
        self.expect('<')?;
        let mut iri = String::new();
        loop {
            match self.bump() {
                Some('>') => return Ok(Iri::new(iri)),
                Some('\\') => iri.push(self.unicode_escape()?),
                Some(c) if c.is_whitespace() => {
                    return Err(self.error("whitespace inside IRI"));
                }
                Some(c) => iri.push(c),
                None => return Err(self.error("unterminated IRI")),
            }
        }
    }

    fn blank_node(&mut self) -> Result<Term, ParseError> {
        self.expect('_')?;
        self.expect(':')?;

        let start = self.pos;
        while matches!(self.peek(), Some(c) if !c.is_whitespace() && c != '<' && c != '"') {
            self.pos += 1;
        }
        // A label may contain '.', but not end with one.
        while self.pos > start && self.chars[self.pos - 1] == '.' {
            self.pos -= 1;
        }

        if self.pos == start {
            return Err(self.error("empty blank node label"));
        }
        Ok(Term::blank(self.chars[start..self.pos].iter().collect::<String>()))
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => value.push(self.string_escape()?),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }

        match self.peek() {
            Some('@') => {
                self.pos += 1;
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '-') {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.error("empty language tag"));
                }
                let language: String = self.chars[start..self.pos].iter().collect();
                Ok(Literal::lang(value, language))
            }
            Some('^') => {
                self.expect('^')?;
                self.expect('^')?;
                Ok(Literal::typed(value, self.iri()?))
            }
            _ => Ok(Literal::plain(value)),
        }
    }

    fn string_escape(&mut self) -> Result<char, ParseError> {
        match self.peek() {
            Some('t') => self.simple_escape('\t'),
            Some('b') => self.simple_escape('\u{8}'),
            Some('n') => self.simple_escape('\n'),
            Some('r') => self.simple_escape('\r'),
            Some('f') => self.simple_escape('\u{c}'),
            Some('"') => self.simple_escape('"'),
            Some('\'') => self.simple_escape('\''),
            Some('\\') => self.simple_escape('\\'),
            _ => self.unicode_escape(),
        }
    }

    fn simple_escape(&mut self, c: char) -> Result<char, ParseError> {
        self.pos += 1;
        Ok(c)
    }

    /// `uXXXX` or `UXXXXXXXX`, after the backslash
    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        let digits = match self.bump() {
            Some('u') => 4,
            Some('U') => 8,
            _ => return Err(self.error("invalid escape sequence")),
        };

        let end = self.pos + digits;
        if end > self.chars.len() {
            return Err(self.error("truncated unicode escape"));
        }
        let hex: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid unicode escape '{}'", hex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    #[test]
    fn test_triple_in_default_graph() {
        let quad = parse_line(
            r#"<http://example.org/Jupiter> <http://example.org/radius> "69911 km"@en ."#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(quad.subject, Term::iri("http://example.org/Jupiter"));
        assert_eq!(quad.predicate.as_str(), "http://example.org/radius");
        assert_eq!(quad.object, Term::from(Literal::lang("69911 km", "en")));
        assert!(quad.is_default_graph());
    }

    #[test]
    fn test_named_graph_and_blank_nodes() {
        let quad = parse_line(r#"_:s <http://example.org/p> _:o.x _:g ."#)
            .unwrap()
            .unwrap();

        assert_eq!(quad.subject, Term::blank("s"));
        assert_eq!(quad.object, Term::blank("o.x"));
        assert_eq!(quad.graph, Some(Term::blank("g")));
    }

    #[test]
    fn test_blank_label_before_final_dot() {
        let quad = parse_line("<http://example.org/s> <http://example.org/p> _:b0.")
            .unwrap()
            .unwrap();
        assert_eq!(quad.object, Term::blank("b0"));
    }

    #[test]
    fn test_typed_literal_and_escapes() {
        let line = format!(
            r#"<http://example.org/s> <http://example.org/p> "42\n"^^<{}> <http://example.org/g> ."#,
            XSD_INTEGER
        );
        let quad = parse_line(&line).unwrap().unwrap();

        assert_eq!(quad.object, Term::from(Literal::typed("42\n", XSD_INTEGER)));
        assert_eq!(quad.graph, Some(Term::iri("http://example.org/g")));
    }

    #[test]
    fn test_display_round_trip() {
        let line = r#"<http://example.org/s> <http://example.org/p> "say \"hi\"\tnow"@en-GB <http://example.org/g> ."#;
        let quad = parse_line(line).unwrap().unwrap();
        assert_eq!(quad.to_string(), line);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a comment").unwrap(), None);

        let quad = parse_line("<http://a> <http://b> \"c\" . # trailing").unwrap();
        assert!(quad.is_some());
    }

    #[test]
    fn test_errors_carry_position() {
        let err = parse_line("<http://a> \"not a predicate\" \"c\" .").unwrap_err();
        assert_eq!(err.column, 12);

        let err = parse_document("<http://a> <http://b> \"c\" .\n<http://a> <http://b> \"c\"")
            .unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("expected '.'"));
    }

    #[test]
    fn test_literal_subject_rejected() {
        assert!(parse_line("\"s\" <http://b> \"c\" .").is_err());
    }
}
