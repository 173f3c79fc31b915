//! Parser for the netlist DSL.

use std::collections::HashSet;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{ReduceError, Result};

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();
        let mut seen = HashSet::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let resistor = self.parse_resistor()?;
                    if !seen.insert(resistor.name.clone()) {
                        return Err(ReduceError::DuplicateComponent {
                            name: resistor.name,
                            line: resistor.line,
                        });
                    }
                    for node in &resistor.nodes {
                        ast.declare_node(node);
                    }
                    ast.resistors.push(resistor);
                }
                _ => {
                    return Err(ReduceError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.expect_line_end()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect_line_end(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(ReduceError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    /// Consume a node name. Bare numbers such as `1` are valid node names.
    fn expect_node(&mut self, line: usize) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(ReduceError::parse(
                line,
                format!("expected node name, got {:?}", self.current.kind),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut NetlistAst) -> Result<()> {
        let text = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let directive = Directive::from_text(&text)
            .ok_or_else(|| ReduceError::parse(line, format!("unknown directive: {}", text)))?;
        let node = self.expect_node(line)?;

        match directive {
            Directive::Source => ast.source = Some(node),
            Directive::Target => ast.target = Some(node),
            Directive::Node => ast.declare_node(&node),
        }

        Ok(())
    }

    fn parse_resistor(&mut self) -> Result<ResistorDef> {
        let name = self.current.text.clone();
        let line = self.current.line;

        if !name.starts_with(['R', 'r']) {
            return Err(ReduceError::UnknownComponentType {
                component_type: name,
                line,
            });
        }
        self.advance()?;

        let mut nodes = Vec::with_capacity(2);
        while nodes.len() < 2 {
            if matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(ReduceError::invalid_component(
                    &name,
                    line,
                    format!("expected 2 nodes, got {}", nodes.len()),
                ));
            }
            nodes.push(self.expect_node(line)?);
        }

        let value = match self.current.kind {
            TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                parse_value(&text).ok_or_else(|| {
                    ReduceError::invalid_component(&name, line, format!("invalid value: {}", text))
                })?
            }
            TokenKind::Newline | TokenKind::Eof => {
                return Err(ReduceError::invalid_component(
                    &name,
                    line,
                    "resistor requires a value",
                ));
            }
            _ => {
                return Err(ReduceError::invalid_component(
                    &name,
                    line,
                    format!("invalid value: {}", self.current.text),
                ));
            }
        };

        Ok(ResistorDef {
            name,
            nodes,
            value,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    #[test]
    fn test_parse_resistor() {
        let ast = parse("R1 in out 10k").unwrap();
        assert_eq!(ast.resistors.len(), 1);
        assert_eq!(ast.resistors[0].name, "R1");
        assert_eq!(ast.resistors[0].nodes, vec!["in", "out"]);
        assert_eq!(ast.resistors[0].value, 10_000.0);
        assert_eq!(ast.nodes, vec!["in", "out"]);
    }

    #[test]
    fn test_parse_terminals() {
        let ast = parse(".source in\n.target out\nR1 in out 1k").unwrap();
        assert_eq!(ast.source, Some("in".to_string()));
        assert_eq!(ast.target, Some("out".to_string()));

        let ast = parse(".input 1\n.output 4\nR1 1 4 1k").unwrap();
        assert_eq!(ast.source, Some("1".to_string()));
        assert_eq!(ast.target, Some("4".to_string()));
    }

    #[test]
    fn test_parse_numeric_nodes() {
        let ast = parse("R1 1 2 4\nR2 2 3 6\n").unwrap();
        assert_eq!(ast.resistors[1].nodes, vec!["2", "3"]);
        assert_eq!(ast.resistors[1].value, 6.0);
        assert_eq!(ast.nodes, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_leading_dot_value() {
        let ast = parse(".source a\n.target b\nR1 a b .47k").unwrap();
        assert!((ast.resistors[0].value - 470.0).abs() < 1e-9);
        assert_eq!(ast.source, Some("a".to_string()));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# divider\nR1 in mid 1k ; top\n\n\nR2 mid 0 1k\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.resistors.len(), 2);
    }

    #[test]
    fn test_negative_value_is_parsed() {
        // rejected later, by network validation
        let ast = parse("R1 a b -5").unwrap();
        assert_eq!(ast.resistors[0].value, -5.0);
    }

    #[test]
    fn test_missing_value() {
        let err = parse("R1 a b").unwrap_err();
        assert!(matches!(err, ReduceError::InvalidComponent { ref name, line: 1, .. } if name == "R1"));
    }

    #[test]
    fn test_missing_node() {
        let err = parse("R1 a\n").unwrap_err();
        assert!(matches!(err, ReduceError::InvalidComponent { .. }));
    }

    #[test]
    fn test_unknown_component() {
        let err = parse("R1 a b 1k\nC1 a b 100n").unwrap_err();
        assert!(matches!(
            err,
            ReduceError::UnknownComponentType { ref component_type, line: 2 } if component_type == "C1"
        ));
    }

    #[test]
    fn test_duplicate_component() {
        let err = parse("R1 a b 1k\nR1 b c 2k").unwrap_err();
        assert!(matches!(err, ReduceError::DuplicateComponent { line: 2, .. }));
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("R1 a b 1k extra").unwrap_err();
        assert!(matches!(err, ReduceError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse(".model D1 D").unwrap_err();
        assert!(matches!(err, ReduceError::ParseError { .. }));
    }
}
