use crate::arith::check_depth;
use crate::ast::{Ast, Node, NodeType};
use crate::error::CalcError;
use crate::lexer::{Token, tokenize};

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
    max_depth: Option<usize>,
}

impl Parser {
    pub(crate) fn new(s: &str, max_depth: Option<usize>) -> Result<Self, Vec<CalcError>> {
        let tokens = tokenize(s)?;
        Ok(Self {
            tokens,
            pos: 0,
            nesting: 0,
            max_depth,
        })
    }
    // tokenize always terminates the stream with Eof, and bump never moves past it
    fn look(&self) -> &Token {
        &self.tokens[self.pos]
    }
    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }
    fn expect(&mut self, t: &Token) -> Result<(), CalcError> {
        if self.look() == t {
            self.bump();
            Ok(())
        } else {
            Err(CalcError::Parser(format!(
                "expected {:?}, found {:?}",
                t,
                self.look()
            )))
        }
    }
    // Parentheses and unary minus recurse; both count against the limit.
    fn enter(&mut self) -> Result<(), CalcError> {
        self.nesting += 1;
        check_depth(self.nesting, self.max_depth)
    }
    fn leave(&mut self) {
        self.nesting -= 1;
    }
    fn combine(&self, kind: NodeType, lhs: Parsed, rhs: Parsed) -> Result<Parsed, CalcError> {
        let depth = 1 + lhs.depth.max(rhs.depth);
        check_depth(depth, self.max_depth)?;
        Ok(Parsed {
            node: Node::binary(kind, lhs.node, rhs.node),
            depth,
        })
    }
    pub(crate) fn parse(mut self) -> Result<Ast, CalcError> {
        let expr = self.additive()?;
        if !matches!(self.look(), Token::Eof) {
            return Err(CalcError::Parser(format!(
                "trailing tokens starting at {:?}",
                self.look()
            )));
        }
        Ok(Ast::new(expr.node))
    }
    fn additive(&mut self) -> Result<Parsed, CalcError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let kind = match self.look() {
                Token::Plus => NodeType::Addition,
                Token::Minus => NodeType::Subtraction,
                _ => break,
            };
            self.bump();
            let rhs = self.multiplicative()?;
            lhs = self.combine(kind, lhs, rhs)?;
        }
        Ok(lhs)
    }
    fn multiplicative(&mut self) -> Result<Parsed, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let kind = match self.look() {
                Token::Star => NodeType::Multiplication,
                Token::Slash => NodeType::Division,
                _ => break,
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = self.combine(kind, lhs, rhs)?;
        }
        Ok(lhs)
    }
    fn unary(&mut self) -> Result<Parsed, CalcError> {
        if matches!(self.look(), Token::Minus) {
            self.bump();
            self.enter()?;
            let operand = self.unary()?;
            self.leave();
            return self.negate(operand);
        }
        self.primary()
    }
    fn primary(&mut self) -> Result<Parsed, CalcError> {
        let node = match self.look().clone() {
            Token::Integer(text) => Node::integer(text),
            Token::Decimal(text) => Node::decimal(text),
            Token::Ident(name) => Node::variable(name),
            Token::LParen => {
                self.bump();
                self.enter()?;
                let e = self.additive()?;
                self.expect(&Token::RParen)?;
                self.leave();
                return Ok(e);
            }
            other => {
                return Err(CalcError::Parser(format!(
                    "expected number, identifier, or '(', found {:?}",
                    other
                )));
            }
        };
        self.bump();
        Ok(Parsed { node, depth: 1 })
    }
    /// Unary minus. Numeric literals absorb the sign into their text; anything
    /// else is scaled by -1.
    fn negate(&self, operand: Parsed) -> Result<Parsed, CalcError> {
        let Parsed { node, depth } = operand;
        match node.kind {
            NodeType::Integer | NodeType::Decimal => {
                let literal = match node.literal.strip_prefix('-') {
                    Some(rest) => rest.to_string(),
                    None => format!("-{}", node.literal),
                };
                Ok(Parsed {
                    node: Node::new(node.kind, literal),
                    depth: 1,
                })
            }
            _ => {
                let minus_one = Parsed {
                    node: Node::integer("-1"),
                    depth: 1,
                };
                self.combine(NodeType::Multiplication, minus_one, Parsed { node, depth })
            }
        }
    }
}

/// A parsed subtree together with its depth, so the depth limit can be
/// enforced while the tree is built.
struct Parsed {
    node: Node,
    depth: usize,
}

/// Parses source text into an expression tree.
///
/// Lexing errors are all reported together; a syntax error stops parsing and
/// is returned on its own.
pub fn parse(src: &str) -> Result<Ast, Vec<CalcError>> {
    parse_limited(src, None)
}

/// Like [`parse`], but rejects input nested deeper than `max_depth` with
/// [`CalcError::DepthLimitExceeded`] before any recursion can run away.
pub(crate) fn parse_limited(
    src: &str,
    max_depth: Option<usize>,
) -> Result<Ast, Vec<CalcError>> {
    let parser = Parser::new(src, max_depth)?;
    parser.parse().map_err(|e| vec![e])
}
