// SPDX-License-Identifier: MIT

//! Guard expression parser
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr      := and ("or" and)*
//! and       := unary ("and" unary)*
//! unary     := "not" unary | primary
//! primary   := "(" expr ")" | "true" | "false" | path predicate
//! predicate := ("==" | "!=") literal
//!            | "in" "[" literal ("," literal)* "]"
//!            | "is" ["not"] "set"
//! literal   := 'text' | "text" | true | false | null
//! ```

use std::fmt;

use super::ast::{CompareOp, Condition, Literal};
use crate::error::ConditionError;

/// Parse a guard expression string into a syntax tree
pub fn parse(input: &str) -> Result<Condition, ConditionError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let condition = parser.parse_or()?;
    match parser.peek() {
        None => Ok(condition),
        Some(token) => Err(ConditionError::UnexpectedToken {
            expected: "end of input".to_string(),
            found: token.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Str(String),
    Eq,
    NotEq,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl Token {
    fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Word(w) if w == word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Str(s) => write!(f, "string '{}'", s),
            Token::Eq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

fn tokenize(input: &str) -> Result<Vec<Token>, ConditionError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '\'' | '"' => {
                let mut text = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == c {
                        closed = true;
                        break;
                    }
                    text.push(next);
                }
                if !closed {
                    return Err(ConditionError::UnterminatedString(pos));
                }
                tokens.push(Token::Str(text));
            }
            '=' | '!' => match chars.next() {
                Some((_, '=')) => tokens.push(if c == '=' { Token::Eq } else { Token::NotEq }),
                _ => return Err(ConditionError::UnexpectedChar { ch: c, pos }),
            },
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '[' => tokens.push(Token::LBracket),
            ']' => tokens.push(Token::RBracket),
            ',' => tokens.push(Token::Comma),
            c if is_word_char(c) => {
                let mut word = c.to_string();
                while let Some(&(_, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            other => return Err(ConditionError::UnexpectedChar { ch: other, pos }),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expected: &str) -> Result<Token, ConditionError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ConditionError::UnexpectedEnd(expected.to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.peek().map(|t| t.is_word(word)).unwrap_or(false) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: Token) -> Result<(), ConditionError> {
        let token = self.next(&want.to_string())?;
        if token == want {
            Ok(())
        } else {
            Err(ConditionError::UnexpectedToken {
                expected: want.to_string(),
                found: token.to_string(),
            })
        }
    }

    fn parse_or(&mut self) -> Result<Condition, ConditionError> {
        let mut left = self.parse_and()?;
        while self.eat_word("or") {
            let right = self.parse_and()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Condition, ConditionError> {
        let mut left = self.parse_unary()?;
        while self.eat_word("and") {
            let right = self.parse_unary()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Condition, ConditionError> {
        if self.eat_word("not") {
            return Ok(Condition::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Condition, ConditionError> {
        match self.next("a condition")? {
            Token::LParen => {
                let inner = self.parse_or()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Word(w) if w == "true" => Ok(Condition::True),
            Token::Word(w) if w == "false" => Ok(Condition::False),
            Token::Word(path) => self.parse_predicate(path),
            other => Err(ConditionError::UnexpectedToken {
                expected: "a field path".to_string(),
                found: other.to_string(),
            }),
        }
    }

    fn parse_predicate(&mut self, path: String) -> Result<Condition, ConditionError> {
        match self.next("'==', '!=', 'in' or 'is'")? {
            Token::Eq => Ok(Condition::Compare {
                path,
                op: CompareOp::Eq,
                right: self.parse_literal()?,
            }),
            Token::NotEq => Ok(Condition::Compare {
                path,
                op: CompareOp::NotEq,
                right: self.parse_literal()?,
            }),
            Token::Word(w) if w == "in" => {
                self.expect(Token::LBracket)?;
                let mut options = vec![self.parse_literal()?];
                while self.peek() == Some(&Token::Comma) {
                    self.pos += 1;
                    options.push(self.parse_literal()?);
                }
                self.expect(Token::RBracket)?;
                Ok(Condition::OneOf { path, options })
            }
            Token::Word(w) if w == "is" => {
                let negated = self.eat_word("not");
                if !self.eat_word("set") {
                    let found = self
                        .peek()
                        .map(Token::to_string)
                        .unwrap_or_else(|| "end of input".to_string());
                    return Err(ConditionError::UnexpectedToken {
                        expected: "'set'".to_string(),
                        found,
                    });
                }
                let is_set = Condition::IsSet(path);
                Ok(if negated {
                    Condition::Not(Box::new(is_set))
                } else {
                    is_set
                })
            }
            other => Err(ConditionError::UnexpectedToken {
                expected: "'==', '!=', 'in' or 'is'".to_string(),
                found: other.to_string(),
            }),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal, ConditionError> {
        match self.next("a literal")? {
            Token::Str(s) => Ok(Literal::String(s)),
            Token::Word(w) if w == "true" => Ok(Literal::Boolean(true)),
            Token::Word(w) if w == "false" => Ok(Literal::Boolean(false)),
            Token::Word(w) if w == "null" => Ok(Literal::Null),
            other => Err(ConditionError::UnexpectedToken {
                expected: "a literal".to_string(),
                found: other.to_string(),
            }),
        }
    }
}
