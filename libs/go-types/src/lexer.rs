//! Go lexer - tokenizes source files
//!
//! Produces the token stream the declaration parser consumes, including the
//! automatic semicolons the Go grammar inserts at line ends.

use crate::error::SourceError;
use crate::token::{Token, TokenType};

type LexResult<T> = std::result::Result<T, SourceError>;

/// Operators ordered longest first so the first prefix match wins
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%", "&",
    "|", "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ";", ".", ":", "~",
];

/// The Go lexer
pub struct Lexer {
    file: String,
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    current_char: Option<char>,
    insert_semicolon: bool,
}

impl Lexer {
    /// Create a new lexer for the given file contents
    pub fn new(file: impl Into<String>, input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            file: file.into(),
            chars,
            position: 0,
            line: 1,
            column: 1,
            current_char,
            insert_semicolon: false,
        }
    }

    /// Tokenize the whole input, ending with an `Eof` token
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenType::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> SourceError {
        SourceError::new(self.file.clone(), line, column, message)
    }

    /// Emit the semicolon a newline (or end of input) stands for
    fn auto_semicolon(&mut self) -> Token {
        self.insert_semicolon = false;
        Token::new(TokenType::Semicolon, "\n", self.line, self.column)
    }

    /// Return the next token
    pub fn next_token(&mut self) -> LexResult<Token> {
        loop {
            match self.current_char {
                None => {
                    if self.insert_semicolon {
                        return Ok(self.auto_semicolon());
                    }
                    return Ok(Token::new(TokenType::Eof, "", self.line, self.column));
                }
                Some('\n') => {
                    if self.insert_semicolon {
                        let token = self.auto_semicolon();
                        self.advance();
                        return Ok(token);
                    }
                    self.advance();
                }
                Some(c) if c.is_whitespace() => self.advance(),
                Some('/') if self.peek() == Some('/') => {
                    // Leave the newline for the next iteration
                    while let Some(c) = self.current_char {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek() == Some('*') => {
                    let spans_lines = self.skip_block_comment()?;
                    if spans_lines && self.insert_semicolon {
                        return Ok(self.auto_semicolon());
                    }
                }
                Some(_) => break,
            }
        }

        let line = self.line;
        let column = self.column;
        let c = match self.current_char {
            Some(c) => c,
            None => return Ok(Token::new(TokenType::Eof, "", line, column)),
        };

        let token = if c.is_alphabetic() || c == '_' {
            let ident = self.read_identifier();
            let token_type = TokenType::keyword(&ident).unwrap_or(TokenType::Ident);
            Token::new(token_type, ident, line, column)
        } else if c.is_ascii_digit()
            || (c == '.' && self.peek().is_some_and(|n| n.is_ascii_digit()))
        {
            Token::new(TokenType::Number, self.read_number(), line, column)
        } else if c == '"' {
            Token::new(TokenType::String, self.read_string()?, line, column)
        } else if c == '`' {
            Token::new(TokenType::String, self.read_raw_string()?, line, column)
        } else if c == '\'' {
            Token::new(TokenType::Char, self.read_rune()?, line, column)
        } else {
            self.read_operator(line, column)?
        };

        self.insert_semicolon =
            token.token_type.ends_statement() || token.value == "++" || token.value == "--";

        Ok(token)
    }

    /// Skip a `/* */` comment, reporting whether it contained a newline
    fn skip_block_comment(&mut self) -> LexResult<bool> {
        let (line, column) = (self.line, self.column);
        self.advance(); // Skip '/'
        self.advance(); // Skip '*'

        let mut spans_lines = false;
        while let Some(c) = self.current_char {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                return Ok(spans_lines);
            }
            if c == '\n' {
                spans_lines = true;
            }
            self.advance();
        }

        Err(self.error(line, column, "comment not terminated"))
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.current_char {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        self.chars[start..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.current_char {
            let hex = self.chars[start..self.position]
                .iter()
                .any(|c| matches!(c, 'x' | 'X'));
            let exponent_sign = matches!(c, '+' | '-')
                && match self.chars[start..self.position].last() {
                    Some('e' | 'E') => !hex,
                    Some('p' | 'P') => true,
                    _ => false,
                };

            if c.is_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.advance();
            } else {
                break;
            }
        }
        self.chars[start..self.position].iter().collect()
    }

    fn read_string(&mut self) -> LexResult<String> {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        self.advance(); // Skip opening quote

        while let Some(c) = self.current_char {
            match c {
                '"' => {
                    self.advance();
                    return Ok(self.chars[start..self.position].iter().collect());
                }
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '\n' => break,
                _ => self.advance(),
            }
        }

        Err(self.error(line, column, "string literal not terminated"))
    }

    fn read_raw_string(&mut self) -> LexResult<String> {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        self.advance();

        while let Some(c) = self.current_char {
            self.advance();
            if c == '`' {
                return Ok(self.chars[start..self.position].iter().collect());
            }
        }

        Err(self.error(line, column, "raw string literal not terminated"))
    }

    fn read_rune(&mut self) -> LexResult<String> {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        self.advance();

        while let Some(c) = self.current_char {
            match c {
                '\'' => {
                    self.advance();
                    return Ok(self.chars[start..self.position].iter().collect());
                }
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '\n' => break,
                _ => self.advance(),
            }
        }

        Err(self.error(line, column, "rune literal not terminated"))
    }

    fn read_operator(&mut self, line: usize, column: usize) -> LexResult<Token> {
        let rest = &self.chars[self.position..];
        let matched = OPERATORS.iter().find(|op| {
            op.chars().count() <= rest.len() && op.chars().zip(rest.iter()).all(|(a, b)| a == *b)
        });

        let Some(op) = matched else {
            let c = self.current_char.unwrap_or_default();
            return Err(self.error(line, column, format!("invalid character {c:?}")));
        };

        for _ in 0..op.chars().count() {
            self.advance();
        }

        let token_type = match *op {
            "(" => TokenType::LeftParen,
            ")" => TokenType::RightParen,
            "[" => TokenType::LeftBracket,
            "]" => TokenType::RightBracket,
            "{" => TokenType::LeftBrace,
            "}" => TokenType::RightBrace,
            "," => TokenType::Comma,
            ";" => TokenType::Semicolon,
            "." => TokenType::Dot,
            "..." => TokenType::Ellipsis,
            "*" => TokenType::Star,
            "<-" => TokenType::Arrow,
            "=" => TokenType::Assign,
            "~" => TokenType::Tilde,
            "|" => TokenType::Pipe,
            _ => TokenType::Operator,
        };

        Ok(Token::new(token_type, *op, line, column))
    }
}
