//! Token definitions for the Go declaration lexer

/// Kinds of tokens produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Literals and names
    Ident,
    Number,
    Char,
    String,

    // Keywords
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,

    // Punctuation the parser cares about
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Star,
    Arrow,
    Assign,
    Tilde,
    Pipe,

    /// Any other operator (`+`, `:=`, `&&`, ...)
    Operator,

    Eof,
}

impl TokenType {
    /// Look up the keyword for an identifier, if any
    pub fn keyword(ident: &str) -> Option<TokenType> {
        let kw = match ident {
            "break" => TokenType::Break,
            "case" => TokenType::Case,
            "chan" => TokenType::Chan,
            "const" => TokenType::Const,
            "continue" => TokenType::Continue,
            "default" => TokenType::Default,
            "defer" => TokenType::Defer,
            "else" => TokenType::Else,
            "fallthrough" => TokenType::Fallthrough,
            "for" => TokenType::For,
            "func" => TokenType::Func,
            "go" => TokenType::Go,
            "goto" => TokenType::Goto,
            "if" => TokenType::If,
            "import" => TokenType::Import,
            "interface" => TokenType::Interface,
            "map" => TokenType::Map,
            "package" => TokenType::Package,
            "range" => TokenType::Range,
            "return" => TokenType::Return,
            "select" => TokenType::Select,
            "struct" => TokenType::Struct,
            "switch" => TokenType::Switch,
            "type" => TokenType::Type,
            "var" => TokenType::Var,
            _ => return None,
        };
        Some(kw)
    }

    /// Whether a newline after this token terminates the statement
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenType::Ident
                | TokenType::Number
                | TokenType::Char
                | TokenType::String
                | TokenType::Break
                | TokenType::Continue
                | TokenType::Fallthrough
                | TokenType::Return
                | TokenType::RightParen
                | TokenType::RightBracket
                | TokenType::RightBrace
        )
    }
}

/// A lexed token with its source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            token_type,
            value: value.into(),
            line,
            column,
        }
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}
