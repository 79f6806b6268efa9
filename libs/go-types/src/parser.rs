//! Go declaration parser
//!
//! Parses the package clause, imports and package-level declarations of a
//! single source file. Type declarations are parsed fully and resolved against
//! the file's imports; function, variable and constant declarations only
//! contribute their names and are otherwise skipped.

use std::collections::HashMap;

use crate::error::SourceError;
use crate::lexer::Lexer;
use crate::package::{Object, ObjectKind};
use crate::token::{Token, TokenType};
use crate::types::{ChanDir, Field, InterfaceType, Method, PackageRef, Param, Signature, Type};

type ParseResult<T> = std::result::Result<T, SourceError>;

/// Predeclared type names of the universe scope
const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// An import declared by a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Explicit local name (`_`, `.`, or an alias), if written
    pub alias: Option<String>,
    pub package: PackageRef,
}

/// A package-level declaration with its position
#[derive(Debug, Clone)]
pub struct Declaration {
    pub object: Object,
    pub line: usize,
    pub column: usize,
}

/// An unqualified, non-predeclared type name used by a type declaration.
///
/// The parser sees one file at a time, so these are checked against the
/// package scope once every file is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

/// The declarations of one parsed file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub file: String,
    pub package_name: String,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
    pub references: Vec<Reference>,
}

/// Read only the package clause of a file
pub fn parse_package_clause(file: &str, source: &str) -> ParseResult<String> {
    let tokens = Lexer::new(file, source).tokenize()?;
    let mut parser = Parser::new(file, tokens, "");
    parser.parse_package_clause()
}

/// Parse a file whose package lives at `import_path`
pub fn parse_file(file: &str, source: &str, import_path: &str) -> ParseResult<ParsedFile> {
    let tokens = Lexer::new(file, source).tokenize()?;
    Parser::new(file, tokens, import_path).parse()
}

/// Pending entry of a parameter list before named/unnamed resolution
struct ParamEntry {
    name: Option<String>,
    ty: Option<Type>,
    ellipsis: bool,
    line: usize,
    column: usize,
}

struct Parser<'a> {
    file: String,
    tokens: Vec<Token>,
    pos: usize,
    import_path: &'a str,
    package: PackageRef,
    imports: HashMap<String, PackageRef>,
    references: Vec<Reference>,
    /// Set when the last error was raised by a construct the type model
    /// can't express rather than by a syntax error
    unsupported: bool,
}

impl<'a> Parser<'a> {
    fn new(file: &str, tokens: Vec<Token>, import_path: &'a str) -> Self {
        Self {
            file: file.to_string(),
            tokens,
            pos: 0,
            import_path,
            package: PackageRef::new(import_path, ""),
            imports: HashMap::new(),
            references: Vec::new(),
            unsupported: false,
        }
    }

    // ----- token helpers -----

    fn current(&self) -> &Token {
        // The token stream always ends with Eof
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_type(&self, offset: usize) -> TokenType {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + offset).min(last)].token_type
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current().is(token_type)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenType::Eof) {
            self.pos += 1;
        }
        token
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> SourceError {
        SourceError::new(self.file.clone(), token.line, token.column, message)
    }

    fn unsupported(&mut self, token: &Token, message: impl Into<String>) -> SourceError {
        self.unsupported = true;
        self.error_at(token, message)
    }

    fn unexpected(&self, expected: &str) -> SourceError {
        let token = self.current();
        let found = match token.token_type {
            TokenType::Eof => "EOF".to_string(),
            TokenType::Semicolon if token.value == "\n" => "newline".to_string(),
            _ => token.value.clone(),
        };
        self.error_at(token, format!("expected {expected}, found {found}"))
    }

    fn expect(&mut self, token_type: TokenType, expected: &str) -> ParseResult<Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<Token> {
        self.expect(TokenType::Ident, "name")
    }

    /// Consume the terminator of a declaration or grouped spec
    fn expect_spec_end(&mut self, grouped: bool) -> ParseResult<()> {
        match self.current().token_type {
            TokenType::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenType::RightParen if grouped => Ok(()),
            TokenType::Eof => Ok(()),
            _ => Err(self.unexpected("';'")),
        }
    }

    /// Skip tokens up to the end of the current declaration, honoring nesting.
    /// Stops before a closing `)` of an enclosing group.
    fn skip_declaration(&mut self) -> ParseResult<()> {
        self.skip_to_spec_end()?;
        if self.check(TokenType::Semicolon) {
            self.advance();
        }
        Ok(())
    }

    /// Skip tokens up to, but not including, the terminator of the current
    /// spec: a `;` or an unmatched closing delimiter at nesting depth zero
    fn skip_to_spec_end(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.current().token_type {
                TokenType::Eof => {
                    if depth > 0 {
                        return Err(self.unexpected("closing delimiter"));
                    }
                    return Ok(());
                }
                TokenType::Semicolon if depth == 0 => return Ok(()),
                TokenType::LeftParen | TokenType::LeftBracket | TokenType::LeftBrace => {
                    depth += 1;
                }
                TokenType::RightParen | TokenType::RightBracket | TokenType::RightBrace => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ----- file structure -----

    fn parse_package_clause(&mut self) -> ParseResult<String> {
        while self.check(TokenType::Semicolon) {
            self.advance();
        }
        self.expect(TokenType::Package, "'package'")?;
        let name = self.expect_ident()?;
        if name.value == "_" {
            return Err(self.error_at(&name, "invalid package name _"));
        }
        self.expect_spec_end(false)?;
        Ok(name.value)
    }

    fn parse(mut self) -> ParseResult<ParsedFile> {
        let package_name = self.parse_package_clause()?;
        self.package = PackageRef::new(self.import_path, package_name.clone());

        let mut imports = Vec::new();
        while self.check(TokenType::Import) {
            self.advance();
            self.parse_group(|parser, grouped| {
                let import = parser.parse_import_spec()?;
                parser.register_import(&import);
                imports.push(import);
                parser.expect_spec_end(grouped)
            })?;
        }

        let mut declarations = Vec::new();
        loop {
            let token = self.current().clone();
            match token.token_type {
                TokenType::Eof => break,
                TokenType::Semicolon => {
                    self.advance();
                }
                TokenType::Type => {
                    self.advance();
                    self.parse_group(|parser, grouped| {
                        declarations.push(parser.parse_type_spec()?);
                        parser.expect_spec_end(grouped)
                    })?;
                }
                TokenType::Func => {
                    self.advance();
                    if let Some(decl) = self.parse_func_decl()? {
                        declarations.push(decl);
                    }
                }
                TokenType::Var | TokenType::Const => {
                    self.advance();
                    let kind = if token.is(TokenType::Var) {
                        ObjectKind::Var
                    } else {
                        ObjectKind::Const
                    };
                    self.parse_group(|parser, _| {
                        declarations.extend(parser.parse_value_spec(&kind)?);
                        Ok(())
                    })?;
                }
                TokenType::Import => {
                    return Err(
                        self.error_at(&token, "imports must appear before other declarations")
                    );
                }
                _ => {
                    return Err(
                        self.error_at(&token, "non-declaration statement outside function body")
                    );
                }
            }
        }

        Ok(ParsedFile {
            file: self.file,
            package_name,
            imports,
            declarations,
            references: self.references,
        })
    }

    /// Parse either `( spec; spec; ... )` or a single spec
    fn parse_group<F>(&mut self, mut spec: F) -> ParseResult<()>
    where
        F: FnMut(&mut Self, bool) -> ParseResult<()>,
    {
        if self.check(TokenType::LeftParen) {
            self.advance();
            loop {
                while self.check(TokenType::Semicolon) {
                    self.advance();
                }
                if self.check(TokenType::RightParen) {
                    self.advance();
                    break;
                }
                if self.check(TokenType::Eof) {
                    return Err(self.unexpected("')'"));
                }
                spec(self, true)?;
            }
            self.expect_spec_end(false)
        } else {
            spec(self, false)
        }
    }

    fn parse_import_spec(&mut self) -> ParseResult<Import> {
        let alias = match self.current().token_type {
            TokenType::Ident => Some(self.advance().value),
            TokenType::Dot => Some(self.advance().value),
            _ => None,
        };

        let literal = self.expect(TokenType::String, "import path")?;
        let path = literal.value.trim_matches(|c| c == '"' || c == '`').to_string();
        if path.is_empty() {
            return Err(self.error_at(&literal, "invalid import path: empty"));
        }

        Ok(Import {
            alias,
            package: PackageRef::from_import_path(&path),
        })
    }

    fn register_import(&mut self, import: &Import) {
        // Dot and blank imports introduce no package name; names a dot import
        // provides are resolved by the loader
        let local = match import.alias.as_deref() {
            Some("_") | Some(".") => return,
            Some(alias) => alias.to_string(),
            None => import.package.name.clone(),
        };
        self.imports.insert(local, import.package.clone());
    }

    /// Parse one type spec.
    ///
    /// Generic declarations, constraint interfaces and types mentioning an
    /// instantiation are kept as [`ObjectKind::Unsupported`] so the rest of
    /// the package still loads; they only fail once something resolves them.
    fn parse_type_spec(&mut self) -> ParseResult<Declaration> {
        let name = self.expect_ident()?;
        let start = self.pos;
        let recorded = self.references.len();

        // `type T[P any] ...` declares a generic type; `type T [N]int` an array
        let generic = self.check(TokenType::LeftBracket)
            && self.peek_type(1) == TokenType::Ident
            && self.peek_type(2) != TokenType::RightBracket;

        let kind = if generic {
            self.skip_to_spec_end()?;
            ObjectKind::Unsupported {
                reason: "generic type declarations are not supported".to_string(),
            }
        } else {
            match self.parse_type_definition() {
                Ok((ty, alias)) => ObjectKind::TypeName { ty, alias },
                Err(err) if self.unsupported => {
                    self.unsupported = false;
                    self.pos = start;
                    self.references.truncate(recorded);
                    self.skip_to_spec_end()?;
                    ObjectKind::Unsupported {
                        reason: err.message,
                    }
                }
                Err(err) => return Err(err),
            }
        };

        Ok(Declaration {
            object: Object::new(name.value, kind),
            line: name.line,
            column: name.column,
        })
    }

    /// `= T` or `T` after the declared name; true for an alias
    fn parse_type_definition(&mut self) -> ParseResult<(Type, bool)> {
        let alias = if self.check(TokenType::Assign) {
            self.advance();
            true
        } else {
            false
        };
        Ok((self.parse_type()?, alias))
    }

    fn parse_func_decl(&mut self) -> ParseResult<Option<Declaration>> {
        // Methods belong to their receiver type, not the package scope
        let is_method = self.check(TokenType::LeftParen);
        if is_method {
            self.skip_balanced(TokenType::LeftParen, TokenType::RightParen)?;
        }

        let name = self.expect_ident()?;
        self.skip_declaration()?;

        if is_method || name.value == "_" || name.value == "init" {
            return Ok(None);
        }

        Ok(Some(Declaration {
            object: Object::new(name.value, ObjectKind::Func),
            line: name.line,
            column: name.column,
        }))
    }

    fn skip_balanced(&mut self, open: TokenType, close: TokenType) -> ParseResult<()> {
        self.expect(open, "opening delimiter")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            match token.token_type {
                TokenType::Eof => return Err(self.error_at(&token, "unexpected EOF")),
                t if t == open => depth += 1,
                t if t == close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_value_spec(&mut self, kind: &ObjectKind) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();
        loop {
            let name = self.expect_ident()?;
            if name.value != "_" {
                declarations.push(Declaration {
                    object: Object::new(name.value.clone(), kind.clone()),
                    line: name.line,
                    column: name.column,
                });
            }
            if self.check(TokenType::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.skip_declaration()?;
        Ok(declarations)
    }

    // ----- types -----

    fn resolve_name(&mut self, name: &str, line: usize, column: usize) -> Type {
        if PREDECLARED_TYPES.contains(&name) {
            return Type::basic(name);
        }
        self.references.push(Reference {
            name: name.to_string(),
            line,
            column,
        });
        Type::named(self.package.clone(), name)
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let token = self.current().clone();
        match token.token_type {
            TokenType::Ident => self.parse_type_name(),
            TokenType::Star => {
                self.advance();
                Ok(Type::pointer(self.parse_type()?))
            }
            TokenType::LeftBracket => {
                self.advance();
                if self.check(TokenType::RightBracket) {
                    self.advance();
                    return Ok(Type::slice(self.parse_type()?));
                }
                let len = self.parse_array_len()?;
                let elem = self.parse_type()?;
                Ok(Type::Array {
                    len,
                    elem: Box::new(elem),
                })
            }
            TokenType::Map => {
                self.advance();
                self.expect(TokenType::LeftBracket, "'['")?;
                let key = self.parse_type()?;
                self.expect(TokenType::RightBracket, "']'")?;
                let value = self.parse_type()?;
                Ok(Type::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            TokenType::Chan => {
                self.advance();
                let dir = if self.check(TokenType::Arrow) {
                    self.advance();
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(Type::Chan {
                    dir,
                    elem: Box::new(elem),
                })
            }
            TokenType::Arrow => {
                self.advance();
                self.expect(TokenType::Chan, "'chan'")?;
                let elem = self.parse_type()?;
                Ok(Type::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            TokenType::Func => {
                self.advance();
                Ok(Type::Func(self.parse_signature()?))
            }
            TokenType::Interface => {
                self.advance();
                Ok(Type::Interface(self.parse_interface_body()?))
            }
            TokenType::Struct => {
                self.advance();
                Ok(Type::Struct(self.parse_struct_body()?))
            }
            TokenType::LeftParen => {
                self.advance();
                let ty = self.parse_type()?;
                self.expect(TokenType::RightParen, "')'")?;
                Ok(ty)
            }
            _ => Err(self.unexpected("type")),
        }
    }

    fn parse_type_name(&mut self) -> ParseResult<Type> {
        let first = self.expect_ident()?;

        let ty = if self.check(TokenType::Dot) {
            self.advance();
            let name = self.expect_ident()?;
            let package = self
                .imports
                .get(&first.value)
                .cloned()
                .ok_or_else(|| self.error_at(&first, format!("undefined: {}", first.value)))?;
            Type::named(package, name.value)
        } else {
            self.resolve_name(&first.value, first.line, first.column)
        };

        if self.check(TokenType::LeftBracket) {
            return Err(self.unsupported(&first, "generic type instantiation is not supported"));
        }

        Ok(ty)
    }

    fn parse_array_len(&mut self) -> ParseResult<String> {
        let mut depth = 0usize;
        let mut len = String::new();
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::Eof => return Err(self.error_at(&token, "unexpected EOF in array length")),
                TokenType::RightBracket if depth == 0 => break,
                TokenType::LeftBracket | TokenType::LeftParen => depth += 1,
                TokenType::RightBracket | TokenType::RightParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            len.push_str(&token.value);
        }
        if len.is_empty() || len == "..." {
            return Err(self.unexpected("array length"));
        }
        Ok(len)
    }

    fn starts_type(&self) -> bool {
        matches!(
            self.current().token_type,
            TokenType::Ident
                | TokenType::Star
                | TokenType::LeftBracket
                | TokenType::Map
                | TokenType::Chan
                | TokenType::Arrow
                | TokenType::Func
                | TokenType::Interface
                | TokenType::Struct
        )
    }

    fn parse_signature(&mut self) -> ParseResult<Signature> {
        let (params, variadic) = self.parse_parameters(true)?;

        let results = if self.check(TokenType::LeftParen) {
            self.parse_parameters(false)?.0
        } else if self.starts_type() {
            vec![Param::new("", self.parse_type()?)]
        } else {
            Vec::new()
        };

        Ok(Signature {
            params,
            results,
            variadic,
        })
    }

    /// Parse `( ... )`, returning the parameters and whether the last one is variadic
    fn parse_parameters(&mut self, allow_variadic: bool) -> ParseResult<(Vec<Param>, bool)> {
        self.expect(TokenType::LeftParen, "'('")?;

        let mut entries = Vec::new();
        while !self.check(TokenType::RightParen) {
            let token = self.current().clone();
            let entry = match token.token_type {
                TokenType::Ident
                    if matches!(
                        self.peek_type(1),
                        TokenType::Comma | TokenType::RightParen
                    ) =>
                {
                    self.advance();
                    ParamEntry {
                        name: Some(token.value.clone()),
                        ty: None,
                        ellipsis: false,
                        line: token.line,
                        column: token.column,
                    }
                }
                TokenType::Ident if self.peek_type(1) != TokenType::Dot => {
                    self.advance();
                    let ellipsis = self.check(TokenType::Ellipsis);
                    if ellipsis {
                        self.advance();
                    }
                    ParamEntry {
                        name: Some(token.value.clone()),
                        ty: Some(self.parse_type()?),
                        ellipsis,
                        line: token.line,
                        column: token.column,
                    }
                }
                _ => {
                    let ellipsis = self.check(TokenType::Ellipsis);
                    if ellipsis {
                        self.advance();
                    }
                    ParamEntry {
                        name: None,
                        ty: Some(self.parse_type()?),
                        ellipsis,
                        line: token.line,
                        column: token.column,
                    }
                }
            };
            entries.push(entry);

            if self.check(TokenType::Comma) {
                self.advance();
            } else if !self.check(TokenType::RightParen) {
                return Err(self.unexpected("',' or ')'"));
            }
        }
        self.advance(); // Skip ')'

        self.resolve_parameters(entries, allow_variadic)
    }

    fn resolve_parameters(
        &mut self,
        entries: Vec<ParamEntry>,
        allow_variadic: bool,
    ) -> ParseResult<(Vec<Param>, bool)> {
        let count = entries.len();
        let named = entries.iter().any(|e| e.name.is_some() && e.ty.is_some());

        let mut params = Vec::with_capacity(count);
        let mut pending: Vec<String> = Vec::new();
        let mut variadic = false;

        for (i, entry) in entries.into_iter().enumerate() {
            if entry.ellipsis {
                if !allow_variadic || i + 1 != count || !pending.is_empty() {
                    return Err(SourceError::new(
                        self.file.clone(),
                        entry.line,
                        entry.column,
                        "can only use ... with final parameter in list",
                    ));
                }
                variadic = true;
            }

            let ty = entry.ty.map(|ty| if entry.ellipsis { Type::slice(ty) } else { ty });

            match (named, entry.name, ty) {
                // `a, b int`: bare names take the type of the next typed entry
                (true, Some(name), None) => pending.push(name),
                (true, Some(name), Some(ty)) => {
                    for pending_name in pending.drain(..) {
                        params.push(Param::new(pending_name, ty.clone()));
                    }
                    params.push(Param::new(name, ty));
                }
                (true, None, Some(_)) => {
                    return Err(SourceError::new(
                        self.file.clone(),
                        entry.line,
                        entry.column,
                        "mixed named and unnamed parameters",
                    ));
                }
                // Unnamed list: bare identifiers are type names
                (false, Some(name), None) => {
                    let ty = self.resolve_name(&name, entry.line, entry.column);
                    params.push(Param::new("", ty));
                }
                (false, _, Some(ty)) => params.push(Param::new("", ty)),
                (_, None, None) => unreachable!("parameter entries always carry a name or a type"),
            }
        }

        if let Some(name) = pending.first() {
            return Err(SourceError::new(
                self.file.clone(),
                self.current().line,
                self.current().column,
                format!("mixed named and unnamed parameters near {name}"),
            ));
        }

        Ok((params, variadic))
    }

    fn parse_interface_body(&mut self) -> ParseResult<InterfaceType> {
        self.expect(TokenType::LeftBrace, "'{'")?;

        let mut iface = InterfaceType::default();
        loop {
            while self.check(TokenType::Semicolon) {
                self.advance();
            }
            if self.check(TokenType::RightBrace) {
                self.advance();
                break;
            }

            let token = self.current().clone();
            match token.token_type {
                TokenType::Ident if self.peek_type(1) == TokenType::LeftParen => {
                    self.advance();
                    let signature = self.parse_signature()?;
                    iface.methods.push(Method {
                        name: token.value,
                        signature,
                    });
                }
                TokenType::Tilde => {
                    return Err(self.unsupported(&token, "type constraint elements are not supported"));
                }
                _ => {
                    let embedded = self.parse_type()?;
                    if self.check(TokenType::Pipe) {
                        return Err(
                            self.unsupported(&token, "type constraint elements are not supported")
                        );
                    }
                    iface.embeds.push(embedded);
                }
            }

            if !self.check(TokenType::RightBrace) {
                self.expect(TokenType::Semicolon, "';' or '}'")?;
            }
        }

        Ok(iface)
    }

    fn parse_struct_body(&mut self) -> ParseResult<Vec<Field>> {
        self.expect(TokenType::LeftBrace, "'{'")?;

        let mut fields = Vec::new();
        loop {
            while self.check(TokenType::Semicolon) {
                self.advance();
            }
            if self.check(TokenType::RightBrace) {
                self.advance();
                break;
            }

            let embedded = match self.current().token_type {
                TokenType::Star => true,
                TokenType::Ident => matches!(
                    self.peek_type(1),
                    TokenType::Dot | TokenType::Semicolon | TokenType::RightBrace | TokenType::String
                ),
                _ => return Err(self.unexpected("field name or embedded type")),
            };

            if embedded {
                let ty = self.parse_type()?;
                let tag = self.parse_tag();
                fields.push(Field {
                    name: None,
                    ty,
                    tag,
                });
            } else {
                let mut names = vec![self.expect_ident()?.value];
                while self.check(TokenType::Comma) {
                    self.advance();
                    names.push(self.expect_ident()?.value);
                }
                let ty = self.parse_type()?;
                let tag = self.parse_tag();
                for name in names {
                    fields.push(Field {
                        name: Some(name),
                        ty: ty.clone(),
                        tag: tag.clone(),
                    });
                }
            }

            if !self.check(TokenType::RightBrace) {
                self.expect(TokenType::Semicolon, "';' or '}'")?;
            }
        }

        Ok(fields)
    }

    fn parse_tag(&mut self) -> Option<String> {
        if self.check(TokenType::String) {
            Some(self.advance().value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "example.com/instance";

    fn parse(source: &str) -> ParsedFile {
        parse_file("instance.go", source, PATH).unwrap()
    }

    fn type_of(file: &ParsedFile, name: &str) -> Type {
        let decl = file
            .declarations
            .iter()
            .find(|d| d.object.name == name)
            .unwrap();
        match &decl.object.kind {
            ObjectKind::TypeName { ty, .. } => ty.clone(),
            other => panic!("{name} is not a type: {other:?}"),
        }
    }

    fn method_of(file: &ParsedFile, name: &str) -> Method {
        match type_of(file, name) {
            Type::Interface(iface) => iface.methods[0].clone(),
            other => panic!("{name} is not an interface: {other:?}"),
        }
    }

    #[test]
    fn test_package_clause() {
        let file = parse("// Package instance.\npackage instance\n");
        assert_eq!(file.package_name, "instance");
        assert!(file.declarations.is_empty());
    }

    #[test]
    fn test_grouped_type_declarations() {
        let file = parse(
            r#"package instance

type (
	Struct struct{}

	Interface0 interface {
		Method(interface{})
	}

	Interface1 interface {
		Method(...interface{})
	}

	Interface2 interface {
		Method(s string, _ interface{})
	}

	Interface3 interface {
		Method(i int, s Struct)
	}
)
"#,
        );

        assert_eq!(file.declarations.len(), 5);

        let m0 = method_of(&file, "Interface0");
        assert_eq!(m0.signature.params.len(), 1);
        assert_eq!(m0.signature.params[0].name, "");
        assert!(!m0.signature.variadic);

        let m1 = method_of(&file, "Interface1");
        assert!(m1.signature.variadic);
        assert_eq!(m1.signature.params[0].ty.to_string(), "[]interface{}");

        let m2 = method_of(&file, "Interface2");
        let names: Vec<_> = m2.signature.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["s", "_"]);

        let m3 = method_of(&file, "Interface3");
        assert_eq!(
            m3.signature.params[1].ty,
            Type::named(PackageRef::new(PATH, "instance"), "Struct")
        );
    }

    #[test]
    fn test_grouped_parameter_names_share_type() {
        let file = parse("package p\ntype I interface { M(a, b int, c string) }\n");
        let method = method_of(&file, "I");
        let rendered: Vec<_> = method
            .signature
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect();
        assert_eq!(rendered, vec!["a int", "b int", "c string"]);
    }

    #[test]
    fn test_unnamed_parameters_are_types() {
        let file = parse(
            "package p\nimport \"io\"\ntype I interface { M(int, io.Writer, *Local) error }\n",
        );
        let method = method_of(&file, "I");
        let types: Vec<_> = method.signature.params.iter().map(|p| p.ty.to_string()).collect();
        assert_eq!(types, vec!["int", "io.Writer", "*example.com/instance.Local"]);
        assert_eq!(method.signature.results.len(), 1);
    }

    #[test]
    fn test_imports_with_aliases() {
        let file = parse(
            r#"package p

import (
	"context"
	stdio "io"
	_ "embed"
	. "strings"
)

type I interface { M(ctx context.Context, w stdio.Writer) }
"#,
        );
        assert_eq!(file.imports.len(), 4);
        assert_eq!(file.imports[1].alias.as_deref(), Some("stdio"));

        let method = method_of(&file, "I");
        assert_eq!(
            method.signature.params[1].ty,
            Type::named(PackageRef::new("io", "io"), "Writer")
        );
    }

    #[test]
    fn test_results_forms() {
        let file = parse(
            "package p\ntype A interface { M() (int, error) }\ntype B interface { M() (n int, err error) }\n",
        );
        assert_eq!(method_of(&file, "A").signature.results.len(), 2);
        assert_eq!(method_of(&file, "B").signature.results.len(), 2);
    }

    #[test]
    fn test_functions_and_values_are_recorded_by_name() {
        let file = parse(
            r#"package p

const Answer = 42

var (
	a, b = 1, 2
	_    = "ignored"
)

func Helper(x int) (int, error) {
	if x > 0 {
		return x, nil
	}
	return 0, nil
}

func (r *Recv) Method() {}

type Recv struct{ n int }
"#,
        );

        let names: Vec<_> = file
            .declarations
            .iter()
            .map(|d| d.object.name.as_str())
            .collect();
        assert_eq!(names, vec!["Answer", "a", "b", "Helper", "Recv"]);
        assert!(matches!(file.declarations[3].object.kind, ObjectKind::Func));
    }

    #[test]
    fn test_alias_declaration() {
        let file = parse("package p\ntype Callback = func(int)\n");
        let decl = &file.declarations[0];
        assert!(matches!(
            decl.object.kind,
            ObjectKind::TypeName { alias: true, .. }
        ));
    }

    #[test]
    fn test_embedded_interfaces() {
        let file = parse("package p\nimport \"io\"\ntype I interface {\n\tio.Writer\n\tLocal\n\tClose()\n}\n");
        match type_of(&file, "I") {
            Type::Interface(iface) => {
                assert_eq!(iface.methods.len(), 1);
                assert_eq!(iface.embeds.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_struct_fields_with_tags() {
        let file = parse("package p\ntype S struct {\n\tA, B int `json:\"a\"`\n\t*Embedded\n\tC []string\n}\n");
        assert_eq!(
            type_of(&file, "S").to_string(),
            "struct{A int `json:\"a\"`; B int `json:\"a\"`; *example.com/instance.Embedded; C []string}"
        );
    }

    #[test]
    fn test_composite_parameter_types() {
        let file = parse(
            "package p\ntype I interface { M(m map[string][]int, c <-chan struct{}, f func(int) bool, a [4]byte) }\n",
        );
        let types: Vec<_> = method_of(&file, "I")
            .signature
            .params
            .iter()
            .map(|p| p.ty.to_string())
            .collect();
        assert_eq!(
            types,
            vec!["map[string][]int", "<-chan struct{}", "func(int) bool", "[4]byte"]
        );
    }

    #[test]
    fn test_undefined_package_qualifier() {
        let err = parse_file("x.go", "package p\ntype I interface { M(x fmt.Stringer) }\n", PATH)
            .unwrap_err();
        assert!(err.message.contains("undefined: fmt"));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_variadic_must_be_last() {
        let err = parse_file("x.go", "package p\ntype I interface { M(a ...int, b string) }\n", PATH)
            .unwrap_err();
        assert!(err.message.contains("final parameter"));
    }

    #[test]
    fn test_generic_specs_are_kept_as_unsupported() {
        let file = parse(
            r#"package p

import "sync/atomic"

type (
	Box[T any] struct{ v T }

	Number interface {
		~int | ~float64
	}

	Holder struct {
		p atomic.Pointer[int]
		s Struct
	}

	Callback interface {
		Fire(n int)
	}
)

type Struct struct{}
"#,
        );

        let kinds: Vec<_> = file
            .declarations
            .iter()
            .map(|d| (d.object.name.as_str(), &d.object.kind))
            .collect();
        assert!(matches!(kinds[0], ("Box", ObjectKind::Unsupported { reason }) if reason.contains("generic type declarations")));
        assert!(matches!(kinds[1], ("Number", ObjectKind::Unsupported { reason }) if reason.contains("constraint")));
        assert!(matches!(kinds[2], ("Holder", ObjectKind::Unsupported { reason }) if reason.contains("instantiation")));
        assert_eq!(method_of(&file, "Callback").name, "Fire");
        assert!(matches!(kinds[4], ("Struct", ObjectKind::TypeName { .. })));

        // Names inside skipped specs are not reported as references
        assert!(file.references.is_empty(), "{:?}", file.references);
    }

    #[test]
    fn test_unsupported_spec_still_needs_valid_syntax() {
        let err = parse_file("x.go", "package p\ntype Box[T any] struct{ v T\n", PATH).unwrap_err();
        assert!(err.message.contains("closing delimiter"), "{}", err.message);
    }

    #[test]
    fn test_local_type_references_are_recorded() {
        let file = parse("package p\ntype I interface {\n\tM(s Nope, err error)\n\tN(*Local)\n}\n");
        let references: Vec<_> = file
            .references
            .iter()
            .map(|r| (r.name.as_str(), r.line, r.column))
            .collect();
        assert_eq!(references, vec![("Nope", 3, 6), ("Local", 4, 5)]);
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_file("x.go", "type I interface{}\n", PATH).unwrap_err();
        assert!(err.message.contains("expected 'package'"));
    }

    #[test]
    fn test_syntax_error_reports_found_token() {
        let err = parse_file("x.go", "package p\ntype I interface { M( }\n", PATH).unwrap_err();
        assert!(err.message.starts_with("expected type"), "{}", err.message);
    }
}
