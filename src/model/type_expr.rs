//! Parser for written type expressions: `int`, `String[]`,
//! `java.util.Map<String, List<com.example.User>>`, `List<? extends Number>`.
//!
//! Produces an unresolved syntax tree; name resolution against the model
//! happens in [`super::TypeModel`].
use std::iter::Peekable;
use std::str::CharIndices;
use once_cell::sync::Lazy;
use regex::Regex;

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("qualified-name pattern compiles")
});

pub fn is_qualified_name(text: &str) -> bool {
    QUALIFIED_NAME.is_match(text)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    /// `?`, `? extends X`, `? super X`
    Wildcard(Option<Box<TypeExpr>>),
}

pub fn parse(text: &str) -> Result<TypeExpr, String> {
    let mut parser = Parser { src: text, chars: text.char_indices().peekable() };
    let ty = parser.ty()?;
    parser.skip_ws();
    match parser.chars.peek() {
        None => Ok(ty),
        Some(&(ix, c)) => Err(format!("unexpected `{c}` at offset {ix}")),
    }
}

struct Parser<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn ty(&mut self) -> Result<TypeExpr, String> {
        self.skip_ws();
        let mut ty = if self.eat('?') {
            self.wildcard()?
        } else {
            let name = self.name()?;
            let args = if self.eat('<') { self.args()? } else { Vec::new() };
            TypeExpr::Named { name, args }
        };
        loop {
            self.skip_ws();
            if !self.eat('[') {
                break;
            }
            self.skip_ws();
            if !self.eat(']') {
                return Err("expected `]`".to_string());
            }
            ty = TypeExpr::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn wildcard(&mut self) -> Result<TypeExpr, String> {
        self.skip_ws();
        let rest = self.rest();
        let keyword = ["extends", "super"].into_iter().find(|kw| {
            rest.strip_prefix(kw)
                .is_some_and(|tail| tail.starts_with(|c: char| c.is_whitespace()))
        });
        match keyword {
            None => Ok(TypeExpr::Wildcard(None)),
            Some(kw) => {
                for _ in 0..kw.len() {
                    self.chars.next();
                }
                Ok(TypeExpr::Wildcard(Some(Box::new(self.ty()?))))
            }
        }
    }

    fn args(&mut self) -> Result<Vec<TypeExpr>, String> {
        let mut args = vec![self.ty()?];
        loop {
            self.skip_ws();
            if self.eat(',') {
                args.push(self.ty()?);
            } else if self.eat('>') {
                return Ok(args);
            } else {
                return Err("expected `,` or `>` in type arguments".to_string());
            }
        }
    }

    fn name(&mut self) -> Result<String, String> {
        let start = self.offset();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '$' | '.') {
                self.chars.next();
            } else {
                break;
            }
        }
        let end = self.offset();
        let name = &self.src[start..end];
        if is_qualified_name(name) {
            Ok(name.to_string())
        } else if name.is_empty() {
            Err(format!("expected a type name at offset {start}"))
        } else {
            Err(format!("`{name}` is not a valid type name"))
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek().is_some_and(|&(_, c)| c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(ix, _)| ix)
    }

    fn rest(&mut self) -> &'a str {
        let ix = self.offset();
        &self.src[ix..]
    }
}
