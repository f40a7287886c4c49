//! Named-placeholder template engine
//!
//! Templates contain literal text and `{name}` or `{name:format}` placeholders.
//! Literal braces are written doubled (`{{` and `}}`). Placeholders are resolved
//! against a [ValueMap]; names that are empty or absent from the map are handed to
//! a fallback callback whose output is copied verbatim.
//!
//! ```rust
//! # use git_verinfo::template::{render, Value, ValueMap};
//! let mut values = ValueMap::new();
//! values.insert("TagDistance".to_string(), Value::from(7));
//! let out = render("build {TagDistance:D3} {{stable}}", &values).unwrap();
//! assert_eq!(out, "build 007 {stable}");
//! ```

pub mod format;
pub mod value;

pub use value::{Value, ValueMap};

use std::fmt;
use std::str::Chars;
use thiserror::Error;

/// Malformed template syntax or an unusable format specifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated brace escape at character position {position}")]
    UnterminatedEscape { position: usize },

    #[error("unterminated placeholder at character position {position}")]
    UnterminatedPlaceholder { position: usize },

    #[error("stray '}}' at character position {position}")]
    StrayCloseBrace { position: usize },

    #[error("invalid format specifier '{specifier}' for placeholder '{name}'")]
    InvalidSpecifier { name: String, specifier: String },
}

/// A single `{...}` occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    /// Text between the braces, exactly as written
    pub expression: String,
    pub name: String,
    pub format: Option<String>,
}

impl PlaceholderSpec {
    /// Split an expression on its first `:`.
    ///
    /// A colon in the first position does not start a format: `{:x}` names `:x`.
    /// An empty format (`{name:}`) is treated as no format.
    pub fn parse(expression: &str) -> Self {
        let (name, format) = match expression.find(':') {
            Some(index) if index > 0 => {
                let format = &expression[index + 1..];
                (
                    &expression[..index],
                    (!format.is_empty()).then(|| format.to_string()),
                )
            }
            _ => (expression, None),
        };

        PlaceholderSpec {
            expression: expression.to_string(),
            name: name.to_string(),
            format,
        }
    }
}

impl fmt::Display for PlaceholderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.expression)
    }
}

/// Template element produced by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Placeholder(PlaceholderSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    OnOpenBrace,
    InsideExpression,
    OnCloseBrace,
    End,
}

/// Single forward scan over a template, yielding tokens as they complete.
///
/// Adjacent literal text (escapes included) is merged into one token. After an
/// error the iterator is exhausted.
pub struct Tokens<'a> {
    chars: Chars<'a>,
    position: usize,
    state: State,
    literal: String,
    pending: Option<Token>,
}

/// Scan a template into tokens
pub fn tokenize(template: &str) -> Tokens<'_> {
    Tokens {
        chars: template.chars(),
        position: 0,
        state: State::Outside,
        literal: String::new(),
        pending: None,
    }
}

impl Tokens<'_> {
    fn advance(&mut self) -> Option<char> {
        self.position += 1;
        self.chars.next()
    }

    fn emit(&mut self, expression: &str) -> Option<Result<Token, TemplateError>> {
        self.state = State::Outside;
        let placeholder = Token::Placeholder(PlaceholderSpec::parse(expression));
        if self.literal.is_empty() {
            Some(Ok(placeholder))
        } else {
            self.pending = Some(placeholder);
            Some(Ok(Token::Literal(std::mem::take(&mut self.literal))))
        }
    }

    fn fail(&mut self, err: TemplateError) -> Option<Result<Token, TemplateError>> {
        self.state = State::End;
        self.literal.clear();
        Some(Err(err))
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }

        let mut expression = String::new();
        loop {
            match self.state {
                State::End => {
                    if self.literal.is_empty() {
                        return None;
                    }
                    return Some(Ok(Token::Literal(std::mem::take(&mut self.literal))));
                }
                State::Outside => match self.advance() {
                    None => self.state = State::End,
                    Some('{') => self.state = State::OnOpenBrace,
                    Some('}') => self.state = State::OnCloseBrace,
                    Some(c) => self.literal.push(c),
                },
                State::OnOpenBrace => match self.advance() {
                    None => {
                        let position = self.position;
                        return self.fail(TemplateError::UnterminatedEscape { position });
                    }
                    Some('{') => {
                        self.literal.push('{');
                        self.state = State::Outside;
                    }
                    Some('}') => return self.emit(""),
                    Some(c) => {
                        expression.push(c);
                        self.state = State::InsideExpression;
                    }
                },
                State::InsideExpression => match self.advance() {
                    None => {
                        let position = self.position;
                        return self.fail(TemplateError::UnterminatedPlaceholder { position });
                    }
                    Some('}') => return self.emit(&expression),
                    Some(c) => expression.push(c),
                },
                State::OnCloseBrace => match self.advance() {
                    Some('}') => {
                        self.literal.push('}');
                        self.state = State::Outside;
                    }
                    _ => {
                        let position = self.position;
                        return self.fail(TemplateError::StrayCloseBrace { position });
                    }
                },
            }
        }
    }
}

/// Parse a whole template into its token sequence
pub fn parse(template: &str) -> Result<Vec<Token>, TemplateError> {
    tokenize(template).collect()
}

/// Fallback that re-emits the placeholder exactly as it was written
pub fn keep_placeholder(spec: &PlaceholderSpec) -> String {
    spec.to_string()
}

/// Render a template, leaving unresolved placeholders untouched
pub fn render(template: &str, values: &ValueMap) -> Result<String, TemplateError> {
    render_with(template, values, keep_placeholder)
}

/// Render a template, resolving unknown or empty names through `on_missing`.
///
/// The fallback output is inserted literally and never scanned again.
pub fn render_with<F>(
    template: &str,
    values: &ValueMap,
    on_missing: F,
) -> Result<String, TemplateError>
where
    F: Fn(&PlaceholderSpec) -> String,
{
    let mut output = String::with_capacity(template.len() * 2);

    for token in tokenize(template) {
        match token? {
            Token::Literal(text) => output.push_str(&text),
            Token::Placeholder(spec) => {
                let value = if spec.name.is_empty() {
                    None
                } else {
                    values.get(&spec.name)
                };

                match value {
                    Some(value) => output.push_str(&format::apply(
                        value,
                        &spec.name,
                        spec.format.as_deref(),
                    )?),
                    None => output.push_str(&on_missing(&spec)),
                }
            }
        }
    }

    Ok(output)
}
