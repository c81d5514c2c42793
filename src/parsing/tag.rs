//! Structured documentation tags
//!
//! The comment grammar parser produces a [`DocComment`]: an optional
//! description followed by an ordered list of [`Tag`]s. Tag titles are
//! folded into the closed [`TagKind`] enumeration so consumers match on
//! variants instead of comparing strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of tags the normalizer understands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    /// `@namespace`
    Namespace,
    /// `@var`
    Var,
    /// `@private`
    Private,
    /// `@typedef`
    Typedef,
    /// `@func`, `@function`, `@method`
    Function,
    /// `@param`, `@arg`, `@argument`
    Param,
    /// `@return`, `@returns`
    Return,
    /// `@property`, `@prop`
    Property,
    /// Any other title, kept verbatim
    Other(String),
}

impl TagKind {
    /// Whether the title conventionally carries a name after its type
    pub fn takes_name(title: &str) -> bool {
        matches!(
            title,
            "param"
                | "arg"
                | "argument"
                | "property"
                | "prop"
                | "typedef"
                | "namespace"
                | "var"
                | "func"
                | "function"
                | "method"
                | "class"
                | "constructor"
                | "callback"
                | "member"
                | "name"
                | "alias"
        )
    }
}

impl FromStr for TagKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "namespace" => TagKind::Namespace,
            "var" => TagKind::Var,
            "private" => TagKind::Private,
            "typedef" => TagKind::Typedef,
            "func" | "function" | "method" => TagKind::Function,
            "param" | "arg" | "argument" => TagKind::Param,
            "return" | "returns" => TagKind::Return,
            "property" | "prop" => TagKind::Property,
            other => TagKind::Other(other.to_string()),
        })
    }
}

/// A type expression as written between braces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExpression {
    /// Source text without the surrounding braces
    pub raw: String,
    /// Set only for plain name expressions such as `Foo` or `ns.Foo`
    pub name: Option<String>,
}

impl TypeExpression {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let name = is_name_expression(trimmed).then(|| trimmed.to_string());
        Self { raw, name }
    }
}

/// `?` (unknown) and dotted identifiers are names; unions, generics,
/// records and function types are not
fn is_name_expression(text: &str) -> bool {
    if text == "?" {
        return true;
    }
    !text.is_empty()
        && text.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

/// One `@title ...` annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub title: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<TypeExpression>,
    pub description: Option<String>,
}

impl Tag {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            name: None,
            ty: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.ty = Some(TypeExpression::new(name));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> TagKind {
        match self.title.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }

    /// The plain type name, if the type is a name expression
    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|ty| ty.name.as_deref())
    }
}

/// A parsed doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub description: Option<String>,
    pub tags: Vec<Tag>,
}

impl DocComment {
    pub fn new(description: Option<String>, tags: Vec<Tag>) -> Self {
        Self { description, tags }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.title)?;
        if let Some(ty) = &self.ty {
            write!(f, " {{{}}}", ty.raw)?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}
