//! Definition records and their type-string encoding
//!
//! Type strings follow the tern convention:
//! - builtins (`number`, `string`, `?`) render as themselves
//! - `function` renders as a signature `fn(a: T, b: U) -> R`
//! - `object` renders as `{}`
//! - every other name is a reference type and gets a `+` prefix

use serde::{Deserialize, Serialize};

/// Builtin scalar names that render as themselves
const SCALAR_TYPES: &[&str] = &["number", "string", "?"];

/// Type used when a tag leaves its type out
pub const UNKNOWN_TYPE: &str = "?";

/// The normalized documentation of one declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Indexing name; filled with the terminal path segment on insertion
    /// when the comment does not name it explicitly
    #[serde(rename = "!name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "!type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(rename = "!doc", skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Field-wise merge: fields set on `other` win, unset fields keep
    /// their current value
    pub fn merge(&mut self, other: Definition) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.ty.is_some() {
            self.ty = other.ty;
        }
        if other.doc.is_some() {
            self.doc = other.doc;
        }
    }
}

/// A documented parameter or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Declared type name, `?` when absent
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Encode a declared type name as a type string
pub fn encode_type(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.as_str() {
        "function" => "fn()".to_string(),
        "object" => "{}".to_string(),
        scalar if SCALAR_TYPES.contains(&scalar) => scalar.to_string(),
        _ => format!("+{name}"),
    }
}

/// Build `fn(p1: T1, ...) [-> R]` from documented params and return.
///
/// Params naming a field of another param (`options.verbose`) are left out.
pub fn function_signature(params: &[Param], returns: Option<&Param>) -> String {
    let args = params
        .iter()
        .filter(|param| !param.name.find('.').is_some_and(|dot| dot > 0))
        .map(|param| format!("{}: {}", param.name, encode_type(&param.ty)))
        .collect::<Vec<_>>()
        .join(", ");

    match returns {
        Some(ret) => format!("fn({args}) -> {}", encode_type(&ret.ty)),
        None => format!("fn({args})"),
    }
}
