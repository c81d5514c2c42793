//! Tag normalization
//!
//! Folds the ordered tag list of one doc comment into a [`Definition`].
//! Scratch state (params, return, properties, declared type) lives in
//! [`PendingDefinition`] and never reaches the index: only the synthesized
//! type string does.

use crate::parsing::{DocComment, Tag, TagKind};
use crate::symbol::definition::{Definition, Param, UNKNOWN_TYPE, encode_type, function_signature};
use tracing::trace;

/// Name given to params documented without one
const ANONYMOUS_PARAM: &str = "noname";

/// Name given to return values documented without one
const ANONYMOUS_RETURN: &str = "result";

/// A `@property` captured from a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTag {
    pub name: String,
    pub ty: String,
    pub description: Option<String>,
}

/// Construction state for one comment
#[derive(Debug, Default)]
pub struct PendingDefinition {
    /// Path the definition is indexed under
    pub path: Option<String>,
    /// Name set explicitly by `@namespace`
    pub explicit_name: Option<String>,
    pub doc: Option<String>,
    pub declared_type: Option<String>,
    /// `@typedef {Base} Name` records `Base` here; informational only
    pub supertype: Option<String>,
    pub params: Vec<Param>,
    pub returns: Option<Param>,
    pub properties: Vec<PropertyTag>,
    pub is_private: bool,
}

impl PendingDefinition {
    fn apply(&mut self, tag: &Tag) {
        match tag.kind() {
            TagKind::Namespace => {
                self.path = tag.name.clone();
                self.explicit_name = tag.name.clone();
            }
            TagKind::Var => {
                self.path = tag.name.clone();
                if let Some(ty) = tag.type_name() {
                    self.declared_type = Some(ty.to_string());
                }
            }
            TagKind::Private => self.is_private = true,
            TagKind::Typedef => match &tag.name {
                Some(name) => {
                    self.path = Some(name.clone());
                    self.declared_type = Some(name.clone());
                    self.supertype = tag.type_name().map(str::to_string);
                }
                None => self.declared_type = tag.type_name().map(str::to_string),
            },
            TagKind::Function => {
                self.declared_type = Some("function".to_string());
                self.path = tag.name.clone();
            }
            TagKind::Param => self.params.push(Param::new(
                tag.name.as_deref().unwrap_or(ANONYMOUS_PARAM),
                tag.type_name().unwrap_or(UNKNOWN_TYPE),
            )),
            TagKind::Return => {
                self.returns = Some(Param::new(
                    tag.name.as_deref().unwrap_or(ANONYMOUS_RETURN),
                    tag.type_name().unwrap_or(UNKNOWN_TYPE),
                ))
            }
            TagKind::Property => match &tag.name {
                Some(name) => self.properties.push(PropertyTag {
                    name: name.clone(),
                    ty: tag.type_name().unwrap_or(UNKNOWN_TYPE).to_string(),
                    description: tag.description.clone(),
                }),
                None => trace!("skipping unnamed property tag"),
            },
            TagKind::Other(_) => {}
        }
    }

    /// Synthesize the type string from the declared kind
    fn type_string(&self) -> Option<String> {
        let declared = self.declared_type.as_deref()?;
        Some(match declared.to_lowercase().as_str() {
            "function" => function_signature(&self.params, self.returns.as_ref()),
            "object" => "{}".to_string(),
            _ => encode_type(declared),
        })
    }
}

/// Why a comment produced nothing indexable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Private,
    Unnamed,
}

/// A definition with the sub-records it spawns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDoc {
    pub path: String,
    pub definition: Definition,
    /// `(path, definition)` for every `@property`, qualified by the owner
    pub properties: Vec<(String, Definition)>,
}

/// Outcome of normalizing one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Definition(NormalizedDoc),
    Dropped(DropReason),
}

/// Fold a parsed comment into a definition record
pub fn normalize(comment: &DocComment) -> Normalized {
    let mut pending = PendingDefinition {
        doc: comment.description.clone(),
        ..Default::default()
    };
    for tag in &comment.tags {
        pending.apply(tag);
    }

    if pending.is_private {
        return Normalized::Dropped(DropReason::Private);
    }
    let path = match pending.path.take() {
        Some(path) if !path.is_empty() => path,
        _ => return Normalized::Dropped(DropReason::Unnamed),
    };

    let definition = Definition {
        name: pending.explicit_name.take(),
        ty: pending.type_string(),
        doc: pending.doc.take(),
    };

    let properties = pending
        .properties
        .into_iter()
        .map(|prop| {
            let prop_path = if prop.name.contains(path.as_str()) {
                prop.name
            } else {
                format!("{path}#{}", prop.name)
            };
            let definition = Definition {
                name: None,
                ty: Some(encode_type(&prop.ty)),
                doc: prop.description,
            };
            (prop_path, definition)
        })
        .collect();

    Normalized::Definition(NormalizedDoc {
        path,
        definition,
        properties,
    })
}
