//! Normalized metadata records
//!
//! These are the shapes handed to the downstream binding emitter. They are
//! produced in one pass, never mutated afterwards, and serialized with
//! camelCase keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discovered service module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    /// Service identifier (directory name, e.g. "core")
    pub name: String,
    /// Module root relative to the SDK checkout (e.g. "lib/core")
    pub path: String,
    /// Client entry points in order of appearance in the entry file
    pub clients: Vec<String>,
    pub model_count: usize,
    pub request_count: usize,
    pub response_count: usize,
    /// 1 = high, 2 = medium, 3 = low
    pub priority: u8,
}

/// Kind of a parsed declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    Structure,
    Enumeration,
    TypeAlias,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Structure => write!(f, "structure"),
            ModelKind::Enumeration => write!(f, "enumeration"),
            ModelKind::TypeAlias => write!(f, "type-alias"),
        }
    }
}

/// One structure, enumeration or type alias found in a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedModel {
    /// Declared type name (PascalCase)
    pub name: String,
    /// snake_case form of `name`, used for output file names
    pub file_name: String,
    /// First doc-comment description, or empty
    pub documentation: String,
    /// Kind-specific payload, tagged with `kind`
    #[serde(flatten)]
    pub body: ModelBody,
}

/// Kind-specific part of a [`ParsedModel`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelBody {
    #[serde(rename_all = "camelCase")]
    Structure {
        fields: Vec<ParsedField>,
        /// First extended type; marks this structure as a polymorphic variant
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_type: Option<String>,
        /// Field that disambiguates variants of a polymorphic base
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discriminator: Option<String>,
    },
    Enumeration {
        variants: Vec<EnumVariant>,
    },
    #[serde(rename_all = "camelCase")]
    TypeAlias {
        aliased_type: String,
    },
}

/// One member of a structure declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedField {
    /// Declared name, unquoted (camelCase in the origin SDK)
    pub name: String,
    /// snake_case name, `r#`-escaped when it is a Rust keyword
    pub target_name: String,
    /// Cleaned origin type expression
    pub type_descriptor: String,
    pub is_required: bool,
    pub documentation: String,
}

/// One enumeration member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    pub value: String,
}

impl ParsedModel {
    pub fn kind(&self) -> ModelKind {
        match self.body {
            ModelBody::Structure { .. } => ModelKind::Structure,
            ModelBody::Enumeration { .. } => ModelKind::Enumeration,
            ModelBody::TypeAlias { .. } => ModelKind::TypeAlias,
        }
    }

    /// Structure fields, empty for other kinds
    pub fn fields(&self) -> &[ParsedField] {
        match &self.body {
            ModelBody::Structure { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Enumeration members, empty for other kinds
    pub fn variants(&self) -> &[EnumVariant] {
        match &self.body {
            ModelBody::Enumeration { variants } => variants,
            _ => &[],
        }
    }

    pub fn base_type(&self) -> Option<&str> {
        match &self.body {
            ModelBody::Structure { base_type, .. } => base_type.as_deref(),
            _ => None,
        }
    }

    pub fn discriminator(&self) -> Option<&str> {
        match &self.body {
            ModelBody::Structure { discriminator, .. } => discriminator.as_deref(),
            _ => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == ModelKind::Enumeration
    }
}
