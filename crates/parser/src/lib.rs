//! Model parsing for TypeScript SDK services
//!
//! This crate turns the structure declarations of one service into the
//! normalized models (`ParsedModel`) used for binding generation.
//!
//! ## Parsing Strategy
//!
//! Every `.ts` file of the service's `lib/model` directory is parsed with swc
//! into a TypeScript syntax tree, then:
//! - `interface X { ... }` → structure, with one field per property signature
//! - `enum X { ... }` → enumeration
//! - `type X = ...` → type alias
//! - `namespace X { enum Y { ... } }` → enumeration `XY`
//!
//! Structures are classified for polymorphism:
//! - extends a type → variant of its first base
//! - exactly one `string` field → family root keyed on that field
//!
//! Dotted references to nested enums (`X.Y`) are rewritten to the flattened
//! name in every field type once all files are scanned.

mod extract;
mod flatten;
mod model_parser;
mod project;
mod type_cleaner;
pub mod typescript;

pub use extract::extract_models;
pub use flatten::{nested_enums, NestedEnum, ReferenceMap, ReferenceRewriter};
pub use model_parser::{ModelParser, ModelSummary};
pub use project::{ParsedSource, SourceProject};
pub use type_cleaner::TypeCleaner;
pub use typescript::PolymorphicRole;

use sdk_bindgen_common::{ParsedModel, Result};
use std::path::Path;

/// Parse the models of one service with the default layout
///
/// # Arguments
/// * `sdk_root` - Root of the SDK checkout
/// * `service` - Service directory name (e.g., "core", "identity")
pub fn parse_service(sdk_root: &Path, service: &str) -> Result<Vec<ParsedModel>> {
    ModelParser::new(sdk_root, service).parse()
}
