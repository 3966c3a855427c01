//! TypeScript front end
//!
//! Model files are parsed with swc into a full syntax tree. The converter
//! turns interfaces, enums and aliases of that tree into normalized models.

mod converter;
mod source;

pub use converter::{convert_enum, convert_interface, convert_type_alias, PolymorphicRole};
pub use source::{parse_source, Documented, SyntaxError, TsSource};
