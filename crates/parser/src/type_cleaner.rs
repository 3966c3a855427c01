//! Normalization of raw type annotation text
//!
//! Type descriptors are kept textual. Cleaning only removes what is an
//! artifact of the origin module system rather than part of the type:
//!
//! ```text
//! import("../model").InstanceShapeConfig   ->  InstanceShapeConfig
//! Array<model.Vnic>                        ->  Array<Vnic>
//! | "a"\n    | "b"                        ->  "a" | "b"
//! ```

use regex::Regex;
use sdk_bindgen_common::{BindgenError, Result};

/// Strips import prefixes and container qualifiers from type text
#[derive(Debug, Clone)]
pub struct TypeCleaner {
    import_prefix: Regex,
    qualifier_prefix: Option<Regex>,
}

impl TypeCleaner {
    /// Build a cleaner removing `q.` prefixes for every qualifier `q`
    pub fn new<S: AsRef<str>>(qualifiers: &[S]) -> Result<Self> {
        let import_prefix = Regex::new(r#"import\(\s*(?:"[^"]*"|'[^']*')\s*\)\."#)
            .map_err(|e| BindgenError::Config(format!("Invalid import pattern: {e}")))?;

        let mut names: Vec<&str> = qualifiers
            .iter()
            .map(AsRef::as_ref)
            .filter(|q| !q.is_empty())
            .collect();
        names.sort_unstable();
        names.dedup();

        let qualifier_prefix = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|q| regex::escape(q))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(^|[^\w.$])(?:{alternation})\.");
            Some(Regex::new(&pattern).map_err(|e| {
                BindgenError::Config(format!("Invalid container qualifiers {names:?}: {e}"))
            })?)
        };

        Ok(Self {
            import_prefix,
            qualifier_prefix,
        })
    }

    /// Clean one raw type annotation
    pub fn clean(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw);
        let text = collapsed.strip_prefix('|').unwrap_or(&collapsed).trim_start();
        let text = self.import_prefix.replace_all(text, "");

        match &self.qualifier_prefix {
            Some(re) => re.replace_all(&text, "${1}").into_owned(),
            None => text.into_owned(),
        }
    }
}

/// Collapse whitespace runs outside string literals to one space and trim
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in raw.trim().chars() {
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if matches!(ch, '"' | '\'' | '`') {
            quote = Some(ch);
        }
        out.push(ch);
    }

    out
}
