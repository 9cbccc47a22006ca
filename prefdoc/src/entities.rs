//! Entity-definition table parsing and reference expansion.
//!
//! The companion DTD file declares the substitutions referenced by the
//! markup (`<!ENTITY outliner.general "General">`). The table resolves
//! those references, the five builtin XML entities, and numeric character
//! references in text and attribute values during tree construction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PrefdocError;

static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+(%\s+)?(\S+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .unwrap_or_else(|err| panic!("entity declaration pattern failed to compile: {err}"))
});

/// Entity substitutions declared by the companion DTD file.
#[derive(Debug, Default, Clone)]
pub struct EntityTable {
    entities: HashMap<String, String>,
}

impl EntityTable {
    /// Parses `<!ENTITY name "value">` declarations from DTD text.
    ///
    /// Parameter entities (`<!ENTITY % …>`) are skipped. Values may
    /// reference previously declared entities and character references.
    ///
    /// # Errors
    ///
    /// Returns an error when a declaration value contains an unknown or
    /// malformed reference.
    pub fn parse(dtd: &str) -> Result<Self, PrefdocError> {
        let mut table = Self::default();
        for captures in ENTITY_DECL.captures_iter(dtd) {
            if captures.get(1).is_some() {
                continue;
            }
            let Some(name) = captures.get(2) else { continue };
            let raw = captures
                .get(3)
                .or_else(|| captures.get(4))
                .map_or("", |m| m.as_str());
            let value = table.expand(raw)?;
            table.entities.insert(name.as_str().to_owned(), value);
        }
        Ok(table)
    }

    /// Number of declared entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the table declares no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Expands entity and character references in `raw`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unterminated reference, an unknown entity
    /// name, or an invalid character reference.
    pub fn expand(&self, raw: &str) -> Result<String, PrefdocError> {
        if !raw.contains('&') {
            return Ok(raw.to_owned());
        }
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(start) = rest.find('&') {
            out.push_str(&rest[..start]);
            let tail = &rest[start + 1..];
            let Some(end) = tail.find(';') else {
                return Err(PrefdocError::UnterminatedReference {
                    context: snippet(raw),
                });
            };
            self.push_resolved(&tail[..end], &mut out)?;
            rest = &tail[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn push_resolved(&self, name: &str, out: &mut String) -> Result<(), PrefdocError> {
        match name {
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "amp" => out.push('&'),
            "apos" => out.push('\''),
            "quot" => out.push('"'),
            numeric if numeric.starts_with('#') => out.push(character_reference(numeric)?),
            entity => match self.entities.get(entity) {
                Some(value) => out.push_str(value),
                None => return Err(PrefdocError::UnknownEntity(entity.to_owned())),
            },
        }
        Ok(())
    }
}

fn character_reference(reference: &str) -> Result<char, PrefdocError> {
    let digits = &reference[1..];
    let code = digits.strip_prefix('x').map_or_else(
        || digits.parse::<u32>().ok(),
        |hex| u32::from_str_radix(hex, 16).ok(),
    );
    code.and_then(char::from_u32)
        .ok_or_else(|| PrefdocError::InvalidCharacterReference(reference.to_owned()))
}

fn snippet(text: &str) -> String {
    text.chars().take(40).collect()
}
