//! List-resource templates (spec §3, GLOSSARY: "Template").
//!
//! A template is a linked sequence of name patterns of the form
//! `stem_$_$`, attached to list-typed resources. The template-expansion
//! DSL itself is out of scope (spec §1); this module only parses,
//! validates, and round-trips the pattern strings.

use crate::error::ValidationError;

/// A single `stem_$_$`-shaped pattern: a stem plus the count of `$`
/// placeholders trailing it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplatePattern {
    stem: String,
    placeholders: usize,
}

impl TemplatePattern {
    fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::InvalidTemplate {
                reason: "empty pattern".to_string(),
            });
        }
        let mut placeholders = 0usize;
        let mut stem_end = s.len();
        let mut rest = s;
        while let Some(stripped) = rest.strip_suffix('$') {
            let stripped = stripped.strip_suffix('_').ok_or_else(|| ValidationError::InvalidTemplate {
                reason: format!("malformed placeholder in {s:?}"),
            })?;
            placeholders += 1;
            stem_end = stripped.len();
            rest = stripped;
        }
        if placeholders == 0 {
            return Err(ValidationError::InvalidTemplate {
                reason: format!("pattern {s:?} has no '$' placeholder"),
            });
        }
        let stem = &s[..stem_end];
        if stem.is_empty() || !stem.chars().next().unwrap().is_ascii_alphabetic() {
            return Err(ValidationError::InvalidTemplate {
                reason: format!("pattern {s:?} has an invalid stem"),
            });
        }
        if !stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidTemplate {
                reason: format!("pattern {s:?} has an invalid stem"),
            });
        }
        Ok(Self {
            stem: stem.to_string(),
            placeholders,
        })
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn placeholders(&self) -> usize {
        self.placeholders
    }
}

impl std::fmt::Display for TemplatePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stem)?;
        for _ in 0..self.placeholders {
            write!(f, "_$")?;
        }
        Ok(())
    }
}

/// A colon-separated sequence of [`TemplatePattern`]s, carried opaquely by
/// list resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    patterns: Vec<TemplatePattern>,
}

impl Template {
    pub fn new() -> Self {
        Self { patterns: Vec::new() }
    }

    /// Parse a `:`-joined sequence of patterns, e.g. `"eth_$:dns_$_$"`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let patterns = s
            .split(':')
            .filter(|p| !p.is_empty())
            .map(TemplatePattern::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[TemplatePattern] {
        &self.patterns
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.patterns.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}
