//! Prompt templates with `{key}` placeholders.
//!
//! Placeholders name memory keys. `{{` and `}}` produce literal braces.
//! Templates are parsed once, at task definition time, so a malformed
//! template or an unknown placeholder fails before any run starts.

use crate::error::DossieError;
use crate::memory::Memory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptTemplate {
    original: String,
    segments: Vec<Segment>,
    /// Unique placeholder names, in order of first appearance
    slot_names: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template string
    pub fn parse(template: &str) -> Result<Self, DossieError> {
        let mut segments = Vec::new();
        let mut slot_names: Vec<String> = Vec::new();
        let mut literal = String::new();

        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        name.push(next);
                    }

                    if !closed {
                        return Err(DossieError::Configuration(format!(
                            "unclosed placeholder '{{{}' in template",
                            name
                        )));
                    }
                    if !is_valid_key(&name) {
                        return Err(DossieError::Configuration(format!(
                            "invalid placeholder '{{{}}}' in template",
                            name
                        )));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    if !slot_names.contains(&name) {
                        slot_names.push(name.clone());
                    }
                    segments.push(Segment::Slot(name));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(DossieError::Configuration(
                        "single '}' encountered in template".to_string(),
                    ));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(PromptTemplate {
            original: template.to_string(),
            segments,
            slot_names,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn slot_names(&self) -> &[String] {
        &self.slot_names
    }

    /// Substitute every placeholder with its current memory value.
    ///
    /// A placeholder without a memory entry is a configuration defect.
    pub fn render(&self, memory: &Memory) -> Result<String, DossieError> {
        let mut out = String::with_capacity(self.original.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(key) => {
                    let value = memory.get(key).ok_or_else(|| {
                        DossieError::Configuration(format!(
                            "template references unbound key '{}'",
                            key
                        ))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl TryFrom<String> for PromptTemplate {
    type Error = DossieError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PromptTemplate::parse(&value)
    }
}

impl From<PromptTemplate> for String {
    fn from(template: PromptTemplate) -> Self {
        template.original
    }
}

fn is_valid_key(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
