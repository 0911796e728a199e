use std::fmt;

use crate::error::{Result, TagError};

/// A person name split into first/last components.
///
/// Immutable once constructed. No case, punctuation or diacritic
/// normalization happens here; that is the slug formatter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    firstname: String,
    lastname: String,
}

impl Identity {
    /// Split a free-form display name on ASCII spaces: the last token becomes
    /// the last name, everything before it (empty tokens dropped) the first
    /// name. A single-token name yields an empty first name.
    pub fn from_display_name(name: &str) -> Self {
        let name = name.trim();
        let mut tokens: Vec<&str> = name.split(' ').collect();
        let lastname = tokens.pop().unwrap_or("");
        let firstname = tokens
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            firstname: firstname.trim().to_string(),
            lastname: lastname.trim().to_string(),
        }
    }

    /// Construct from explicit components. A missing last name is invalid;
    /// a missing first name is treated as empty.
    pub fn from_parts(firstname: Option<&str>, lastname: Option<&str>) -> Result<Self> {
        let lastname = lastname.ok_or(TagError::InvalidIdentity)?;
        Ok(Self {
            firstname: firstname.unwrap_or("").trim().to_string(),
            lastname: lastname.trim().to_string(),
        })
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Canonical display form: non-empty components joined by one space.
    pub fn name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.firstname.is_empty() {
            parts.push(&self.firstname);
        }
        if !self.lastname.is_empty() {
            parts.push(&self.lastname);
        }
        parts.join(" ")
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
