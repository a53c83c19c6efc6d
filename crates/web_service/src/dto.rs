use naming_core::{Gender, NameRequest};
use serde::Deserialize;

use crate::error::AppError;

/// The form never sends more than three traits; extras from other callers
/// are truncated rather than rejected.
const MAX_TRAITS: usize = 3;

/// Wire shape of `POST /v1/names/generate`. Every field is optional at the
/// serde level so missing fields become a 400 instead of a deserialization
/// error with an opaque body.
#[derive(Debug, Deserialize)]
pub struct GenerateNamesRequest {
    pub gender: Option<String>,
    #[serde(rename = "originalName")]
    pub original_name: Option<String>,
    pub traits: Option<Vec<String>>,
}

impl GenerateNamesRequest {
    pub fn into_domain(self) -> Result<NameRequest, AppError> {
        let gender = match self.gender.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Gender::parse(value),
            _ => return Err(AppError::InvalidInput("gender is required".to_string())),
        };

        let original_name = match self.original_name.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                return Err(AppError::InvalidInput(
                    "originalName is required".to_string(),
                ))
            }
        };

        let mut traits: Vec<String> = self
            .traits
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                let trimmed = t.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        if traits.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one trait is required".to_string(),
            ));
        }
        traits.truncate(MAX_TRAITS);

        Ok(NameRequest {
            gender,
            original_name,
            traits,
        })
    }
}
