use serde::{Deserialize, Serialize};

/// Self-reported gender used to steer name generation.
///
/// Unrecognized non-empty values collapse to `Neutral`; an empty value is an
/// input error and must be rejected before reaching this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Neutral,
}

impl Gender {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Neutral,
        }
    }

    /// Descriptive label used in the generation prompt.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Gender::Male => "男性",
            Gender::Female => "女性",
            Gender::Neutral => "中性",
        }
    }
}

/// A validated generation request. Construction is the caller's job; see the
/// web layer for wire-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequest {
    pub gender: Gender,
    pub original_name: String,
    pub traits: Vec<String>,
}

/// One generated name proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate {
    pub name: String,
    pub pinyin: String,
    pub meaning: String,
}

/// Token accounting passed through from the completion service, never
/// interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// The payload returned to the page shell. `fallback` and `error` only
/// appear on degraded responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResponse {
    pub names: Vec<NameCandidate>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl NameResponse {
    pub fn generated(names: Vec<NameCandidate>, usage: Option<Usage>) -> Self {
        Self {
            names,
            fallback: false,
            error: None,
            usage,
        }
    }

    pub fn degraded(names: Vec<NameCandidate>, error: String) -> Self {
        Self {
            names,
            fallback: true,
            error: Some(error),
            usage: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_known_values() {
        assert_eq!(Gender::parse("male"), Gender::Male);
        assert_eq!(Gender::parse(" Female "), Gender::Female);
        assert_eq!(Gender::parse("neutral"), Gender::Neutral);
    }

    #[test]
    fn gender_parse_unknown_defaults_to_neutral() {
        for value in ["other", "nonbinary", "MALE?"] {
            assert_eq!(Gender::parse(value), Gender::Neutral, "value {value:?}");
        }
    }

    #[test]
    fn generated_response_omits_degradation_fields() {
        let response = NameResponse::generated(
            vec![NameCandidate {
                name: "志远".to_string(),
                pinyin: "Zhì Yuǎn".to_string(),
                meaning: "胸怀远志".to_string(),
            }],
            None,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("fallback").is_none());
        assert!(json.get("error").is_none());
        assert!(json.get("usage").is_none());
    }

    #[test]
    fn degraded_response_carries_flag_and_error() {
        let response = NameResponse::degraded(vec![], "upstream failed".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fallback"], true);
        assert_eq!(json["error"], "upstream failed");
    }
}
