use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Successful body returned by the `/predict` endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    pub predicted_class: String,
    pub confidence: f64,
    pub class_probabilities: HashMap<String, f64>,
}

impl PredictionResponse {
    pub fn confidence_percent(&self) -> u32 {
        percent(self.confidence)
    }

    /// All class probabilities, highest first. Ties break on the label so
    /// the ordering is stable across renders.
    pub fn ranked_probabilities(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .class_probabilities
            .iter()
            .map(|(label, p)| (label.clone(), *p))
            .collect();
        ranked.sort_by(|(label_a, a), (label_b, b)| {
            b.partial_cmp(a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| label_a.cmp(label_b))
        });
        ranked
    }
}

/// Error body returned by the backend on a non-success status. The message
/// is optional; callers fall back to a generic one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// Rounds a probability in [0, 1] to a whole percentage.
pub fn percent(probability: f64) -> u32 {
    (probability * 100.0).round() as u32
}

/// Class names come over the wire as snake_case tokens.
pub fn display_label(raw: &str) -> String {
    raw.replace('_', " ")
}

/// One of the four symptom checkboxes on the intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symptom {
    Itching,
    Burning,
    Pain,
    Redness,
}

impl Symptom {
    pub const ALL: [Symptom; 4] = [
        Symptom::Itching,
        Symptom::Burning,
        Symptom::Pain,
        Symptom::Redness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Itching => "Itching",
            Symptom::Burning => "Burning",
            Symptom::Pain => "Pain",
            Symptom::Redness => "Redness",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Symptom::Itching => "itching",
            Symptom::Burning => "burning",
            Symptom::Pain => "pain",
            Symptom::Redness => "redness",
        }
    }
}

/// Serialized as the `symptoms` form field, a JSON object with four fixed
/// boolean keys.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymptomFlags {
    pub itching: bool,
    pub burning: bool,
    pub pain: bool,
    pub redness: bool,
}

impl SymptomFlags {
    pub fn is_set(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Itching => self.itching,
            Symptom::Burning => self.burning,
            Symptom::Pain => self.pain,
            Symptom::Redness => self.redness,
        }
    }

    pub fn set(&mut self, symptom: Symptom, value: bool) {
        match symptom {
            Symptom::Itching => self.itching = value,
            Symptom::Burning => self.burning = value,
            Symptom::Pain => self.pain = value,
            Symptom::Redness => self.redness = value,
        }
    }

    /// Human-readable restatement for the result page.
    pub fn summary(&self) -> String {
        let reported: Vec<&str> = Symptom::ALL
            .iter()
            .filter(|s| self.is_set(**s))
            .map(|s| s.label())
            .collect();
        if reported.is_empty() {
            "None reported".to_string()
        } else {
            reported.join(", ")
        }
    }
}

/// How long the condition has been present, sent as a token string.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Duration {
    #[default]
    #[strum(serialize = "less_than_a_week")]
    LessThanAWeek,
    #[strum(serialize = "one_to_four_weeks")]
    OneToFourWeeks,
    #[strum(serialize = "one_to_six_months")]
    OneToSixMonths,
    #[strum(serialize = "more_than_six_months")]
    MoreThanSixMonths,
}

impl Duration {
    pub const ALL: [Duration; 4] = [
        Duration::LessThanAWeek,
        Duration::OneToFourWeeks,
        Duration::OneToSixMonths,
        Duration::MoreThanSixMonths,
    ];

    /// Display form of the token, underscores replaced with spaces.
    pub fn label(&self) -> String {
        display_label(&self.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

/// One transcript entry, also echoed back to the backend as context.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_response() -> PredictionResponse {
        PredictionResponse {
            predicted_class: "atopic_dermatitis".to_string(),
            confidence: 0.874,
            class_probabilities: HashMap::from([
                ("B".to_string(), 0.3),
                ("A".to_string(), 0.6),
                ("C".to_string(), 0.1),
            ]),
        }
    }

    #[test]
    fn confidence_rounds_to_whole_percent() {
        assert_eq!(sample_response().confidence_percent(), 87);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.005), 1);
    }

    #[test]
    fn probabilities_rank_descending() {
        let ranked = sample_response().ranked_probabilities();
        let labels: Vec<&str> = ranked.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        let percents: Vec<u32> = ranked.iter().map(|(_, p)| percent(*p)).collect();
        assert_eq!(percents, vec![60, 30, 10]);
    }

    #[test]
    fn tied_probabilities_order_by_label() {
        let response = PredictionResponse {
            predicted_class: "a".to_string(),
            confidence: 0.5,
            class_probabilities: HashMap::from([
                ("beta".to_string(), 0.5),
                ("alpha".to_string(), 0.5),
            ]),
        };
        let labels: Vec<String> = response
            .ranked_probabilities()
            .into_iter()
            .map(|(l, _)| l)
            .collect();
        assert_eq!(labels, vec!["alpha", "beta"]);
    }

    #[test]
    fn labels_display_without_underscores() {
        assert_eq!(display_label("atopic_dermatitis"), "atopic dermatitis");
        assert_eq!(display_label("acne"), "acne");
    }

    #[test]
    fn prediction_response_parses_the_wire_shape() {
        let body = r#"{
            "predicted_class": "eczema",
            "confidence": 0.91,
            "class_probabilities": {"eczema": 0.91, "psoriasis": 0.09}
        }"#;
        let parsed: PredictionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.predicted_class, "eczema");
        assert_eq!(parsed.confidence_percent(), 91);
    }

    #[test]
    fn prediction_response_rejects_missing_fields() {
        let body = r#"{"predicted_class": "eczema", "confidence": 0.91}"#;
        assert!(serde_json::from_str::<PredictionResponse>(body).is_err());
    }

    #[test]
    fn error_response_message_is_optional() {
        let with_message: ErrorResponse =
            serde_json::from_str(r#"{"error": "bad image"}"#).unwrap();
        assert_eq!(with_message.error.as_deref(), Some("bad image"));
        let without: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(without.error, None);
    }

    #[test]
    fn symptom_flags_serialize_with_fixed_keys() {
        let mut flags = SymptomFlags::default();
        flags.set(Symptom::Itching, true);
        flags.set(Symptom::Redness, true);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(
            json,
            r#"{"itching":true,"burning":false,"pain":false,"redness":true}"#
        );
    }

    #[test]
    fn symptom_summary_lists_checked_flags() {
        let mut flags = SymptomFlags::default();
        assert_eq!(flags.summary(), "None reported");
        flags.set(Symptom::Burning, true);
        flags.set(Symptom::Pain, true);
        assert_eq!(flags.summary(), "Burning, Pain");
    }

    #[test]
    fn duration_tokens_round_trip() {
        for duration in Duration::ALL {
            let token = duration.to_string();
            assert_eq!(Duration::from_str(&token).unwrap(), duration);
            assert!(!token.contains(' '));
        }
        assert_eq!(Duration::OneToFourWeeks.label(), "one to four weeks");
        assert_eq!(Duration::default(), Duration::LessThanAWeek);
    }

    #[test]
    fn chat_roles_serialize_lowercase() {
        let request = ChatRequest {
            message: "hi".to_string(),
            history: vec![ChatTurn {
                role: ChatRole::User,
                content: "hi".to_string(),
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn chat_response_defaults_quick_replies() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"response": "hello"}"#).unwrap();
        assert!(parsed.quick_replies.is_empty());
    }
}
