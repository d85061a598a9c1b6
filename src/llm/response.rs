// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm::GenerationError;
use crate::types::question::Question;

/// Parse the model's reply as a JSON array. If the reply is not valid JSON
/// as a whole, retry with the text between the first `[` and the last `]`,
/// which recovers from surrounding commentary and code fences. Valid JSON
/// that is not an array is malformed.
pub fn parse_json_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, GenerationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let strict_error = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => {
            return serde_json::from_value(Value::Array(items))
                .map_err(|e| GenerationError::Malformed(e.to_string()));
        }
        Ok(_) => {
            return Err(GenerationError::Malformed(
                "expected a JSON array".to_string(),
            ));
        }
        Err(e) => e,
    };
    log::debug!("Strict parse failed ({strict_error}), trying bracket extraction.");
    match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Vec<T>>(&raw[start..=end])
                .map_err(|e| GenerationError::Malformed(e.to_string()))
        }
        _ => Err(GenerationError::Malformed(strict_error.to_string())),
    }
}

pub fn parse_cards(raw: &str) -> Result<Vec<String>, GenerationError> {
    parse_json_array(raw)
}

/// Like [`parse_json_array`], but drops questions that fail validation.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, GenerationError> {
    let questions: Vec<Question> = parse_json_array(raw)?;
    let total = questions.len();
    let valid: Vec<Question> = questions.into_iter().filter(Question::is_valid).collect();
    if valid.len() < total {
        log::warn!("Dropped {} invalid question(s).", total - valid.len());
    }
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict() {
        let cards = parse_cards(r#"["{{c1::Paris}} is the capital of France."]"#);
        assert_eq!(
            cards,
            Ok(vec!["{{c1::Paris}} is the capital of France.".to_string()])
        );
    }

    #[test]
    fn test_code_fence() {
        let raw = "```json\n[\"a {{c1::b}}\", \"c {{c1::d}}\"]\n```";
        assert_eq!(
            parse_cards(raw),
            Ok(vec!["a {{c1::b}}".to_string(), "c {{c1::d}}".to_string()])
        );
    }

    #[test]
    fn test_commentary() {
        let raw = "Here are your cards:\n[\"x {{c1::y}}\"]\nHope this helps!";
        assert_eq!(parse_cards(raw), Ok(vec!["x {{c1::y}}".to_string()]));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(parse_cards("[]"), Ok(vec![]));
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(parse_cards("   "), Err(GenerationError::EmptyResponse));
    }

    #[test]
    fn test_no_brackets() {
        assert!(matches!(
            parse_cards("I cannot help with that."),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_cards(r#"{"cards": "nope"}"#),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_object_holding_an_array() {
        assert!(matches!(
            parse_cards(r#"{"cards": ["a {{c1::b}}"]}"#),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_cards(r#""see [\"a {{c1::b}}\"]""#),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_element_type() {
        assert!(matches!(
            parse_cards("[1, 2, 3]"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_broken_json_inside_brackets() {
        assert!(matches!(
            parse_cards("[\"unterminated]"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_questions_drop_invalid() {
        let raw = r#"[
            {"question": "Capital of France?", "options": ["Paris", "Lyon"], "correctAnswer": "Paris"},
            {"question": "Capital of Spain?", "options": ["Madrid", "Seville"], "correctAnswer": "Barcelona"}
        ]"#;
        let questions = parse_questions(raw);
        assert!(questions.is_ok());
        let questions = questions.unwrap_or_default();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "Paris");
    }
}
