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

pub mod openai;
mod prompt;
pub mod response;

use std::fmt::Display;
use std::fmt::Formatter;
use std::future::Future;

use crate::types::question::Question;

/// The boundary to the text-generation service: one chunk of transcript in,
/// a list of raw cards or questions out.
pub trait Generator: Send + Sync + 'static {
    /// Raw cloze cards for one chunk.
    fn cards(
        &self,
        chunk: &str,
        preferences: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<String>, GenerationError>> + Send;

    /// Quiz questions for one chunk. Invalid questions are already dropped.
    fn questions(
        &self,
        chunk: &str,
        preferences: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<Question>, GenerationError>> + Send;
}

/// Why a chunk produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// `OPENAI_API_KEY` is not set.
    MissingApiKey,
    /// The request never got a response.
    Transport(String),
    /// The service answered with a non-success status.
    Status { code: u16, body: String },
    /// The service answered, but with no content.
    EmptyResponse,
    /// The content is not a JSON array of the expected shape.
    Malformed(String),
}

impl GenerationError {
    /// Whether trying the same request again might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Transport(_) => true,
            GenerationError::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::MissingApiKey => write!(f, "OPENAI_API_KEY is not set"),
            GenerationError::Transport(e) => write!(f, "request failed: {e}"),
            GenerationError::Status { code, body } => {
                write!(f, "service returned HTTP {code}: {body}")
            }
            GenerationError::EmptyResponse => write!(f, "service returned no content"),
            GenerationError::Malformed(e) => write!(f, "malformed response: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient() {
        assert!(GenerationError::Transport("timeout".to_string()).is_transient());
        let status = |code| GenerationError::Status {
            code,
            body: String::new(),
        };
        assert!(status(429).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(401).is_transient());
        assert!(!GenerationError::MissingApiKey.is_transient());
        assert!(!GenerationError::Malformed("x".to_string()).is_transient());
    }

    #[test]
    fn test_display() {
        let e = GenerationError::Status {
            code: 401,
            body: "bad key".to_string(),
        };
        assert_eq!(e.to_string(), "service returned HTTP 401: bad key");
    }
}
