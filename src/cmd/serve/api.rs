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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::cmd::serve::state::ServerState;
use crate::llm::Generator;
use crate::pipeline::generate::GenerateOptions;
use crate::pipeline::generate::generate_cards;
use crate::pipeline::generate::generate_quiz;
use crate::types::question::Question;

#[derive(Deserialize)]
pub struct CardsRequest {
    transcript: String,
    #[serde(default)]
    preferences: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    quiz: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum CardsResponse {
    Cards { cards: Vec<String> },
    Questions { questions: Vec<Question> },
    Error { error: String },
}

pub async fn cards_handler<G: Generator>(
    State(state): State<ServerState<G>>,
    Json(request): Json<CardsRequest>,
) -> (StatusCode, Json<CardsResponse>) {
    let mut options = GenerateOptions::from_config(&state.config);
    if let Some(model) = request.model {
        if !state.config.generator.allows_model(&model) {
            let error = format!("Unknown model: {model}");
            return (StatusCode::BAD_REQUEST, Json(CardsResponse::Error { error }));
        }
        options.model = model;
    }
    options.preferences = request.preferences;
    let generator = state.generator.as_ref();
    let response = if request.quiz {
        CardsResponse::Questions {
            questions: generate_quiz(generator, &request.transcript, &options).await,
        }
    } else {
        CardsResponse::Cards {
            cards: generate_cards(generator, &request.transcript, &options).await,
        }
    };
    (StatusCode::OK, Json(response))
}
