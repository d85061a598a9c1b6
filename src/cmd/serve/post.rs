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

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use maud::Markup;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::view::cards_page;
use crate::cmd::serve::view::index_page;
use crate::cmd::serve::view::quiz_page;
use crate::llm::Generator;
use crate::pipeline::generate::GenerateOptions;
use crate::pipeline::generate::generate_cards;
use crate::pipeline::generate::generate_quiz;
use crate::types::card::Card;

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Cloze,
    Quiz,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub transcript: String,
    pub preferences: String,
    pub model: String,
    pub mode: Mode,
}

pub async fn post_handler<G: Generator>(
    State(state): State<ServerState<G>>,
    Form(form): Form<FormData>,
) -> Html<String> {
    Html(generate_page(&state, &form).await.into_string())
}

async fn generate_page<G: Generator>(state: &ServerState<G>, form: &FormData) -> Markup {
    let generator_config = &state.config.generator;
    if form.transcript.trim().is_empty() {
        return index_page(generator_config, form, Some("Please paste a transcript."));
    }
    let mut options = GenerateOptions::from_config(&state.config);
    if !form.model.is_empty() {
        if !generator_config.allows_model(&form.model) {
            log::warn!("Rejected unknown model {}", form.model);
            let message = format!("Unknown model: {}", form.model);
            return index_page(generator_config, form, Some(message.as_str()));
        }
        options.model = form.model.clone();
    }
    options.preferences = form.preferences.trim().to_string();
    match form.mode {
        Mode::Cloze => {
            let cards: Vec<Card> = generate_cards(state.generator.as_ref(), &form.transcript, &options)
                .await
                .into_iter()
                .map(Card::new)
                .collect();
            if cards.is_empty() {
                log::error!("No cards generated.");
                index_page(generator_config, form, Some("Failed to generate any cards."))
            } else {
                cards_page(&cards)
            }
        }
        Mode::Quiz => {
            let questions = generate_quiz(state.generator.as_ref(), &form.transcript, &options).await;
            if questions.is_empty() {
                log::error!("No questions generated.");
                index_page(generator_config, form, Some("Failed to generate any cards."))
            } else {
                quiz_page(&questions)
            }
        }
    }
}
