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

use maud::Markup;
use maud::html;

use crate::cmd::generate::cards_as_lines;
use crate::cmd::serve::post::FormData;
use crate::cmd::serve::post::Mode;
use crate::cmd::serve::template::page_template;
use crate::config::GeneratorConfig;
use crate::types::card::Card;
use crate::types::question::Question;

/// The transcript form. `form` holds what the user submitted last, so a
/// failed request doesn't lose their transcript.
pub fn index_page(generator: &GeneratorConfig, form: &FormData, message: Option<&str>) -> Markup {
    let mut models: Vec<&str> = vec![generator.model.as_str()];
    for model in &generator.models {
        if !models.contains(&model.as_str()) {
            models.push(model);
        }
    }
    let selected_model = if form.model.is_empty() {
        generator.model.as_str()
    } else {
        form.model.as_str()
    };
    let body = html! {
        div.root {
            h1 { "Transcript to Anki Cards" }
            @if let Some(message) = message {
                div.message { (message) }
            }
            form action="/" method="post" {
                textarea id="transcript" name="transcript" placeholder="Paste your transcript here" {
                    (form.transcript)
                }
                textarea id="preferences" name="preferences" placeholder="Preferences, e.g. focus on dates and names (optional)" {
                    (form.preferences)
                }
                select name="model" {
                    @for model in &models {
                        @if *model == selected_model {
                            option value=(model) selected { (model) }
                        } @else {
                            option value=(model) { (model) }
                        }
                    }
                }
                select name="mode" {
                    @if form.mode == Mode::Quiz {
                        option value="cloze" { "Cloze cards" }
                        option value="quiz" selected { "Quiz" }
                    } @else {
                        option value="cloze" selected { "Cloze cards" }
                        option value="quiz" { "Quiz" }
                    }
                }
                input type="submit" value="Generate";
            }
        }
    };
    page_template(body)
}

pub fn cards_page(cards: &[Card]) -> Markup {
    let body = html! {
        div.root {
            h1 { "Cloze Review" }
            div.progress { (cards.len()) " cards" }
            @for card in cards {
                div.card id=(format!("card-{}", card.hash().short())) {
                    div.front { (card.html_front()) }
                    details {
                        summary { "Reveal" }
                        div.back { (card.html_back()) }
                    }
                }
            }
            h3 { "All cards" }
            textarea id="all-cards" readonly { (cards_as_lines(cards)) }
            p { a href="/" { "Start over" } }
        }
    };
    page_template(body)
}

pub fn quiz_page(questions: &[Question]) -> Markup {
    let body = html! {
        div.root {
            h1 { "Quiz" }
            div.progress { (questions.len()) " questions" }
            @for (i, q) in questions.iter().enumerate() {
                div.card {
                    p.question { (i + 1) ". " (q.question) }
                    ol.options type="A" {
                        @for option in &q.options {
                            li { (option) }
                        }
                    }
                    details {
                        summary { "Answer" }
                        p.answer { (q.correct_answer) }
                        @if let Some(explanation) = &q.explanation {
                            p.explanation { (explanation) }
                        }
                    }
                }
            }
            p { a href="/" { "Start over" } }
        }
    };
    page_template(body)
}
