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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::llm::Generator;
use crate::pipeline::cloze::Cloze;
use crate::pipeline::generate::GenerateOptions;
use crate::pipeline::generate::generate_cards;
use crate::pipeline::generate::generate_quiz;
use crate::types::card::Card;
use crate::types::card_hash::CardHash;
use crate::types::question::Question;

#[derive(ValueEnum, Clone, Copy)]
pub enum OutputFormat {
    /// One card per line, ready for Anki's text import.
    Text,
    /// JSON output.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardsExport {
    cards: Vec<CardExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport {
    hash: CardHash,
    text: String,
    clozes: Vec<Cloze>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizExport<'a> {
    questions: &'a [Question],
}

/// Read the transcript from a file, or from standard input.
pub fn read_transcript(file: Option<PathBuf>) -> Fallible<String> {
    match file {
        Some(path) => {
            if !path.exists() {
                return fail(format!("file {} does not exist.", path.display()));
            }
            Ok(read_to_string(path)?)
        }
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

pub async fn generate_command<G: Generator>(
    generator: &G,
    file: Option<PathBuf>,
    options: &GenerateOptions,
    quiz: bool,
    format: OutputFormat,
) -> Fallible<()> {
    let transcript = read_transcript(file)?;
    if transcript.trim().is_empty() {
        return fail("the transcript is empty.");
    }
    let output = if quiz {
        let questions = generate_quiz(generator, &transcript, options).await;
        if questions.is_empty() {
            return fail("no questions were generated.");
        }
        render_questions(&questions, format)?
    } else {
        let cards: Vec<Card> = generate_cards(generator, &transcript, options)
            .await
            .into_iter()
            .map(Card::new)
            .collect();
        if cards.is_empty() {
            return fail("no cards were generated.");
        }
        render_cards(&cards, format)?
    };
    println!("{output}");
    Ok(())
}

/// Anki's text import reads one note per line, so line breaks inside a
/// card become `<br>`.
pub fn cards_as_lines(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.text().replace("\r\n", "<br>").replace('\n', "<br>"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cards(cards: &[Card], format: OutputFormat) -> Fallible<String> {
    match format {
        OutputFormat::Text => Ok(cards_as_lines(cards)),
        OutputFormat::Json => {
            let export = CardsExport {
                cards: cards
                    .iter()
                    .map(|card| CardExport {
                        hash: card.hash(),
                        text: card.text().to_string(),
                        clozes: card.clozes(),
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&export)?)
        }
    }
}

fn render_questions(questions: &[Question], format: OutputFormat) -> Fallible<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (i, q) in questions.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("{}. {}\n", i + 1, q.question));
                for option in &q.options {
                    let marker = if option == &q.correct_answer { '*' } else { '-' };
                    out.push_str(&format!("   {marker} {option}\n"));
                }
                if let Some(explanation) = &q.explanation {
                    out.push_str(&format!("   {explanation}\n"));
                }
            }
            Ok(out.trim_end().to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&QuizExport { questions })?),
    }
}
