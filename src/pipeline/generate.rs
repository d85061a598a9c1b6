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

use std::time::Instant;

use crate::config::Config;
use crate::llm::Generator;
use crate::pipeline::chunk::chunk_text;
use crate::pipeline::cloze::normalize_cloze;
use crate::pipeline::preprocess::CleaningRules;
use crate::pipeline::preprocess::preprocess;
use crate::types::question::Question;

/// Everything a single generation run needs besides the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub preferences: String,
    /// Empty means the generator's default model.
    pub model: String,
    pub max_chunk_size: usize,
    pub min_chunk_size: usize,
    pub cleaning: CleaningRules,
}

impl GenerateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            preferences: String::new(),
            model: config.generator.model.clone(),
            max_chunk_size: config.chunking.max_size,
            min_chunk_size: config.chunking.min_size,
            cleaning: config.cleaning.clone(),
        }
    }
}

/// Clean the transcript and cut it into chunks. An empty result means there
/// is nothing to generate from.
pub fn prepare_chunks(transcript: &str, options: &GenerateOptions) -> Vec<String> {
    if transcript.trim().is_empty() {
        return Vec::new();
    }
    let cleaned = preprocess(transcript, &options.cleaning);
    if cleaned.is_empty() {
        return Vec::new();
    }
    chunk_text(&cleaned, options.max_chunk_size, options.min_chunk_size)
}

/// Generate normalized cloze cards for a whole transcript.
///
/// Chunks are processed one at a time, in order. A chunk whose generation
/// fails contributes no cards; the others are unaffected.
pub async fn generate_cards<G: Generator>(
    generator: &G,
    transcript: &str,
    options: &GenerateOptions,
) -> Vec<String> {
    let chunks = prepare_chunks(transcript, options);
    let mut cards: Vec<String> = Vec::new();
    let start = Instant::now();
    for (i, chunk) in chunks.iter().enumerate() {
        log::debug!("Processing chunk {}/{}", i + 1, chunks.len());
        match generator
            .cards(chunk, &options.preferences, &options.model)
            .await
        {
            Ok(raw) => {
                if raw.is_empty() {
                    log::warn!("Chunk {}/{} produced no cards.", i + 1, chunks.len());
                }
                cards.extend(raw.iter().map(|card| normalize_cloze(card)));
            }
            Err(e) => {
                log::warn!("Skipping chunk {}/{}: {e}", i + 1, chunks.len());
            }
        }
    }
    let duration = start.elapsed().as_millis();
    log::debug!(
        "Generated {} cards from {} chunks in {duration}ms.",
        cards.len(),
        chunks.len()
    );
    cards
}

/// Generate quiz questions for a whole transcript, with the same failure
/// handling as [`generate_cards`].
pub async fn generate_quiz<G: Generator>(
    generator: &G,
    transcript: &str,
    options: &GenerateOptions,
) -> Vec<Question> {
    let chunks = prepare_chunks(transcript, options);
    let mut questions: Vec<Question> = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        log::debug!("Processing chunk {}/{}", i + 1, chunks.len());
        match generator
            .questions(chunk, &options.preferences, &options.model)
            .await
        {
            Ok(qs) => questions.extend(qs),
            Err(e) => {
                log::warn!("Skipping chunk {}/{}: {e}", i + 1, chunks.len());
            }
        }
    }
    log::debug!(
        "Generated {} questions from {} chunks.",
        questions.len(),
        chunks.len()
    );
    questions
}
