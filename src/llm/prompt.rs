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

pub const SYSTEM_PROMPT: &str = "You are an expert at creating study material from transcripts.";

pub fn cards_prompt(chunk: &str, preferences: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Given the transcript below, generate a list of Anki cloze deletion flashcards.\n",
    );
    prompt.push_str(
        "Each flashcard is a single string that hides the key fact in the format {{c1::answer}}, \
         optionally with a hint as {{c1::answer::hint}}.\n",
    );
    prompt.push_str(
        "Output ONLY a valid JSON array of strings with no additional commentary, markdown \
         formatting, or extra text.\n",
    );
    push_preferences(&mut prompt, preferences);
    push_transcript(&mut prompt, chunk);
    prompt
}

pub fn questions_prompt(chunk: &str, preferences: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str("Given the transcript below, generate multiple-choice quiz questions.\n");
    prompt.push_str(
        "Each question is a JSON object with the keys \"question\" (string), \"options\" \
         (array of four strings), \"correctAnswer\" (string, exactly equal to one of the \
         options) and \"explanation\" (string).\n",
    );
    prompt.push_str(
        "Output ONLY a valid JSON array of these objects with no additional commentary, \
         markdown formatting, or extra text.\n",
    );
    push_preferences(&mut prompt, preferences);
    push_transcript(&mut prompt, chunk);
    prompt
}

fn push_preferences(prompt: &mut String, preferences: &str) {
    let preferences = preferences.trim();
    if !preferences.is_empty() {
        prompt.push_str("\nFollow these preferences from the user:\n");
        prompt.push_str(preferences);
        prompt.push('\n');
    }
}

fn push_transcript(prompt: &mut String, chunk: &str) {
    prompt.push_str("\nTranscript:\n\"\"\"");
    prompt.push_str(chunk);
    prompt.push_str("\"\"\"\n");
}
