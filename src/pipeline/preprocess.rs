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

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// A VTT/SRT cue range, e.g. `00:00:01.000 --> 00:00:04.500`.
static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{1,2}:)?\d{1,2}:\d{2}[.,]\d{1,3}[ \t]*-->[ \t]*(?:\d{1,2}:)?\d{1,2}:\d{2}[.,]\d{1,3}")
        .unwrap()
});

/// A bracketed timestamp, e.g. `[00:01:15]` or `[1:15]`.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d{1,2}:\d{2}(?::\d{2})?(?:[.,]\d{1,3})?\]").unwrap());

/// A bare timestamp, e.g. `1:15`, `01:02:03` or `00:00:01.000`.
static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?(?:[.,]\d{1,3})?\b").unwrap());

/// A speaker label at the start of a line: up to four capitalized words
/// followed by a colon and whitespace.
static SPEAKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\p{Lu}[\p{L}\p{N}.'\-]*(?:[ \t]+\p{Lu}[\p{L}\p{N}.'\-]*){0,3}[ \t]*:(?:[ \t]+|$)")
        .unwrap()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Which kinds of transcript noise to remove. Each rule can be toggled on
/// its own.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CleaningRules {
    /// VTT/SRT cue ranges.
    pub ranges: bool,
    /// Timestamps in square brackets.
    pub bracketed: bool,
    /// Timestamps without any markup.
    pub bare: bool,
    /// `Speaker Name:` labels at line starts.
    pub speaker_labels: bool,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            ranges: true,
            bracketed: true,
            bare: true,
            speaker_labels: true,
        }
    }
}

/// Strip timestamps and speaker labels from a raw transcript and collapse
/// its whitespace into single spaces.
pub fn preprocess(text: &str, rules: &CleaningRules) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    // Timestamps become line breaks so that a label right after one is at a
    // line start.
    let mut text: String = text.to_string();
    if rules.ranges {
        text = RANGE.replace_all(&text, "\n").into_owned();
    }
    if rules.bracketed {
        text = BRACKETED.replace_all(&text, "\n").into_owned();
    }
    if rules.bare {
        text = BARE.replace_all(&text, "\n").into_owned();
    }
    if rules.speaker_labels {
        text = SPEAKER.replace_all(&text, "").into_owned();
    }
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
