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

use regex::Captures;
use regex::Regex;
use serde::Serialize;

/// A loosely formatted cloze marker: one or two braces on each side, and
/// whitespace allowed around every part.
static LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{?\s*c(\d+)\s*::\s*([^}]*?)(?:\s*::\s*([^}]*?))?\s*\}\}?").unwrap()
});

/// A single-brace marker, e.g. `{c1::Paris}`.
static SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\s*c\d+\s*::[^{}]*)\}").unwrap());

/// A canonical cloze marker.
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{c(\d+)::([^}]*?)(?:::([^}]*?))?\}\}").unwrap());

/// One deletion in a normalized card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cloze {
    /// The digits after `c`, kept as written since models emit indices of
    /// any length.
    pub index: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Rewrite every cloze marker in the card into `{{cN::answer}}` or
/// `{{cN::answer::hint}}`. Text outside markers is left as-is.
pub fn normalize_cloze(card: &str) -> String {
    let normalized = rewrite(card);
    let promoted = promote_single_braces(&normalized);
    if promoted == normalized {
        normalized
    } else {
        rewrite(&promoted)
    }
}

/// Rewrite every marker with at least one doubled brace. Markers with a
/// single brace on both sides are left for [`promote_single_braces`].
fn rewrite(card: &str) -> String {
    LOOSE
        .replace_all(card, |caps: &Captures| {
            let marker = &caps[0];
            if !marker.starts_with("{{") && !marker.ends_with("}}") {
                return marker.to_string();
            }
            let index = &caps[1];
            let answer = clean_part(&caps[2]);
            match caps.get(3) {
                Some(hint) => format!("{{{{c{index}::{answer}::{}}}}}", clean_part(hint.as_str())),
                None => format!("{{{{c{index}::{answer}}}}}"),
            }
        })
        .into_owned()
}

/// Double the braces of `{cN::...}` fragments that sit outside canonical
/// markers.
fn promote_single_braces(card: &str) -> String {
    let mut promoted = String::with_capacity(card.len());
    let mut last = 0;
    for marker in CANONICAL.find_iter(card) {
        promoted.push_str(&SINGLE.replace_all(&card[last..marker.start()], "{{$1}}"));
        promoted.push_str(marker.as_str());
        last = marker.end();
    }
    promoted.push_str(&SINGLE.replace_all(&card[last..], "{{$1}}"));
    promoted
}

fn clean_part(text: &str) -> String {
    text.replace(['{', '}'], "").trim().to_string()
}

/// The deletions of a normalized card, in order of appearance.
pub fn parse_clozes(card: &str) -> Vec<Cloze> {
    CANONICAL.captures_iter(card).map(|caps| cloze_of(&caps)).collect()
}

/// Replace every canonical marker with whatever `deletion` returns for it,
/// in order.
pub fn replace_clozes(card: &str, mut deletion: impl FnMut(Cloze) -> String) -> String {
    CANONICAL
        .replace_all(card, |caps: &Captures| deletion(cloze_of(caps)))
        .into_owned()
}

fn cloze_of(caps: &Captures) -> Cloze {
    Cloze {
        index: caps[1].to_string(),
        answer: caps[2].to_string(),
        hint: caps.get(3).map(|m| m.as_str().to_string()),
    }
}
