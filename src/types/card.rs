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
use maud::PreEscaped;
use maud::html;

use crate::markdown::markdown_to_html;
use crate::markdown::markdown_to_html_inline;
use crate::pipeline::cloze::Cloze;
use crate::pipeline::cloze::parse_clozes;
use crate::pipeline::cloze::replace_clozes;
use crate::types::card_hash::CardHash;

/// A generated card whose cloze markers are already normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    text: String,
    hash: CardHash,
}

impl Card {
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let hash = CardHash::of(&text);
        Self { text, hash }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hash(&self) -> CardHash {
        self.hash
    }

    pub fn clozes(&self) -> Vec<Cloze> {
        parse_clozes(&self.text)
    }

    /// The card with every deletion hidden. Hints, if any, are shown in
    /// place of the answer.
    pub fn html_front(&self) -> Markup {
        self.render(|cloze| match &cloze.hint {
            Some(hint) => format!("<span class='cloze'>[{}]</span>", markdown_to_html_inline(hint)),
            None => "<span class='cloze'>[...]</span>".to_string(),
        })
    }

    /// The card with every deletion revealed.
    pub fn html_back(&self) -> Markup {
        self.render(|cloze| {
            format!(
                "<span class='cloze-reveal'>{}</span>",
                markdown_to_html_inline(&cloze.answer)
            )
        })
    }

    /// Swap the markers for placeholder tags, render the Markdown, then swap
    /// the tags for the rendered deletions.
    fn render(&self, deletion: impl Fn(&Cloze) -> String) -> Markup {
        let mut deletions: Vec<String> = Vec::new();
        let text = replace_clozes(&self.text, |cloze| {
            let tag = cloze_tag(deletions.len());
            deletions.push(deletion(&cloze));
            tag
        });
        let mut html = markdown_to_html(&text);
        for (i, rendered) in deletions.iter().enumerate() {
            html = html.replace(&cloze_tag(i), rendered);
        }
        html! {
            (PreEscaped(html))
        }
    }
}

fn cloze_tag(i: usize) -> String {
    format!("CLOZE{i}DELETION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clozes() {
        let card = Card::new("{{c1::Berlin}} is the capital of {{c2::Germany::country}}.");
        let clozes = card.clozes();
        assert_eq!(clozes.len(), 2);
        assert_eq!(clozes[0].answer, "Berlin");
        assert_eq!(clozes[1].hint.as_deref(), Some("country"));
    }

    #[test]
    fn test_hash_follows_text() {
        let a = Card::new("{{c1::a}}");
        let b = Card::new("{{c1::a}}".to_string());
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), CardHash::of("{{c1::a}}"));
    }

    #[test]
    fn test_html_front() {
        let card = Card::new("{{c1::Berlin}} is the capital of {{c2::Germany::country}}.");
        assert_eq!(
            card.html_front().into_string(),
            "<p><span class='cloze'>[...]</span> is the capital of <span class='cloze'>[country]</span>.</p>\n"
        );
    }

    #[test]
    fn test_html_back() {
        let card = Card::new("{{c1::Berlin}} is the capital of **{{c2::Germany}}**.");
        assert_eq!(
            card.html_back().into_string(),
            "<p><span class='cloze-reveal'>Berlin</span> is the capital of <strong><span class='cloze-reveal'>Germany</span></strong>.</p>\n"
        );
    }

    #[test]
    fn test_huge_index_keeps_answers_in_place() {
        let card = Card::new("{{c99999999999::Paris}} is in {{c2::France}}");
        assert_eq!(
            card.html_front().into_string(),
            "<p><span class='cloze'>[...]</span> is in <span class='cloze'>[...]</span></p>\n"
        );
        assert_eq!(
            card.html_back().into_string(),
            "<p><span class='cloze-reveal'>Paris</span> is in <span class='cloze-reveal'>France</span></p>\n"
        );
    }

    #[test]
    fn test_ten_deletions() {
        let text: Vec<String> = (1..=11).map(|i| format!("{{{{c{i}::a{i}}}}}")).collect();
        let card = Card::new(text.join(" "));
        let html = card.html_back().into_string();
        assert!(html.contains("<span class='cloze-reveal'>a1</span> <span class='cloze-reveal'>a2</span>"));
        assert!(html.contains("<span class='cloze-reveal'>a11</span>"));
        assert!(!html.contains("DELETION"));
    }

    #[test]
    fn test_no_clozes() {
        let card = Card::new("No cloze here.");
        assert_eq!(card.html_front().into_string(), "<p>No cloze here.</p>\n");
        assert_eq!(card.html_back().into_string(), "<p>No cloze here.</p>\n");
    }

    #[test]
    fn test_line_breaks_survive() {
        let card = Card::new("Capital<br>{{c1::Paris}}");
        assert_eq!(
            card.html_back().into_string(),
            "<p>Capital<br><span class='cloze-reveal'>Paris</span></p>\n"
        );
    }
}
