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

use pulldown_cmark::Parser;
use pulldown_cmark::html::push_html;

/// Render Markdown to HTML. Inline HTML in the source, like the `<br>` tags
/// models put in cards, is passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output: String = String::new();
    push_html(&mut html_output, parser);
    html_output
}

/// Like [`markdown_to_html`], without the enclosing paragraph for
/// single-paragraph input.
pub fn markdown_to_html_inline(markdown: &str) -> String {
    let text = markdown_to_html(markdown);
    if text.starts_with("<p>") && text.ends_with("</p>\n") {
        let len = text.len();
        text[3..len - 5].to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        assert_eq!(markdown_to_html("*foo*"), "<p><em>foo</em></p>\n");
    }

    #[test]
    fn test_markdown_to_html_inline() {
        let markdown = "This is **bold** text.";
        assert_eq!(
            markdown_to_html_inline(markdown),
            "This is <strong>bold</strong> text."
        );
    }

    #[test]
    fn test_markdown_to_html_inline_heading() {
        assert_eq!(markdown_to_html_inline("# Foo"), "<h1>Foo</h1>\n");
    }

    #[test]
    fn test_inline_html_passes_through() {
        assert_eq!(markdown_to_html_inline("a<br>b"), "a<br>b");
    }
}
