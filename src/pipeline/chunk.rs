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

const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

/// Split text into pieces of at most `max_size` characters, breaking after
/// the last sentence terminal in the window, else after the last space,
/// else at the hard limit. Pieces shorter than `min_size` are appended to
/// the previous chunk, if there is one.
///
/// Sizes are counted in characters, not bytes.
pub fn chunk_text(text: &str, max_size: usize, min_size: usize) -> Vec<String> {
    let max_size = max_size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks: Vec<String> = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = usize::min(start + max_size, len);
        if end < len {
            end = break_point(&chars[start..end]).map_or(end, |offset| start + offset);
        }
        let piece: String = chars[start..end].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            match chunks.last_mut() {
                Some(previous) if piece.chars().count() < min_size => {
                    previous.push(' ');
                    previous.push_str(piece);
                }
                _ => {
                    chunks.push(piece.to_string());
                }
            }
        }
        start = end;
    }
    chunks
}

/// The offset just past the preferred break in the window, if any.
fn break_point(window: &[char]) -> Option<usize> {
    if let Some(p) = window.iter().rposition(|c| SENTENCE_TERMINALS.contains(c)) {
        return Some(p + 1);
    }
    window.iter().rposition(|c| *c == ' ').map(|p| p + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Concatenate chunks without separators, and strip the spaces from
    /// both sides, so coverage can be compared modulo merge whitespace.
    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(chunk_text("", 100, 10).is_empty());
    }

    #[test]
    fn test_short_input_is_single_chunk() {
        let chunks = chunk_text("Hi.", 100, 50);
        assert_eq!(chunks, vec!["Hi.".to_string()]);
    }

    #[test]
    fn test_fits_in_one_chunk() {
        let text = "The capital of France is Paris. It is known for the Eiffel Tower.";
        assert_eq!(chunk_text(text, 1000, 100), vec![text.to_string()]);
    }

    #[test]
    fn test_breaks_at_sentence() {
        let text = "One two three. Four five six. Seven eight nine.";
        let chunks = chunk_text(text, 20, 0);
        assert_eq!(
            chunks,
            vec![
                "One two three.".to_string(),
                "Four five six.".to_string(),
                "Seven eight nine.".to_string(),
            ]
        );
    }

    #[test]
    fn test_breaks_at_space_without_sentence() {
        let text = "alpha beta gamma delta epsilon";
        let chunks = chunk_text(text, 12, 0);
        assert_eq!(
            chunks,
            vec![
                "alpha beta".to_string(),
                "gamma delta".to_string(),
                "epsilon".to_string(),
            ]
        );
    }

    #[test]
    fn test_hard_cutoff() {
        let chunks = chunk_text("abcdefghij", 4, 0);
        assert_eq!(
            chunks,
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn test_merges_short_trailing_piece() {
        let text = "This is a long first sentence. Ok.";
        let chunks = chunk_text(text, 31, 10);
        assert_eq!(
            chunks,
            vec!["This is a long first sentence. Ok.".to_string()]
        );
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "Ça va très bien. Über alles gut. Naïve café.";
        let chunks = chunk_text(text, 17, 0);
        assert_eq!(
            chunks,
            vec![
                "Ça va très bien.".to_string(),
                "Über alles gut.".to_string(),
                "Naïve café.".to_string(),
            ]
        );
    }

    #[test]
    fn test_zero_max_size_makes_progress() {
        let chunks = chunk_text("abc", 0, 0);
        assert_eq!(chunks.concat(), "abc");
    }

    #[test]
    fn test_properties() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor \
                    incididunt ut labore et dolore magna aliqua! Ut enim ad minim veniam, quis \
                    nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat? \
                    Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu \
                    fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in \
                    culpa qui officia deserunt mollit anim id est laborum. Averyveryveryverylongword\
                    withoutanybreakpointsatall that goes on.";
        for max_size in [10, 25, 60, 100, 1000] {
            for min_size in [0, 5, 20] {
                let chunks = chunk_text(text, max_size, min_size);
                // Coverage: nothing dropped or duplicated.
                assert_eq!(squash(&chunks.concat()), squash(text));
                // Minimum size: only the first chunk may be short.
                for chunk in chunks.iter().skip(1) {
                    assert!(chunk.chars().count() >= min_size);
                }
                // Without merges, every chunk respects the maximum.
                if min_size == 0 {
                    for chunk in &chunks {
                        assert!(chunk.chars().count() <= max_size);
                    }
                }
            }
        }
    }
}
