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

use std::path::PathBuf;

use crate::cmd::generate::read_transcript;
use crate::error::Fallible;
use crate::pipeline::generate::GenerateOptions;
use crate::pipeline::generate::prepare_chunks;

pub fn print_chunks(file: Option<PathBuf>, options: &GenerateOptions) -> Fallible<()> {
    let transcript = read_transcript(file)?;
    let chunks = prepare_chunks(&transcript, options);
    if chunks.is_empty() {
        println!("Nothing to generate from.");
    } else {
        println!("{}", describe_chunks(&chunks));
    }
    Ok(())
}

fn describe_chunks(chunks: &[String]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            format!(
                "--- chunk {}/{} ({} chars) ---\n{chunk}",
                i + 1,
                chunks.len(),
                chunk.chars().count()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_chunks() {
        let chunks = vec!["Über.".to_string(), "Two.".to_string()];
        assert_eq!(
            describe_chunks(&chunks),
            "--- chunk 1/2 (5 chars) ---\nÜber.\n\n--- chunk 2/2 (4 chars) ---\nTwo."
        );
    }

    #[test]
    fn test_missing_file() {
        let options = GenerateOptions::from_config(&crate::config::Config::default());
        assert!(print_chunks(Some(PathBuf::from("./derpherp.txt")), &options).is_err());
    }
}
