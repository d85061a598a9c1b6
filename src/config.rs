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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::pipeline::preprocess::CleaningRules;

const DEFAULT_CONFIG_FILE: &str = "transcards.toml";

/// Root configuration. Every field has a default, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub chunking: ChunkingConfig,
    pub cleaning: CleaningRules,
}

/// Settings for the text-generation service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Never read from the file: only `OPENAI_API_KEY` sets it.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub api_url: String,
    /// The model used when the caller does not pick one.
    pub model: String,
    /// The models offered by the web front end.
    pub models: Vec<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_size: usize,
    pub min_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            models: vec!["gpt-4o-mini".to_string(), "gpt-4o".to_string()],
            timeout_secs: 60,
            temperature: 0.7,
            max_tokens: 2000,
            max_retries: 2,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_size: 4000,
            min_size: 100,
        }
    }
}

impl GeneratorConfig {
    /// Whether the web front end may use the given model.
    pub fn allows_model(&self, model: &str) -> bool {
        model == self.model || self.models.iter().any(|m| m == model)
    }
}

impl Config {
    pub fn parse(contents: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from the given path, or from
    /// `transcards.toml` in the current directory if it exists. Falls back
    /// to the defaults. Environment overrides are applied last.
    pub fn load(path: Option<PathBuf>) -> Fallible<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!(
                        "configuration file {} does not exist.",
                        path.display()
                    ));
                }
                Self::from_file(&path)?
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Fallible<Self> {
        log::debug!("Loading configuration from {}", path.display());
        let contents = read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Supported environment variables:
    /// - `OPENAI_API_KEY` → `generator.api_key`
    /// - `TRANSCARDS_MODEL` → `generator.model`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY")
            && !key.is_empty()
        {
            self.generator.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("TRANSCARDS_MODEL")
            && !model.is_empty()
        {
            self.generator.model = model;
        }
        self
    }

    pub fn validate(&self) -> Fallible<()> {
        if self.chunking.max_size == 0 {
            return fail("chunking.max_size must be greater than zero.");
        }
        if self.generator.model.trim().is_empty() {
            return fail("generator.model must not be empty.");
        }
        Ok(())
    }
}
