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

use clap::Args;
use clap::Parser;

use crate::cmd::chunks::print_chunks;
use crate::cmd::generate::OutputFormat;
use crate::cmd::generate::generate_command;
use crate::cmd::serve::server::start_server;
use crate::config::Config;
use crate::error::Fallible;
use crate::llm::openai::OpenAiGenerator;
use crate::pipeline::generate::GenerateOptions;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Generate cloze cards (or a quiz) from a transcript.
    Generate {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Generate multiple-choice questions instead of cloze cards.
        #[arg(long)]
        quiz: bool,
        /// Output format.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// The model to use. Defaults to the configured model.
        #[arg(long)]
        model: Option<String>,
        /// Free-text instructions passed to the model, e.g. "focus on dates".
        #[arg(long, default_value = "")]
        preferences: String,
    },
    /// Print the chunks a transcript would be split into, without calling
    /// the API.
    Chunks {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Start the web interface.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// Path to the transcript. Reads standard input if omitted.
    file: Option<PathBuf>,
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum chunk size, in characters.
    #[arg(long)]
    max_chunk_size: Option<usize>,
    /// Minimum chunk size, in characters.
    #[arg(long)]
    min_chunk_size: Option<usize>,
    /// Don't strip `Speaker Name:` labels.
    #[arg(long)]
    keep_speaker_labels: bool,
}

impl PipelineArgs {
    /// Load the configuration, and derive the pipeline options from it and
    /// from the command-line overrides.
    fn resolve(&self) -> Fallible<(Config, GenerateOptions)> {
        let mut config = Config::load(self.config.clone())?;
        if let Some(max_size) = self.max_chunk_size {
            config.chunking.max_size = max_size;
        }
        if let Some(min_size) = self.min_chunk_size {
            config.chunking.min_size = min_size;
        }
        if self.keep_speaker_labels {
            config.cleaning.speaker_labels = false;
        }
        config.validate()?;
        let options = GenerateOptions::from_config(&config);
        Ok((config, options))
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Generate {
            pipeline,
            quiz,
            format,
            model,
            preferences,
        } => {
            let (config, mut options) = pipeline.resolve()?;
            if let Some(model) = model {
                options.model = model;
            }
            options.preferences = preferences;
            let generator = OpenAiGenerator::new(config.generator)?;
            generate_command(&generator, pipeline.file, &options, quiz, format).await
        }
        Command::Chunks { pipeline } => {
            let (_, options) = pipeline.resolve()?;
            print_chunks(pipeline.file, &options)
        }
        Command::Serve {
            port,
            no_open,
            config,
        } => {
            let config = Config::load(config)?;
            let generator = OpenAiGenerator::new(config.generator.clone())?;
            start_server(config, generator, port, !no_open).await
        }
    }
}
