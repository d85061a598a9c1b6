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

mod api;
mod get;
mod post;
pub mod server;
mod state;
mod template;
mod view;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use serde_json::Value;
    use serde_json::json;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::start_server;
    use crate::config::Config;
    use crate::error::Fallible;
    use crate::llm::GenerationError;
    use crate::pipeline::generate::tests::StubGenerator;

    async fn spawn_server(generator: StubGenerator) -> String {
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(Config::default(), generator, port, false).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{bind}")
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let base = spawn_server(StubGenerator::new(vec![])).await;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        assert!(html.contains("id=\"transcript\""));
        assert!(html.contains("<option value=\"gpt-4o-mini\" selected>gpt-4o-mini</option>"));

        // Submit an empty transcript.
        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("transcript", "  "), ("mode", "cloze")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Please paste a transcript."));

        // Submit an unknown model.
        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("transcript", "Paris."), ("model", "gpt-9")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Unknown model: gpt-9"));

        // Submit a transcript.
        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[
                ("transcript", "[00:01] Alice: Paris is the capital of France."),
                ("preferences", ""),
                ("model", "gpt-4o"),
                ("mode", "cloze"),
            ])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("<span class='cloze'>[...]</span>"));
        assert!(html.contains("<span class='cloze-reveal'>Paris is the capital of France.</span>"));
        assert!(html.contains("{{c1::Paris is the capital of France.}}</textarea>"));

        // Submit a transcript in quiz mode.
        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("transcript", "Paris."), ("mode", "quiz")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("<details>"));
        assert!(html.contains("<li>other</li>"));

        // Hit the JSON endpoint.
        let response = reqwest::Client::new()
            .post(format!("{base}/api/cards"))
            .json(&json!({ "transcript": "Paris." }))
            .send()
            .await?;
        assert!(response.status().is_success());
        let body: Value = response.json().await?;
        assert_eq!(body, json!({ "cards": ["{{c1::Paris.}}"] }));

        // Hit the JSON endpoint with an unknown model.
        let response = reqwest::Client::new()
            .post(format!("{base}/api/cards"))
            .json(&json!({ "transcript": "Paris.", "model": "gpt-9" }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], "Unknown model: gpt-9");

        Ok(())
    }

    #[tokio::test]
    async fn test_e2e_generation_failure() -> Fallible<()> {
        let base = spawn_server(StubGenerator::new(vec![(
            "Paris.",
            Err(GenerationError::EmptyResponse),
        )]))
        .await;
        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("transcript", "Paris.")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Failed to generate any cards."));
        // The transcript survives the failed attempt.
        assert!(html.contains(">Paris.</textarea>"));

        let response = reqwest::Client::new()
            .post(format!("{base}/api/cards"))
            .json(&json!({ "transcript": "Paris.", "quiz": true }))
            .send()
            .await?;
        let body: Value = response.json().await?;
        assert_eq!(body, json!({ "questions": [] }));
        Ok(())
    }
}
