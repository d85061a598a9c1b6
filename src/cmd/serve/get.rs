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

use axum::extract::State;
use axum::response::Html;

use crate::cmd::serve::post::FormData;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::view::index_page;
use crate::llm::Generator;

pub async fn get_handler<G: Generator>(State(state): State<ServerState<G>>) -> Html<String> {
    let html = index_page(&state.config.generator, &FormData::default(), None);
    Html(html.into_string())
}
