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

use std::sync::Arc;

use crate::config::Config;

pub struct ServerState<G> {
    pub config: Arc<Config>,
    pub generator: Arc<G>,
}

impl<G> Clone for ServerState<G> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            generator: self.generator.clone(),
        }
    }
}
