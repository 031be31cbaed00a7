// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;
use twsearch_core::{Context, Error, Result};

/// Env value to override the API base URL.
pub const TWITTER_SEARCH_ENDPOINT: &str = "TWITTER_SEARCH_ENDPOINT";
/// Env value to set the request timeout in seconds.
pub const TWITTER_SEARCH_TIMEOUT: &str = "TWITTER_SEARCH_TIMEOUT";

/// Base URL of the Twitter REST API.
pub const DEFAULT_ENDPOINT: &str = "https://api.twitter.com";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Config for the search client.
///
/// Unset fields fall back to [`DEFAULT_ENDPOINT`] and [`DEFAULT_TIMEOUT`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL the search paths are appended to.
    pub endpoint: Option<String>,
    /// Timeout for the whole request.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(TWITTER_SEARCH_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(TWITTER_SEARCH_TIMEOUT) {
            let secs = v.trim().parse::<u64>().map_err(|e| {
                Error::config_invalid(format!("{TWITTER_SEARCH_TIMEOUT} must be seconds, got `{v}`"))
                    .with_source(e)
            })?;
            self.timeout.get_or_insert(Duration::from_secs(secs));
        }

        Ok(self)
    }

    /// Configured endpoint or the default one.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Configured timeout or the default one.
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}
