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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use twsearch_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the OAuth credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `TWITTER_SEARCH_CONSUMER_KEY`: The consumer key
/// - `TWITTER_SEARCH_CONSUMER_SECRET`: The consumer secret
/// - `TWITTER_SEARCH_TOKEN`: The access token
/// - `TWITTER_SEARCH_TOKEN_SECRET`: The access token secret
///
/// Missing variables are read as empty strings. The provider never fails and never
/// returns `None`: an incomplete credential still signs, and the API rejects it.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let var = |key: &str| ctx.env_var(key).unwrap_or_default();

        Ok(Some(Credential {
            consumer_key: var(TWITTER_SEARCH_CONSUMER_KEY),
            consumer_secret: var(TWITTER_SEARCH_CONSUMER_SECRET),
            token: var(TWITTER_SEARCH_TOKEN),
            token_secret: var(TWITTER_SEARCH_TOKEN_SECRET),
        }))
    }
}
