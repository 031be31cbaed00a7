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

use std::collections::BTreeMap;

use twsearch_core::value::Value;
use twsearch_core::{Context, Error, Result, Signer};
use twsearch_twitter_oauth1::{EnvCredentialProvider, RequestSigner};

use crate::options::{SearchOptions, SearchType, UNKNOWN_OPTION};
use crate::rest::{Rest, RestRequest};

/// Path of the post search API.
pub const SEARCH_TWEETS_PATH: &str = "/1.1/search/tweets.json";
/// Path of the account search API.
pub const SEARCH_USERS_PATH: &str = "/1.1/users/search.json";

/// Client runs post and account searches.
///
/// Every search sends exactly one signed request. Credentials are read from the
/// context environment each time.
#[derive(Debug, Clone)]
pub struct Client {
    rest: Rest,
}

impl Client {
    /// Create a new client on top of `ctx`.
    pub fn new(ctx: Context) -> Self {
        let signer = Signer::new(
            ctx.clone(),
            EnvCredentialProvider::new(),
            RequestSigner::new().with_ignore_extra_keys(true),
        );

        Self {
            rest: Rest::new(ctx, signer),
        }
    }

    /// Create a client from a prepared [`Rest`].
    pub fn from_rest(rest: Rest) -> Self {
        Self { rest }
    }

    /// Use another base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rest = self.rest.with_endpoint(endpoint);
        self
    }

    /// Find posts matching `q` and return their text.
    ///
    /// `params` are sent along; `q` replaces any `q` among them.
    pub async fn find_posts(&self, q: &str, params: BTreeMap<String, String>) -> Result<Vec<String>> {
        let body = self
            .rest
            .request(&search_request(SEARCH_TWEETS_PATH, q, params))
            .await?;

        match body.get("statuses") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(statuses) => extract(statuses, "text"),
        }
    }

    /// Find accounts matching `q` and return their handles.
    ///
    /// `params` are sent along; `q` replaces any `q` among them.
    pub async fn find_accounts(
        &self,
        q: &str,
        params: BTreeMap<String, String>,
    ) -> Result<Vec<String>> {
        let body = self
            .rest
            .request(&search_request(SEARCH_USERS_PATH, q, params))
            .await?;

        if body.is_null() {
            return Ok(Vec::new());
        }
        extract(&body, "screen_name")
    }

    /// Run the search selected by `options`.
    ///
    /// Fails with `Unknown option` before any request when no search type is set.
    pub async fn dispatch(&self, options: &SearchOptions) -> Result<Vec<String>> {
        match options.search_type {
            Some(SearchType::Post) => self.find_posts(&options.q, BTreeMap::new()).await,
            Some(SearchType::Account) => self.find_accounts(&options.q, BTreeMap::new()).await,
            None => Err(Error::config_invalid(UNKNOWN_OPTION)),
        }
    }
}

fn search_request(path: &str, q: &str, mut params: BTreeMap<String, String>) -> RestRequest {
    params.insert("q".to_string(), q.to_string());
    RestRequest::get(path, params)
}

fn extract(items: &Value, field: &str) -> Result<Vec<String>> {
    let items = items
        .as_array()
        .ok_or_else(|| Error::response_invalid(format!("expected a list of results, got {items}")))?;

    items
        .iter()
        .map(|item| {
            item.get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::response_invalid(format!("result has no string `{field}`: {item}"))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use twsearch_core::value::normalize;
    use twsearch_core::ErrorKind;

    #[test]
    fn test_search_request_q_wins() {
        let req = search_request(
            SEARCH_TWEETS_PATH,
            "rustlang",
            BTreeMap::from([
                ("q".to_string(), "ignored".to_string()),
                ("count".to_string(), "2".to_string()),
            ]),
        );

        assert_eq!(req.path, "/1.1/search/tweets.json");
        assert_eq!(req.params.get("q").map(String::as_str), Some("rustlang"));
        assert_eq!(req.params.get("count").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_extract() -> Result<()> {
        let items = normalize(json!([{"text": "Tweet 1", "id": 1}, {"text": "Tweet 2"}]));

        assert_eq!(extract(&items, "text")?, vec!["Tweet 1", "Tweet 2"]);
        assert_eq!(extract(&normalize(json!([])), "text")?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn test_extract_invalid() {
        let missing = extract(&normalize(json!([{"id": 1}])), "text").expect_err("must fail");
        assert_eq!(missing.kind(), ErrorKind::ResponseInvalid);

        let not_string = extract(&normalize(json!([{"text": 1}])), "text").expect_err("must fail");
        assert_eq!(not_string.kind(), ErrorKind::ResponseInvalid);

        let not_array = extract(&normalize(json!({"text": "x"})), "text").expect_err("must fail");
        assert_eq!(not_array.kind(), ErrorKind::ResponseInvalid);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_option() {
        let client = Client::new(Context::new());

        let err = client
            .dispatch(&SearchOptions::default())
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "Unknown option");
    }
}
