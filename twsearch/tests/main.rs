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

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use twsearch::{Client, SearchOptions};
use twsearch_core::value::normalize;
use twsearch_core::{Context, Error, ErrorKind, HttpSend, Result, StaticEnv};
use twsearch_twitter_oauth1::constants::*;

#[derive(Debug, Clone)]
struct SeenRequest {
    method: http::Method,
    uri: http::Uri,
    headers: http::HeaderMap,
}

/// HttpSend that answers every request with a canned response and records what it saw.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: Bytes,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: Arc::default(),
        }
    }

    fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("lock must not be poisoned").clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.seen
            .lock()
            .expect("lock must not be poisoned")
            .push(SeenRequest {
                method: req.method().clone(),
                uri: req.uri().clone(),
                headers: req.headers().clone(),
            });

        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.clone())?)
    }
}

/// HttpSend that always fails like an unreachable server.
#[derive(Debug, Clone, Copy)]
struct UnreachableHttpSend;

#[async_trait]
impl HttpSend for UnreachableHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport("failed to connect"))
    }
}

fn credential_env() -> StaticEnv {
    StaticEnv {
        envs: HashMap::from([
            (TWITTER_SEARCH_CONSUMER_KEY.to_string(), "ck".to_string()),
            (TWITTER_SEARCH_CONSUMER_SECRET.to_string(), "cs".to_string()),
            (TWITTER_SEARCH_TOKEN.to_string(), "t".to_string()),
            (TWITTER_SEARCH_TOKEN_SECRET.to_string(), "ts".to_string()),
        ]),
    }
}

fn client(http: &MockHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    Client::new(
        Context::new()
            .with_http_send(http.clone())
            .with_env(credential_env()),
    )
}

#[tokio::test]
async fn test_find_posts() -> Result<()> {
    let http = MockHttpSend::json(
        StatusCode::OK,
        json!({"statuses": [{"text": "Tweet 1"}, {"text": "Tweet 2"}]}),
    );

    let posts = client(&http).find_posts("rustlang", BTreeMap::new()).await?;
    assert_eq!(posts, vec!["Tweet 1", "Tweet 2"]);

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, http::Method::GET);
    assert_eq!(
        requests[0].uri.to_string(),
        "https://api.twitter.com/1.1/search/tweets.json?q=rustlang"
    );
    let auth = requests[0]
        .headers
        .get(AUTHORIZATION)
        .expect("request must be signed")
        .to_str()
        .expect("header must be ascii");
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains(r#"oauth_consumer_key="ck""#));
    assert!(auth.contains(r#"oauth_token="t""#));
    Ok(())
}

#[tokio::test]
async fn test_find_posts_sends_extra_params() -> Result<()> {
    let http = MockHttpSend::json(StatusCode::OK, json!({"statuses": []}));

    let params = BTreeMap::from([
        ("count".to_string(), "2".to_string()),
        ("q".to_string(), "overridden".to_string()),
    ]);
    client(&http).find_posts("rust lang", params).await?;

    assert_eq!(
        http.requests()[0].uri.query(),
        Some("count=2&q=rust+lang")
    );
    Ok(())
}

#[tokio::test]
async fn test_find_posts_without_statuses() -> Result<()> {
    for body in [json!({}), json!({"statuses": null}), json!(null)] {
        let http = MockHttpSend::json(StatusCode::OK, body);

        let posts = client(&http).find_posts("rustlang", BTreeMap::new()).await?;
        assert_eq!(posts, Vec::<String>::new());
    }
    Ok(())
}

#[tokio::test]
async fn test_find_posts_with_empty_body() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, "");

    let posts = client(&http).find_posts("rustlang", BTreeMap::new()).await?;
    assert_eq!(posts, Vec::<String>::new());
    Ok(())
}

#[tokio::test]
async fn test_find_accounts() -> Result<()> {
    let http = MockHttpSend::json(
        StatusCode::OK,
        json!([{"screen_name": "user_1"}, {"screen_name": "user_2"}]),
    );

    let accounts = client(&http)
        .find_accounts("rustlang", BTreeMap::new())
        .await?;
    assert_eq!(accounts, vec!["user_1", "user_2"]);

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].uri.to_string(),
        "https://api.twitter.com/1.1/users/search.json?q=rustlang"
    );
    Ok(())
}

#[tokio::test]
async fn test_find_accounts_invalid_item() {
    let http = MockHttpSend::json(StatusCode::OK, json!([{"name": "no handle"}]));

    let err = client(&http)
        .find_accounts("rustlang", BTreeMap::new())
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
}

#[tokio::test]
async fn test_non_ok_status_is_domain_error() {
    let body = json!({"errors": [{"code": 32, "message": "Could not authenticate you."}]});
    let http = MockHttpSend::json(StatusCode::UNAUTHORIZED, body.clone());

    let err = client(&http)
        .find_posts("rustlang", BTreeMap::new())
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.payload(), Some(&normalize(body)));
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_text() {
    let http = MockHttpSend::new(StatusCode::BAD_GATEWAY, "Bad Gateway");

    let err = client(&http)
        .find_accounts("rustlang", BTreeMap::new())
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.payload(), Some(&normalize(json!("Bad Gateway"))));
}

#[tokio::test]
async fn test_transport_error_is_not_caught() {
    let client = Client::new(
        Context::new()
            .with_http_send(UnreachableHttpSend)
            .with_env(credential_env()),
    );

    let err = client
        .dispatch(&SearchOptions::posts("rustlang"))
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_dispatch_post() -> Result<()> {
    let http = MockHttpSend::json(StatusCode::OK, json!({"statuses": [{"text": "Tweet 1"}]}));

    let results = client(&http)
        .dispatch(&SearchOptions::posts("rustlang"))
        .await?;
    assert_eq!(results, vec!["Tweet 1"]);

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri.path(), "/1.1/search/tweets.json");
    Ok(())
}

#[tokio::test]
async fn test_dispatch_account() -> Result<()> {
    let http = MockHttpSend::json(StatusCode::OK, json!([{"screen_name": "user_1"}]));

    let results = client(&http)
        .dispatch(&SearchOptions::accounts("rustlang"))
        .await?;
    assert_eq!(results, vec!["user_1"]);

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri.path(), "/1.1/users/search.json");
    Ok(())
}

#[tokio::test]
async fn test_dispatch_unknown_option_sends_nothing() {
    let http = MockHttpSend::json(StatusCode::OK, json!({}));

    let err = client(&http)
        .dispatch(&SearchOptions {
            search_type: None,
            q: "rustlang".to_string(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(err.to_string(), "Unknown option");
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_with_endpoint() -> Result<()> {
    let http = MockHttpSend::json(StatusCode::OK, json!([]));

    client(&http)
        .with_endpoint("http://127.0.0.1:8080/")
        .find_accounts("rustlang", BTreeMap::new())
        .await?;

    assert_eq!(
        http.requests()[0].uri.to_string(),
        "http://127.0.0.1:8080/1.1/users/search.json?q=rustlang"
    );
    Ok(())
}
