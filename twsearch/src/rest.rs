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

use bytes::Bytes;
use http::{Method, StatusCode};
use log::debug;
use twsearch_core::value::{normalize, Value};
use twsearch_core::{Context, Error, Result, Signer};
use twsearch_twitter_oauth1::Credential;

use crate::config::DEFAULT_ENDPOINT;

/// A single call against the REST API.
///
/// `params` are both signed and sent as the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the endpoint, starting with `/`.
    pub path: String,
    /// Query parameters.
    pub params: BTreeMap<String, String>,
}

impl RestRequest {
    /// Create a `GET` request.
    pub fn get(path: impl Into<String>, params: BTreeMap<String, String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            params,
        }
    }

    /// Build the request parts against `endpoint`.
    pub fn build(&self, endpoint: &str) -> Result<http::request::Parts> {
        let mut uri = format!("{}{}", endpoint.trim_end_matches('/'), self.path);
        if !self.params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.params)
                .finish();
            uri.push('?');
            uri.push_str(&query);
        }

        let (parts, _) = http::Request::builder()
            .method(self.method.clone())
            .uri(uri)
            .body(())?
            .into_parts();
        Ok(parts)
    }
}

/// Status and parsed body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Body parsed as JSON.
    pub body: serde_json::Value,
}

/// Rest signs, sends and checks API calls.
#[derive(Debug, Clone)]
pub struct Rest {
    ctx: Context,
    signer: Signer<Credential>,
    endpoint: String,
}

impl Rest {
    /// Create a new Rest against the default endpoint.
    pub fn new(ctx: Context, signer: Signer<Credential>) -> Self {
        Self {
            ctx,
            signer,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Use another base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Run the request and return its normalized body.
    ///
    /// Any status other than `200 OK` fails with a domain error carrying the body.
    pub async fn request(&self, req: &RestRequest) -> Result<Value> {
        let mut parts = req.build(&self.endpoint)?;
        self.signer.sign(&mut parts).await?;

        let resp = self.execute(parts).await?;
        let body = normalize(resp.body);
        match classify(resp.status, &body) {
            Some(err) => Err(err),
            None => Ok(body),
        }
    }

    /// Send the signed request once and parse the body.
    pub async fn execute(&self, parts: http::request::Parts) -> Result<RawResponse> {
        debug!("sending request: {} {}", parts.method, parts.uri);
        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, Bytes::new()))
            .await?;

        let status = resp.status();
        debug!("received response: {status}");

        Ok(RawResponse {
            status,
            body: parse_body(resp.body()),
        })
    }
}

/// Parse a response body.
///
/// An empty body is `null`, a body that is not JSON is kept as a string of its text.
pub fn parse_body(body: &[u8]) -> serde_json::Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::Value::Null;
    }

    serde_json::from_slice(body).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

/// Map a status to an error, `None` only for `200 OK`.
pub fn classify(status: StatusCode, body: &Value) -> Option<Error> {
    if status == StatusCode::OK {
        None
    } else {
        Some(Error::domain(body.clone()))
    }
}
