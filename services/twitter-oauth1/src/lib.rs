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

//! Twitter OAuth 1.0a signing implementation.
//!
//! This crate signs requests to the Twitter REST API v1.1 with the
//! [OAuth 1.0a](https://oauth.net/core/1.0a/) `HMAC-SHA1` method, using a user
//! context access token.
//!
//! ## Quick Start
//!
//! ```no_run
//! use twsearch_core::{Context, OsEnv, Result, Signer};
//! use twsearch_http_send_reqwest::ReqwestHttpSend;
//! use twsearch_twitter_oauth1::{EnvCredentialProvider, RequestSigner};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let signer = Signer::new(
//!         ctx,
//!         EnvCredentialProvider::new(),
//!         RequestSigner::new().with_ignore_extra_keys(true),
//!     );
//!
//!     let mut parts = http::Request::get("https://api.twitter.com/1.1/search/tweets.json?q=rustlang")
//!         .body(())?
//!         .into_parts()
//!         .0;
//!
//!     signer.sign(&mut parts).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export TWITTER_SEARCH_CONSUMER_KEY=your-consumer-key
//! export TWITTER_SEARCH_CONSUMER_SECRET=your-consumer-secret
//! export TWITTER_SEARCH_TOKEN=your-access-token
//! export TWITTER_SEARCH_TOKEN_SECRET=your-access-token-secret
//! ```
//!
//! The variables are read again for every signed request.
//!
//! ### Static Credentials
//!
//! ```no_run
//! use twsearch_twitter_oauth1::StaticCredentialProvider;
//!
//! let provider = StaticCredentialProvider::new(
//!     "consumer-key",
//!     "consumer-secret",
//!     "token",
//!     "token-secret",
//! );
//! ```

pub mod constants;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;
