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

//! Search posts and accounts through the Twitter REST API v1.1.
//!
//! Every search builds one request, signs it with OAuth 1.0a, sends it, normalizes
//! the JSON keys of the response and turns any status other than `200 OK` into an
//! error of kind [`ErrorKind::Domain`](twsearch_core::ErrorKind::Domain) carrying
//! the body.
//!
//! ## Example
//!
//! ```no_run
//! use twsearch::{Client, SearchOptions};
//! use twsearch_core::{Context, OsEnv, Result};
//! use twsearch_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let posts = Client::new(ctx)
//!         .dispatch(&SearchOptions::posts("rustlang"))
//!         .await?;
//!     println!("{posts:?}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod client;
pub use client::Client;
pub use client::SEARCH_TWEETS_PATH;
pub use client::SEARCH_USERS_PATH;

pub mod config;
pub use config::Config;

mod options;
pub use options::SearchOptions;
pub use options::SearchType;
pub use options::UNKNOWN_OPTION;

mod rest;
pub use rest::classify;
pub use rest::parse_body;
pub use rest::RawResponse;
pub use rest::Rest;
pub use rest::RestRequest;
