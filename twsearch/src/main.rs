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

use anyhow::Result;
use clap::Parser;
use log::debug;
use twsearch::{Client, Config, SearchOptions, SearchType};
use twsearch_core::{Context, OsEnv};
use twsearch_http_send_reqwest::ReqwestHttpSend;

/// Search Twitter for posts or accounts.
#[derive(Parser, Debug)]
#[command(name = "twsearch", version, about, long_about = None)]
struct Args {
    /// Post to search for.
    #[arg(long, value_name = "QUERY", conflicts_with = "user")]
    tweet: Option<String>,

    /// User to search for.
    #[arg(long, value_name = "QUERY")]
    user: Option<String>,

    /// Base URL of the API.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn search_options(&self) -> SearchOptions {
        match (&self.tweet, &self.user) {
            (Some(q), _) => SearchOptions {
                search_type: Some(SearchType::Post),
                q: q.clone(),
            },
            (None, Some(q)) => SearchOptions {
                search_type: Some(SearchType::Account),
                q: q.clone(),
            },
            (None, None) => SearchOptions::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("parsed args: {args:?}");

    let env_ctx = Context::new().with_env(OsEnv);
    let config = Config {
        endpoint: args.endpoint.clone(),
        timeout: args.timeout.map(std::time::Duration::from_secs),
    }
    .from_env(&env_ctx)?;

    let http = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()?;
    let ctx = env_ctx.with_http_send(ReqwestHttpSend::new(http));

    let results = Client::new(ctx)
        .with_endpoint(config.endpoint())
        .dispatch(&args.search_options())
        .await?;
    println!("{results:?}");

    Ok(())
}
