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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the twitter search client.
pub const TWITTER_SEARCH_CONSUMER_KEY: &str = "TWITTER_SEARCH_CONSUMER_KEY";
pub const TWITTER_SEARCH_CONSUMER_SECRET: &str = "TWITTER_SEARCH_CONSUMER_SECRET";
pub const TWITTER_SEARCH_TOKEN: &str = "TWITTER_SEARCH_TOKEN";
pub const TWITTER_SEARCH_TOKEN_SECRET: &str = "TWITTER_SEARCH_TOKEN_SECRET";

// Protocol parameters generated by the signer.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERSION: &str = "oauth_version";

pub const HMAC_SHA1: &str = "HMAC-SHA1";
pub const VERSION_1_0: &str = "1.0";

/// Parameter names the signer owns; callers may not supply them.
pub const RESERVED_PARAMS: [&str; 7] = [
    OAUTH_CONSUMER_KEY,
    OAUTH_NONCE,
    OAUTH_SIGNATURE,
    OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP,
    OAUTH_TOKEN,
    OAUTH_VERSION,
];

/// AsciiSet for [OAuth 1.0a percent encoding](https://oauth.net/core/1.0a/#encoding_parameters)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
