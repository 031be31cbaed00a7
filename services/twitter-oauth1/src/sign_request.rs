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

use crate::constants::*;
use crate::credential::Credential;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use rand::RngCore;
use twsearch_core::hash::base64_hmac_sha1;
use twsearch_core::time::{format_timestamp, now, DateTime};
use twsearch_core::{Context, Error, Result, SignRequest, SigningRequest};

/// RequestSigner for OAuth 1.0a `HMAC-SHA1` signatures.
///
/// The signature covers the method, the base URL and every query parameter of the
/// request. Only the `oauth_*` protocol parameters end up in the `Authorization` header.
#[derive(Debug, Default)]
pub struct RequestSigner {
    ignore_extra_keys: bool,
    nonce: Option<String>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer that only accepts requests without query parameters.
    ///
    /// Use [`RequestSigner::with_ignore_extra_keys`] to sign requests carrying their
    /// own parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept query parameters that are not OAuth protocol parameters.
    ///
    /// They take part in the signature but are not echoed in the header.
    pub fn with_ignore_extra_keys(mut self, ignore_extra_keys: bool) -> Self {
        self.ignore_extra_keys = ignore_extra_keys;
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// We should always use a fresh random nonce to sign requests.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_nonce(&self) -> String {
        self.nonce.clone().unwrap_or_else(generate_nonce)
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// `base_url` must not carry a query, `params` are the decoded query parameters.
    pub fn build_authorization(
        &self,
        method: &Method,
        base_url: &str,
        params: &[(String, String)],
        cred: &Credential,
    ) -> Result<String> {
        self.check_params(params)?;

        let mut oauth_params = vec![
            (OAUTH_CONSUMER_KEY, cred.consumer_key.clone()),
            (OAUTH_NONCE, self.get_nonce()),
            (OAUTH_SIGNATURE_METHOD, HMAC_SHA1.to_string()),
            (OAUTH_TIMESTAMP, format_timestamp(self.get_time())),
            (OAUTH_TOKEN, cred.token.clone()),
            (OAUTH_VERSION, VERSION_1_0.to_string()),
        ];

        let string_to_sign = string_to_sign(
            method,
            base_url,
            params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .chain(oauth_params.iter().map(|(k, v)| (*k, v.as_str()))),
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_hmac_sha1(signing_key(cred).as_bytes(), string_to_sign.as_bytes());
        oauth_params.push((OAUTH_SIGNATURE, signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn check_params(&self, params: &[(String, String)]) -> Result<()> {
        for (k, _) in params {
            if RESERVED_PARAMS.contains(&k.as_str()) {
                return Err(Error::request_invalid(format!(
                    "query parameter `{k}` is reserved for the OAuth signature"
                )));
            }
            if !self.ignore_extra_keys {
                return Err(Error::request_invalid(format!(
                    "unexpected query parameter `{k}`, enable ignore_extra_keys to sign it"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };

        let signing = SigningRequest::build(req)?;
        let authorization = self.build_authorization(
            &signing.method,
            &base_url(&signing),
            &signing.query,
            cred,
        )?;

        let mut header_value: HeaderValue = authorization.parse()?;
        header_value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, header_value);

        Ok(())
    }
}

/// Build the base string URI: lowercase scheme and host, default port dropped, no query.
fn base_url(req: &SigningRequest) -> String {
    let scheme = req.scheme.as_str().to_lowercase();
    let host = req.authority.host().to_lowercase();

    match req.authority.port_u16() {
        Some(443) if scheme == "https" => format!("{scheme}://{host}{}", req.path),
        Some(80) if scheme == "http" => format!("{scheme}://{host}{}", req.path),
        Some(port) => format!("{scheme}://{host}:{port}{}", req.path),
        None => format!("{scheme}://{host}{}", req.path),
    }
}

/// `METHOD&enc(base_url)&enc(k1=v1&k2=v2...)` with pairs encoded, then sorted.
fn string_to_sign<'a>(
    method: &Method,
    base_url: &str,
    params: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut pairs = params
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>();
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(base_url),
        percent_encode(&normalized)
    )
}

fn signing_key(cred: &Credential) -> String {
    format!(
        "{}&{}",
        percent_encode(&cred.consumer_secret),
        percent_encode(&cred.token_secret)
    )
}

fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &OAUTH_ENCODE_SET).to_string()
}

/// 32 hex chars from 16 random bytes.
fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
