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

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::request::Parts;
use twsearch_core::hash::base64_hmac_sha1;
use twsearch_core::{
    Context, OsEnv, ProvideCredential, Result, SignRequest, Signer, SigningCredential,
    SigningRequest,
};

// A credential holding a key id and a shared secret.
#[derive(Clone, Debug)]
struct MyCredential {
    key_id: String,
    secret: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.key_id.is_empty() && !self.secret.is_empty()
    }
}

#[derive(Debug)]
struct MyCredentialLoader;

#[async_trait]
impl ProvideCredential for MyCredentialLoader {
    type Credential = MyCredential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(MyCredential {
            key_id: ctx.env_var("MY_KEY_ID").unwrap_or_else(|| "demo-key".to_string()),
            secret: ctx.env_var("MY_SECRET").unwrap_or_else(|| "demo-secret".to_string()),
        }))
    }
}

// Signs "METHOD base_url" with the shared secret.
#[derive(Debug)]
struct MyRequestSigner;

#[async_trait]
impl SignRequest for MyRequestSigner {
    type Credential = MyCredential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };

        let signing = SigningRequest::build(req)?;
        let string_to_sign = format!("{} {}", signing.method, signing.base_url());
        let signature = base64_hmac_sha1(cred.secret.as_bytes(), string_to_sign.as_bytes());

        req.headers.insert(
            AUTHORIZATION,
            format!("Demo {}:{}", cred.key_id, signature).parse()?,
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_env(OsEnv);
    let signer = Signer::new(ctx, MyCredentialLoader, MyRequestSigner);

    let mut parts = http::Request::get("https://api.example.com/v1/search?q=rust")
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut parts).await?;

    println!("signed headers: {:?}", parts.headers);
    Ok(())
}
