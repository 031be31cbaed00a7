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

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use twsearch_core::{Error, Result};

/// Message of the error returned when no search type was selected.
pub const UNKNOWN_OPTION: &str = "Unknown option";

/// Which remote collection a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Search posts and return their text.
    Post,
    /// Search accounts and return their handles.
    Account,
}

impl FromStr for SearchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" | "tweet" => Ok(SearchType::Post),
            "account" | "user" => Ok(SearchType::Account),
            _ => Err(Error::config_invalid(UNKNOWN_OPTION)),
        }
    }
}

impl Display for SearchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchType::Post => write!(f, "post"),
            SearchType::Account => write!(f, "account"),
        }
    }
}

/// Options produced by the command line and consumed by [`crate::Client::dispatch`].
///
/// `search_type` is `None` when no search flag was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Selected search type.
    pub search_type: Option<SearchType>,
    /// Query text.
    pub q: String,
}

impl SearchOptions {
    /// Options for a post search.
    pub fn posts(q: impl Into<String>) -> Self {
        Self {
            search_type: Some(SearchType::Post),
            q: q.into(),
        }
    }

    /// Options for an account search.
    pub fn accounts(q: impl Into<String>) -> Self {
        Self {
            search_type: Some(SearchType::Account),
            q: q.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use twsearch_core::ErrorKind;

    #[test_case("post", SearchType::Post)]
    #[test_case("tweet", SearchType::Post)]
    #[test_case("account", SearchType::Account)]
    #[test_case("user", SearchType::Account)]
    fn test_search_type_from_str(input: &str, expected: SearchType) {
        assert_eq!(input.parse::<SearchType>().expect("must parse"), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("_blank"; "blank")]
    #[test_case("Tweet"; "case sensitive")]
    fn test_search_type_from_str_unknown(input: &str) {
        let err = input.parse::<SearchType>().expect_err("must fail");

        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.to_string(), "Unknown option");
    }

    #[test]
    fn test_search_options() {
        assert_eq!(SearchOptions::posts("rust").search_type, Some(SearchType::Post));
        assert_eq!(SearchOptions::accounts("rust").q, "rust");
        assert_eq!(SearchOptions::default().search_type, None);
    }
}
