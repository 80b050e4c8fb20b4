// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! This module contains the [`Greeting`] type, the constant response value
//! returned by the greeter function on every invocation. A fresh value is
//! built per invocation and discarded once the hosting runtime has
//! serialized it.

use serde::{Deserialize, Serialize};

/// The HTTP-style status code carried in every greeting.
pub const GREETING_STATUS_CODE: i64 = 200;

/// The greeting text carried in every greeting.
pub const GREETING_MESSAGE: &str = "Hello from Lambda";

/// The response entity of the greeter function.
///
/// Field order matters: the serialized JSON is
/// `{"statusCode":200,"message":"Hello from Lambda"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    /// The status code of the invocation. Always 200.
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    /// The greeting message. Always "Hello from Lambda".
    pub message: String,
}

impl Greeting {
    /// Creates the constant greeting response.
    pub fn new() -> Self {
        Greeting {
            status_code: GREETING_STATUS_CODE,
            message: GREETING_MESSAGE.to_string(),
        }
    }
}

impl Default for Greeting {
    fn default() -> Self {
        Greeting::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn greeting_is_constant() -> Result<()> {
        let greeting = Greeting::new();
        assert_eq!(200, greeting.status_code);
        assert_eq!("Hello from Lambda", greeting.message);
        assert_eq!(Greeting::default(), greeting);
        Ok(())
    }

    #[test]
    fn greeting_serialization() -> Result<()> {
        let json = serde_json::to_string(&Greeting::new())?;
        assert_eq!(r#"{"statusCode":200,"message":"Hello from Lambda"}"#, json);
        Ok(())
    }

    #[test]
    fn greeting_roundtrip() -> Result<()> {
        let greeting: Greeting =
            serde_json::from_str(r#"{"statusCode":200,"message":"Hello from Lambda"}"#)?;
        assert_eq!(Greeting::new(), greeting);
        Ok(())
    }
}
