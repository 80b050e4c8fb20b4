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

//! Greeter error types.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::result;

/// Result type for operations that could result in a [`GreeterError`].
pub type Result<T> = result::Result<T, GreeterError>;

/// Greeter error.
#[derive(Debug)]
pub enum GreeterError {
    /// Error returned by an AWS service.
    AWS(String),
    /// Error returned by serde_json.
    SerdeJson(serde_json::Error),
    /// Error returned by the function runtime.
    Execution(String),
    /// Internal error.
    Internal(String),
}

impl From<serde_json::Error> for GreeterError {
    fn from(e: serde_json::Error) -> Self {
        GreeterError::SerdeJson(e)
    }
}

impl From<Box<dyn Error + Send + Sync>> for GreeterError {
    fn from(e: Box<dyn Error + Send + Sync>) -> Self {
        GreeterError::Execution(e.to_string())
    }
}

impl Display for GreeterError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            GreeterError::AWS(desc) => write!(f, "AWS error: {}", desc),
            GreeterError::SerdeJson(desc) => write!(f, "serde_json error: {}", desc),
            GreeterError::Execution(desc) => write!(f, "Execution error: {}", desc),
            GreeterError::Internal(desc) => write!(f, "Internal error: {}", desc),
        }
    }
}

impl Error for GreeterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GreeterError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = GreeterError::AWS("function not found".to_string());
        assert_eq!("AWS error: function not found", format!("{}", e));

        let e = GreeterError::Internal("oops".to_string());
        assert_eq!("Internal error: oops", format!("{}", e));
    }

    #[test]
    fn serde_json_conversion() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: GreeterError = e.into();
        assert!(matches!(e, GreeterError::SerdeJson(_)));
        assert!(e.source().is_some());
    }
}
