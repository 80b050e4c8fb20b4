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

//! The greeter handler.

use greeter::prelude::*;
use lambda_runtime::LambdaEvent;
use log::info;
use serde_json::Value;

/// Handles a single invocation of the greeter function.
///
/// The event payload and the invocation context are both ignored: every
/// call logs one line and returns the constant [`Greeting`]. The hosting
/// runtime owns serialization, retries and timeouts.
pub async fn handler(event: LambdaEvent<Value>) -> Result<Value> {
    let (_request, _context) = event.into_parts();

    info!("Hello from lambda");

    Ok(serde_json::to_value(Greeting::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use serde_json::json;

    fn event(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    fn expected() -> Value {
        json!({ "statusCode": 200, "message": "Hello from Lambda" })
    }

    #[tokio::test]
    async fn empty_object_input() -> Result<()> {
        let response = handler(event(json!({}))).await?;
        assert_eq!(expected(), response);
        Ok(())
    }

    #[tokio::test]
    async fn null_input() -> Result<()> {
        let response = handler(event(Value::Null)).await?;
        assert_eq!(expected(), response);
        Ok(())
    }

    #[tokio::test]
    async fn input_is_fully_ignored() -> Result<()> {
        let response = handler(event(json!({ "foo": "bar", "nested": { "a": 1 } }))).await?;
        assert_eq!(expected(), response);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_invocations_are_idempotent() -> Result<()> {
        let first = handler(event(json!({}))).await?;
        let second = handler(event(json!({ "different": true }))).await?;
        let third = handler(event(Value::Null)).await?;
        assert_eq!(first, second);
        assert_eq!(second, third);
        Ok(())
    }

    #[tokio::test]
    async fn response_key_order() -> Result<()> {
        let response = handler(event(json!({}))).await?;
        assert_eq!(
            r#"{"statusCode":200,"message":"Hello from Lambda"}"#,
            serde_json::to_string(&Greeting::new())?
        );
        assert_eq!(200, response["statusCode"]);
        assert_eq!("Hello from Lambda", response["message"]);
        Ok(())
    }
}
