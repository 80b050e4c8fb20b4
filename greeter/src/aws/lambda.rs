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

//! This module contains all wrapped functions of the AWS Lambda services.

use crate::configs::*;
use crate::error::{GreeterError, Result};
use bytes::Bytes;
use log::info;
use rusoto_lambda::{
    CreateAliasRequest, CreateFunctionRequest, GetAliasRequest, GetFunctionRequest,
    InvocationRequest, InvocationResponse, Lambda, UpdateAliasRequest, UpdateFunctionCodeRequest,
};
use std::time::Duration;

/// Creates or updates the greeter lambda function.
///
/// If the function already exists, only its code is refreshed from the S3
/// package; otherwise the function is created from scratch with the role,
/// runtime and environment in `conf`. Either way a new version is published
/// when the publish flag is set.
///
/// # Arguments
/// * `conf` - The function configuration. The role must be resolved to an
///   IAM ARN before calling.
///
/// # Returns
/// The published version of the function, or `$LATEST` if the publish flag
/// is off.
pub async fn create_function(conf: &AwsLambdaConfig) -> Result<String> {
    let func_name = conf.function_name.clone();
    if GREETER_LAMBDA_CLIENT
        .get_function(GetFunctionRequest {
            function_name: func_name.clone(),
            ..Default::default()
        })
        .await
        .is_ok()
    {
        info!("Updating function code: {}", func_name);
        let resp = GREETER_LAMBDA_CLIENT
            .update_function_code(UpdateFunctionCodeRequest {
                function_name: func_name,
                s3_bucket: conf.code.s3_bucket.clone(),
                s3_key: conf.code.s3_key.clone(),
                publish: Some(conf.publish),
                ..Default::default()
            })
            .await
            .map_err(|e| GreeterError::AWS(e.to_string()))?;
        resp.version
            .ok_or_else(|| GreeterError::AWS("No function version!".to_string()))
    } else {
        info!("Creating function: {}", func_name);
        let resp = GREETER_LAMBDA_CLIENT
            .create_function(CreateFunctionRequest {
                function_name: func_name,
                code: conf.code.clone(),
                handler: conf.handler.clone(),
                runtime: conf.runtime.clone(),
                role: conf.role.clone(),
                environment: conf.environment.clone(),
                timeout: conf.timeout,
                memory_size: conf.memory_size,
                publish: Some(conf.publish),
                ..Default::default()
            })
            .await
            .map_err(|e| GreeterError::AWS(e.to_string()))?;
        resp.version
            .ok_or_else(|| GreeterError::AWS("No function version!".to_string()))
    }
}

/// Points the configured alias at a published version of the function.
///
/// The alias is created on first deployment and moved on subsequent ones.
///
/// # Arguments
/// * `version` - The published version the alias should resolve to.
///
/// # Returns
/// The alias ARN.
pub async fn create_or_update_alias(version: &str) -> Result<String> {
    let resp = if GREETER_LAMBDA_CLIENT
        .get_alias(GetAliasRequest {
            function_name: GREETER_FUNCTION_NAME.clone(),
            name: GREETER_FUNCTION_ALIAS.clone(),
        })
        .await
        .is_ok()
    {
        info!(
            "Moving alias {} to version {}",
            *GREETER_FUNCTION_ALIAS, version
        );
        GREETER_LAMBDA_CLIENT
            .update_alias(UpdateAliasRequest {
                function_name: GREETER_FUNCTION_NAME.clone(),
                name: GREETER_FUNCTION_ALIAS.clone(),
                function_version: Some(version.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| GreeterError::AWS(e.to_string()))?
    } else {
        info!(
            "Creating alias {} at version {}",
            *GREETER_FUNCTION_ALIAS, version
        );
        GREETER_LAMBDA_CLIENT
            .create_alias(CreateAliasRequest {
                function_name: GREETER_FUNCTION_NAME.clone(),
                name: GREETER_FUNCTION_ALIAS.clone(),
                function_version: version.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| GreeterError::AWS(e.to_string()))?
    };

    resp.alias_arn
        .ok_or_else(|| GreeterError::AWS("No alias ARN!".to_string()))
}

/// Invokes the lambda function with the given payload.
///
/// # Arguments
/// * `function_name` - The name of the lambda function, optionally
///   alias-qualified (`hello_world:learn`).
/// * `invocation_type` - The invocation type of the lambda function.
///   - `Event`: Asynchronous invocation.
///   - `RequestResponse`: Synchronous invocation.
/// * `payload` - The payload to be passed to the lambda function.
///
/// # Returns
/// The result of the invocation.
pub async fn invoke_function(
    function_name: &str,
    invocation_type: &str,
    payload: Option<Bytes>,
) -> Result<InvocationResponse> {
    let request = InvocationRequest {
        function_name: function_name.to_owned(),
        invocation_type: Some(invocation_type.to_owned()),
        payload,
        ..Default::default()
    };

    if invocation_type == *GREETER_LAMBDA_ASYNC_CALL {
        let response = GREETER_LAMBDA_CLIENT
            .invoke(request)
            .await
            .map_err(|e| GreeterError::AWS(e.to_string()))?;
        Ok(response)
    } else {
        // Error retries and exponential backoff in AWS Lambda
        let mut retries = 0;
        loop {
            match GREETER_LAMBDA_CLIENT
                .invoke(request.clone())
                .await
                .map_err(|e| GreeterError::AWS(e.to_string()))
            {
                Ok(response) => {
                    if response.function_error.is_none() {
                        return Ok(response);
                    } else {
                        info!(
                            "Function execution error: {}, details: {:?}",
                            response.function_error.unwrap(),
                            serde_json::from_slice::<serde_json::Value>(&response.payload.unwrap())
                        );
                    }
                }
                Err(e) => {
                    info!("Function invocation error: {}", e);
                }
            }

            info!("Retrying {} function invocation...", function_name);
            tokio::time::sleep(Duration::from_millis(2_u64.pow(retries) * 100)).await;
            retries += 1;

            if retries as usize > *GREETER_LAMBDA_MAX_RETRIES {
                return Err(GreeterError::AWS(format!(
                    "Sync invocation failed after {} retries",
                    *GREETER_LAMBDA_MAX_RETRIES
                )));
            }
        }
    }
}
