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

//! Helper functions to create the greeter Lambda function.

use crate::configs::*;
use crate::error::{GreeterError, Result};
use rusoto_iam::{GetRoleRequest, Iam};
use rusoto_lambda::{Environment, FunctionCode};
use std::collections::hash_map::HashMap;

/// Aws Lambda function configuration.
///
/// This is the in-memory form of the deployment metadata in the embedded
/// configuration file. The deploy tool consumes it to provision the
/// function; the function itself never reads it.
#[derive(Debug, Clone)]
pub struct AwsLambdaConfig {
    /// The identifier of the function's runtime. The greeter function is a
    /// pre-compiled binary, so it runs on the custom runtime (`provided.al2`
    /// on Amazon Linux 2).
    pub runtime:       Option<String>,
    /// The AWS Lambda function handler.
    ///
    /// The custom runtime ignores the handler string, but the service API
    /// requires one at creation time.
    pub handler:       Option<String>,
    /// The AWS Lambda function memory size.
    ///
    /// The greeter function allocates nothing beyond the constant response,
    /// so the minimum of 128 MB is plenty.
    pub memory_size:   Option<i64>,
    /// The AWS Lambda function timeout in seconds.
    pub timeout:       Option<i64>,
    /// The AWS Lambda function execution role.
    ///
    /// A role name from the configuration file until
    /// [`resolve_role`](AwsLambdaConfig::resolve_role) replaces it with the
    /// full IAM ARN.
    pub role:          String,
    /// The AWS Lambda function environment variables.
    pub environment:   Option<Environment>,
    /// The AWS Lambda function code location in Amazon S3.
    pub code:          FunctionCode,
    /// The name of the AWS Lambda function.
    pub function_name: String,
    /// The alias pointed at the latest published version.
    pub alias:         String,
    /// Whether to publish a new version on each code deployment.
    pub publish:       bool,
}

impl AwsLambdaConfig {
    /// Creates a Lambda function configuration from the embedded settings.
    pub fn try_new() -> Result<AwsLambdaConfig> {
        let runtime = Some(GREETER_CONF["aws"]["runtime"].to_string());
        let handler = Some(GREETER_CONF["lambda"]["handler"].to_owned());
        let memory_size = Some(
            GREETER_CONF["lambda"]["memory_size"]
                .parse::<i64>()
                .map_err(|e| GreeterError::Internal(e.to_string()))?,
        );
        let timeout = Some(
            GREETER_CONF["lambda"]["timeout"]
                .parse::<i64>()
                .map_err(|e| GreeterError::Internal(e.to_string()))?,
        );
        let role = GREETER_CONF["aws"]["role"].to_string();

        // The deployment package is uploaded to Amazon S3 in advance.
        let code = FunctionCode {
            s3_bucket: Some(GREETER_S3_BUCKET.clone()),
            s3_key: Some(GREETER_S3_KEY.clone()),
            s3_object_version: None,
            zip_file: None,
            image_uri: None,
        };

        let mut map = HashMap::new();
        map.insert("RUST_LOG".to_owned(), "info".to_owned());
        map.insert("RUST_BACKTRACE".to_owned(), "full".to_owned());
        let environment = Some(Environment {
            variables: Some(map),
        });

        Ok(AwsLambdaConfig {
            runtime,
            handler,
            memory_size,
            timeout,
            role,
            environment,
            code,
            function_name: GREETER_FUNCTION_NAME.clone(),
            alias: GREETER_FUNCTION_ALIAS.clone(),
            publish: *GREETER_PUBLISH_VERSION,
        })
    }

    /// Sets the runtime identifier.
    pub fn set_runtime(&mut self, runtime: &str) -> &mut Self {
        self.runtime = Some(runtime.to_string());
        self
    }

    /// Sets the handler name.
    pub fn set_handler(&mut self, handler: &str) -> &mut Self {
        self.handler = Some(handler.to_owned());
        self
    }

    /// Sets the memory size.
    pub fn set_memory_size(&mut self, memory_size: i64) -> &mut Self {
        self.memory_size = Some(memory_size);
        self
    }

    /// Sets the timeout.
    pub fn set_timeout(&mut self, timeout: i64) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the execution role.
    pub fn set_role(&mut self, role: &str) -> &mut Self {
        self.role = role.to_string();
        self
    }

    /// Sets the S3 key of the deployment package.
    pub fn set_code(&mut self, s3_key: &str) -> &mut Self {
        self.code = FunctionCode {
            s3_bucket: Some(GREETER_S3_BUCKET.clone()),
            s3_key: Some(s3_key.to_string()),
            s3_object_version: None,
            zip_file: None,
            image_uri: None,
        };
        self
    }

    /// Replaces the configured role name with its full IAM ARN.
    ///
    /// Role names that already look like an ARN are left untouched.
    pub async fn resolve_role(&mut self) -> Result<&mut Self> {
        if !self.role.starts_with("arn:") {
            let resp = GREETER_IAM_CLIENT
                .get_role(GetRoleRequest {
                    role_name: self.role.clone(),
                })
                .await
                .map_err(|e| GreeterError::AWS(e.to_string()))?;
            self.role = resp.role.arn;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_embedded_settings() -> Result<()> {
        let conf = AwsLambdaConfig::try_new()?;
        assert_eq!("hello_world", conf.function_name);
        assert_eq!("hello_world-role", conf.role);
        assert_eq!("learn", conf.alias);
        assert!(conf.publish);
        assert_eq!(Some("provided.al2".to_string()), conf.runtime);
        assert_eq!(Some(128), conf.memory_size);
        assert_eq!(Some(GREETER_S3_BUCKET.clone()), conf.code.s3_bucket);
        Ok(())
    }

    #[test]
    fn config_setters() -> Result<()> {
        let mut conf = AwsLambdaConfig::try_new()?;
        conf.set_runtime("provided")
            .set_handler("bootstrap")
            .set_memory_size(256)
            .set_timeout(10)
            .set_role("arn:aws:iam::123456789012:role/hello_world-role")
            .set_code("greeter/bootstrap-arm64.zip");
        assert_eq!(Some("provided".to_string()), conf.runtime);
        assert_eq!(Some("bootstrap".to_string()), conf.handler);
        assert_eq!(Some(256), conf.memory_size);
        assert_eq!(Some(10), conf.timeout);
        assert!(conf.role.starts_with("arn:"));
        assert_eq!(
            Some("greeter/bootstrap-arm64.zip".to_string()),
            conf.code.s3_key
        );
        Ok(())
    }
}
