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

//! Global settings and service clients derived from the embedded
//! configuration file.

pub use crate::config::GREETER_CONF;

use lazy_static::lazy_static;
use rusoto_core::Region;
use rusoto_iam::IamClient;
use rusoto_lambda::LambdaClient;
use rusoto_logs::CloudWatchLogsClient;

mod aws_lambda;
pub use aws_lambda::AwsLambdaConfig;

lazy_static! {
    /// The name of the greeter lambda function.
    pub static ref GREETER_FUNCTION_NAME: String = GREETER_CONF["lambda"]["name"].to_string();
    /// The alias pointed at the published version of the function.
    pub static ref GREETER_FUNCTION_ALIAS: String = GREETER_CONF["lambda"]["alias"].to_string();
    /// Whether a new version is published on each deployment.
    pub static ref GREETER_PUBLISH_VERSION: bool =
        GREETER_CONF["lambda"]["is_publish_version"].parse::<bool>().unwrap();
    /// AWS Lambda function maximum error retry.
    pub static ref GREETER_LAMBDA_MAX_RETRIES: usize =
        GREETER_CONF["lambda"]["max_invoke_retries"].parse::<usize>().unwrap();

    /// AWS Lambda function async invocation.
    pub static ref GREETER_LAMBDA_ASYNC_CALL: String = "Event".to_string();
    /// AWS Lambda function sync invocation.
    pub static ref GREETER_LAMBDA_SYNC_CALL: String = "RequestResponse".to_string();

    /// Greeter S3 bucket for the deployment package.
    pub static ref GREETER_S3_BUCKET: String = GREETER_CONF["greeter"]["s3_bucket"].to_string();
    /// Greeter S3 key for the deployment package.
    pub static ref GREETER_S3_KEY: String = GREETER_CONF["greeter"]["s3_key"].to_string();

    /// The CloudWatch log group of the greeter function.
    pub static ref GREETER_LOG_GROUP: String =
        format!("/aws/lambda/{}", *GREETER_FUNCTION_NAME);
    /// The retention policy (in days) applied to the function's log group.
    pub static ref GREETER_LOG_RETENTION_DAYS: i64 =
        GREETER_CONF["watchlogs"]["retention_in_days"].parse::<i64>().unwrap();

    /// Greeter's AWS Lambda client.
    pub static ref GREETER_LAMBDA_CLIENT: LambdaClient = LambdaClient::new(Region::default());
    /// Greeter's AWS CloudWatch Logs client.
    pub static ref GREETER_WATCHLOGS_CLIENT: CloudWatchLogsClient =
        CloudWatchLogsClient::new(Region::default());
    /// Greeter's AWS IAM client.
    pub static ref GREETER_IAM_CLIENT: IamClient = IamClient::new(Region::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_settings() {
        assert_eq!("hello_world", GREETER_FUNCTION_NAME.as_str());
        assert_eq!("learn", GREETER_FUNCTION_ALIAS.as_str());
        assert_eq!("/aws/lambda/hello_world", GREETER_LOG_GROUP.as_str());
        assert!(*GREETER_PUBLISH_VERSION);
        assert_eq!(30, *GREETER_LOG_RETENTION_DAYS);
    }
}
