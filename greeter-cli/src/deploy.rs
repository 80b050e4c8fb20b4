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

//! Greeter CLI provisions the greeter function on AWS Lambda.
//!
//! One `deploy` run carries the whole deployment metadata of the function
//! to the cloud: code package, execution role, published version, alias,
//! and log retention.

use crate::rainbow::rainbow_println;
use crate::s3;
use anyhow::{anyhow, Context as _, Result};
use clap::{App, Arg, ArgMatches};
use greeter::aws::{cloudwatch, lambda};
use greeter::prelude::*;
use log::info;

pub fn command_args() -> App<'static> {
    App::new("deploy")
        .about("Deploys the greeter function to AWS Lambda")
        .arg(
            Arg::new("code path")
                .short('p')
                .long("path")
                .value_name("FILE")
                .help("Uploads the function binary to S3 before deploying")
                .takes_value(true),
        )
        .arg(
            Arg::new("memory size")
                .short('m')
                .long("memory-size")
                .help("Sets the memory size (MB) for the function")
                .takes_value(true),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    if let Some(code_path) = matches.value_of("code path") {
        s3::put_function_object(&GREETER_S3_BUCKET, &GREETER_S3_KEY, code_path).await?;
    }

    let mut conf = AwsLambdaConfig::try_new()?;
    if matches.is_present("memory size") {
        let memory_size = matches
            .value_of("memory size")
            .unwrap()
            .parse::<i64>()
            .with_context(|| anyhow!("Invalid memory size"))?;
        conf.set_memory_size(memory_size);
    }
    conf.resolve_role().await?;

    let version = lambda::create_function(&conf).await?;
    info!("Deployed {} version {}", conf.function_name, version);
    rainbow_println(format!(
        "[OK] deployed function {} (version {})",
        conf.function_name, version
    ));

    // An alias can only point at a published version.
    if conf.publish && version != "$LATEST" {
        let alias_arn = lambda::create_or_update_alias(&version).await?;
        rainbow_println(format!("[OK] alias {} -> {}", conf.alias, alias_arn));
    }

    cloudwatch::create_log_group(&GREETER_LOG_GROUP).await?;
    cloudwatch::set_retention_policy(&GREETER_LOG_GROUP, *GREETER_LOG_RETENTION_DAYS).await?;
    rainbow_println(format!(
        "[OK] log group {} retention set to {} days",
        *GREETER_LOG_GROUP, *GREETER_LOG_RETENTION_DAYS
    ));

    Ok(())
}
