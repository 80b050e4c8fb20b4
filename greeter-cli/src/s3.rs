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

//! Greeter CLI writes the function's deployment package to AWS S3.

use crate::rainbow::rainbow_println;
use anyhow::{bail, Result};
use clap::{App, Arg, ArgMatches};
use greeter::prelude::*;
use rusoto_core::Region;
use rusoto_s3::PutObjectRequest;
use rusoto_s3::{S3Client, S3};
use std::fs;
use std::io::Write;
use std::path::Path;

pub async fn command(matches: &ArgMatches) -> Result<()> {
    put_function_object(
        &GREETER_S3_BUCKET,
        matches.value_of("s3 key").unwrap_or(&GREETER_S3_KEY),
        matches
            .value_of("code path")
            .expect("No function code path provided"),
    )
    .await?;
    Ok(())
}

pub fn command_args() -> App<'static> {
    App::new("upload")
        .about("Uploads the function code to AWS S3")
        .arg(
            Arg::new("code path")
                .short('p')
                .long("path")
                .value_name("FILE")
                .help("Sets the path to the function code")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("s3 key")
                .short('k')
                .long("key")
                .value_name("S3_KEY")
                .help("Sets the S3 key to upload the function code to")
                .takes_value(true),
        )
}

/// Puts a lambda function code to AWS S3.
///
/// The compiled binary is zipped up as `bootstrap`, the entry point name
/// the custom Lambda runtime expects.
///
/// # Arguments
/// * `bucket` - The S3 bucket to put the code in.
/// * `key` - The S3 key to put the code in.
/// * `code_path` - The path to the code to put.
pub async fn put_function_object(bucket: &str, key: &str, code_path: &str) -> Result<()> {
    rainbow_println("============================================================");
    rainbow_println("                Upload function code to S3                  ");
    rainbow_println("============================================================");
    rainbow_println("\n\nPackaging code and uploading to S3...");

    if !Path::new(code_path).exists() {
        bail!("The function code ({}) doesn't exist.", code_path);
    }

    // Package the lambda function code into a zip file.
    let fname = Path::new(code_path).parent().unwrap().join("bootstrap.zip");
    let zip_file = fs::File::create(&fname)?;
    let mut zip_writer = zip::ZipWriter::new(zip_file);
    zip_writer.start_file(
        "bootstrap",
        zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Bzip2)
            .unix_permissions(0o755),
    )?;
    zip_writer.write_all(&fs::read(code_path)?)?;
    zip_writer.finish()?;

    if !fname.exists() {
        bail!("Failed to package the binary {} into {:?}!", code_path, fname);
    }

    // Put the zip file to S3.
    let request = PutObjectRequest {
        bucket: bucket.to_string(),
        key: key.to_string(),
        body: Some(fs::read(&fname)?.into()),
        ..Default::default()
    };

    S3Client::new(Region::default()).put_object(request).await?;
    rainbow_println("[OK] Upload Succeed.");

    Ok(())
}
