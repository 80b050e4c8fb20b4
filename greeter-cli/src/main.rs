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

mod args;
mod deploy;
mod lambda;
mod logs;
mod rainbow;
mod s3;

use anyhow::Result;
use clap::{crate_version, App, AppSettings};
use rainbow::rainbow_println;

#[tokio::main]
async fn main() -> Result<()> {
    // Command line arg parsing and configuration.
    let matches = App::new("Greeter")
        .version(crate_version!())
        .about("Command line deploy tool for the greeter lambda function")
        .author("UMD Database Group")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .args(args::get_args())
        .subcommand(deploy::command_args())
        .subcommand(s3::command_args())
        .subcommand(lambda::command_args())
        .subcommand(logs::command_args())
        .get_matches();

    let (command, command_matches) = match matches.subcommand() {
        Some((command, command_matches)) => (command, command_matches),
        None => unreachable!(),
    };

    let mut builder = args::get_logging(&matches, command_matches)?;
    builder.try_init()?;

    rainbow_println(include_str!("./greeter"));

    match command {
        "deploy" => deploy::command(command_matches).await,
        "upload" => s3::command(command_matches).await,
        "lambda" => lambda::command(command_matches).await,
        "logs" => logs::command(command_matches).await,
        _ => unreachable!(),
    }
}
