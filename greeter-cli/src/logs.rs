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

//! Greeter CLI tails the greeter function's CloudWatch logs.

use anyhow::{anyhow, Context as _, Result};
use clap::{App, Arg, ArgMatches};
use greeter::aws::cloudwatch;
use greeter::prelude::*;
use humantime::parse_duration;

pub fn command_args() -> App<'static> {
    App::new("logs")
        .about("Tails the greeter function's CloudWatch logs")
        .arg(
            Arg::new("since")
                .short('s')
                .long("since")
                .help("How far back to fetch logs (e.g. 30s, 5min, 1h)")
                .takes_value(true)
                .default_value("5min"),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    let mtime = parse_duration(matches.value_of("since").unwrap())
        .with_context(|| anyhow!("Invalid duration"))?;

    cloudwatch::fetch(&GREETER_LOG_GROUP, mtime).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_since_parses() {
        let matches = command_args().get_matches_from(vec!["logs"]);
        let since = parse_duration(matches.value_of("since").unwrap()).unwrap();
        assert_eq!(300, since.as_secs());
    }
}
