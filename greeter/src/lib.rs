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

#![warn(missing_docs, clippy::needless_borrow)]

//! Greeter is a minimal serverless application: a single AWS Lambda function
//! that ignores its invocation payload and returns the constant response
//! `{"statusCode": 200, "message": "Hello from Lambda"}`.
//!
//! This crate carries everything except the function binary itself: the
//! response entity, the embedded deployment configuration (function name,
//! execution role, alias, log retention), and the wrapped AWS service calls
//! used by the command-line deploy tool.

pub mod aws;
pub mod config;
pub mod configs;
pub mod error;
pub mod prelude;
pub mod response;
