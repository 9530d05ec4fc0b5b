// Copyright (C) 2024 Red Hat, Inc.
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

use std::ffi::OsString;

use clap::Parser;

use super::error::*;
use super::uri::Credentials;

const EXAMPLE: &str = "https://127.0.0.1:5989 someuser uber_secret";

/// Check that a storage array exposes the SNIA Array profile over CIM/WBEM.
#[derive(Parser, Debug)]
#[command(name = "smisping", version)]
pub struct Args {
    /// Management URL, `<http|https>://<host>[:port]`
    #[arg(allow_hyphen_values = true)]
    pub url: String,
    /// CIM user name
    #[arg(allow_hyphen_values = true)]
    pub username: String,
    /// CIM password
    #[arg(allow_hyphen_values = true)]
    pub password: String,
}

impl Args {
    /// Parse the command line. The first item is the program name.
    ///
    /// # Errors
    ///
    ///  * [`PingError::Usage`][1] on anything but exactly three positional
    ///    arguments, including `--help` and `--version`.
    ///
    /// [1]: enum.PingError.html#variant.Usage
    pub fn parse_from_args<I, T>(args: I) -> Result<Args>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let prog = args
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "smisping".to_string());
        Args::try_parse_from(args).map_err(|e| {
            PingError::Usage(format!(
                "{}\n   eg. {} {}",
                e.to_string().trim_end(),
                prog,
                EXAMPLE
            ))
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}
