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

use std::env;
use std::time::Duration;

use super::error::*;

const DEFAULT_TIMEOUT: u64 = 30_000;
const DEFAULT_LOG_FILTER: &str = "smisping=warn";
static TIMEOUT_VAR_NAME: &'static str = "SMISPING_TIMEOUT";
static TLS_VERIFY_VAR_NAME: &'static str = "SMISPING_TLS_VERIFY";
static LOG_VAR_NAME: &'static str = "SMISPING_LOG";

/// Run time settings taken from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connect and request timeout.
    pub timeout: Duration,
    /// Verify the server's TLS certificate. Off by default, arrays tend
    /// to ship self-signed certificates.
    pub verify_tls: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT),
            verify_tls: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read `SMISPING_TIMEOUT` (milliseconds), `SMISPING_TLS_VERIFY` and
    /// `SMISPING_LOG`. Unset variables keep their default.
    ///
    /// # Errors
    ///
    ///  * [`PingError::Usage`][1] when `SMISPING_TIMEOUT` is not a positive
    ///    integer.
    ///
    /// [1]: enum.PingError.html#variant.Usage
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|k| env::var(k).ok())
    }

    /// Same as [`from_env()`][1] with a caller supplied variable lookup.
    ///
    /// [1]: #method.from_env
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(v) = lookup(TIMEOUT_VAR_NAME) {
            let ms = match v.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(PingError::Usage(format!(
                        "Invalid {} '{}', expecting timeout in milliseconds",
                        TIMEOUT_VAR_NAME, v
                    )))
                }
            };
            cfg.timeout = Duration::from_millis(ms);
        }
        if let Some(v) = lookup(TLS_VERIFY_VAR_NAME) {
            cfg.verify_tls = match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                _ => false,
            };
        }
        if let Some(v) = lookup(LOG_VAR_NAME) {
            if !v.trim().is_empty() {
                cfg.log_filter = v.trim().to_string();
            }
        }
        Ok(cfg)
    }
}
