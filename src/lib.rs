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

//! # `smisping`
//!
//! `smisping` checks whether a storage array is reachable and correctly
//! exposes itself through SMI-S, the CIM/WBEM management protocol used by
//! most enterprise arrays. Given a management URL and credentials it:
//!
//!  * Verifies the management port accepts TCP connections.
//!
//!  * Looks for the SNIA registered `Array` profile in the usual interop
//!    namespaces (`interop`, `root/interop`, `root/PG_Interop`).
//!
//!  * Counts the computer systems conforming to that profile.
//!
//! The verdict is reported as a process exit code, for scripted health
//! checks:
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | One or more systems found                    |
//! | 1    | Profile found, no systems associated         |
//! | 2    | Authentication rejected                      |
//! | 3    | Association query failed                     |
//! | 4    | Host unreachable                             |
//! | 5    | Malformed URL, protocol or profile not found |
//! | 10   | Invalid command line usage                   |
//!
//! # Example code
//!
//! ```no_run
//! extern crate smisping;
//! use smisping::{ArrayUri, CimXmlClient, Config, Credentials, Outcome};
//!
//! fn main() {
//!     let cfg = Config::default();
//!     let uri = ArrayUri::parse("https://10.0.0.5:5989").unwrap();
//!     smisping::host_available(&uri, cfg.timeout).unwrap();
//!     let creds = Credentials::new("someuser", "uber_secret");
//!     let mut c = CimXmlClient::new(&uri, creds, &cfg).unwrap();
//!     let outcome = Outcome::from(smisping::ping(&mut c));
//!     println!("{}", outcome.message());
//!     std::process::exit(outcome.exit_code() as i32);
//! }
//! ```

extern crate clap;
extern crate quick_xml;
extern crate regex;
extern crate reqwest;
extern crate tracing;
extern crate tracing_subscriber;
extern crate url;

pub use self::cli::Args;
pub use self::client::{CimClient, CimXmlClient};
pub use self::config::Config;
pub use self::data::*;
pub use self::discovery::{
    discover_array_profile, is_array_profile, ping, resolve_associated_systems,
    ARRAY_PROFILE_NAME, CANDIDATE_NAMESPACES, COMPUTER_SYSTEM_CLASS,
    CONFORMS_TO_PROFILE_CLASS, REGISTERED_PROFILE_CLASS, SNIA_ORGANIZATION,
};
pub use self::error::{CimError, CimResult, PingError, Result};
pub use self::logging::init_logging;
pub use self::outcome::*;
pub use self::reachability::host_available;
pub use self::uri::{ArrayUri, Credentials};

pub mod cimxml;
mod cli;
mod client;
mod config;
mod data;
mod discovery;
mod error;
mod logging;
mod outcome;
mod reachability;
mod transport;
mod uri;

/// Probe the array at `args.url` end to end and return the verdict.
///
/// This is the whole pipeline behind the `smisping` binary: URL parsing,
/// reachability check, client construction, profile discovery and
/// association lookup. Every stage stops the run on failure.
pub fn run(args: &Args, cfg: &Config) -> Outcome {
    let uri = match ArrayUri::parse(&args.url) {
        Ok(u) => u,
        Err(e) => return Outcome::from(e),
    };
    tracing::debug!(endpoint = %uri, user = %args.username, "Probing array");
    if let Err(e) = host_available(&uri, cfg.timeout) {
        return Outcome::from(e);
    }
    let mut client = match CimXmlClient::new(&uri, args.credentials(), cfg) {
        Ok(c) => c,
        Err(e) => return Outcome::from(e),
    };
    Outcome::from(ping(&mut client))
}
