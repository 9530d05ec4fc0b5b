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

use super::error::*;

pub const EXIT_CODE_SYSTEMS_FOUND: u8 = 0;
pub const EXIT_CODE_NO_SYSTEMS: u8 = 1;
pub const EXIT_CODE_AUTH_FAILED: u8 = 2;
pub const EXIT_CODE_ASSOCIATION_FAILED: u8 = 3;
pub const EXIT_CODE_HOST_UNREACHABLE: u8 = 4;
pub const EXIT_CODE_GENERIC: u8 = 5;
pub const EXIT_CODE_USAGE: u8 = 10;

/// Final verdict of a probe run.
#[derive(Debug)]
pub enum Outcome {
    /// The `Array` profile has this many (non zero) computer systems.
    SystemsFound(usize),
    /// The profile was found but no computer system conforms to it.
    NoSystems,
    Failed(PingError),
}

impl From<Result<usize>> for Outcome {
    fn from(r: Result<usize>) -> Self {
        match r {
            Ok(0) => Outcome::NoSystems,
            Ok(n) => Outcome::SystemsFound(n),
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl From<PingError> for Outcome {
    fn from(e: PingError) -> Self {
        Outcome::Failed(e)
    }
}

impl Outcome {
    /// Process exit code of this outcome.
    pub fn exit_code(&self) -> u8 {
        match *self {
            Outcome::SystemsFound(_) => EXIT_CODE_SYSTEMS_FOUND,
            Outcome::NoSystems => EXIT_CODE_NO_SYSTEMS,
            Outcome::Failed(ref e) => match *e {
                PingError::Usage(_) => EXIT_CODE_USAGE,
                PingError::AuthenticationFailed(_) => EXIT_CODE_AUTH_FAILED,
                PingError::AssociationQuery(_) => EXIT_CODE_ASSOCIATION_FAILED,
                PingError::HostUnreachable(_) => EXIT_CODE_HOST_UNREACHABLE,
                PingError::MalformedUrl(_)
                | PingError::ClientSetup(_)
                | PingError::ProfileNotFound(_)
                | PingError::TypeConversion(_)
                | PingError::Protocol(_) => EXIT_CODE_GENERIC,
            },
        }
    }

    /// The line of text printed before exiting.
    pub fn message(&self) -> String {
        match *self {
            Outcome::SystemsFound(n) => format!("Found {} system(s)", n),
            Outcome::NoSystems => "No systems found".to_string(),
            Outcome::Failed(ref e) => format!("{}", e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == EXIT_CODE_SYSTEMS_FOUND
    }
}
