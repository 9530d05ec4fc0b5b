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

use std::fmt;
use std::result;

/// Failure of a probe run. Each variant maps to one process exit code, see
/// [`Outcome::exit_code()`][1].
///
/// [1]: enum.Outcome.html#method.exit_code
#[derive(Debug)]
pub enum PingError {
    Usage(String),
    MalformedUrl(String),
    HostUnreachable(String),
    ClientSetup(String),
    AuthenticationFailed(String),
    ProfileNotFound(String),
    TypeConversion(String),
    AssociationQuery(String),
    Protocol(String),
}

impl ::std::error::Error for PingError {}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                PingError::Usage(ref x)
                | PingError::MalformedUrl(ref x)
                | PingError::HostUnreachable(ref x)
                | PingError::ClientSetup(ref x)
                | PingError::AuthenticationFailed(ref x)
                | PingError::ProfileNotFound(ref x)
                | PingError::TypeConversion(ref x)
                | PingError::AssociationQuery(ref x)
                | PingError::Protocol(ref x) => x,
            }
        )
    }
}

pub type Result<T> = result::Result<T, PingError>;

impl From<::std::num::ParseIntError> for PingError {
    fn from(e: ::std::num::ParseIntError) -> Self {
        PingError::TypeConversion(format!(
            "Failed to convert CIM property value to integer: {}",
            e
        ))
    }
}

impl From<::std::io::Error> for PingError {
    fn from(e: ::std::io::Error) -> Self {
        PingError::HostUnreachable(format!("{}", e))
    }
}

impl From<::reqwest::Error> for PingError {
    fn from(e: ::reqwest::Error) -> Self {
        PingError::ClientSetup(format!("Failed to create CIM client: {}", e))
    }
}

impl From<::regex::Error> for PingError {
    fn from(e: ::regex::Error) -> Self {
        PingError::Protocol(format!("Regex error: {}", e))
    }
}

/// Error returned by a [`CimClient`][1] operation.
///
/// Only the two causes the discovery logic branches on get their own
/// variant; everything else, including transport failures, is `Other`.
///
/// [1]: trait.CimClient.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimError {
    AccessDenied(String),
    InvalidNamespace(String),
    Other(String),
}

impl ::std::error::Error for CimError {}

impl fmt::Display for CimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                CimError::AccessDenied(ref x)
                | CimError::InvalidNamespace(ref x)
                | CimError::Other(ref x) => x,
            }
        )
    }
}

pub type CimResult<T> = result::Result<T, CimError>;

// DSP0200 status codes we care about.
const CIM_ERR_ACCESS_DENIED: u32 = 2;
const CIM_ERR_INVALID_NAMESPACE: u32 = 3;

// Text markers in unstructured error messages, checked in this order.
const ACCESS_DENIED_MARKER: &str = "CIM_ERR_ACCESS_DENIED";
const INVALID_NAMESPACE_MARKER: &str = "CIM_ERR_INVALID_NAMESPACE";

impl CimError {
    /// Build from the `CODE` and `DESCRIPTION` of a CIM-XML `<ERROR>`
    /// element.
    pub fn from_code(code: u32, description: &str) -> CimError {
        let msg = if description.is_empty() {
            format!("CIM error code {}", code)
        } else {
            format!("CIM error code {}: {}", code, description)
        };
        match code {
            CIM_ERR_ACCESS_DENIED => CimError::AccessDenied(msg),
            CIM_ERR_INVALID_NAMESPACE => CimError::InvalidNamespace(msg),
            _ => CimError::Other(msg),
        }
    }

    /// Classify a free text error message by the CIM status names it
    /// mentions.
    pub fn from_message(msg: &str) -> CimError {
        if msg.contains(ACCESS_DENIED_MARKER) {
            CimError::AccessDenied(msg.to_string())
        } else if msg.contains(INVALID_NAMESPACE_MARKER) {
            CimError::InvalidNamespace(msg.to_string())
        } else {
            CimError::Other(msg.to_string())
        }
    }
}

impl From<::quick_xml::Error> for CimError {
    fn from(e: ::quick_xml::Error) -> Self {
        CimError::Other(format!("Failed to parse CIM-XML reply: {}", e))
    }
}

impl From<::quick_xml::events::attributes::AttrError> for CimError {
    fn from(e: ::quick_xml::events::attributes::AttrError) -> Self {
        CimError::Other(format!(
            "Failed to parse CIM-XML reply attribute: {}",
            e
        ))
    }
}

impl From<::reqwest::Error> for CimError {
    fn from(e: ::reqwest::Error) -> Self {
        CimError::from_message(&format!("CIM request failed: {}", e))
    }
}
