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
use std::net::SocketAddr;

use regex::Regex;
use url::Url;

use super::error::*;

const WBEM_HTTP_PORT: u16 = 5988;
const WBEM_HTTPS_PORT: u16 = 5989;
const DEFAULT_CIMOM_PATH: &str = "/cimom";

/// Management endpoint of a storage array, e.g. `https://10.0.0.5:5989`.
#[derive(Debug, Clone)]
pub struct ArrayUri {
    url: Url,
    port: u16,
}

impl ArrayUri {
    /// Parse `<scheme>://<host>[:port][/path]`.
    ///
    /// The scheme must be `http` or `https`. Without a port the WBEM
    /// well-known port of the scheme is used (5988 or 5989), without a
    /// path the conventional `/cimom`.
    ///
    /// # Errors
    ///
    ///  * [`PingError::MalformedUrl`][1]
    ///
    /// [1]: enum.PingError.html#variant.MalformedUrl
    pub fn parse(s: &str) -> Result<ArrayUri> {
        let regex_uri = Regex::new(
            r"(?x)
            ^
            ([A-Za-z][A-Za-z0-9+.\-]*)  # 1: scheme
            ://
            ([^/?\#\s]+)                # 2: host and optional port
            (/\S*)?                     # 3: path
            $
            ",
        )?;
        let invalid =
            || PingError::MalformedUrl(format!("Invalid URL ({})", s));

        if s.matches("://").count() != 1 {
            return Err(invalid());
        }
        let cap = regex_uri.captures(s).ok_or_else(invalid)?;
        let scheme = match cap.get(1) {
            Some(m) => m.as_str().to_lowercase(),
            None => return Err(invalid()),
        };
        let default_port = match scheme.as_str() {
            "http" => WBEM_HTTP_PORT,
            "https" => WBEM_HTTPS_PORT,
            _ => return Err(invalid()),
        };
        let authority = cap.get(2).map(|m| m.as_str()).unwrap_or("");
        let path = match cap.get(3).map(|m| m.as_str()) {
            None | Some("/") => DEFAULT_CIMOM_PATH,
            Some(p) => p,
        };

        let mut url = Url::parse(&format!("{}://{}{}", scheme, authority, path))
            .map_err(|_| invalid())?;
        if url.host_str().map_or(true, |h| h.is_empty()) {
            return Err(invalid());
        }
        if !url.username().is_empty() || url.password().is_some() {
            // Credentials are given separately on the command line.
            return Err(invalid());
        }
        // `Url` forgets a port equal to the scheme default (443 for https),
        // so only fall back to the WBEM port when none was written.
        let port = if Regex::new(r":[0-9]+$")?.is_match(authority) {
            url.port_or_known_default().unwrap_or(default_port)
        } else {
            default_port
        };
        url.set_port(Some(port)).map_err(|_| invalid())?;
        Ok(ArrayUri { url, port })
    }

    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` as used in diagnostics.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host(), self.port)
    }

    /// Full URL CIM-XML requests are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}://{}{}", self.url.scheme(), self.authority(), self.path())
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Resolve the endpoint to socket addresses.
    pub fn socket_addrs(&self) -> Result<Vec<SocketAddr>> {
        Ok(self.url.socket_addrs(|| None)?)
    }
}

impl fmt::Display for ArrayUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

/// User name and password presented to the CIM server.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}
