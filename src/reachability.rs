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

use std::net::TcpStream;
use std::time::Duration;

use super::error::*;
use super::uri::ArrayUri;

/// Check that the array accepts TCP connections on its management port.
///
/// Every resolved address is tried in order; the first connection that
/// succeeds is closed straight away.
///
/// # Errors
///
///  * [`PingError::HostUnreachable`][1] when the host does not resolve or
///    no address accepts the connection.
///
/// [1]: enum.PingError.html#variant.HostUnreachable
pub fn host_available(uri: &ArrayUri, timeout: Duration) -> Result<()> {
    let unreachable = || {
        PingError::HostUnreachable(format!(
            "Host down or port not open! {}",
            uri.authority()
        ))
    };
    let addrs = match uri.socket_addrs() {
        Ok(a) => a,
        Err(e) => {
            tracing::debug!(host = uri.host(), error = %e, "Failed to resolve");
            return Err(unreachable());
        }
    };
    for addr in &addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(so) => {
                tracing::debug!(%addr, "Port open");
                drop(so);
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%addr, error = %e, "Connect failed");
            }
        }
    }
    Err(unreachable())
}
