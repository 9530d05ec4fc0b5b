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

use std::time::Duration;

use super::cimxml;
use super::config::Config;
use super::data::*;
use super::error::*;
use super::transport::TransPort;
use super::uri::{ArrayUri, Credentials};

/// Namespace scoped queries against a CIM object manager.
///
/// Both operations return [`CimError::AccessDenied`][1] when the server
/// rejected the credentials and [`CimError::InvalidNamespace`][2] when the
/// namespace does not exist.
///
/// [1]: enum.CimError.html#variant.AccessDenied
/// [2]: enum.CimError.html#variant.InvalidNamespace
pub trait CimClient {
    /// Enumerate instances of `class_name` in `namespace`.
    fn enumerate_instances(
        &mut self,
        namespace: &str,
        class_name: &str,
        opts: &EnumerateOptions,
    ) -> CimResult<Vec<NamedInstance>>;

    /// Fetch the instances associated to `object_name`.
    fn associator_instances(
        &mut self,
        namespace: &str,
        object_name: &ObjectName,
        opts: &AssociatorOptions,
    ) -> CimResult<Vec<NamedInstance>>;
}

/// [`CimClient`][1] speaking CIM-XML over HTTP or HTTPS.
///
/// ```no_run
/// use smisping::{ArrayUri, CimXmlClient, Config, Credentials};
///
/// let uri = ArrayUri::parse("https://127.0.0.1:5989").unwrap();
/// let creds = Credentials::new("someuser", "uber_secret");
/// let mut c = CimXmlClient::new(&uri, creds, &Config::default()).unwrap();
/// let count = smisping::ping(&mut c).unwrap();
/// println!("Found {} system(s)", count);
/// ```
///
/// [1]: trait.CimClient.html
pub struct CimXmlClient {
    tp: TransPort,
}

impl CimXmlClient {
    /// Create a client for the array at `uri`. No request is sent yet.
    ///
    /// # Errors
    ///
    ///  * [`PingError::ClientSetup`][1] when the HTTP client cannot be
    ///    built, for example because the TLS backend failed to initialise.
    ///
    /// [1]: enum.PingError.html#variant.ClientSetup
    pub fn new(
        uri: &ArrayUri,
        creds: Credentials,
        cfg: &Config,
    ) -> Result<CimXmlClient> {
        Ok(CimXmlClient {
            tp: TransPort::new(uri, creds, cfg.timeout, cfg.verify_tls)?,
        })
    }

    /// Same as [`new()`][1] with an explicit timeout and TLS verification
    /// turned off.
    ///
    /// [1]: #method.new
    pub fn with_timeout(
        uri: &ArrayUri,
        creds: Credentials,
        timeout: Duration,
    ) -> Result<CimXmlClient> {
        Ok(CimXmlClient {
            tp: TransPort::new(uri, creds, timeout, false)?,
        })
    }
}

impl CimClient for CimXmlClient {
    fn enumerate_instances(
        &mut self,
        namespace: &str,
        class_name: &str,
        opts: &EnumerateOptions,
    ) -> CimResult<Vec<NamedInstance>> {
        let id = self.tp.message_id();
        let req =
            cimxml::encode_enumerate_instances(id, namespace, class_name, opts);
        let rsp = self.tp.invoke("EnumerateInstances", namespace, req)?;
        cimxml::decode_response(&rsp)
    }

    fn associator_instances(
        &mut self,
        namespace: &str,
        object_name: &ObjectName,
        opts: &AssociatorOptions,
    ) -> CimResult<Vec<NamedInstance>> {
        let id = self.tp.message_id();
        let req = cimxml::encode_associators(id, namespace, object_name, opts);
        let rsp = self.tp.invoke("Associators", namespace, req)?;
        cimxml::decode_response(&rsp)
    }
}
