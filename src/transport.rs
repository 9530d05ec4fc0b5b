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

use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::form_urlencoded::byte_serialize;

use super::error::*;
use super::uri::{ArrayUri, Credentials};

const CIM_CONTENT_TYPE: &str = "application/xml; charset=\"utf-8\"";
const HDR_CIM_OPERATION: &str = "CIMOperation";
const HDR_CIM_METHOD: &str = "CIMMethod";
const HDR_CIM_OBJECT: &str = "CIMObject";
const HDR_CIM_ERROR: &str = "CIMError";
const FIRST_MESSAGE_ID: u32 = 1001;

/// HTTP(S) carrier of CIM-XML method calls.
pub(crate) struct TransPort {
    http: HttpClient,
    endpoint: String,
    creds: Credentials,
    next_id: u32,
}

impl TransPort {
    pub(crate) fn new(
        uri: &ArrayUri,
        creds: Credentials,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<TransPort> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;
        Ok(TransPort {
            http,
            endpoint: uri.endpoint(),
            creds,
            next_id: FIRST_MESSAGE_ID,
        })
    }

    /// Reserve the message ID of the next request.
    pub(crate) fn message_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Post one intrinsic method call and return the reply body.
    pub(crate) fn invoke(
        &mut self,
        method: &str,
        namespace: &str,
        body: String,
    ) -> CimResult<String> {
        let cim_object: String = byte_serialize(namespace.as_bytes()).collect();
        tracing::trace!(method, namespace, endpoint = %self.endpoint, "CIM-XML request");
        let rsp = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.creds.username, Some(&self.creds.password))
            .header(CONTENT_TYPE, CIM_CONTENT_TYPE)
            .header(HDR_CIM_OPERATION, "MethodCall")
            .header(HDR_CIM_METHOD, method)
            .header(HDR_CIM_OBJECT, cim_object)
            .body(body)
            .send()?;

        let status = rsp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CimError::AccessDenied(format!(
                "CIM_ERR_ACCESS_DENIED: HTTP {} from {}",
                status, self.endpoint
            )));
        }
        if let Some(v) = rsp.headers().get(HDR_CIM_ERROR) {
            return Err(CimError::from_message(&format!(
                "CIM server rejected {} request (HTTP {}): {}",
                method,
                status,
                v.to_str().unwrap_or("<non-ascii>")
            )));
        }
        if !status.is_success() {
            return Err(CimError::from_message(&format!(
                "CIM server replied HTTP {} to {} request",
                status, method
            )));
        }
        Ok(rsp.text()?)
    }
}
