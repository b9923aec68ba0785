// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP response access
//!
//! The validator only needs a status code and the body text from a response.
//! [`ApiResponse`] is that seam; [`ResponseSnapshot`] is an owned
//! implementation that can be captured from a live `reqwest::Response`.

use reqwest::header::CONTENT_TYPE;

use crate::error::{Result, ValidationError};

/// What the validator reads from an HTTP response
pub trait ApiResponse {
    /// HTTP status code
    fn status_code(&self) -> u16;

    /// Body decoded as UTF-8; `None` when the response carried no body
    fn body(&self) -> Result<Option<String>>;

    /// Value of the `Content-Type` header, if known
    fn content_type(&self) -> Option<&str> {
        None
    }
}

/// Owned copy of a response's status, content type and raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    status: u16,
    content_type: Option<String>,
    body: Option<Vec<u8>>,
}

impl ResponseSnapshot {
    /// Create a snapshot with a text body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: None,
            body: Some(body.into().into_bytes()),
        }
    }

    /// Create a snapshot that carried no body at all
    pub fn without_body(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: None,
        }
    }

    /// Create a snapshot from raw body bytes
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: Some(body.into()),
        }
    }

    /// Attach a content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Consume a live response, reading its whole body
    pub async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| ValidationError::Body {
            message: e.to_string(),
        })?;

        Ok(Self {
            status,
            content_type,
            body: Some(bytes.to_vec()),
        })
    }
}

impl ApiResponse for ResponseSnapshot {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn body(&self) -> Result<Option<String>> {
        self.body
            .as_deref()
            .map(|bytes| {
                std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| ValidationError::Body {
                        message: e.to_string(),
                    })
            })
            .transpose()
    }
}
