//! HTTP exchange types for the host-does-IO pattern.
//!
//! # Design
//! `MeosInfoClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. A `Transport` executes the actual
//! round trip. The protocol only ever issues bodiless GETs, so a request is
//! just a URL plus headers.
//!
//! Bodies stay raw bytes until `HttpResponse::decode_body` applies the
//! charset announced in `Content-Type`.

use std::borrow::Cow;

use crate::error::{MeosError, Result};

/// Charset used when the response does not announce one.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: vec![("accept".to_string(), "application/xml, text/xml".to_string())],
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Response text together with the charset that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub charset: String,
}

impl HttpResponse {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Charset from `Content-Type`, lowercased, or `DEFAULT_CHARSET`.
    pub fn charset(&self) -> String {
        self.header("content-type")
            .and_then(charset_from_content_type)
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
    }

    /// Fail with `TransportHttpError` unless the status is 2xx.
    pub fn ensure_success(&self) -> Result<()> {
        if (200..300).contains(&self.status) {
            Ok(())
        } else {
            Err(MeosError::TransportHttpError { status: self.status })
        }
    }

    pub fn decode_body(&self) -> Result<DecodedBody> {
        let charset = self.charset();
        let text = decode(&self.body, &charset)?.into_owned();
        Ok(DecodedBody { text, charset })
    }
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_ascii_lowercase())
    })
}

fn decode<'a>(bytes: &'a [u8], charset: &str) -> Result<Cow<'a, str>> {
    match charset {
        "utf-8" | "utf8" => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| MeosError::malformed(format!("body is not valid utf-8: {e}")))
        }
        "us-ascii" | "ascii" => {
            if bytes.is_ascii() {
                // ASCII is a subset of UTF-8.
                Ok(String::from_utf8_lossy(bytes))
            } else {
                Err(MeosError::malformed("body is not valid us-ascii"))
            }
        }
        "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "l1" => {
            Ok(Cow::Owned(bytes.iter().copied().map(char::from).collect()))
        }
        other => Err(MeosError::malformed(format!("unsupported charset {other:?}"))),
    }
}
