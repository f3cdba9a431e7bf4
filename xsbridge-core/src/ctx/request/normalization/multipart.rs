//! Decomposition of raw multipart bodies into entities.
//!
//! Grammar handled here (RFC 2046 § 5.1.1, minus transport padding):
//!
//! ```text
//! preamble CRLF "--" boundary CRLF
//! part-headers CRLF
//! part-body CRLF "--" boundary ( CRLF next-part | "--" epilogue )
//! ```
//!
//! Part headers end up as the entity headers. Simple named fields also
//! populate the entity parameters, and parts that are multipart themselves
//! are decomposed into nested entities.

use crate::config::MultipartConfig;
use crate::ctx::request::Entity;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const CLOSE: &[u8] = b"--";

/// RFC 2046 caps multipart boundaries at 70 characters.
const MAX_BOUNDARY_LEN: usize = 70;

#[derive(Debug, Error)]
pub enum MultipartError {
    #[error("missing boundary in multipart Content-Type \"{content_type}\"")]
    MissingBoundary { content_type: String },

    #[error("multipart boundary longer than {max} characters")]
    BoundaryTooLong { max: usize },

    #[error("non-ASCII multipart Content-Type \"{content_type}\"")]
    NonAsciiContentType { content_type: String },

    #[error("unexpected end of multipart data")]
    UnexpectedEof,

    #[error("invalid multipart format: {detail}")]
    InvalidFormat { detail: &'static str },

    #[error("invalid part headers: {detail}")]
    InvalidPartHeaders { detail: String },

    #[error("too many parts: limit is {max}")]
    TooManyParts { max: usize },
}

/// True when the content type announces a multipart payload.
pub fn is_multipart(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("multipart")
}

/// True when the content type is the `form-data` flavour of multipart.
pub fn is_form_data(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("form-data")
}

/// Extracts the `boundary` parameter from a multipart content type.
pub fn parse_boundary(content_type: &str) -> Result<String, MultipartError> {
    let boundary = header_parameters(content_type)
        .into_iter()
        .find(|(k, v)| k == "boundary" && !v.is_empty())
        .map(|(_, v)| v)
        .ok_or_else(|| MultipartError::MissingBoundary {
            content_type: content_type.to_string(),
        })?;

    if boundary.len() > MAX_BOUNDARY_LEN {
        return Err(MultipartError::BoundaryTooLong {
            max: MAX_BOUNDARY_LEN,
        });
    }

    Ok(boundary)
}

/// Splits multipart bodies into entities.
#[derive(Debug, Clone)]
pub struct MultipartDecomposer {
    max_parts: usize,
    max_nesting_depth: usize,
}

impl Default for MultipartDecomposer {
    fn default() -> Self {
        Self::new(&MultipartConfig::default())
    }
}

impl MultipartDecomposer {
    pub fn new(config: &MultipartConfig) -> Self {
        Self {
            max_parts: config.max_parts,
            max_nesting_depth: config.max_nesting_depth,
        }
    }

    pub fn decompose(
        &self,
        content_type: &str,
        body: &Bytes,
    ) -> Result<Vec<Entity>, MultipartError> {
        if !content_type.is_ascii() {
            return Err(MultipartError::NonAsciiContentType {
                content_type: content_type.to_string(),
            });
        }

        let boundary = parse_boundary(content_type)?;
        self.parse(body, &boundary, 0)
    }

    fn parse(
        &self,
        body: &Bytes,
        boundary: &str,
        depth: usize,
    ) -> Result<Vec<Entity>, MultipartError> {
        let delimiter = format!("--{boundary}").into_bytes();
        let mut entities = Vec::new();

        // Skip the preamble.
        let mut pos = find_delimiter(body, &delimiter, 0)?;

        loop {
            let delimiter_end = pos + delimiter.len();
            if body[delimiter_end..].starts_with(CLOSE) {
                break;
            }

            if entities.len() >= self.max_parts {
                return Err(MultipartError::TooManyParts {
                    max: self.max_parts,
                });
            }

            pos = delimiter_end;
            if !body[pos..].starts_with(CRLF) {
                return Err(MultipartError::InvalidFormat {
                    detail: "expected CRLF after boundary",
                });
            }
            pos += CRLF.len();

            let (headers, header_end) = parse_part_headers(body, pos)?;

            // The CRLF before the next delimiter belongs to the delimiter.
            let data_end = find_delimiter(body, &delimiter, header_end)?;
            let data = if data_end >= header_end + CRLF.len() {
                body.slice(header_end..data_end - CRLF.len())
            } else {
                Bytes::new()
            };

            entities.push(self.build_entity(headers, data, depth)?);
            pos = data_end;
        }

        Ok(entities)
    }

    fn build_entity(
        &self,
        headers: HeaderMap,
        data: Bytes,
        depth: usize,
    ) -> Result<Entity, MultipartError> {
        let mut parameters = BTreeMap::new();

        if let Some(disposition) = header_str(&headers, http::header::CONTENT_DISPOSITION) {
            let params = header_parameters(disposition);
            let name = params.iter().find(|(k, _)| k == "name").map(|(_, v)| v);
            let has_filename = params.iter().any(|(k, _)| k == "filename");

            if let (Some(name), false) = (name, has_filename) {
                if let Ok(text) = std::str::from_utf8(&data) {
                    parameters.insert(name.clone(), text.to_string());
                }
            }
        }

        let nested_boundary = header_str(&headers, http::header::CONTENT_TYPE)
            .filter(|ct| is_multipart(ct))
            .and_then(|ct| parse_boundary(ct).ok());

        let nested = match nested_boundary {
            Some(boundary) if depth < self.max_nesting_depth => {
                self.parse(&data, &boundary, depth + 1)?
            }
            _ => Vec::new(),
        };

        Ok(Entity::new(headers, parameters, data).with_entities(nested))
    }
}

/// Finds the next delimiter at or after `start`.
///
/// A delimiter only counts at the very start of the body or right after a
/// CRLF, and must be followed by CRLF or `--`.
fn find_delimiter(
    data: &[u8],
    delimiter: &[u8],
    start: usize,
) -> Result<usize, MultipartError> {
    if data.len() < delimiter.len() {
        return Err(MultipartError::UnexpectedEof);
    }

    let last = data.len() - delimiter.len();
    for i in start..=last {
        if !data[i..].starts_with(delimiter) {
            continue;
        }

        if i != 0 && (i < 2 || &data[i - 2..i] != CRLF) {
            continue;
        }

        let suffix = &data[i + delimiter.len()..];
        if suffix.len() < 2 {
            return Err(MultipartError::UnexpectedEof);
        }
        if !suffix.starts_with(CRLF) && !suffix.starts_with(CLOSE) {
            continue;
        }

        return Ok(i);
    }

    Err(MultipartError::UnexpectedEof)
}

fn parse_part_headers(data: &[u8], start: usize) -> Result<(HeaderMap, usize), MultipartError> {
    let mut headers = HeaderMap::new();
    let mut pos = start;

    loop {
        let line_end = find_crlf(data, pos)?;
        let line = &data[pos..line_end];
        if line.is_empty() {
            return Ok((headers, line_end + CRLF.len()));
        }

        let line = std::str::from_utf8(line).map_err(|_| MultipartError::InvalidPartHeaders {
            detail: "invalid UTF-8 in header".to_string(),
        })?;

        let Some((name, value)) = line.split_once(':') else {
            return Err(MultipartError::InvalidPartHeaders {
                detail: format!("header line without ':' \"{line}\""),
            });
        };

        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| {
            MultipartError::InvalidPartHeaders {
                detail: format!("invalid header name '{}'", name.trim()),
            }
        })?;
        let value = HeaderValue::from_bytes(value.trim().as_bytes()).map_err(|_| {
            MultipartError::InvalidPartHeaders {
                detail: format!("invalid value for header '{name}'"),
            }
        })?;
        headers.append(name, value);

        pos = line_end + CRLF.len();
    }
}

fn find_crlf(data: &[u8], start: usize) -> Result<usize, MultipartError> {
    data.get(start..)
        .and_then(|rest| rest.windows(2).position(|w| w == CRLF))
        .map(|offset| start + offset)
        .ok_or(MultipartError::UnexpectedEof)
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Parses `;`-separated `key=value` parameters following the media type.
///
/// Keys are lowercased. Values may be quoted strings with backslash escapes.
/// Attributes without a value are skipped.
pub(crate) fn header_parameters(value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let Some((_, mut rest)) = value.split_once(';') else {
        return params;
    };

    loop {
        rest = rest.trim_start_matches([' ', '\t', ';']);
        if rest.is_empty() {
            break;
        }

        let Some(sep) = rest.find(['=', ';']) else {
            break;
        };
        if rest.as_bytes()[sep] == b';' {
            rest = &rest[sep..];
            continue;
        }

        let key = rest[..sep].trim().to_ascii_lowercase();
        let after = rest[sep + 1..].trim_start();

        let (val, remaining) = match after.strip_prefix('"') {
            Some(quoted) => unquote(quoted),
            None => {
                let end = after.find(';').unwrap_or(after.len());
                (after[..end].trim().to_string(), &after[end..])
            }
        };

        params.push((key, val));
        rest = remaining;
    }

    params
}

/// Reads a quoted string whose opening quote was already consumed.
fn unquote(s: &str) -> (String, &str) {
    let mut out = String::new();
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => return (out, &s[i + 1..]),
            c => out.push(c),
        }
    }

    // Unterminated: take the remainder.
    (out, "")
}
