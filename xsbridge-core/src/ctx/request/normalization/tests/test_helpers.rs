use crate::ctx::request::UploadedFile;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fs;
use std::path::Path;

pub(crate) fn input_to_header_map(input: &[(&str, &str)]) -> HeaderMap {
    let mut header_map = HeaderMap::new();
    for (k, v) in input {
        let name: HeaderName = k.parse().expect("invalid header name");
        let value: HeaderValue = v.parse().expect("invalid header value");
        header_map.append(name, value);
    }
    header_map
}

/// Writes `content` into `dir` the way a host framework spools an upload.
pub(crate) fn spool_upload(dir: &Path, file: &str, original: &str, content: &[u8]) -> UploadedFile {
    let path = dir.join(file);
    fs::write(&path, content).expect("failed to spool upload");
    UploadedFile::new(path, original, content.len() as u64)
}

/// Joins multipart parts with CRLF line endings and the given boundary.
pub(crate) fn multipart_body(boundary: &str, parts: &[(Vec<(&str, &str)>, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (headers, body) in parts {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        for (k, v) in headers {
            out.extend_from_slice(format!("{k}: {v}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(body.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}
