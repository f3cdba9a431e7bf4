use std::fs;
use std::path::{Path, PathBuf};
use xsbridge_core::ctx::UploadedFile;

/// Writes `content` into `dir` the way a host framework spools an upload.
pub fn spool_upload(dir: &Path, file: &str, original: &str, content: &[u8]) -> UploadedFile {
    let path = dir.join(file);
    fs::write(&path, content).unwrap();
    UploadedFile::new(path, original, content.len() as u64)
}

/// Multipart body with one CRLF-delimited part per `(content_type, body)`.
pub fn multipart_body(boundary: &str, parts: &[(&str, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (content_type, body) in parts {
        out.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: {content_type}\r\n\r\n{body}\r\n").as_bytes(),
        );
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("xsbridge.toml");
    fs::write(&path, contents).unwrap();
    path
}
