//! JSON description of a host request, as consumed by `xsbridge normalize`.
//!
//! ```json
//! {
//!   "method": "POST",
//!   "path": "/app/service.xsjs/orders?id=1",
//!   "headers": [["content-type", "application/json"]],
//!   "cookies": [["sid", "abc"]],
//!   "body": "{\"k\":1}"
//! }
//! ```

use anyhow::{Context, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xsbridge_core::ctx::{FormData, HostRequest, UploadedFile};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFixture {
    pub method: String,
    pub path: String,

    #[serde(default)]
    pub headers: Vec<(String, String)>,

    #[serde(default)]
    pub cookies: Vec<(String, String)>,

    pub body: Option<String>,

    pub form_data: Option<FormDataFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDataFixture {
    #[serde(default)]
    pub fields: Vec<(String, Vec<String>)>,

    #[serde(default)]
    pub files: Vec<(String, Vec<UploadFixture>)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadFixture {
    pub path: PathBuf,
    pub original_filename: String,

    /// Taken from the file itself when omitted.
    pub size: Option<u64>,

    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl RequestFixture {
    pub fn into_host_request(self) -> Result<HostRequest> {
        let mut req = HostRequest::new(self.method, self.path);
        req.headers = header_map(&self.headers)?;
        req.cookies = self.cookies;

        if let Some(body) = self.body {
            req = req.body(body);
        }

        if let Some(form) = self.form_data {
            req = req.form_data(form.into_form_data()?);
        }

        Ok(req)
    }
}

impl FormDataFixture {
    fn into_form_data(self) -> Result<FormData> {
        let mut form = FormData::new();
        for (name, values) in self.fields {
            form = form.field(name, values);
        }

        for (name, uploads) in self.files {
            let files = uploads
                .into_iter()
                .map(UploadFixture::into_uploaded_file)
                .collect::<Result<Vec<_>>>()?;
            form = form.files(name, files);
        }

        Ok(form)
    }
}

impl UploadFixture {
    fn into_uploaded_file(self) -> Result<UploadedFile> {
        let size = match self.size {
            Some(size) => size,
            None => fs::metadata(&self.path)
                .with_context(|| format!("failed to stat upload {}", self.path.display()))?
                .len(),
        };

        let mut file = UploadedFile::new(self.path, self.original_filename, size);
        file.headers = header_map(&self.headers)?;
        Ok(file)
    }
}

fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name '{name}'"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header '{name}'"))?;
        headers.append(name, value);
    }
    Ok(headers)
}
