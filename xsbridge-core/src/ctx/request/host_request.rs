use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::path::PathBuf;

/// Request as handed over by the host HTTP framework.
#[derive(Debug, Clone, Default)]
pub struct HostRequest {
    pub method: String,
    /// Raw URL path, possibly carrying a query string.
    pub path: String,
    pub headers: HeaderMap,
    pub cookies: Vec<(String, String)>,
    pub body: Option<Bytes>,
    /// Present when the host already decomposed a `multipart/form-data` payload.
    pub form_data: Option<FormData>,
}

impl HostRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn form_data(mut self, form_data: FormData) -> Self {
        self.form_data = Some(form_data);
        self
    }
}

/// Fields and uploads decomposed by the host, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pub fields: Vec<(String, Vec<String>)>,
    pub files: Vec<(String, Vec<UploadedFile>)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields
            .push((name.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn files(mut self, name: impl Into<String>, files: Vec<UploadedFile>) -> Self {
        self.files.push((name.into(), files));
        self
    }

    pub fn value_count(&self) -> usize {
        self.fields.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.iter().map(|(_, files)| files.len()).sum()
    }
}

/// An upload the host spooled to a temporary file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Temporary location; removed once its content has been consumed.
    pub path: PathBuf,
    pub original_filename: String,
    pub size: u64,
    pub headers: HeaderMap,
}

impl UploadedFile {
    pub fn new(path: impl Into<PathBuf>, original_filename: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            original_filename: original_filename.into(),
            size,
            headers: HeaderMap::new(),
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}
