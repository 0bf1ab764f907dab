//! Response envelopes
//!
//! Reads return data directly (`{customers, total}`, a bare array or a
//! single record). Writes return an acknowledgment (`{success: true, id, ...}`)
//! or the created record with `201 Created`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{ser::SerializeMap, Serialize, Serializer};

/// A named collection with its total, optionally paged.
#[derive(Debug)]
pub struct Listing<T> {
    key: &'static str,
    items: Vec<T>,
    total: usize,
    page: Option<Pagination>,
}

impl<T> Listing<T> {
    /// Unpaged listing; `total` is the item count.
    pub fn new(key: &'static str, items: Vec<T>) -> Self {
        let total = items.len();
        Self { key, items, total, page: None }
    }

    /// Paged listing; `total` counts the items before slicing.
    pub fn paged(key: &'static str, items: Vec<T>, page: Pagination) -> Self {
        let total = items.len();
        let items = page.slice(items);
        Self { key, items, total, page: Some(page) }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl<T: Serialize> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.page.is_some() { 4 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("total", &self.total)?;
        if let Some(page) = &self.page {
            map.serialize_entry("page", &page.page)?;
            map.serialize_entry("limit", &page.limit)?;
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Listing<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Offset/limit pagination; `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Parse raw query values. Missing, non-numeric or zero values fall back
    /// to page 1 and `default_limit`.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, default_limit: usize) -> Self {
        let parse = |raw: Option<&str>, default: usize| {
            raw.and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Self {
            page: parse(page, 1),
            limit: parse(limit, default_limit),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Keep the items that fall on this page.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset()).take(self.limit).collect()
    }
}

/// Write acknowledgment: `{"success": true, ...body}`.
#[derive(Debug, Serialize)]
pub struct Ack<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Ack<T> {
    pub fn new(body: T) -> Self {
        Self { success: true, body }
    }
}

impl<T: Serialize> IntoResponse for Ack<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a delete acknowledgment
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

impl Ack<Deleted> {
    pub fn deleted(id: impl Into<String>) -> Self {
        Ack::new(Deleted { id: id.into() })
    }
}

/// Result of an id-addressed state change: `{success, id, status[, reason]}`.
#[derive(Debug, Serialize)]
pub struct Transition<S> {
    pub success: bool,
    pub id: String,
    pub status: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl<S: Serialize> Transition<S> {
    pub fn new(id: impl Into<String>, status: S) -> Self {
        Self { success: true, id: id.into(), status, reason: None }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl<S: Serialize> IntoResponse for Transition<S> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `201 Created` with the record as body.
pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

/// CSV attachment download
#[derive(Debug, Clone)]
pub struct CsvDownload {
    pub filename: String,
    pub body: String,
}

impl CsvDownload {
    /// Render a header row plus one line per record.
    pub fn new<R, I>(filename: impl Into<String>, header: &[&str], rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut body = csv_line(header.iter().copied());
        for row in rows {
            body.push_str(&csv_line(row));
        }
        Self { filename: filename.into(), body }
    }
}

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Quote a field when it contains a delimiter, a quote or a line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<I>(fields: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}
