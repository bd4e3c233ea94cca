//! Invalidation request construction

/// Placeholder substituted with the distribution id in the API path template
pub const DISTRIBUTION_ID_PLACEHOLDER: &str = "{distribution_id}";

pub const CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// A signed, ready-to-send invalidation request
///
/// Built fresh for every `invalidate` call; nothing in it is reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    /// Request path with the distribution id substituted
    pub path: String,
    /// `Date` header value (also the signed value)
    pub date: String,
    /// `Authorization` header value
    pub authorization: String,
    /// XML `InvalidationBatch` document
    pub body: String,
}

impl InvalidationRequest {
    /// Request headers in the order they are sent
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            ("date", self.date.clone()),
            ("content-type", CONTENT_TYPE.to_string()),
            ("authorization", self.authorization.clone()),
            ("content-length", self.body.len().to_string()),
        ]
    }
}

/// Substitute a distribution id into an API path template
pub fn expand_path_template(template: &str, distribution_id: &str) -> String {
    template.replace(DISTRIBUTION_ID_PLACEHOLDER, distribution_id)
}

/// Build the `InvalidationBatch` XML body
///
/// One `<Path>` per entry, in input order, followed by a single
/// `<CallerReference>` of `{distribution_id}{unix_timestamp}`.
pub fn build_invalidation_batch<S: AsRef<str>>(
    distribution_id: &str,
    paths: &[S],
    unix_timestamp: i64,
) -> String {
    let paths_len: usize = paths.iter().map(|p| p.as_ref().len() + 13).sum();
    let mut xml = String::with_capacity(paths_len + distribution_id.len() + 128);

    xml.push_str("<InvalidationBatch>\n    ");
    for path in paths {
        xml.push_str("<Path>");
        xml_escape_into(&mut xml, path.as_ref());
        xml.push_str("</Path>");
    }
    xml.push_str("\n    <CallerReference>");
    xml_escape_into(&mut xml, distribution_id);
    xml.push_str(&unix_timestamp.to_string());
    xml.push_str("</CallerReference>\n</InvalidationBatch>\n");
    xml
}

/// Escape XML special characters into an existing buffer
fn xml_escape_into(buf: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&apos;"),
            _ => buf.push(ch),
        }
    }
}
