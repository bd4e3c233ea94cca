//! Response interpretation
//!
//! Success is decided by status alone (201 Created). Any other status must
//! carry a CloudFront error document:
//!
//! ```xml
//! <ErrorResponse>
//!   <Error><Type>Sender</Type><Code>AccessDenied</Code><Message>...</Message></Error>
//!   <RequestId>...</RequestId>
//! </ErrorResponse>
//! ```

use crate::cloudfront::error::{InvalidationError, Result};
use bytes::Bytes;
use hyper::StatusCode;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Status and fully-read body of a CloudFront response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Turn a raw response into success or a typed error
pub fn interpret_response(response: &RawResponse) -> Result<()> {
    if response.body.is_empty() {
        return Err(InvalidationError::EmptyResponse);
    }

    if response.status == StatusCode::CREATED {
        return Ok(());
    }

    match parse_error_body(&response.body) {
        Ok((code, message)) => Err(InvalidationError::Remote {
            status: response.status,
            code,
            message,
            body: response.body.clone(),
        }),
        Err(reason) => Err(InvalidationError::MalformedResponse {
            status: response.status,
            reason,
            body: response.body.clone(),
        }),
    }
}

/// Extract the first `Code` and first `Message` text from an error document
///
/// Returns a human-readable reason when the body is not well-formed XML or
/// either element is missing or empty.
pub fn parse_error_body(xml_data: &[u8]) -> std::result::Result<(String, String), String> {
    let mut reader = Reader::from_reader(xml_data);
    reader.config_mut().trim_text_start = true;
    reader.config_mut().trim_text_end = true;

    let mut code: Option<String> = None;
    let mut message: Option<String> = None;
    let mut current_text = String::with_capacity(128);
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                current_text.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| format!("XML parse error: {}", e))?;
                current_text.push_str(&text);
            }
            Ok(Event::CData(e)) => {
                current_text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"Code" if code.is_none() && !current_text.is_empty() => {
                        code = Some(std::mem::take(&mut current_text));
                    }
                    b"Message" if message.is_none() && !current_text.is_empty() => {
                        message = Some(std::mem::take(&mut current_text));
                    }
                    _ => {}
                }
                current_text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML parse error: {}", e)),
            _ => {}
        }
    }

    if depth != 0 {
        return Err("XML document ended with unclosed elements".to_string());
    }

    match (code, message) {
        (Some(code), Some(message)) => Ok((code, message)),
        (None, _) => Err("missing Code element".to_string()),
        (_, None) => Err("missing Message element".to_string()),
    }
}
