//! Daily rates XML feed decoding
//!
//! Turns a raw `XML_daily_eng.asp` response body into [`RateRecord`]s:
//! charset detection and windows-1251 transcoding, `ValCurs` document
//! parsing, then per-entry normalization to a per-unit rate.

use crate::error::{RatesError, Result};
use crate::types::{Rate, RateRecord};
use chrono::NaiveDate;
use encoding_rs::WINDOWS_1251;
use std::mem;
use xml::reader::{EventReader, XmlEvent};

const ROOT_ELEMENT: &str = "ValCurs";
const ENTRY_ELEMENT: &str = "Valute";
const UTF8_BOM: &str = "\u{feff}";

/// Child element of `<Valute>` that feeds a record
#[derive(Debug, Clone, Copy)]
enum ValuteField {
    CharCode,
    Nominal,
    Name,
    Value,
}

impl ValuteField {
    fn from_element(name: &str) -> Option<Self> {
        match name {
            "CharCode" => Some(ValuteField::CharCode),
            "Nominal" => Some(ValuteField::Nominal),
            "Name" => Some(ValuteField::Name),
            "Value" => Some(ValuteField::Value),
            _ => None,
        }
    }
}

/// One `<Valute>` entry, kept as raw text until normalized
#[derive(Debug, Default)]
struct XmlValute {
    char_code: String,
    nominal: String,
    name: String,
    value: String,
}

impl XmlValute {
    fn set(&mut self, field: ValuteField, text: String) {
        match field {
            ValuteField::CharCode => self.char_code = text,
            ValuteField::Nominal => self.nominal = text,
            ValuteField::Name => self.name = text,
            ValuteField::Value => self.value = text,
        }
    }
}

/// Decode a full response body for `date` into normalized records.
///
/// `header_charset` is the charset from the HTTP `Content-Type`, used only
/// when the XML declaration does not name an encoding. Malformed entries
/// are dropped; an undecodable document is a [`RatesError::DecodeError`].
pub fn parse_daily(
    body: &[u8],
    header_charset: Option<&str>,
    date: NaiveDate,
) -> Result<Vec<RateRecord>> {
    let text = decode_body(body, header_charset)?;
    let valutes = parse_document(&text)?;

    let total = valutes.len();
    let records: Vec<RateRecord> = valutes
        .into_iter()
        .filter_map(|valute| match normalize_entry(&valute, date) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Dropping {} entry for {}: {}", valute.char_code, date, e);
                None
            }
        })
        .collect();

    log::debug!("Admitted {}/{} entries for {}", records.len(), total, date);
    Ok(records)
}

/// Transcode the body to UTF-8 text.
///
/// windows-1251 bodies are transcoded and their declaration rewritten so the
/// XML parser sees a UTF-8 document. Anything else must already be UTF-8.
pub fn decode_body(body: &[u8], header_charset: Option<&str>) -> Result<String> {
    let label = declared_encoding(body).or_else(|| header_charset.map(str::to_string));

    if label.as_deref().is_some_and(is_windows_1251) {
        let (text, _, had_errors) = WINDOWS_1251.decode(body);
        if had_errors {
            return Err(RatesError::DecodeError(
                "Malformed windows-1251 byte sequence".to_string(),
            ));
        }
        return Ok(rewrite_declaration_as_utf8(&text));
    }

    let text = std::str::from_utf8(body)
        .map_err(|e| RatesError::DecodeError(format!("Response body is not UTF-8: {}", e)))?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}

/// Extract `charset=` from a `Content-Type` header value
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

fn is_windows_1251(label: &str) -> bool {
    matches!(
        label.trim().to_ascii_lowercase().as_str(),
        "windows-1251" | "cp1251" | "x-cp1251"
    )
}

/// Encoding named in the `<?xml ... encoding="..."?>` declaration, if any
fn declared_encoding(body: &[u8]) -> Option<String> {
    let body = body.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(body);
    if !body.starts_with(b"<?xml") {
        return None;
    }
    let end = body.windows(2).position(|w| w == b"?>")?;
    let prolog = String::from_utf8_lossy(&body[..end]);

    let start = prolog.find("encoding")? + "encoding".len();
    let rest = prolog[start..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let close = rest.find(quote)?;
    Some(rest[..close].to_string())
}

fn rewrite_declaration_as_utf8(text: &str) -> String {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    match text.strip_prefix("<?xml").and_then(|rest| rest.split_once("?>")) {
        Some((_, body)) => format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{}", body),
        None => text.to_string(),
    }
}

/// Collect every `<Valute>` child of the `<ValCurs>` root.
///
/// Only the direct text of known fields is kept: markup nested inside a
/// field and unknown elements are skipped, and a repeated field keeps its
/// last occurrence. Broken XML or a foreign root is a decode error.
fn parse_document(text: &str) -> Result<Vec<XmlValute>> {
    let mut valutes = Vec::new();
    let mut current: Option<XmlValute> = None;
    let mut field: Option<ValuteField> = None;
    let mut buffer = String::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    for event in EventReader::from_str(text) {
        let event =
            event.map_err(|e| RatesError::DecodeError(format!("XML parse error: {}", e)))?;

        match event {
            XmlEvent::StartElement { name, .. } => {
                depth += 1;
                match depth {
                    1 if name.local_name != ROOT_ELEMENT => {
                        return Err(RatesError::DecodeError(format!(
                            "Unexpected root element <{}>, expected <{}>",
                            name.local_name, ROOT_ELEMENT
                        )));
                    }
                    1 => seen_root = true,
                    2 if name.local_name == ENTRY_ELEMENT => {
                        current = Some(XmlValute::default());
                    }
                    3 if current.is_some() => {
                        field = ValuteField::from_element(&name.local_name);
                        buffer.clear();
                    }
                    _ => {}
                }
            }
            XmlEvent::Characters(chunk) | XmlEvent::CData(chunk) | XmlEvent::Whitespace(chunk)
                if depth == 3 && field.is_some() =>
            {
                buffer.push_str(&chunk);
            }
            XmlEvent::EndElement { .. } => {
                match depth {
                    3 => {
                        if let (Some(valute), Some(field)) = (current.as_mut(), field.take()) {
                            valute.set(field, mem::take(&mut buffer));
                        }
                    }
                    2 => valutes.extend(current.take()),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err(RatesError::DecodeError(
            "Document has no root element".to_string(),
        ));
    }

    Ok(valutes)
}

/// Parse a comma-decimal feed value such as `"67,1234"`
pub fn parse_value(raw: &str) -> Result<Rate> {
    let value: Rate = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| RatesError::FieldParseError {
            field: "Value",
            value: raw.to_string(),
        })?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RatesError::FieldParseError {
            field: "Value",
            value: raw.to_string(),
        })
    }
}

/// Parse a lot size; zero is rejected
pub fn parse_nominal(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(nominal) if nominal > 0 => Ok(nominal),
        _ => Err(RatesError::FieldParseError {
            field: "Nominal",
            value: raw.to_string(),
        }),
    }
}

fn normalize_entry(valute: &XmlValute, date: NaiveDate) -> Result<RateRecord> {
    let value = parse_value(&valute.value)?;
    let nominal = parse_nominal(&valute.nominal)?;

    Ok(RateRecord::new(
        date,
        valute.char_code.trim(),
        valute.name.trim(),
        value / Rate::from(nominal),
    ))
}
