//! Content types and charsets
//!
//! A [`ContentType`] is parsed eagerly from a MIME string so that malformed
//! values are rejected at the call that supplies them. The charset attribute
//! selects the [`Charset`] used to turn message text into body bytes.

use crate::error::{PactError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Metadata key under which the resolved content type is stored
pub const CONTENT_TYPE_KEY: &str = "contentType";

/// Check whether a metadata key names the content type
///
/// Matches `contentType` and `content-type` in any letter case.
pub fn is_content_type_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower == "contenttype" || lower == "content-type"
}

/// Character set used to encode message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Charset {
    /// UTF-8 (the default)
    #[default]
    Utf8,
    /// 7-bit US-ASCII
    UsAscii,
    /// ISO-8859-1 (Latin-1)
    Iso8859_1,
    /// UTF-16, written big-endian after a byte order mark
    Utf16,
    /// UTF-16 big-endian, no byte order mark
    Utf16Be,
    /// UTF-16 little-endian, no byte order mark
    Utf16Le,
}

const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

impl Charset {
    /// Canonical charset name
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
        }
    }

    /// Encode text into bytes
    ///
    /// Characters the charset cannot represent are replaced with `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Charset::Utf16 => {
                let mut bytes = UTF16_BE_BOM.to_vec();
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }

    /// Decode bytes back into text
    ///
    /// Invalid sequences decode to U+FFFD. `UTF-16` honours a leading byte
    /// order mark and reads big-endian without one.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::UsAscii | Charset::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => utf16_to_string(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => utf16_to_string(rest, u16::from_le_bytes),
                _ => utf16_to_string(bytes, u16::from_be_bytes),
            },
            Charset::Utf16Be => utf16_to_string(bytes, u16::from_be_bytes),
            Charset::Utf16Le => utf16_to_string(bytes, u16::from_le_bytes),
        }
    }

    /// Check that bytes are well formed in this charset
    pub fn is_valid(&self, bytes: &[u8]) -> bool {
        match self {
            Charset::Utf8 => std::str::from_utf8(bytes).is_ok(),
            Charset::UsAscii => bytes.is_ascii(),
            Charset::Iso8859_1 => true,
            Charset::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => is_valid_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => is_valid_utf16(rest, u16::from_le_bytes),
                _ => is_valid_utf16(bytes, u16::from_be_bytes),
            },
            Charset::Utf16Be => is_valid_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => is_valid_utf16(bytes, u16::from_le_bytes),
        }
    }
}

fn utf16_units(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> impl Iterator<Item = u16> + '_ {
    bytes.chunks_exact(2).map(move |pair| unit([pair[0], pair[1]]))
}

fn utf16_to_string(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let mut text: String = char::decode_utf16(utf16_units(bytes, unit))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if bytes.len() % 2 == 1 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn is_valid_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> bool {
    bytes.len() % 2 == 0 && char::decode_utf16(utf16_units(bytes, unit)).all(|c| c.is_ok())
}

impl FromStr for Charset {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_matches('"').to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Iso8859_1),
            "UTF-16" | "UTF16" => Ok(Charset::Utf16),
            "UTF-16BE" | "UTF16BE" => Ok(Charset::Utf16Be),
            "UTF-16LE" | "UTF16LE" => Ok(Charset::Utf16Le),
            other => Err(PactError::UnsupportedCharset(other.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed MIME content type
///
/// # Examples
///
/// ```
/// use pactum_core::content_type::{Charset, ContentType};
///
/// let ct: ContentType = "application/vnd.order+json; charset=ISO-8859-1".parse().unwrap();
/// assert!(ct.is_json());
/// assert_eq!(ct.charset().unwrap(), Charset::Iso8859_1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType {
    main_type: String,
    sub_type: String,
    attributes: BTreeMap<String, String>,
}

impl ContentType {
    /// `application/json`
    pub fn json() -> Self {
        Self::from_parts("application", "json")
    }

    /// `application/xml`
    pub fn xml() -> Self {
        Self::from_parts("application", "xml")
    }

    /// `text/plain`
    pub fn text_plain() -> Self {
        Self::from_parts("text", "plain")
    }

    fn from_parts(main_type: &str, sub_type: &str) -> Self {
        ContentType {
            main_type: main_type.to_string(),
            sub_type: sub_type.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Primary type token, e.g. `application`
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    /// Sub type token, e.g. `json`
    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    /// Look up a parameter such as `charset`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Resolve the charset, defaulting to UTF-8
    pub fn charset(&self) -> Result<Charset> {
        match self.attribute("charset") {
            Some(name) => name.parse(),
            None => Ok(Charset::Utf8),
        }
    }

    /// The type without parameters, e.g. `application/json`
    pub fn base_type(&self) -> String {
        format!("{}/{}", self.main_type, self.sub_type)
    }

    /// JSON or a `+json` structured syntax suffix
    pub fn is_json(&self) -> bool {
        self.sub_type == "json" || self.sub_type.ends_with("+json")
    }

    /// XML or a `+xml` structured syntax suffix
    pub fn is_xml(&self) -> bool {
        self.sub_type == "xml" || self.sub_type.ends_with("+xml")
    }

    /// Any `text/*` type
    pub fn is_text(&self) -> bool {
        self.main_type == "text"
    }

    fn is_token(s: &str) -> bool {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&^_.+-*".contains(c))
    }
}

impl FromStr for ContentType {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(';');
        let essence = parts.next().unwrap_or_default().trim();
        let (main_type, sub_type) = essence
            .split_once('/')
            .ok_or_else(|| PactError::invalid_content_type(s, "expected 'type/subtype'"))?;
        let main_type = main_type.trim().to_ascii_lowercase();
        let sub_type = sub_type.trim().to_ascii_lowercase();
        if !ContentType::is_token(&main_type) {
            return Err(PactError::invalid_content_type(s, "invalid primary type"));
        }
        if !ContentType::is_token(&sub_type) {
            return Err(PactError::invalid_content_type(s, "invalid sub type"));
        }

        let mut attributes = BTreeMap::new();
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (name, value) = param.split_once('=').ok_or_else(|| {
                PactError::invalid_content_type(s, format!("parameter '{}' has no value", param))
            })?;
            let name = name.trim().to_ascii_lowercase();
            if !ContentType::is_token(&name) {
                return Err(PactError::invalid_content_type(
                    s,
                    format!("invalid parameter name '{}'", name),
                ));
            }
            attributes.insert(name, value.trim().trim_matches('"').to_string());
        }

        Ok(ContentType {
            main_type,
            sub_type,
            attributes,
        })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.sub_type)?;
        for (name, value) in &self.attributes {
            write!(f, "; {}={}", name, value)?;
        }
        Ok(())
    }
}

impl Serialize for ContentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
