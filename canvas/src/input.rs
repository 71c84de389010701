//! Form input: raw control values from the host UI, turned into typed intent.
//!
//! The host reads its text and select inputs verbatim and hands them over in
//! a [`MarkerForm`]. Parsing is lenient in the way browser number inputs
//! are: a leading integer is taken, anything unparseable falls back to the
//! marker defaults.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::num::NonZeroU32;

use crate::consts::DOCUMENT_MIME;
use crate::marker::{MarkerKind, MarkerSpec};

/// Raw values of the marker form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerForm {
    /// Camera type select value (`"ptz"`, `"fixed"`, `"wide-area"`, `"directional"`).
    pub kind: String,
    /// Camera name text input.
    pub name: String,
    /// Radius number input.
    pub radius: String,
    /// Direction number input, in degrees.
    pub orientation: String,
}

impl MarkerForm {
    /// Validate the form into a [`MarkerSpec`].
    ///
    /// An unknown kind falls back to the default (wide-area). Non-positive or
    /// unparseable radii and unparseable orientations are left unset so the
    /// defaults apply.
    #[must_use]
    pub fn to_spec(&self) -> MarkerSpec {
        let kind = MarkerKind::parse(&self.kind).unwrap_or_else(|| {
            if !self.kind.trim().is_empty() {
                log::warn!("unknown camera type {:?}, using wide-area", self.kind);
            }
            MarkerKind::default()
        });
        let label = Some(self.name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        let radius = match parse_leading_int(&self.radius).map(u32::try_from) {
            Some(Ok(r)) => NonZeroU32::new(r),
            _ => None,
        };
        let orientation = match parse_leading_int(&self.orientation).map(i32::try_from) {
            Some(Ok(deg)) => Some(f64::from(deg)),
            _ => None,
        };

        MarkerSpec { kind, label, radius, orientation }
    }
}

/// Parse the leading integer of `raw`, ignoring surrounding whitespace and any
/// trailing non-digit text (`"75px"` is 75). Returns `None` without digits.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Whether an uploaded file's declared MIME type is a PDF.
#[must_use]
pub fn is_document_mime(mime: &str) -> bool {
    mime.trim().eq_ignore_ascii_case(DOCUMENT_MIME)
}
