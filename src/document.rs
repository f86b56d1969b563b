//! PDF export of a generated plan.
//!
//! The export is lossy by construction: the document fonts only cover a
//! single-byte character set, so the plan text is narrowed to Latin-1 under an
//! explicit [`EncodingFallback`] policy. With the default
//! [`EncodingFallback::Replace`] policy every unrepresentable character becomes
//! [`PLACEHOLDER`] and the export never fails. The loss is silent for the
//! caller but counted in [`PlanDocument::replaced_characters`].

use crate::pdf::PdfWriter;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use log::debug;

pub const DOCUMENT_TITLE: &str = "Financial Goal Plan";
pub const PDF_FILE_NAME: &str = "financial_plan.pdf";
pub const PDF_MIME_TYPE: &str = "application/pdf";

pub const RUPEE_SIGN: char = '\u{20B9}';
pub const RUPEE_REPLACEMENT: &str = "INR ";

/// Byte written in place of a character outside Latin-1.
pub const PLACEHOLDER: u8 = b'?';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingFallback {
    /// Substitute [`PLACEHOLDER`] for each character above U+00FF.
    #[default]
    Replace,
    /// Refuse lines that are not pure Latin-1; such lines take the UTF-8
    /// fallback path in [`PlanDocument`] instead.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub bytes: Vec<u8>,
    pub replaced: usize,
}

/// Encodes `text` as Latin-1. Returns `None` only under
/// [`EncodingFallback::Strict`] when a character is out of range.
pub fn encode_latin1(text: &str, fallback: EncodingFallback) -> Option<EncodedText> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;

    for ch in text.chars() {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => bytes.push(byte),
            Err(_) => match fallback {
                EncodingFallback::Replace => {
                    bytes.push(PLACEHOLDER);
                    replaced += 1;
                }
                EncodingFallback::Strict => return None,
            },
        }
    }

    Some(EncodedText { bytes, replaced })
}

/// Spells out the rupee sign, which Latin-1 cannot carry.
pub fn replace_currency_symbols(text: &str) -> String {
    text.replace(RUPEE_SIGN, RUPEE_REPLACEMENT)
}

#[derive(Debug, Clone)]
pub struct PlanDocument {
    title: Vec<u8>,
    paragraphs: Vec<Vec<u8>>,
    replaced: usize,
    created_at: DateTime<Utc>,
}

impl PlanDocument {
    pub fn from_plan_text(text: &str) -> Self {
        Self::with_fallback(text, EncodingFallback::Replace)
    }

    /// One paragraph per `'\n'`-separated line of `text`, after the rupee
    /// substitution. An empty text still yields a single empty paragraph.
    pub fn with_fallback(text: &str, fallback: EncodingFallback) -> Self {
        let text = replace_currency_symbols(text);
        let mut replaced = 0;

        let paragraphs = text
            .split('\n')
            .map(|line| {
                let encoded = encode_line(line, fallback);
                replaced += encoded.replaced;
                encoded.bytes
            })
            .collect::<Vec<_>>();

        let title = encode_line(DOCUMENT_TITLE, fallback);
        replaced += title.replaced;

        if replaced > 0 {
            debug!(
                "Replaced {} character(s) outside Latin-1 while encoding the plan",
                replaced
            );
        }

        Self {
            title: title.bytes,
            paragraphs,
            replaced,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn title(&self) -> &[u8] {
        &self.title
    }

    pub fn paragraphs(&self) -> &[Vec<u8>] {
        &self.paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn replaced_characters(&self) -> usize {
        self.replaced
    }

    /// Serializes the document. All text is already single-byte at this
    /// point, so the final step writes bytes as-is and cannot lose more.
    pub fn to_pdf_bytes(&self) -> Vec<u8> {
        let mut writer = PdfWriter::new(&self.title);
        for paragraph in &self.paragraphs {
            writer.paragraph(paragraph);
        }
        debug!(
            "Rendered plan PDF: {} paragraph(s) on {} page(s)",
            self.paragraphs.len(),
            writer.page_count()
        );
        writer.finish(self.created_at)
    }
}

// The UTF-8 branch is unreachable with `Replace`, which never refuses a line.
fn encode_line(line: &str, fallback: EncodingFallback) -> EncodedText {
    match encode_latin1(line, fallback) {
        Some(encoded) => encoded,
        None => {
            debug!("Line is not Latin-1; writing its UTF-8 bytes unchanged");
            EncodedText {
                bytes: line.as_bytes().to_vec(),
                replaced: 0,
            }
        }
    }
}

/// Renders plan text to PDF bytes with the default replace policy.
pub fn render_plan_pdf(text: &str) -> Vec<u8> {
    PlanDocument::from_plan_text(text).to_pdf_bytes()
}

/// A finished PDF offered to the user as an inline `data:` download.
#[derive(Debug, Clone)]
pub struct DownloadLink {
    bytes: Vec<u8>,
}

impl DownloadLink {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_document(document: &PlanDocument) -> Self {
        Self::new(document.to_pdf_bytes())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &'static str {
        PDF_FILE_NAME
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", PDF_MIME_TYPE, STANDARD.encode(&self.bytes))
    }

    pub fn to_html_anchor(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">Download PDF Report</a>",
            self.data_uri(),
            self.file_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rupee_sign_becomes_inr() {
        assert_eq!(
            replace_currency_symbols("Save ₹5000 and ₹200"),
            "Save INR 5000 and INR 200"
        );

        let document = PlanDocument::from_plan_text("Budget: ₹1,000");
        assert_eq!(document.paragraphs()[0], b"Budget: INR 1,000".to_vec());
        assert_eq!(document.replaced_characters(), 0);
    }

    #[test]
    fn test_one_paragraph_per_line() {
        assert_eq!(PlanDocument::from_plan_text("").paragraph_count(), 1);
        assert_eq!(PlanDocument::from_plan_text("a\nb\nc").paragraph_count(), 3);
        assert_eq!(PlanDocument::from_plan_text("a\n\nb\n").paragraph_count(), 4);
    }

    #[test]
    fn test_replace_policy_substitutes_placeholder() {
        let encoded = encode_latin1("€ café 📈", EncodingFallback::Replace).unwrap();
        assert_eq!(encoded.bytes, b"? caf\xe9 ?".to_vec());
        assert_eq!(encoded.replaced, 2);
    }

    #[test]
    fn test_strict_policy_takes_utf8_path() {
        assert!(encode_latin1("€", EncodingFallback::Strict).is_none());
        assert_eq!(
            encode_latin1("café", EncodingFallback::Strict).unwrap().bytes,
            b"caf\xe9".to_vec()
        );

        let document = PlanDocument::with_fallback("cost: €5", EncodingFallback::Strict);
        assert_eq!(document.paragraphs()[0], "cost: €5".as_bytes().to_vec());
        assert_eq!(document.replaced_characters(), 0);
    }

    #[test]
    fn test_pdf_contains_header_and_body() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let bytes = PlanDocument::from_plan_text("Tip (1): invest ₹500 in SIPs")
            .with_created_at(created)
            .to_pdf_bytes();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("(Financial Goal Plan) Tj"));
        assert!(text.contains("(Tip \\(1\\): invest INR 500 in SIPs) Tj"));
    }

    #[test]
    fn test_pdf_output_is_deterministic_for_fixed_date() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let a = PlanDocument::from_plan_text("same").with_created_at(created);
        let b = PlanDocument::from_plan_text("same").with_created_at(created);
        assert_eq!(a.to_pdf_bytes(), b.to_pdf_bytes());
    }

    #[test]
    fn test_download_link() {
        let link = DownloadLink::new(b"%PDF".to_vec());
        assert_eq!(link.file_name(), "financial_plan.pdf");
        assert_eq!(link.data_uri(), "data:application/pdf;base64,JVBERg==");
        assert!(link
            .to_html_anchor()
            .contains("download=\"financial_plan.pdf\""));
    }
}
