//! OCR results handed over by the external text-recognition service.
//!
//! Recognition itself happens outside this crate. This module only turns the
//! service response into the line-oriented text the receipt parser reads.

mod read_result;

pub use read_result::{ReadBlock, ReadContent, ReadResult};

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A point of a bounding polygon, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A recognized word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrWord {
    pub text: String,
    pub bounding_polygon: Vec<Point>,
    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

/// A recognized line of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrLine {
    pub text: String,
    pub bounding_polygon: Vec<Point>,
    pub words: Vec<OcrWord>,
}

impl OcrLine {
    /// Mean confidence of the words on this line.
    pub fn confidence(&self) -> Option<f32> {
        if self.words.is_empty() {
            return None;
        }
        let sum: f32 = self.words.iter().map(|w| w.confidence).sum();
        Some(sum / self.words.len() as f32)
    }
}

/// Text recognized from one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Lines joined with `\n`, in reading order.
    pub text: String,

    /// Recognized lines with geometry, when the service provided them.
    pub lines: Vec<OcrLine>,
}

impl OcrResult {
    /// Wrap plain text that was recognized elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lines: Vec::new(),
        }
    }

    /// Build a result from recognized lines.
    pub fn from_lines(lines: Vec<OcrLine>) -> Self {
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, lines }
    }

    /// Parse the JSON response of the image-analysis "read" feature.
    pub fn from_read_result_json(json: &str) -> Result<Self, OcrError> {
        let response: ReadResult =
            serde_json::from_str(json).map_err(|e| OcrError::Malformed(e.to_string()))?;
        Ok(response.into_ocr_result())
    }

    /// Whether no text was recognized.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Fail with [`OcrError::NoText`] when nothing was recognized.
    pub fn require_text(self) -> Result<Self, OcrError> {
        if self.is_empty() {
            Err(OcrError::NoText)
        } else {
            Ok(self)
        }
    }

    /// Mean word confidence over all lines that report one.
    pub fn mean_confidence(&self) -> Option<f32> {
        let scores: Vec<f32> = self.lines.iter().filter_map(OcrLine::confidence).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f32>() / scores.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, confidences: &[f32]) -> OcrLine {
        OcrLine {
            text: text.to_string(),
            bounding_polygon: Vec::new(),
            words: confidences
                .iter()
                .map(|&confidence| OcrWord {
                    text: "w".to_string(),
                    bounding_polygon: Vec::new(),
                    confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn test_from_lines_joins_text() {
        let result = OcrResult::from_lines(vec![line("Nome do Cliente", &[]), line("Maria", &[])]);
        assert_eq!(result.text, "Nome do Cliente\nMaria");
        assert!(!result.is_empty());
    }

    #[test]
    fn test_require_text() {
        assert!(matches!(
            OcrResult::from_text("  \n ").require_text(),
            Err(OcrError::NoText)
        ));
        assert!(OcrResult::from_text("Total Geral").require_text().is_ok());
    }

    #[test]
    fn test_mean_confidence() {
        let result = OcrResult::from_lines(vec![line("a", &[1.0, 0.5]), line("b", &[0.25]), line("c", &[])]);
        let mean = result.mean_confidence().unwrap();
        assert!((mean - 0.5).abs() < 1e-6);
        assert_eq!(OcrResult::from_text("x").mean_confidence(), None);
    }
}
