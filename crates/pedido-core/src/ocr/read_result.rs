//! Response of the image-analysis "read" feature.
//!
//! Only the parts the receipt parser needs are modelled:
//!
//! ```json
//! { "readResult": { "blocks": [ { "lines": [ { "text": "...", "boundingPolygon": [...], "words": [...] } ] } ] } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{OcrLine, OcrResult};

/// Top-level analysis response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadResult {
    pub read_result: Option<ReadContent>,
}

/// The `readResult` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadContent {
    pub blocks: Vec<ReadBlock>,
}

/// A block of recognized lines.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadBlock {
    pub lines: Vec<OcrLine>,
}

impl ReadResult {
    /// Lines of the first block. The service puts a whole receipt
    /// screenshot in one block; further blocks are ignored.
    pub fn into_ocr_result(self) -> OcrResult {
        let mut blocks = self
            .read_result
            .map(|content| content.blocks)
            .unwrap_or_default();

        if blocks.is_empty() {
            warn!("Read result has no text blocks");
            return OcrResult::default();
        }

        if blocks.len() > 1 {
            debug!("Ignoring {} extra text blocks", blocks.len() - 1);
        }

        OcrResult::from_lines(blocks.swap_remove(0).lines)
    }
}
