use super::{CleanedSample, Formatter};

/// One JSON object per line
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, sample: &CleanedSample) -> String {
        serde_json::to_string(sample).unwrap_or_else(|_| "null".to_string())
    }
}
