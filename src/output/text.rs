use super::{CleanedSample, Formatter};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, sample: &CleanedSample) -> String {
        format!(
            "{:>8} {:>10.4}s  raw: {:>12.6}  clean: {:>12.6}",
            sample.index, sample.time, sample.raw, sample.clean
        )
    }
}
