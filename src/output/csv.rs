use super::{CleanedSample, Formatter};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, sample: &CleanedSample) -> String {
        format!(
            "{},{:.6},{},{}",
            sample.index, sample.time, sample.raw, sample.clean
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("index,time,raw,clean")
    }
}
