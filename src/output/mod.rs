mod csv;
mod json;
mod text;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

/// Per-sample output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One row of cleaning output
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct CleanedSample {
    pub index: usize,
    /// Seconds since the first sample
    pub time: f64,
    pub raw: f64,
    pub clean: f64,
}

impl CleanedSample {
    /// Pair raw and cleaned signals into rows
    pub fn rows(raw: &[f64], clean: &[f64], sampling_rate: f64) -> Vec<CleanedSample> {
        raw.iter()
            .zip(clean)
            .enumerate()
            .map(|(index, (&raw, &clean))| CleanedSample {
                index,
                time: index as f64 / sampling_rate,
                raw,
                clean,
            })
            .collect()
    }
}

pub trait Formatter: Send {
    fn format(&self, sample: &CleanedSample) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Render all rows, header first when the format has one
pub fn render(formatter: &dyn Formatter, rows: &[CleanedSample]) -> String {
    let mut out = String::new();
    if let Some(header) = formatter.header() {
        out.push_str(header);
        out.push('\n');
    }
    for row in rows {
        out.push_str(&formatter.format(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_carry_time() {
        let rows = CleanedSample::rows(&[1.0, 2.0], &[0.5, 1.5], 4.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].time, 0.25);
        assert_eq!(rows[1].raw, 2.0);
        assert_eq!(rows[1].clean, 1.5);
    }

    #[test]
    fn test_render_csv() {
        let rows = CleanedSample::rows(&[1.0], &[0.5], 100.0);
        let out = render(create_formatter(OutputFormat::Csv).as_ref(), &rows);
        assert_eq!(out, "index,time,raw,clean\n0,0.000000,1,0.5\n");
    }

    #[test]
    fn test_render_json_lines() {
        let rows = CleanedSample::rows(&[1.0, -1.0], &[0.5, -0.5], 2.0);
        let out = render(create_formatter(OutputFormat::Json).as_ref(), &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["time"], 0.5);
        assert_eq!(value["clean"], -0.5);
    }
}
