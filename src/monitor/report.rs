use std::fmt::Display;
use std::io::{self, Write};

use crate::monitor::aggregator::FileSummary;
use crate::monitor::estimator::Eta;

/// Largest percentage shown for a transfer that is not finished yet.
const ALMOST_DONE: f64 = 100.0 - 100.0 * f64::EPSILON;

/// Percentage of `total` covered by `completed`, 0 for an empty total.
pub fn progress_percent(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    if completed >= total {
        return 100.0;
    }
    (completed as f64 / total as f64 * 100.0).min(ALMOST_DONE)
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub bytes_completed: u64,
    pub total_length: u64,
    pub files: FileSummary,
    pub eta: Eta,
}

impl StatusLine {
    pub fn percent(&self) -> f64 {
        progress_percent(self.bytes_completed, self.total_length)
    }
}

impl Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Progress: {:.2}% - {}/{} bytes | Files: {}/{} completed | ETA: {}",
            self.percent(),
            self.bytes_completed,
            self.total_length,
            self.files.completed,
            self.files.total,
            self.eta
        )?;
        if let Some(current) = &self.files.current {
            write!(f, " | Current: {}", current)?;
        }
        Ok(())
    }
}

/// Keeps a single status line on a terminal-like output, rewriting it in place.
pub struct StatusWriter<W> {
    output: W,
    width: usize,
}

impl<W: Write> StatusWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output, width: 0 }
    }

    pub fn overwrite(&mut self, line: &StatusLine) -> io::Result<()> {
        let line = line.to_string();
        let width = line.chars().count();
        let padding = self.width.saturating_sub(width);
        write!(self.output, "\r{}{:padding$}", line, "", padding = padding)?;
        self.output.flush()?;
        self.width = width;
        Ok(())
    }

    /// Ends the status line and prints `message` below it.
    pub fn finish(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", message)?;
        self.output.flush()?;
        self.width = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn line(bytes_completed: u64, current: Option<&str>) -> StatusLine {
        StatusLine {
            bytes_completed,
            total_length: 1000,
            files: FileSummary {
                completed: 1,
                total: 3,
                current: current.map(str::to_string),
            },
            eta: Eta::Remaining(Duration::from_secs(75)),
        }
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(progress_percent(0, 0), 0.0);
        assert_eq!(progress_percent(0, 1000), 0.0);
        assert_eq!(progress_percent(250, 1000), 25.0);
        assert_eq!(progress_percent(1000, 1000), 100.0);
        assert!(progress_percent(u64::MAX - 1, u64::MAX) < 100.0);
        for completed in [0, 1, 333, 999, 1000] {
            let percent = progress_percent(completed, 1000);
            assert!((0.0..=100.0).contains(&percent));
        }
    }

    #[test]
    fn renders_current_file() {
        assert_eq!(
            line(420, Some("disc/track02.flac")).to_string(),
            "Progress: 42.00% - 420/1000 bytes | Files: 1/3 completed | ETA: 1m 15s \
             | Current: disc/track02.flac"
        );
    }

    #[test]
    fn omits_missing_current_file() {
        assert_eq!(
            line(420, None).to_string(),
            "Progress: 42.00% - 420/1000 bytes | Files: 1/3 completed | ETA: 1m 15s"
        );
    }

    #[test]
    fn overwrite_pads_shorter_lines() {
        let mut output = Vec::new();
        let mut writer = StatusWriter::new(&mut output);
        let long = line(420, Some("a/long/path.bin"));
        let short = line(430, None);

        writer.overwrite(&long).unwrap();
        writer.overwrite(&short).unwrap();
        writer.finish("Download completed!").unwrap();

        let output = String::from_utf8(output).unwrap();
        let padding = " ".repeat(long.to_string().len() - short.to_string().len());
        assert_eq!(
            output,
            format!("\r{}\r{}{}\nDownload completed!\n", long, short, padding)
        );
    }
}
