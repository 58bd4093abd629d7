//! Export helpers for JSON reports and CSV trajectories.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod report {
    use std::io::{self, Write};

    use chrono::{DateTime, SecondsFormat, Utc};
    use impactor_core::time::julian_date_to_unix_seconds;
    use impactor_engine::{Failure, ImpactResult};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    #[derive(Serialize)]
    struct Envelope<'a> {
        success: bool,
        generated_utc: String,
        epoch_utc: Option<String>,
        #[serde(flatten)]
        result: &'a ImpactResult,
    }

    #[derive(Serialize)]
    struct FailureEnvelope<'a> {
        success: bool,
        error: &'a Failure,
    }

    /// Write the result as pretty JSON with generation and epoch timestamps.
    pub fn write_report(
        writer: &mut dyn Write,
        result: &ImpactResult,
        generated: DateTime<Utc>,
    ) -> io::Result<()> {
        let envelope = Envelope {
            success: true,
            generated_utc: generated.to_rfc3339_opts(SecondsFormat::Secs, true),
            epoch_utc: result.original_elements.epoch_jd.and_then(epoch_utc),
            result,
        };
        to_writer_pretty(&mut *writer, &envelope)?;
        writeln!(writer)
    }

    /// Write a structured failure as JSON.
    pub fn write_failure(writer: &mut dyn Write, failure: &Failure) -> io::Result<()> {
        to_writer_pretty(
            &mut *writer,
            &FailureEnvelope {
                success: false,
                error: failure,
            },
        )?;
        writeln!(writer)
    }

    /// ISO-8601 rendering of a Julian date, ignoring the TDB/UTC offset.
    pub fn epoch_utc(jd: f64) -> Option<String> {
        let seconds = julian_date_to_unix_seconds(jd);
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

pub mod trajectory {
    use std::io::{self, Write};

    use impactor_core::vector::Vector3;
    use impactor_engine::TrajectoryPlot;

    pub const HEADER: &str = "orbit,index,x_km,y_km,z_km";

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the trajectory exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub orbit: &'a str,
        pub index: usize,
        pub position_km: Vector3,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.3},{:.3},{:.3}",
                self.orbit,
                self.index,
                self.position_km[0],
                self.position_km[1],
                self.position_km[2],
            )
        }
    }

    /// Write both trajectories of `plot`, header included.
    pub fn write_plot(writer: &mut dyn Write, plot: &TrajectoryPlot) -> io::Result<()> {
        write_header(writer)?;
        for (orbit, points) in [("original", &plot.original), ("final", &plot.final_points)] {
            for (index, position_km) in points.iter().enumerate() {
                Record {
                    orbit,
                    index,
                    position_km: *position_km,
                }
                .write_to(writer)?;
            }
        }
        writer.flush()
    }
}
