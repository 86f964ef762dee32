use crate::checker::{CheckResult, LivenessReport};
use crate::output::OutputResult;
use std::io::Write;

/// Writes a liveness report
///
/// ```text
/// Live Links:
///   [200] https://example.com
///
/// Dead Links:
///   [404] https://example.com/missing
/// ```
pub fn write_report<W: Write>(report: &LivenessReport, writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "Live Links:")?;
    write_entries(&report.live, writer)?;

    writeln!(writer)?;
    writeln!(writer, "Dead Links:")?;
    write_entries(&report.dead, writer)?;

    writer.flush()?;
    Ok(())
}

fn write_entries<W: Write>(results: &[CheckResult], writer: &mut W) -> OutputResult<()> {
    for result in results {
        writeln!(writer, "  [{}] {}", result.code, result.url)?;
    }
    Ok(())
}
