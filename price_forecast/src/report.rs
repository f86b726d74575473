//! Console output of forecasts

use crate::models::ForecastResult;
use std::io::{self, Write};

/// Format one forecast step; `step` is zero-based
pub fn format_line(step: usize, value: f32) -> String {
    format!("Day {}: Predicted Close = {:.2} USD", step + 1, value)
}

/// Write one line per forecast step, in order
pub fn write_report<W: Write>(out: &mut W, result: &ForecastResult) -> io::Result<()> {
    for (step, value) in result.values().iter().enumerate() {
        writeln!(out, "{}", format_line(step, *value))?;
    }
    out.flush()
}
