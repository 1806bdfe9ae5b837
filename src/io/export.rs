//! Export a session to files.
//!
//! - JSON snapshot: the point set, the selection and the current `DisplayState`
//! - CSV: one row per point with its fitted value and squared error

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{DisplayState, Point};
use crate::error::AppError;
use crate::session::FitSession;

/// Serialized form of a session snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub tool: &'static str,
    pub max_degree: usize,
    pub points: &'a [Point],
    pub selection: Vec<usize>,
    pub display: DisplayState,
}

impl<'a> SessionSnapshot<'a> {
    pub fn of(session: &'a FitSession) -> Self {
        Self {
            tool: "lsq",
            max_degree: session.max_degree(),
            points: session.points(),
            selection: session.selection().iter().copied().collect(),
            display: session.display_state(),
        }
    }
}

/// Write the session snapshot as pretty JSON.
pub fn write_snapshot_json(path: &Path, session: &FitSession) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &SessionSnapshot::of(session))
        .map_err(|e| AppError::new(2, format!("Failed to write JSON: {e}")))?;

    Ok(())
}

/// Write per-point results to a CSV file.
pub fn write_errors_csv(path: &Path, session: &FitSession) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_errors(&mut file, session)
}

fn write_errors<W: Write>(out: &mut W, session: &FitSession) -> Result<(), AppError> {
    writeln!(out, "index,x,y,fitted,squared_error,selected")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, (p, err)) in session.points().iter().zip(session.errors()).enumerate() {
        writeln!(
            out,
            "{i},{},{},{:.10},{:.10},{}",
            p.x,
            p.y,
            session.predict(p.x),
            err,
            session.is_selected(i),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
