//! Recorded engine notifications, one JSON object per line.
//!
//! A file holds any number of events. Each event ends at an
//! `EventBoundary` line; notifications after the last boundary form a final
//! event. Blank lines and lines starting with `#` are skipped.

use crate::error::{IoError, Result};
use photonsim_data::EngineEvent;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Notifications of one event, boundary excluded.
pub type EventStream = Vec<EngineEvent>;

/// Splits a line-oriented notification stream into events.
///
/// # Parameters
/// - `reader`: Source of JSON lines
///
/// # Returns
/// One `EventStream` per event, or `IoError::Malformed` naming the first
/// line (1-based) that is not a known notification.
pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<EventStream>> {
    let mut streams = Vec::new();
    let mut current = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event: EngineEvent = serde_json::from_str(trimmed)
            .map_err(|e| IoError::malformed(index + 1, e.to_string()))?;
        match event {
            EngineEvent::EventBoundary => streams.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    if !current.is_empty() {
        streams.push(current);
    }

    tracing::debug!(events = streams.len(), "Parsed replay input");
    Ok(streams)
}

/// Opens and parses a replay file.
///
/// # Parameters
/// - `path`: The file to read
///
/// # Returns
/// The parsed events, `IoError::NotFound` when `path` does not exist, or the
/// parse error wrapped with the path.
pub fn read_event_file<P: AsRef<Path>>(path: P) -> Result<Vec<EventStream>> {
    if !path.as_ref().exists() {
        return Err(IoError::not_found(path.as_ref()));
    }
    let file = File::open(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("opening replay input {:?}", path.as_ref()))
    })?;
    parse_events(BufReader::new(file))
        .map_err(|e| e.with_context(format!("parsing {:?}", path.as_ref())))
}

/// Writes `streams` in the format `read_event_file` accepts, closing every
/// event with a boundary line.
///
/// # Returns
/// `Ok(())`, or the first filesystem or encoding error.
pub fn write_event_file<P: AsRef<Path>>(path: P, streams: &[EventStream]) -> Result<()> {
    let file = File::create(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("creating replay file {:?}", path.as_ref()))
    })?;
    let mut writer = BufWriter::new(file);
    for stream in streams {
        for event in stream {
            serde_json::to_writer(&mut writer, event)?;
            writer.write_all(b"\n")?;
        }
        serde_json::to_writer(&mut writer, &EngineEvent::EventBoundary)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
