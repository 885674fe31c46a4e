use std::io::{BufRead, Write};
use std::path::PathBuf;

use carbon_core::{AiModel, Region, TextChange};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::Tracker;

pub const DEFAULT_EXPORT_FILE: &str = "ai-carbon-data.json";

/// One line of the host's event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    TextChange { changes: Vec<TextChange> },
    SuggestionShown,
    Reset,
    SetModel { model: AiModel },
    SetRegion { region: Region },
    Export { path: Option<PathBuf> },
}

/// Summary returned when the stream ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListenStats {
    pub events_handled: usize,
    pub lines_skipped: usize,
    pub suggestions_accepted: usize,
}

pub fn parse_event(line: &str) -> Result<HostEvent> {
    Ok(serde_json::from_str(line)?)
}

/// Applies `event` and returns the number of suggestions it added.
pub fn handle_event(tracker: &mut Tracker, event: HostEvent) -> Result<usize> {
    match event {
        HostEvent::TextChange { changes } => tracker.track_text_change(&changes),
        HostEvent::SuggestionShown => tracker.track_suggestion_shown().map(|_| 0),
        HostEvent::Reset => tracker.reset().map(|_| 0),
        HostEvent::SetModel { model } => tracker.set_model(model).map(|_| 0),
        HostEvent::SetRegion { region } => tracker.set_region(region).map(|_| 0),
        HostEvent::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            tracker.export_to(&path)?;
            tracing::info!(path = %path.display(), "metrics exported");
            Ok(0)
        }
    }
}

/// Reads newline-delimited events until EOF, writing the status line after
/// each handled event. Unparseable lines are skipped; storage and write
/// failures end the loop.
pub fn listen<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    reader: R,
    mut writer: W,
) -> Result<ListenStats> {
    let mut stats = ListenStats::default();
    writeln!(writer, "{}", tracker.status_line())?;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event = match parse_event(trimmed) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!("skipping host event: {err}");
                stats.lines_skipped += 1;
                continue;
            }
        };
        stats.suggestions_accepted += handle_event(tracker, event)?;
        stats.events_handled += 1;
        writeln!(writer, "{}", tracker.status_line())?;
        writer.flush()?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_change_event() {
        let event = parse_event(
            r#"{"type":"textChange","changes":[{"text":"let x = compute();","rangeLength":0},{"text":"y"}]}"#,
        )
        .expect("parse");
        assert_eq!(
            event,
            HostEvent::TextChange {
                changes: vec![
                    TextChange::insertion("let x = compute();"),
                    TextChange::insertion("y"),
                ]
            }
        );
    }

    #[test]
    fn parses_command_events() {
        assert_eq!(
            parse_event(r#"{"type":"suggestionShown"}"#).expect("parse"),
            HostEvent::SuggestionShown
        );
        assert_eq!(
            parse_event(r#"{"type":"setModel","model":"gemini-2.5-pro"}"#).expect("parse"),
            HostEvent::SetModel {
                model: AiModel::Gemini25Pro
            }
        );
        assert_eq!(
            parse_event(r#"{"type":"setRegion","region":"EU_NORTH"}"#).expect("parse"),
            HostEvent::SetRegion {
                region: Region::EuNorth
            }
        );
        assert_eq!(
            parse_event(r#"{"type":"export"}"#).expect("parse"),
            HostEvent::Export { path: None }
        );
    }

    #[test]
    fn rejects_unknown_model_and_type() {
        assert!(parse_event(r#"{"type":"setModel","model":"gpt-0"}"#).is_err());
        assert!(parse_event(r#"{"type":"explode"}"#).is_err());
        assert!(parse_event("not json").is_err());
    }
}
