//! # Ranking Report
//!
//! Exports of a finished ranking, in one of three layouts (`ReportFormat`).
//!
//! **Txt**: plain text, one line per item:
//!
//! ```text
//! 1. Grundaktivität | Entspannt: Nein
//! 2. Song 3 | Bekannt: Ja | Gefallen: Neutral | Entspannt: Ja
//! 3. Clip (Dauer: 03:12) | Entspannt: Nein
//! ```
//!
//! Only the annotations the schema offers on an item appear. YouTube rows
//! therefore carry Entspannt alone, where older exports padded them with
//! `Bekannt: Nein | Gefallen: N/A`.
//!
//! **Csv**: one row per ranked item for data analysis. Annotations the schema
//! doesn't offer are `N/A`.
//!
//! ```text
//! ranking_type,play_order,final_rank,item_name,item_id,item_duration,item_entspannt,item_bekannt,item_gefallen
//! audio,N/A,1,Grundaktivität,baseline,N/A,Nein,N/A,N/A
//! ```
//!
//! **Automation**: non-baseline items in play order with their durations,
//! for playback scripts (`SongName,Reihenfolge,DauerInSekunden`).
//!
//! Names are always the original `title` / `name`, never the `display_name`
//! shown while ranking.

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::annotate::AnnotationField;
use crate::core::config::ReportFormat;
use crate::core::item::Item;
use crate::core::schema::ItemSchema;
use crate::core::sequence::Sequence;

/// Fixed column order for the annotations in a report row.
const REPORT_FIELDS: [AnnotationField; 3] = [
    AnnotationField::Known,
    AnnotationField::Liked,
    AnnotationField::Relaxed,
];

/// Sort key for items the host never gave a play order.
const UNORDERED: i64 = 999;

const NOT_AVAILABLE: &str = "N/A";

fn yes_no(value: bool) -> &'static str {
    if value { "Ja" } else { "Nein" }
}

fn annotation_value(item: &Item, field: AnnotationField) -> &'static str {
    match field {
        AnnotationField::Known => yes_no(item.known),
        AnnotationField::Liked => item.liked.label(),
        AnnotationField::Relaxed => yes_no(item.relaxed),
    }
}

fn report_row(rank: usize, item: &Item, schema: &ItemSchema) -> String {
    let name = item.original_name().unwrap_or(NOT_AVAILABLE);
    let mut row = format!("{rank}. {name}");
    if let Some(length) = item.length.as_deref().filter(|l| !l.is_empty()) {
        row.push_str(&format!(" (Dauer: {length})"));
    }

    for field in REPORT_FIELDS {
        if !schema.offers(item, field) {
            continue;
        }
        row.push_str(&format!(
            " | {}: {}",
            field_title(field),
            annotation_value(item, field)
        ));
    }
    row
}

fn field_title(field: AnnotationField) -> &'static str {
    match field {
        AnnotationField::Known => "Bekannt",
        AnnotationField::Liked => "Gefallen",
        AnnotationField::Relaxed => "Entspannt",
    }
}

/// The ranking section for one list.
pub fn ranking_section(title: &str, schema: &ItemSchema, sequence: &Sequence) -> String {
    let rule = "=".repeat(20);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        title.to_string(),
        rule,
        String::new(),
        format!("--- Finales Ranking ({title}) ---"),
    ];

    if sequence.is_empty() {
        lines.push("Ranking nicht durchgeführt: N/A".to_string());
    } else {
        lines.extend(
            sequence
                .iter()
                .enumerate()
                .map(|(i, item)| report_row(i + 1, item, schema)),
        );
    }
    lines.join("\n")
}

/// Full report with an export timestamp header.
pub fn ranking_report(
    title: &str,
    schema: &ItemSchema,
    sequence: &Sequence,
    exported_at: DateTime<Local>,
) -> String {
    format!(
        "Export Datum: {}\n{}\n",
        exported_at.format("%Y-%m-%d %H:%M:%S"),
        ranking_section(title, schema, sequence)
    )
}

// ============================================================================
// CSV
// ============================================================================

#[derive(Serialize)]
struct CsvRow<'a> {
    ranking_type: &'a str,
    play_order: String,
    final_rank: usize,
    item_name: &'a str,
    item_id: String,
    item_duration: &'a str,
    item_entspannt: &'static str,
    item_bekannt: &'static str,
    item_gefallen: &'static str,
}

#[derive(Serialize)]
struct AutomationRow<'a> {
    #[serde(rename = "SongName")]
    song_name: &'a str,
    #[serde(rename = "Reihenfolge")]
    play_order: String,
    #[serde(rename = "DauerInSekunden")]
    duration_seconds: i64,
}

fn play_order_text(item: &Item) -> String {
    item.play_order()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string())
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> io::Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// One CSV row per ranked item. An empty ranking yields an empty string.
pub fn ranking_csv(schema: &ItemSchema, sequence: &Sequence) -> io::Result<String> {
    let offered_or_na = |item: &Item, field| {
        if schema.offers(item, field) {
            annotation_value(item, field)
        } else {
            NOT_AVAILABLE
        }
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    for (i, item) in sequence.iter().map(|item| &**item).enumerate() {
        writer.serialize(CsvRow {
            ranking_type: schema.component_type.as_str(),
            play_order: play_order_text(item),
            final_rank: i + 1,
            item_name: item.original_name().unwrap_or(NOT_AVAILABLE),
            item_id: item.id.to_string(),
            item_duration: item
                .length
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(NOT_AVAILABLE),
            item_entspannt: yes_no(item.relaxed),
            item_bekannt: offered_or_na(item, AnnotationField::Known),
            item_gefallen: offered_or_na(item, AnnotationField::Liked),
        })?;
    }
    into_string(writer)
}

/// Non-baseline items sorted by play order (unordered items last, in rank
/// order), with whole-second durations.
pub fn automation_csv(sequence: &Sequence) -> io::Result<String> {
    let mut items: Vec<&Item> = sequence
        .iter()
        .map(|item| &**item)
        .filter(|item| !item.is_baseline())
        .collect();
    items.sort_by_key(|item| item.play_order().unwrap_or(UNORDERED));

    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer.serialize(AutomationRow {
            song_name: item.original_name().unwrap_or(NOT_AVAILABLE),
            play_order: play_order_text(item),
            duration_seconds: item.duration_seconds().unwrap_or(0.0) as i64,
        })?;
    }
    into_string(writer)
}

/// Render `sequence` in `format`.
pub fn render_report(
    format: ReportFormat,
    title: &str,
    schema: &ItemSchema,
    sequence: &Sequence,
    exported_at: DateTime<Local>,
) -> io::Result<String> {
    match format {
        ReportFormat::Txt => Ok(ranking_report(title, schema, sequence, exported_at)),
        ReportFormat::Csv => ranking_csv(schema, sequence),
        ReportFormat::Automation => automation_csv(sequence),
    }
}

pub fn write_report(
    path: &Path,
    format: ReportFormat,
    title: &str,
    schema: &ItemSchema,
    sequence: &Sequence,
) -> io::Result<()> {
    let report = render_report(format, title, schema, sequence, Local::now())?;
    fs::write(path, report)?;
    info!("Wrote {:?} ranking report to {}", format, path.display());
    Ok(())
}
