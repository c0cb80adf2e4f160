//! Tabular text extraction: CSV files and XLSX workbooks.
//!
//! Both render to an aligned plain-text table, one row per line, which reads
//! well inside a prompt. XLSX is handled as its zip container: shared strings
//! from `xl/sharedStrings.xml`, cells from the first worksheet. Formulas,
//! styles, and additional worksheets are ignored.

use super::{unescape_xml, ExtractError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

pub(super) fn extract_csv(path: &Path) -> Result<String, ExtractError> {
    let content = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    Ok(render_table(&parse_csv(&content)))
}

pub(super) fn extract_xlsx(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractError::parse(path, e.to_string()))?;

    let shared = match read_entry(&mut archive, "xl/sharedStrings.xml", path)? {
        Some(xml) => parse_shared_strings(&xml),
        None => Vec::new(),
    };

    let sheet_name = first_worksheet_name(&archive)
        .ok_or_else(|| ExtractError::parse(path, "workbook has no worksheets"))?;
    let sheet_xml = read_entry(&mut archive, &sheet_name, path)?
        .ok_or_else(|| ExtractError::parse(path, "workbook has no worksheets"))?;

    Ok(render_table(&parse_worksheet(&sheet_xml, &shared)))
}

/// Quote-aware CSV parser. Handles quoted fields, doubled-quote escapes, and
/// newlines inside quoted fields; anything more exotic is out of scope for a
/// prompt-text dump.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Pad every column to its widest cell and join rows line by line.
fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                for _ in cell.chars().count()..widths[i] + 2 {
                    line.push(' ');
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

static SHARED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<si>(.*?)</si>").expect("shared string regex"));
static TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<t(?: [^>]*)?>(.*?)</t>").expect("cell text regex"));
static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<row[^>]*>(.*?)</row>").expect("row regex"));
static CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<c((?: [^>]*)?)>(.*?)</c>").expect("cell regex"));
static VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<v>(.*?)</v>").expect("cell value regex"));

fn parse_shared_strings(xml: &str) -> Vec<String> {
    SHARED_ITEM_RE
        .captures_iter(xml)
        .map(|item| {
            // Rich-text items split one string across several <t> runs.
            TEXT_RE
                .captures_iter(&item[1])
                .map(|t| unescape_xml(&t[1]))
                .collect::<String>()
        })
        .collect()
}

fn parse_worksheet(xml: &str, shared: &[String]) -> Vec<Vec<String>> {
    ROW_RE
        .captures_iter(xml)
        .map(|row| {
            CELL_RE
                .captures_iter(&row[1])
                .map(|cell| cell_value(&cell[1], &cell[2], shared))
                .collect()
        })
        .collect()
}

fn cell_value(attrs: &str, body: &str, shared: &[String]) -> String {
    if attrs.contains(r#"t="inlineStr""#) {
        return TEXT_RE
            .captures_iter(body)
            .map(|t| unescape_xml(&t[1]))
            .collect();
    }
    let raw = match VALUE_RE.captures(body) {
        Some(v) => unescape_xml(&v[1]),
        None => return String::new(),
    };
    if attrs.contains(r#"t="s""#) {
        raw.parse::<usize>()
            .ok()
            .and_then(|i| shared.get(i).cloned())
            .unwrap_or(raw)
    } else {
        raw
    }
}

fn first_worksheet_name<R: Read + std::io::Seek>(archive: &zip::ZipArchive<R>) -> Option<String> {
    let mut sheets: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("xl/worksheets/") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    sheets.sort();
    sheets.into_iter().next()
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
    path: &Path,
) -> Result<Option<String>, ExtractError> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut xml = String::new();
            entry
                .read_to_string(&mut xml)
                .map_err(|e| ExtractError::io(path, e))?;
            Ok(Some(xml))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(ExtractError::parse(path, e.to_string())),
    }
}
