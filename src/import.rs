//! Spreadsheet member import.
//!
//! Rows arrive as a 2-D array of cells (row 0 is the header). Columns are
//! positional: last name, first name, sex, date of birth (day serial),
//! national identifier. Each accepted row yields a preview shape for the
//! confirmation table and the payload later sent to the batch endpoint.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::constants::*;
use crate::error::ImportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(n) => !n.is_finite(),
        }
    }

    /// Trimmed display text; integral numbers print without a fractional part.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(n) if !n.is_finite() => String::new(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Numeric value of the cell, accepting numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

/// Which spreadsheet day-serial epoch the file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    #[default]
    Excel1900,
    Excel1904,
}

impl DateSystem {
    /// Serial value that corresponds to 1970-01-01.
    pub fn epoch_offset_days(&self) -> i64 {
        match self {
            DateSystem::Excel1900 => EXCEL_1900_EPOCH_OFFSET_DAYS,
            DateSystem::Excel1904 => EXCEL_1904_EPOCH_OFFSET_DAYS,
        }
    }

    /// Truncates the serial to whole days; `None` when out of range.
    pub fn serial_to_date(&self, serial: f64) -> Option<Date> {
        // Beyond the representable calendar either way.
        if !serial.is_finite() || serial.abs() > MAX_DAY_SERIAL {
            return None;
        }
        let days = serial.floor() as i64 - self.epoch_offset_days();
        OffsetDateTime::UNIX_EPOCH
            .date()
            .checked_add(Duration::days(days))
    }
}

impl FromStr for DateSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1900" | "excel1900" => Ok(DateSystem::Excel1900),
            "1904" | "excel1904" => Ok(DateSystem::Excel1904),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// `dd/mm/yyyy`
    #[default]
    Fr,
    /// `mm/dd/yyyy`
    Us,
    /// `yyyy-mm-dd`
    Iso,
}

impl DateLocale {
    pub fn format(&self, date: Date) -> String {
        let formatted = match self {
            DateLocale::Fr => date.format(format_description!("[day]/[month]/[year]")),
            DateLocale::Us => date.format(format_description!("[month]/[day]/[year]")),
            DateLocale::Iso => date.format(format_description!("[year]-[month]-[day]")),
        };
        formatted.unwrap_or_default()
    }
}

/// What the confirmation table shows for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPreview {
    pub lastname: String,
    pub firstname: String,
    pub sex: String,
    pub birth_date: String,
    pub national_id: String,
    pub is_active: bool,
    pub ministry: String,
}

/// What the batch endpoint receives for one row. Credentials stay empty and
/// are assigned out of band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub lastname: String,
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    pub is_active: bool,
    pub ministry: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMember {
    /// Stable key for the preview list.
    pub key: Uuid,
    /// Index of the source row in the sheet (header is 0).
    pub row_index: usize,
    pub preview: MemberPreview,
    pub payload: MemberPayload,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MemberImportMapper {
    pub date_system: DateSystem,
    pub locale: DateLocale,
}

impl MemberImportMapper {
    pub fn new(date_system: DateSystem, locale: DateLocale) -> Self {
        Self {
            date_system,
            locale,
        }
    }

    /// Uses the configured spreadsheet date system.
    pub fn from_config(config: &ApiConfig, locale: DateLocale) -> Self {
        Self::new(config.date_system, locale)
    }

    /// Maps every data row, silently dropping rows without both names.
    pub fn map_rows(&self, rows: &[Vec<Cell>]) -> Vec<ImportedMember> {
        let members: Vec<ImportedMember> = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, row)| self.map_row(index, row))
            .collect();

        tracing::debug!(
            rows = rows.len().saturating_sub(1),
            accepted = members.len(),
            "mapped spreadsheet rows"
        );
        members
    }

    fn map_row(&self, row_index: usize, row: &[Cell]) -> Option<ImportedMember> {
        if row.len() < IMPORT_MIN_CELLS || row[0].is_blank() || row[1].is_blank() {
            return None;
        }

        let cell = |i: usize| row.get(i).map(Cell::text).unwrap_or_default();
        let lastname = cell(0);
        let firstname = cell(1);
        let sex = cell(2);
        let national_id = cell(4);
        let birth_date = row
            .get(3)
            .and_then(Cell::as_number)
            .and_then(|serial| self.date_system.serial_to_date(serial));

        let preview = MemberPreview {
            lastname: lastname.clone(),
            firstname: firstname.clone(),
            sex: sex.clone(),
            birth_date: birth_date.map(|d| self.locale.format(d)).unwrap_or_default(),
            national_id: national_id.clone(),
            is_active: DEFAULT_MEMBER_ACTIVE,
            ministry: DEFAULT_MINISTRY.to_string(),
        };
        let payload = MemberPayload {
            lastname,
            firstname,
            sex: Some(sex).filter(|s| !s.is_empty()),
            birth_date: birth_date.map(|d| d.to_string()),
            national_id: Some(national_id).filter(|s| !s.is_empty()),
            is_active: DEFAULT_MEMBER_ACTIVE,
            ministry: DEFAULT_MINISTRY.to_string(),
            email: String::new(),
            password: String::new(),
        };

        Some(ImportedMember {
            key: Uuid::new_v4(),
            row_index,
            preview,
            payload,
        })
    }
}

fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Reads CSV bytes (`,` or `;` separated) into rows of text cells.
pub fn read_csv_rows(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(bytes))
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(value.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

/// Reads rows already extracted by a sheet parser as a JSON 2-D array.
pub fn read_json_rows(json: &str) -> Result<Vec<Vec<Cell>>, ImportError> {
    serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))
}

/// Reads a `.json` rows file or, for any other extension, a CSV file.
pub async fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<Vec<Cell>>, ImportError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let text = std::str::from_utf8(&bytes).map_err(|e| ImportError::Parse(e.to_string()))?;
        read_json_rows(text)
    } else {
        read_csv_rows(&bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub index: usize,
    pub error: String,
}

/// Success body of the batch endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchImportResponse {
    pub success: bool,
    pub inserted_count: usize,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Error body of the batch endpoint, optionally listing rejected rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchImportFailure {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub inserted_count: usize,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub inserted_count: usize,
    pub row_errors: Vec<RowError>,
    pub message: Option<String>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.row_errors.is_empty() && self.message.is_none()
    }

    pub fn summary(&self) -> String {
        if self.row_errors.is_empty() {
            format!("{} membre(s) importé(s)", self.inserted_count)
        } else {
            format!(
                "{} membre(s) importé(s), {} ligne(s) rejetée(s)",
                self.inserted_count,
                self.row_errors.len()
            )
        }
    }
}

impl From<BatchImportResponse> for ImportReport {
    fn from(response: BatchImportResponse) -> Self {
        Self {
            inserted_count: response.inserted_count,
            row_errors: Vec::new(),
            message: None,
        }
    }
}

impl From<BatchImportFailure> for ImportReport {
    fn from(failure: BatchImportFailure) -> Self {
        Self {
            inserted_count: failure.inserted_count,
            row_errors: failure.errors,
            message: failure.message,
        }
    }
}
