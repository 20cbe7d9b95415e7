//! Table loading for the freight dashboard.
//!
//! Reads a CSV file or the first worksheet of a spreadsheet into a
//! [`RawTable`], resolves the required columns by header name and maps each
//! row to a [`ShipmentRecord`].

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use frete_core::data_processors::{DecimalProcessor, TimestampProcessor};
use frete_core::error::{FreteError, Result};
use frete_core::models::ShipmentRecord;
use tracing::{debug, info};

/// Raw header names expected in the input table.
pub mod columns {
    /// Client group as exported; renamed to [`CLIENT`] on load.
    pub const CLIENT_RAW: &str = "Grupo";
    pub const CLIENT: &str = "Cliente";
    pub const PRODUCT: &str = "Produto";
    pub const VOLUME: &str = "Volume";
    pub const REGION: &str = "Perimetro";
    pub const LOAD_BASE: &str = "Base Carregamento";
    pub const SLA_FLAG: &str = "SLA 2";
    pub const DELIVERY_STATUS: &str = "Status da Entrega";
    pub const DEMAND_DATE: &str = "Data Demanda";
    pub const LOAD_DATE: &str = "Data Carregamento";
    pub const ETA_ARRIVAL: &str = "ETA Chegada Cliente";
    pub const CLIENT_DEPARTURE: &str = "Saida do Cliente";
}

// ── RawCell / RawTable ────────────────────────────────────────────────────────

/// One cell as read from the source, before typing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Wrap trimmed text; blank text becomes [`RawCell::Empty`].
    pub fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    /// Render the cell as a categorical value.
    ///
    /// Integral numbers drop their fractional part so a numeric code like
    /// `2.0` reads as `"2"`.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", *f as i64)
            }
            RawCell::Number(f) => f.to_string(),
            RawCell::DateTime(dt) => dt.to_string(),
        }
    }

    /// Read the cell as a number; text may use a comma decimal separator.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(f) => Some(*f),
            RawCell::Text(s) => DecimalProcessor::parse_str(s),
            RawCell::Empty | RawCell::DateTime(_) => None,
        }
    }

    /// Read the cell as a timestamp; anything unparseable is `None`.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RawCell::DateTime(dt) => Some(*dt),
            RawCell::Text(s) => TimestampProcessor::parse_str(s),
            RawCell::Empty | RawCell::Number(_) => None,
        }
    }
}

impl From<&Data> for RawCell {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => RawCell::Empty,
            Data::String(s) | Data::DateTimeIso(s) => RawCell::from_text(s),
            Data::Float(f) => RawCell::Number(*f),
            Data::Int(i) => RawCell::Number(*i as f64),
            Data::DateTime(dt) => dt.as_datetime().map_or(RawCell::Empty, RawCell::DateTime),
            other => RawCell::from_text(&other.to_string()),
        }
    }
}

/// A header row plus data rows, independent of the source format.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Position of the first header equal to `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every shipment row of the table at `path`.
///
/// The records come back without derived metrics; see
/// [`crate::analysis::load_dataset`] for the enriched form.
pub fn load_shipments(path: &Path) -> Result<Vec<ShipmentRecord>> {
    let table = read_table(path)?;
    let records = records_from_table(&table)?;

    let with_missing_dates = records
        .iter()
        .filter(|r| {
            r.demand_date.is_none()
                || r.load_date.is_none()
                || r.eta_arrival_date.is_none()
                || r.client_departure_date.is_none()
        })
        .count();

    info!(
        "Loaded {} shipment records from {}",
        records.len(),
        path.display()
    );
    debug!(
        "{} of {} records have at least one missing timestamp",
        with_missing_dates,
        records.len()
    );

    Ok(records)
}

/// Read `path` into a [`RawTable`], choosing the parser by file extension.
pub fn read_table(path: &Path) -> Result<RawTable> {
    std::fs::metadata(path).map_err(|source| FreteError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => read_csv_table(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_table(path)?,
        _ => return Err(FreteError::UnsupportedFormat(ext)),
    };

    if table.headers.iter().all(|h| h.is_empty()) {
        return Err(FreteError::MissingHeader(path.to_path_buf()));
    }

    debug!(
        "Read {} columns and {} rows from {}",
        table.headers.len(),
        table.rows.len(),
        path.display()
    );
    Ok(table)
}

/// Map every row of `table` to a [`ShipmentRecord`].
///
/// Fails only when required columns are absent; unreadable cells become
/// missing values.
pub fn records_from_table(table: &RawTable) -> Result<Vec<ShipmentRecord>> {
    let index = ColumnIndex::resolve(table)?;
    Ok(table.rows.iter().map(|row| index.to_record(row)).collect())
}

// ── Column resolution ─────────────────────────────────────────────────────────

/// Positions of the required columns within a [`RawTable`].
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    client: usize,
    product: usize,
    volume: usize,
    region: usize,
    load_base: usize,
    sla_flag: usize,
    delivery_status: usize,
    demand_date: usize,
    load_date: usize,
    eta_arrival: usize,
    client_departure: usize,
}

impl ColumnIndex {
    /// Locate every required column, reporting all absent ones together.
    ///
    /// `Grupo` is preferred as the client column; an already-aliased
    /// `Cliente` header is accepted when it is absent.
    fn resolve(table: &RawTable) -> Result<Self> {
        let mut missing: Vec<String> = Vec::new();
        let mut find = |name: &str| -> usize {
            table.column(name).unwrap_or_else(|| {
                missing.push(name.to_string());
                usize::MAX
            })
        };

        let client = match table
            .column(columns::CLIENT_RAW)
            .or_else(|| table.column(columns::CLIENT))
        {
            Some(idx) => idx,
            None => find(columns::CLIENT_RAW),
        };

        let index = ColumnIndex {
            client,
            product: find(columns::PRODUCT),
            volume: find(columns::VOLUME),
            region: find(columns::REGION),
            load_base: find(columns::LOAD_BASE),
            sla_flag: find(columns::SLA_FLAG),
            delivery_status: find(columns::DELIVERY_STATUS),
            demand_date: find(columns::DEMAND_DATE),
            load_date: find(columns::LOAD_DATE),
            eta_arrival: find(columns::ETA_ARRIVAL),
            client_departure: find(columns::CLIENT_DEPARTURE),
        };

        if missing.is_empty() {
            Ok(index)
        } else {
            Err(FreteError::MissingColumns(missing))
        }
    }

    fn to_record(&self, row: &[RawCell]) -> ShipmentRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or(&RawCell::Empty);

        ShipmentRecord {
            client: cell(self.client).as_text(),
            product: cell(self.product).as_text(),
            volume: cell(self.volume).as_number(),
            region: cell(self.region).as_text(),
            load_base: cell(self.load_base).as_text(),
            sla_flag: cell(self.sla_flag).as_text(),
            delivery_status: cell(self.delivery_status).as_text(),
            demand_date: cell(self.demand_date).as_timestamp(),
            load_date: cell(self.load_date).as_timestamp(),
            eta_arrival_date: cell(self.eta_arrival).as_timestamp(),
            client_departure_date: cell(self.client_departure).as_timestamp(),
            metrics: Default::default(),
        }
    }
}

// ── Format readers ────────────────────────────────────────────────────────────

/// Read a delimited text file. The delimiter (`;` or `,`) is sniffed from the
/// header line; invalid UTF-8 is replaced rather than rejected.
fn read_csv_table(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|source| FreteError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_delimiter(&bytes))
        .from_reader(bytes.as_slice());

    let csv_err = |source: csv::Error| FreteError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| clean_header(&String::from_utf8_lossy(h)))
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(csv_err)?;
        let row: Vec<RawCell> = record
            .iter()
            .map(|field| RawCell::from_text(&String::from_utf8_lossy(field)))
            .collect();

        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

/// Read the first worksheet of a spreadsheet workbook.
fn read_workbook_table(path: &Path) -> Result<RawTable> {
    let workbook_err = |message: String| FreteError::WorkbookParse {
        path: PathBuf::from(path),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_err(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_err("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_err(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Err(FreteError::MissingHeader(path.to_path_buf()));
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| clean_header(&RawCell::from(cell).as_text()))
        .collect();

    let rows: Vec<Vec<RawCell>> = sheet_rows
        .map(|r| r.iter().map(RawCell::from).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(RawCell::is_empty))
        .collect();

    debug!("Worksheet \"{}\" selected from {}", sheet_name, path.display());
    Ok(RawTable { headers, rows })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Pick `;` when the first line has more semicolons than commas.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let semicolons = first_line.iter().filter(|&&b| b == b';').count();
    let commas = first_line.iter().filter(|&&b| b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Trim a header and drop a UTF-8 byte-order mark.
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const HEADER: &str = ",Grupo,Produto,Volume,Perimetro,Base Carregamento,SLA 2,\
Status da Entrega,Data Demanda,Data Carregamento,ETA Chegada Cliente,Saida do Cliente";

    fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn row(idx: usize, client: &str, demand: &str, load: &str, eta: &str, exit: &str) -> String {
        format!(
            "{idx},{client},Ureia,12.5,Sul,Base Paranagua,No Prazo,Entregue,{demand},{load},{eta},{exit}"
        )
    }

    // ── load_shipments ────────────────────────────────────────────────────────

    #[test]
    fn test_load_shipments_basic() {
        let dir = TempDir::new().unwrap();
        let line = row(
            0,
            "Acme",
            "2024-01-01",
            "2024-01-05",
            "2024-01-10 08:00:00",
            "2024-01-10 14:30:00",
        );
        let path = write_file(dir.path(), "base.csv", &[HEADER, &line]);

        let records = load_shipments(&path).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.client, "Acme");
        assert_eq!(r.product, "Ureia");
        assert_eq!(r.volume, Some(12.5));
        assert_eq!(r.region, "Sul");
        assert_eq!(r.load_base, "Base Paranagua");
        assert_eq!(r.sla_flag, "No Prazo");
        assert_eq!(r.delivery_status, "Entregue");
        assert_eq!(r.demand_date.unwrap().day(), 1);
        assert_eq!(r.client_departure_date.unwrap().minute(), 30);
        // Metrics are not derived by the loader.
        assert_eq!(r.metrics, Default::default());
    }

    #[test]
    fn test_load_shipments_keeps_unparseable_dates_as_missing() {
        let dir = TempDir::new().unwrap();
        let line = row(0, "Acme", "2024-01-01", "pendente", "", "??");
        let path = write_file(dir.path(), "base.csv", &[HEADER, &line]);

        let records = load_shipments(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].demand_date.is_some());
        assert!(records[0].load_date.is_none());
        assert!(records[0].eta_arrival_date.is_none());
        assert!(records[0].client_departure_date.is_none());
    }

    #[test]
    fn test_load_shipments_semicolon_and_comma_decimals() {
        let dir = TempDir::new().unwrap();
        let header = HEADER.replace(',', ";");
        let line = "0;Acme;Ureia;1.234,5;Sul;Base;No Prazo;Entregue;05/02/2024;06/02/2024 10:00;;";
        let path = write_file(dir.path(), "base.csv", &[&header, line]);

        let records = load_shipments(&path).unwrap();

        assert_eq!(records[0].volume, Some(1234.5));
        let demand = records[0].demand_date.unwrap();
        assert_eq!((demand.month(), demand.day()), (2, 5));
        assert_eq!(records[0].load_date.unwrap().hour(), 10);
    }

    #[test]
    fn test_load_shipments_accepts_aliased_client_header() {
        let dir = TempDir::new().unwrap();
        let header = HEADER.replace("Grupo", "Cliente");
        let line = row(0, "Globex", "2024-01-01", "", "", "");
        let path = write_file(dir.path(), "base.csv", &[&header, &line]);

        let records = load_shipments(&path).unwrap();
        assert_eq!(records[0].client, "Globex");
    }

    #[test]
    fn test_load_shipments_prefers_grupo_over_cliente() {
        let dir = TempDir::new().unwrap();
        let header = format!("{},Cliente", HEADER);
        let line = format!("{},Outro", row(0, "Acme", "2024-01-01", "", "", ""));
        let path = write_file(dir.path(), "base.csv", &[&header, &line]);

        let records = load_shipments(&path).unwrap();
        assert_eq!(records[0].client, "Acme");
    }

    #[test]
    fn test_load_shipments_missing_columns_reported_together() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "base.csv",
            &["Grupo,Produto,Perimetro", "Acme,Ureia,Sul"],
        );

        match load_shipments(&path) {
            Err(FreteError::MissingColumns(cols)) => {
                assert!(cols.contains(&"Volume".to_string()));
                assert!(cols.contains(&"Data Demanda".to_string()));
                assert!(cols.contains(&"Saida do Cliente".to_string()));
                assert!(!cols.contains(&"Produto".to_string()));
                assert_eq!(cols.len(), 8);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_load_shipments_missing_client_column() {
        let dir = TempDir::new().unwrap();
        let header = HEADER.replace("Grupo", "Empresa");
        let path = write_file(dir.path(), "base.csv", &[&header]);

        match load_shipments(&path) {
            Err(FreteError::MissingColumns(cols)) => assert_eq!(cols, vec!["Grupo"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_load_shipments_header_only_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "base.csv", &[HEADER]);
        assert!(load_shipments(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_shipments_skips_blank_rows() {
        let dir = TempDir::new().unwrap();
        let a = row(0, "Acme", "2024-01-01", "", "", "");
        let b = row(1, "Globex", "2024-01-02", "", "", "");
        let path = write_file(dir.path(), "base.csv", &[HEADER, &a, ",,,,,,,,,,,", &b]);

        let records = load_shipments(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].client, "Globex");
    }

    #[test]
    fn test_load_shipments_short_rows_fill_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "base.csv", &[HEADER, "0,Acme,Ureia"]);

        let records = load_shipments(&path).unwrap();
        assert_eq!(records[0].product, "Ureia");
        assert!(records[0].volume.is_none());
        assert!(records[0].demand_date.is_none());
    }

    #[test]
    fn test_load_shipments_strips_bom_and_header_whitespace() {
        let dir = TempDir::new().unwrap();
        let header = format!("\u{feff}{}", HEADER.replace("Produto", " Produto "));
        let line = row(0, "Acme", "2024-01-01", "", "", "");
        let path = write_file(dir.path(), "base.csv", &[&header, &line]);

        assert_eq!(load_shipments(&path).unwrap()[0].product, "Ureia");
    }

    #[test]
    fn test_load_shipments_file_not_found() {
        let err = load_shipments(Path::new("/tmp/does-not-exist-frete-xyz.csv")).unwrap_err();
        assert!(matches!(err, FreteError::FileRead { .. }));
    }

    #[test]
    fn test_load_shipments_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "base.pdf", &[HEADER]);
        let err = load_shipments(&path).unwrap_err();
        assert!(matches!(err, FreteError::UnsupportedFormat(ext) if ext == "pdf"));
    }

    #[test]
    fn test_load_shipments_empty_file_has_no_header() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "base.csv", &[]);
        let err = load_shipments(&path).unwrap_err();
        assert!(matches!(err, FreteError::MissingHeader(_)));
    }

    #[test]
    fn test_load_shipments_corrupt_workbook() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "base.xlsx", &["not a zip archive"]);
        let err = load_shipments(&path).unwrap_err();
        assert!(matches!(err, FreteError::WorkbookParse { .. }));
    }

    // ── Workbooks ─────────────────────────────────────────────────────────────

    /// Write a pandas-style export: unnamed index column in A, native date
    /// cells, a blank row between the two shipments, and a second sheet
    /// that must be ignored.
    fn write_workbook(dir: &Path) -> PathBuf {
        use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

        let headers = [
            "Grupo",
            "Produto",
            "Volume",
            "Perimetro",
            "Base Carregamento",
            "SLA 2",
            "Status da Entrega",
            "Data Demanda",
            "Data Carregamento",
            "ETA Chegada Cliente",
            "Saida do Cliente",
        ];
        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let date = |s: &str| ExcelDateTime::parse_from_str(s).unwrap();

        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name("Base").unwrap();
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16 + 1, *name).unwrap();
        }

        // Row 1: every date present.
        sheet.write_number(1, 0, 0.0).unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        sheet.write_string(1, 2, "Ureia").unwrap();
        sheet.write_number(1, 3, 12.5).unwrap();
        sheet.write_string(1, 4, "Sul").unwrap();
        sheet.write_string(1, 5, "Paranagua").unwrap();
        sheet.write_string(1, 6, "No Prazo").unwrap();
        sheet.write_string(1, 7, "Entregue").unwrap();
        for (col, ts) in [
            (8, "2024-01-06 09:15:00"),
            (9, "2024-01-10 09:15:00"),
            (10, "2024-01-12 08:30:00"),
            (11, "2024-01-12 14:45:00"),
        ] {
            sheet
                .write_datetime_with_format(1, col, &date(ts), &date_format)
                .unwrap();
        }

        // Row 2 left blank.

        // Row 3: text demand date, missing load and departure.
        sheet.write_number(3, 0, 1.0).unwrap();
        sheet.write_string(3, 1, "Globex").unwrap();
        sheet.write_string(3, 2, "Soja").unwrap();
        sheet.write_number(3, 3, 7.0).unwrap();
        sheet.write_string(3, 4, "Norte").unwrap();
        sheet.write_string(3, 5, "Santos").unwrap();
        sheet.write_string(3, 6, "Atrasado").unwrap();
        sheet.write_string(3, 7, "Em Transito").unwrap();
        sheet.write_string(3, 8, "05/02/2024").unwrap();
        sheet
            .write_datetime_with_format(3, 10, &date("2024-02-10 00:00:00"), &date_format)
            .unwrap();

        let notes = workbook.add_worksheet();
        notes.set_name("Notas").unwrap();
        notes.write_string(0, 0, "Grupo").unwrap();
        notes.write_string(1, 0, "ignored").unwrap();

        let path = dir.join("Frete Retorno.xlsx");
        workbook.save(&path).unwrap();
        path
    }

    fn dt(s: &str) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn test_load_shipments_from_workbook() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(dir.path());

        let mut records = load_shipments(&path).unwrap();
        frete_core::calculations::MetricDeriver::enrich(&mut records);

        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.client, "Acme");
        assert_eq!(first.product, "Ureia");
        assert_eq!(first.volume, Some(12.5));
        assert_eq!(first.demand_date, dt("2024-01-06 09:15:00"));
        assert_eq!(first.load_date, dt("2024-01-10 09:15:00"));
        assert_eq!(first.eta_arrival_date, dt("2024-01-12 08:30:00"));
        assert_eq!(first.client_departure_date, dt("2024-01-12 14:45:00"));
        assert_eq!(first.metrics.load_lag_days, Some(4));
        assert_eq!(first.metrics.transit_lag_days, Some(1));
        assert_eq!(first.metrics.dwell_hours, 6);

        let second = &records[1];
        assert_eq!(second.client, "Globex");
        assert_eq!(second.volume, Some(7.0));
        assert_eq!(second.demand_date, dt("2024-02-05 00:00:00"));
        assert!(second.load_date.is_none());
        assert_eq!(second.eta_arrival_date, dt("2024-02-10 00:00:00"));
        assert_eq!(second.metrics.load_lag_days, None);
        assert_eq!(second.metrics.transit_lag_days, None);
        assert_eq!(second.metrics.dwell_hours, 0);
    }

    #[test]
    fn test_read_table_workbook_headers_from_first_row() {
        let dir = TempDir::new().unwrap();
        let table = read_table(&write_workbook(dir.path())).unwrap();

        assert_eq!(table.headers.len(), 12);
        assert_eq!(table.headers[0], "");
        assert_eq!(table.headers[1], "Grupo");
        assert_eq!(table.headers[11], "Saida do Cliente");
        // Blank row dropped; the second sheet is not read.
        assert_eq!(table.rows.len(), 2);
        assert!(matches!(table.rows[0][8], RawCell::DateTime(_)));
    }

    // ── RawCell ───────────────────────────────────────────────────────────────

    #[test]
    fn test_raw_cell_from_text() {
        assert_eq!(RawCell::from_text("  "), RawCell::Empty);
        assert_eq!(RawCell::from_text(" Sul "), RawCell::Text("Sul".to_string()));
    }

    #[test]
    fn test_raw_cell_as_text_integral_number() {
        assert_eq!(RawCell::Number(2.0).as_text(), "2");
        assert_eq!(RawCell::Number(2.5).as_text(), "2.5");
        assert_eq!(RawCell::Empty.as_text(), "");
    }

    #[test]
    fn test_raw_cell_as_number() {
        assert_eq!(RawCell::Number(3.0).as_number(), Some(3.0));
        assert_eq!(RawCell::Text("3,25".to_string()).as_number(), Some(3.25));
        assert_eq!(RawCell::Text("abc".to_string()).as_number(), None);
        assert_eq!(RawCell::Empty.as_number(), None);
    }

    #[test]
    fn test_raw_cell_as_timestamp() {
        let dt = TimestampProcessor::parse_str("2024-03-01 12:00:00").unwrap();
        assert_eq!(RawCell::DateTime(dt).as_timestamp(), Some(dt));
        assert_eq!(
            RawCell::Text("2024-03-01 12:00:00".to_string()).as_timestamp(),
            Some(dt)
        );
        assert_eq!(RawCell::Number(45_000.0).as_timestamp(), None);
    }

    #[test]
    fn test_raw_cell_from_workbook_data() {
        assert_eq!(RawCell::from(&Data::Empty), RawCell::Empty);
        assert_eq!(
            RawCell::from(&Data::String(" Norte ".to_string())),
            RawCell::Text("Norte".to_string())
        );
        assert_eq!(RawCell::from(&Data::Float(1.5)), RawCell::Number(1.5));
        assert_eq!(RawCell::from(&Data::Int(7)), RawCell::Number(7.0));
        assert_eq!(
            RawCell::from(&Data::Bool(true)),
            RawCell::Text("true".to_string())
        );
        let iso = RawCell::from(&Data::DateTimeIso("2024-01-10T08:00:00".to_string()));
        assert_eq!(iso.as_timestamp().unwrap().hour(), 8);
    }

    // ── detect_delimiter ──────────────────────────────────────────────────────

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"a;b;c\n1,5;2;3"), b';');
        assert_eq!(detect_delimiter(b"a,b,c\n1;2;3"), b',');
        assert_eq!(detect_delimiter(b""), b',');
    }
}
