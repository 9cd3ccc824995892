//! Workbook configuration.
//!
//! [`WorkbookConfig::load`] reads `workbook.toml` from a workbook directory,
//! falling back to [`WorkbookConfig::default`] when the file is absent.

use std::collections::BTreeMap;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use faixa_model::OutputSchema;

use crate::error::{Result, StoreError};

/// File name looked up inside a workbook directory.
pub const CONFIG_FILE_NAME: &str = "workbook.toml";

/// Zone used when a workbook does not name one.
pub const DEFAULT_TIME_ZONE: &str = "America/Sao_Paulo";

/// Names of the sheets the macros read from and write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Destination sheet holding time bands and service orders.
    pub master: String,
    /// Staging sheet for time bands.
    pub time_bands: String,
    /// Staging sheet for service-order pairs.
    pub service_orders: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            master: "CSV".to_string(),
            time_bands: "ADD_Linhas".to_string(),
            service_orders: "ADD_OSOs".to_string(),
        }
    }
}

/// `workbook.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    /// Spreadsheet document id used in export URLs.
    pub document_id: String,
    /// IANA time zone name.
    pub time_zone: String,
    /// Header layout of the master sheet.
    pub schema: OutputSchema,
    /// Field delimiter of the sheet files.
    pub delimiter: char,
    pub sheets: SheetNames,
    /// Sheet ids by name; sheets not listed get their position in name order.
    pub sheet_ids: BTreeMap<String, u64>,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            document_id: String::new(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            schema: OutputSchema::default(),
            delimiter: ',',
            sheets: SheetNames::default(),
            sheet_ids: BTreeMap::new(),
        }
    }
}

impl WorkbookConfig {
    /// Loads `workbook.toml` from `dir`, or defaults when it does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text).map_err(|message| StoreError::Config { path, message })
    }

    /// Parses configuration text; the error carries the TOML diagnostic.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|error| error.to_string())
    }

    /// Resolves the configured IANA zone.
    pub fn tz(&self) -> Result<Tz> {
        parse_time_zone(&self.time_zone)
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| StoreError::InvalidTimeZone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_macro_sheet_names() {
        let config = WorkbookConfig::default();
        assert_eq!(config.sheets.master, "CSV");
        assert_eq!(config.sheets.time_bands, "ADD_Linhas");
        assert_eq!(config.sheets.service_orders, "ADD_OSOs");
        assert_eq!(config.tz().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = WorkbookConfig::parse(
            r#"
document_id = "1AbC"
schema = "legacy"

[sheets]
master = "Master"

[sheet_ids]
Master = 123
"#,
        )
        .unwrap();
        assert_eq!(config.document_id, "1AbC");
        assert_eq!(config.schema, OutputSchema::Legacy);
        assert_eq!(config.sheets.master, "Master");
        assert_eq!(config.sheets.time_bands, "ADD_Linhas");
        assert_eq!(config.sheet_ids.get("Master"), Some(&123));
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn rejects_unknown_time_zone() {
        assert!(matches!(
            parse_time_zone("Mars/Olympus"),
            Err(StoreError::InvalidTimeZone(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(WorkbookConfig::parse("schema = [").is_err());
    }
}
