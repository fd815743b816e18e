use crate::{
    entities::zone::Zone,
    errors::ServiceError,
    services::verifiers::{VerifierInput, VerifierService},
    services::warehouses::{WarehouseInput, WarehouseService},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

/// Outcome of one import batch. Duplicate rows are skipped silently; rows
/// failing field validation are reported here without failing the batch.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped_duplicates: usize,
    pub errors: Vec<String>,
}

/// Column-name normalization applied before matching: byte-order mark
/// stripped, trimmed, lower-cased, spaces collapsed to underscores.
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

fn header_index(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn require_columns(
    index: &HashMap<String, usize>,
    required: &[&str],
) -> Result<(), ServiceError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !index.contains_key(*col))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "El fichero debe contener las columnas: {}",
            missing.join(", ")
        )))
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: &HashMap<String, usize>,
    column: &str,
) -> &'a str {
    index
        .get(column)
        .and_then(|&i| record.get(i))
        .map(str::trim)
        .unwrap_or("")
}

/// Bulk import of reference entities from delimiter-separated text
/// (comma or semicolon).
#[derive(Clone)]
pub struct ImportService {
    verifiers: VerifierService,
    warehouses: WarehouseService,
}

impl ImportService {
    pub fn new(verifiers: VerifierService, warehouses: WarehouseService) -> Self {
        Self {
            verifiers,
            warehouses,
        }
    }

    /// Imports verifier rows. Requires `name, surnames` columns; `phone`
    /// and `zone` are optional. Rows whose (name, surnames) already exist
    /// are skipped.
    #[instrument(skip(self, data))]
    pub async fn import_verifiers(
        &self,
        data: &str,
        delimiter: u8,
    ) -> Result<ImportSummary, ServiceError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(data.as_bytes());

        let index = header_index(
            reader
                .headers()
                .map_err(|e| ServiceError::Validation(format!("Invalid header row: {}", e)))?,
        );
        require_columns(&index, &["name", "surnames"])?;

        let mut summary = ImportSummary::default();

        for (line, row) in reader.records().enumerate() {
            let row_no = line + 2; // header occupies line 1
            let record = match row {
                Ok(r) => r,
                Err(e) => {
                    summary.errors.push(format!("Row {}: {}", row_no, e));
                    continue;
                }
            };

            let name = field(&record, &index, "name");
            let surnames = field(&record, &index, "surnames");

            if self
                .verifiers
                .find_by_name_surnames(name, surnames)
                .await?
                .is_some()
            {
                info!(name, surnames, "Verifier already exists, skipping");
                summary.skipped_duplicates += 1;
                continue;
            }

            let input = VerifierInput {
                name: name.to_string(),
                surnames: surnames.to_string(),
                phone: field(&record, &index, "phone").to_string(),
                zone: Zone::parse(field(&record, &index, "zone")),
            };

            match self.verifiers.create(input).await {
                Ok(_) => summary.inserted += 1,
                Err(ServiceError::Validation(msg)) => {
                    warn!(row_no, "Skipping invalid verifier row: {}", msg);
                    summary.errors.push(format!("Row {}: {}", row_no, msg));
                }
                Err(other) => return Err(other),
            }
        }

        Ok(summary)
    }

    /// Imports warehouse rows. Requires `name, codigo_consejo` columns;
    /// `zone` is optional. Rows whose codigo_consejo already exists are
    /// skipped.
    #[instrument(skip(self, data))]
    pub async fn import_warehouses(
        &self,
        data: &str,
        delimiter: u8,
    ) -> Result<ImportSummary, ServiceError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(data.as_bytes());

        let index = header_index(
            reader
                .headers()
                .map_err(|e| ServiceError::Validation(format!("Invalid header row: {}", e)))?,
        );
        require_columns(&index, &["name", "codigo_consejo"])?;

        let mut summary = ImportSummary::default();

        for (line, row) in reader.records().enumerate() {
            let row_no = line + 2;
            let record = match row {
                Ok(r) => r,
                Err(e) => {
                    summary.errors.push(format!("Row {}: {}", row_no, e));
                    continue;
                }
            };

            let codigo_consejo = field(&record, &index, "codigo_consejo");

            if !codigo_consejo.is_empty()
                && self
                    .warehouses
                    .find_by_codigo_consejo(codigo_consejo)
                    .await?
                    .is_some()
            {
                info!(codigo_consejo, "Warehouse already exists, skipping");
                summary.skipped_duplicates += 1;
                continue;
            }

            let input = WarehouseInput {
                name: field(&record, &index, "name").to_string(),
                codigo_consejo: codigo_consejo.to_string(),
                zone: Zone::parse(field(&record, &index, "zone")),
            };

            match self.warehouses.create(input).await {
                Ok(_) => summary.inserted += 1,
                Err(ServiceError::Validation(msg)) => {
                    warn!(row_no, "Skipping invalid warehouse row: {}", msg);
                    summary.errors.push(format!("Row {}: {}", row_no, msg));
                }
                Err(other) => return Err(other),
            }
        }

        Ok(summary)
    }
}

/// Parses the operator-facing separator choice.
pub fn parse_delimiter(separator: &str) -> Result<u8, ServiceError> {
    match separator {
        "," => Ok(b','),
        ";" => Ok(b';'),
        other => Err(ServiceError::Validation(format!(
            "Unsupported separator {:?}; use \",\" or \";\"",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header(" Name "), "name");
        assert_eq!(normalize_header("CODIGO CONSEJO"), "codigo_consejo");
        assert_eq!(normalize_header("\u{feff}name"), "name");
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert!(parse_delimiter("|").is_err());
    }

    #[test]
    fn missing_required_columns_named_in_error() {
        let headers = csv::StringRecord::from(vec!["name", "phone"]);
        let index = header_index(&headers);
        let err = require_columns(&index, &["name", "surnames"]).unwrap_err();
        assert!(err.to_string().contains("surnames"));
    }
}
