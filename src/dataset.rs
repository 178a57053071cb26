//! Loads the salary CSV into an immutable session `DataFrame`.
//!
//! The load is the only blocking I/O in the application: it happens once at
//! session start and the resulting frame is never mutated afterwards. A load
//! failure (unreachable resource, unparseable file, missing columns) is fatal
//! to the session and surfaces as an error screen rather than a partial
//! dashboard.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::filters::{derive_filter_options, FilterOptions};
use crate::source::{self, InputSource};

/// Year of the salary observation.
pub const COL_YEAR: &str = "ano";
/// Seniority level (categorical).
pub const COL_SENIORITY: &str = "senioridade";
/// Work modality (categorical, e.g. remote/hybrid/presential).
pub const COL_MODALITY: &str = "remoto";
/// Company size (categorical).
pub const COL_COMPANY_SIZE: &str = "tamanho_empresa";
/// Job role / title.
pub const COL_ROLE: &str = "cargo";
/// ISO3 code of the country of residence.
pub const COL_COUNTRY: &str = "residencia_iso3";
/// Annual salary in USD.
pub const COL_SALARY: &str = "usd";

/// Columns the CSV must provide. Extra columns are allowed and carried
/// through to the data table untouched.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_YEAR,
    COL_SENIORITY,
    COL_MODALITY,
    COL_COMPANY_SIZE,
    COL_ROLE,
    COL_COUNTRY,
    COL_SALARY,
];

/// The loaded session data: the full immutable frame plus the filter menus
/// derived from it once. Filter menus are never recomputed from a filtered
/// view, so narrowing one filter never shrinks another filter's options.
#[derive(Debug)]
pub struct Dataset {
    pub records: DataFrame,
    pub options: FilterOptions,
    /// Temp file backing a downloaded remote resource; removed on drop.
    http_temp_path: Option<PathBuf>,
}

impl Dataset {
    /// Loads a CSV from a local path or HTTP/HTTPS URL. Remote resources are
    /// downloaded to a temp file first (single attempt).
    pub fn load(path: &Path, delimiter: Option<u8>) -> Result<Dataset> {
        let (local_path, http_temp_path) = match source::input_source(path) {
            InputSource::Local(p) => (p, None),
            InputSource::Http(url) => {
                let temp = source::download_http_to_temp(&url)?;
                (temp.clone(), Some(temp))
            }
        };
        let records = read_salary_csv(&local_path, delimiter)?;
        let options = derive_filter_options(&records)?;
        Ok(Dataset {
            records,
            options,
            http_temp_path,
        })
    }

    /// Builds a dataset from an already-materialized frame (embedding and
    /// tests). The frame must carry the required columns with the pinned
    /// dtypes.
    pub fn from_records(records: DataFrame) -> Result<Dataset> {
        let options = derive_filter_options(&records)?;
        Ok(Dataset {
            records,
            options,
            http_temp_path: None,
        })
    }

    pub fn height(&self) -> usize {
        self.records.height()
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        if let Some(p) = self.http_temp_path.take() {
            let _ = std::fs::remove_file(p);
        }
    }
}

/// Reads the CSV, validates the required columns, and pins the dtypes the
/// aggregation code relies on (`ano` as Int64, `usd` as Float64; the latter
/// so an all-integer salary column doesn't infer as Int64 and fork the
/// aggregation paths).
fn read_salary_csv(path: &Path, delimiter: Option<u8>) -> Result<DataFrame> {
    let pl_path = PlPath::Local(Arc::from(path));
    let mut reader = LazyCsvReader::new(pl_path).with_has_header(true);
    if let Some(d) = delimiter {
        reader = reader.with_separator(d);
    }
    let mut lf = reader
        .finish()
        .map_err(|e| eyre!("Could not read '{}': {}", path.display(), e))?;

    let schema = lf
        .collect_schema()
        .map_err(|e| eyre!("Could not parse '{}': {}", path.display(), e))?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| schema.get(*c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(eyre!(
            "'{}' is missing required columns: {}",
            path.display(),
            missing.join(", ")
        ));
    }

    lf.with_columns([
        col(COL_YEAR).cast(DataType::Int64),
        col(COL_SALARY).cast(DataType::Float64),
        col(COL_SENIORITY).cast(DataType::String),
        col(COL_MODALITY).cast(DataType::String),
        col(COL_COMPANY_SIZE).cast(DataType::String),
        col(COL_ROLE).cast(DataType::String),
        col(COL_COUNTRY).cast(DataType::String),
    ])
    .collect()
    .map_err(|e| eyre!("Could not parse '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        f.write_all(contents.as_bytes()).expect("write csv");
        f
    }

    #[test]
    fn load_valid_csv() -> Result<()> {
        let f = write_csv(
            "ano,senioridade,remoto,tamanho_empresa,cargo,residencia_iso3,usd\n\
             2023,senior,remote,large,data engineer,USA,150000\n\
             2023,junior,remote,small,data analyst,BRA,40000\n",
        );
        let ds = Dataset::load(f.path(), None)?;
        assert_eq!(ds.height(), 2);
        assert_eq!(
            ds.records.column(COL_SALARY)?.dtype(),
            &DataType::Float64
        );
        assert_eq!(ds.records.column(COL_YEAR)?.dtype(), &DataType::Int64);
        assert_eq!(ds.options.modalities, vec!["remote"]);
        Ok(())
    }

    #[test]
    fn load_missing_columns_fails_with_names() {
        let f = write_csv("ano,remoto,usd\n2023,remote,100\n");
        let err = Dataset::load(f.path(), None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("senioridade"), "got: {msg}");
        assert!(msg.contains("cargo"), "got: {msg}");
        assert!(!msg.contains("remoto"), "got: {msg}");
    }

    #[test]
    fn load_nonexistent_path_fails() {
        let err = Dataset::load(Path::new("/nonexistent/salaries.csv"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/salaries.csv"));
    }

    #[test]
    fn load_with_custom_delimiter() -> Result<()> {
        let f = write_csv(
            "ano;senioridade;remoto;tamanho_empresa;cargo;residencia_iso3;usd\n\
             2024;pleno;hybrid;medium;data scientist;PRT;80000\n",
        );
        let ds = Dataset::load(f.path(), Some(b';'))?;
        assert_eq!(ds.height(), 1);
        Ok(())
    }

    #[test]
    fn extra_columns_are_kept() -> Result<()> {
        let f = write_csv(
            "ano,senioridade,remoto,tamanho_empresa,cargo,residencia_iso3,usd,moeda\n\
             2023,senior,remote,large,data engineer,USA,150000,USD\n",
        );
        let ds = Dataset::load(f.path(), None)?;
        assert!(ds.records.column("moeda").is_ok());
        Ok(())
    }
}
