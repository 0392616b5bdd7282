//! In-memory tabular data and its CSV export.

use crate::error::{Error, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Rows of string cells under named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Its width must match the number of columns.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::invalid_input(format!(
                "Row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style `push_row`.
    pub fn with_row<I, S>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(row)?;
        Ok(self)
    }

    /// Read a table from CSV. The first record is the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Self::new(columns);

        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter())?;
        }

        Ok(table)
    }

    /// Read a table from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Build a table from serializable records; field names become columns.
    pub fn from_records<I, T>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Self::from_csv_reader(bytes.as_slice())
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize to CSV bytes.
    ///
    /// With `include_index` a leading unnamed column carries the 0-based
    /// row number, the way a dataframe export lays it out.
    pub fn to_csv(&self, include_index: bool) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        if include_index {
            writer.write_record(std::iter::once("").chain(self.columns.iter().map(String::as_str)))?;
            for (i, row) in self.rows.iter().enumerate() {
                let index = i.to_string();
                writer.write_record(
                    std::iter::once(index.as_str()).chain(row.iter().map(String::as_str)),
                )?;
            }
        } else {
            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
        }

        writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stations() -> Table {
        Table::new(["name", "lat", "lon"])
            .with_row(["Oslo S", "59.91", "10.75"])
            .unwrap()
            .with_row(["Bergen, stasjon", "60.39", "5.33"])
            .unwrap()
    }

    #[test]
    fn test_to_csv_without_index() {
        let csv = String::from_utf8(stations().to_csv(false).unwrap()).unwrap();
        assert_eq!(
            csv,
            "name,lat,lon\nOslo S,59.91,10.75\n\"Bergen, stasjon\",60.39,5.33\n"
        );
    }

    #[test]
    fn test_to_csv_with_index() {
        let csv = String::from_utf8(stations().to_csv(true).unwrap()).unwrap();
        assert_eq!(
            csv,
            ",name,lat,lon\n0,Oslo S,59.91,10.75\n1,\"Bergen, stasjon\",60.39,5.33\n"
        );
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(["only one"]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_csv_reader() {
        let input = "name , lat,lon\nOslo S,59.91,10.75\n";
        let table = Table::from_csv_reader(input.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["name", "lat", "lon"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0], vec!["Oslo S", "59.91", "10.75"]);
    }

    #[test]
    fn test_from_records_uses_field_names() {
        #[derive(Serialize)]
        struct Point {
            id: u32,
            lat: f64,
            lon: f64,
        }

        let table = Table::from_records(vec![
            Point { id: 1, lat: 1.5, lon: -2.0 },
            Point { id: 2, lat: 3.25, lon: 4.0 },
        ])
        .unwrap();

        assert_eq!(table.columns(), ["id", "lat", "lon"]);
        assert_eq!(table.rows()[1], vec!["2", "3.25", "4.0"]);
    }

    #[test]
    fn test_empty_table_exports_header_only() {
        let table = Table::new(["x"]);
        assert_eq!(table.to_csv(false).unwrap(), b"x\n");
    }
}
