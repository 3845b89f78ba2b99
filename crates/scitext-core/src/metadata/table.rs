use std::io::Write;
use std::path::Path;

use crate::error::{Result, ScitextError};
use crate::metadata::parser::MetadataRecord;

/// Metadata records laid out as a table.
///
/// Columns are the union of all record keys in order of first appearance;
/// cells a record lacks are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<MetadataRecord>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, extending the column set with any new keys.
    pub fn push(&mut self, record: MetadataRecord) {
        for key in record.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.to_string());
            }
        }
        self.rows.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MetadataRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV with a header row.
    ///
    /// A table without columns writes nothing.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.columns)?;
        for row in &self.rows {
            csv.write_record(
                self.columns
                    .iter()
                    .map(|column| row.get(column).unwrap_or("")),
            )?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table as CSV to `path`, creating parent directories.
    pub fn write_csv_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ScitextError::io(parent, e))?;
        }
        let file = std::fs::File::create(path).map_err(|e| ScitextError::io(path, e))?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}

impl FromIterator<MetadataRecord> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = MetadataRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.push(record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> MetadataRecord {
        let mut record = MetadataRecord::new();
        for (k, v) in pairs {
            record.insert(*k, *v);
        }
        record
    }

    fn to_csv(table: &MetadataTable) -> String {
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_column_union_in_first_seen_order() {
        let table: MetadataTable = vec![
            record(&[("id", "a"), ("year", "1665")]),
            record(&[("id", "b"), ("title", "On Light")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.columns(), ["id", "year", "title"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_csv_fills_missing_cells() {
        let table: MetadataTable = vec![
            record(&[("id", "a"), ("year", "1665")]),
            record(&[("id", "b"), ("title", "On Light")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(to_csv(&table), "id,year,title\na,1665,\nb,,On Light\n");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let table: MetadataTable = vec![record(&[("author", "Hooke, Robert")])]
            .into_iter()
            .collect();
        assert_eq!(to_csv(&table), "author\n\"Hooke, Robert\"\n");
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        assert_eq!(to_csv(&MetadataTable::new()), "");
    }

    #[test]
    fn test_write_csv_to_path_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("outputs").join("metadata.csv");
        let table: MetadataTable = vec![record(&[("id", "a")])].into_iter().collect();

        table.write_csv_to_path(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id\na\n");
    }
}
