//! CSV parsing into raw import rows.

use serde::{Deserialize, Serialize};

use super::ImportError;

/// One CSV data row before validation. Every field is raw text; columns
/// missing from the header deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportRow {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub tags: String,
    pub category: String,
    pub difficulty: String,
    /// Pipe-separated.
    pub instructions: String,
    /// Pipe-separated.
    pub materials: String,
    pub image: String,
}

/// Parse CSV bytes into rows keyed by the header.
///
/// Blank lines are skipped. The first reader error (ragged row, invalid
/// UTF-8, bad quoting) aborts the parse; no partial result is returned.
pub fn parse(bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    reader
        .deserialize::<ImportRow>()
        .map(|result| result.map_err(|e| ImportError::Parse(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const HEADER: &str =
        "id,title,description,tags,category,difficulty,instructions,materials,image\n";

    #[test]
    fn parses_rows_by_header_name() {
        let csv = format!(
            "{HEADER}7,Basic Beanie,A warm hat,\"Quick, Gift\",Hats,Beginner,Ch 60|Join,Yarn|Hook,\n"
        );
        let rows = parse(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, "7");
        assert_eq!(row.title, "Basic Beanie");
        assert_eq!(row.tags, "Quick, Gift");
        assert_eq!(row.difficulty, "Beginner");
        assert_eq!(row.instructions, "Ch 60|Join");
        assert_eq!(row.image, "");
    }

    #[test]
    fn columns_may_appear_in_any_order_and_optional_ones_may_be_absent() {
        let csv = "title,category,description,materials,instructions\n\
                   Coaster,Coasters,Round coaster,Cotton,Ch 4\n";
        let rows = parse(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].category, "Coasters");
        assert_eq!(rows[0].id, "");
        assert_eq!(rows[0].image, "");
        assert_eq!(rows[0].tags, "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let csv = format!(
            "{HEADER}\n1,A,B,,Hats,,x,y,\n\n2,C,D,,Bags,,x,y,\n\n"
        );
        let rows = parse(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(parse(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn ragged_row_fails_the_whole_parse() {
        let csv = format!("{HEADER}1,A,B,,Hats,,x,y,\n2,short row\n");
        assert_matches!(parse(csv.as_bytes()), Err(ImportError::Parse(_)));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"1,\xff\xfe,B,,Hats,,x,y,\n");
        assert_matches!(parse(&bytes), Err(ImportError::Parse(_)));
    }
}
