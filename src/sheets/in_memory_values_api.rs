use std::{collections::HashMap, sync::Mutex};

use error_stack::report;
use google_sheets4::api::ValueRange;
use serde_json::Value;

use super::{
    value_input_option::ValueInputOption,
    values_api::{RemoteRequestError, ValuesApi},
};

#[derive(Debug, Clone)]
pub(crate) struct RecordedUpdate {
    pub spreadsheet_id: String,
    pub range: String,
    pub value_range: ValueRange,
    pub value_input_option: ValueInputOption,
}

/// Zero-based cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Cell {
    row: u32,
    col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRange {
    sheet: String,
    start: Cell,
    end: Cell,
}

impl GridRange {
    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| Cell { row, col })
        })
    }
}

fn parse_cell(cell: &str) -> Option<Cell> {
    let digits_at = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(digits_at);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let col = letters
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .fold(0, |acc, c| acc * 26 + (c as u32 - 'A' as u32 + 1));
    let row = digits.parse::<u32>().ok().filter(|row| *row > 0)?;

    Some(Cell {
        row: row - 1,
        col: col - 1,
    })
}

/// Parses `Sheet!A1` or `'My sheet'!A1:C3`. A single cell covers just itself.
fn parse_range(range: &str) -> Option<GridRange> {
    let (sheet, cells) = match range.rsplit_once('!') {
        Some((sheet, cells)) => (sheet.trim_matches('\''), cells),
        None => ("", range),
    };

    let (first, last) = match cells.split_once(':') {
        Some((first, last)) => (parse_cell(first)?, parse_cell(last)?),
        None => {
            let cell = parse_cell(cells)?;
            (cell, cell)
        }
    };

    Some(GridRange {
        sheet: sheet.to_string(),
        start: Cell {
            row: first.row.min(last.row),
            col: first.col.min(last.col),
        },
        end: Cell {
            row: first.row.max(last.row),
            col: first.col.max(last.col),
        },
    })
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("")
}

type Sheet = HashMap<Cell, Value>;

/// Fake remote holding one grid of cells per `(spreadsheet id, sheet name)`.
///
/// Writes are placed starting at the top left corner of their range; reads and clears act on
/// every cell the range covers. Reads drop trailing blank cells and rows the way the real API
/// does.
#[derive(Debug, Default)]
pub(crate) struct InMemoryValuesApi {
    sheets: Mutex<HashMap<(String, String), Sheet>>,
    updates: Mutex<Vec<RecordedUpdate>>,
    clears: Mutex<Vec<String>>,
    unreachable: bool,
}

impl InMemoryValuesApi {
    /// Every request fails, as if the network or authorization were broken.
    pub(crate) fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub(crate) fn updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn clears(&self) -> Vec<String> {
        self.clears.lock().unwrap().clone()
    }

    fn grid_range(
        range: &str,
        context: RemoteRequestError,
    ) -> error_stack::Result<GridRange, RemoteRequestError> {
        parse_range(range).ok_or_else(|| {
            report!(context).attach_printable(format!("Unable to parse range: {range}"))
        })
    }
}

#[async_trait::async_trait]
impl ValuesApi for InMemoryValuesApi {
    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        value_range: ValueRange,
        value_input_option: ValueInputOption,
    ) -> error_stack::Result<(), RemoteRequestError> {
        if self.unreachable {
            return Err(report!(RemoteRequestError::FailedToUpdateValues));
        }
        let grid_range = Self::grid_range(range, RemoteRequestError::FailedToUpdateValues)?;

        {
            let mut sheets = self.sheets.lock().unwrap();
            let sheet = sheets
                .entry((spreadsheet_id.to_string(), grid_range.sheet.clone()))
                .or_default();

            let rows = value_range.values.iter().flatten();
            for (row_offset, row) in (0u32..).zip(rows) {
                for (col_offset, value) in (0u32..).zip(row) {
                    let cell = Cell {
                        row: grid_range.start.row + row_offset,
                        col: grid_range.start.col + col_offset,
                    };
                    if is_blank(value) {
                        sheet.remove(&cell);
                    } else {
                        sheet.insert(cell, value.clone());
                    }
                }
            }
        }

        self.updates.lock().unwrap().push(RecordedUpdate {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            value_range,
            value_input_option,
        });
        Ok(())
    }

    async fn clear(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<(), RemoteRequestError> {
        if self.unreachable {
            return Err(report!(RemoteRequestError::FailedToClearValues));
        }
        let grid_range = Self::grid_range(range, RemoteRequestError::FailedToClearValues)?;

        if let Some(sheet) = self
            .sheets
            .lock()
            .unwrap()
            .get_mut(&(spreadsheet_id.to_string(), grid_range.sheet.clone()))
        {
            for cell in grid_range.cells() {
                sheet.remove(&cell);
            }
        }

        self.clears.lock().unwrap().push(range.to_string());
        Ok(())
    }

    async fn get(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<ValueRange, RemoteRequestError> {
        if self.unreachable {
            return Err(report!(RemoteRequestError::FailedToGetValues));
        }
        let grid_range = Self::grid_range(range, RemoteRequestError::FailedToGetValues)?;

        let sheets = self.sheets.lock().unwrap();
        let sheet = sheets.get(&(spreadsheet_id.to_string(), grid_range.sheet.clone()));
        let blank = Value::String(String::new());

        let mut rows = (grid_range.start.row..=grid_range.end.row)
            .map(|row| {
                let mut values = (grid_range.start.col..=grid_range.end.col)
                    .map(|col| {
                        sheet
                            .and_then(|sheet| sheet.get(&Cell { row, col }))
                            .cloned()
                            .unwrap_or_else(|| blank.clone())
                    })
                    .collect::<Vec<_>>();
                while values.last().is_some_and(is_blank) {
                    values.pop();
                }
                values
            })
            .collect::<Vec<_>>();
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }

        // Like the real API, an empty range comes back without a `values` field.
        Ok(ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.to_string()),
            values: (!rows.is_empty()).then_some(rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_cell() {
        let range = parse_range("Sheet1!B3").unwrap();
        assert_eq!(range.sheet, "Sheet1");
        assert_eq!(range.start, Cell { row: 2, col: 1 });
        assert_eq!(range.end, range.start);
    }

    #[test]
    fn test_parse_quoted_sheet_and_reversed_corners() {
        let range = parse_range("'My sheet'!C3:A1").unwrap();
        assert_eq!(range.sheet, "My sheet");
        assert_eq!(range.start, Cell { row: 0, col: 0 });
        assert_eq!(range.end, Cell { row: 2, col: 2 });
        assert_eq!(range.cells().count(), 9);
    }

    #[test]
    fn test_parse_multi_letter_column_without_sheet() {
        let range = parse_range("AA10").unwrap();
        assert_eq!(range.sheet, "");
        assert_eq!(range.start, Cell { row: 9, col: 26 });
    }

    #[test]
    fn test_parse_invalid_ranges() {
        assert!(parse_range("Sheet1!").is_none());
        assert!(parse_range("Sheet1!A0").is_none());
        assert!(parse_range("Sheet1!11").is_none());
        assert!(parse_range("Sheet1!A1:").is_none());
    }
}
