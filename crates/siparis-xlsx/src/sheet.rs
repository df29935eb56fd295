/// A single worksheet value, already detached from any workbook format.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Renders the cell the way it would appear as text. Whole numbers drop
    /// their fractional part so codes stored as numbers round-trip cleanly.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Numeric view of the cell. Text is trimmed and parsed; anything
    /// unparseable is `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Empty | Cell::Bool(_) => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }
}

/// An in-memory worksheet: one header row plus data rows. Rows are padded
/// or truncated on construction so every row has `headers.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn new(name: impl Into<String>, headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column whose trimmed header equals `name` exactly.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Names from `required` that are absent from this sheet's headers.
    #[must_use]
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| (*name).to_string())
            .collect()
    }

    /// Cell at `(row, col)`, or `Empty` when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: Cell = Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_rendering_drops_integral_fraction() {
        assert_eq!(Cell::Number(4100.0).to_text(), "4100");
        assert_eq!(Cell::Number(4.5).to_text(), "4.5");
        assert_eq!(Cell::Empty.to_text(), "");
    }

    #[test]
    fn as_f64_parses_trimmed_text() {
        assert_eq!(Cell::Text(" 12 ".to_string()).as_f64(), Some(12.0));
        assert_eq!(Cell::Text("n/a".to_string()).as_f64(), None);
        assert_eq!(Cell::Number(3.0).as_f64(), Some(3.0));
        assert_eq!(Cell::Empty.as_f64(), None);
    }

    #[test]
    fn rows_are_padded_to_header_width() {
        let sheet = Sheet::new(
            "t",
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![Cell::Text("x".to_string())]],
        );
        assert_eq!(sheet.rows[0].len(), 3);
        assert_eq!(*sheet.cell(0, 2), Cell::Empty);
        assert_eq!(*sheet.cell(5, 0), Cell::Empty);
    }

    #[test]
    fn column_lookup_trims_headers() {
        let sheet = Sheet::new(
            "t",
            vec![" Depo ".to_string(), "Ürün Kodu".to_string()],
            Vec::new(),
        );
        assert_eq!(sheet.column_index("Depo"), Some(0));
        assert_eq!(sheet.column_index("Ürün Kodu"), Some(1));
        assert_eq!(
            sheet.missing_columns(&["Depo", "İrsaliye Miktarı"]),
            vec!["İrsaliye Miktarı".to_string()]
        );
    }
}
