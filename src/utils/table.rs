use std::fmt;

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A plain-text table for console output
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table, every column left aligned
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            align: vec![Align::Left; headers.len()],
            rows: Vec::new(),
        }
    }

    /// Set the alignment of one column
    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.align.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Add a row; cells beyond the header count are ignored, missing ones are blank
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let mut cells: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|c| c.as_ref().to_string())
            .collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    fn col_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &[String], widths: &[usize]) -> fmt::Result {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .zip(&self.align)
            .map(|((cell, &width), align)| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect();
        writeln!(f, "{}", cells.join(" | ").trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.col_widths();

        self.write_row(f, &self.headers, &widths)?;
        let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(f, "{}", separator.join("-+-"))?;

        for row in &self.rows {
            self.write_row(f, row, &widths)?;
        }
        Ok(())
    }
}
