//! # Text Tables
//!
//! A minimal bordered table renderer for receipts.
//!
//! ```text
//! +--------------+--------+----------+
//! | Item         | Price  | Quantity |
//! +--------------+--------+----------+
//! | Green Tea    |  £3.11 |        2 |
//! +--------------+--------+----------+
//! | Total        |  £3.11 |          |
//! +--------------+--------+----------+
//! ```
//!
//! Widths count `char`s, not bytes, so `£` takes one column. Headings are
//! always left aligned; body cells follow their column's [`Alignment`].

/// Horizontal alignment of a column's body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone)]
enum Row {
    Cells(Vec<String>),
    Separator,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    headings: Vec<String>,
    rows: Vec<Row>,
    alignments: Vec<Alignment>,
}

impl Table {
    pub fn new<I, S>(headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headings: Vec<String> = headings.into_iter().map(Into::into).collect();
        let alignments = vec![Alignment::Left; headings.len()];
        Table {
            headings,
            rows: Vec::new(),
            alignments,
        }
    }

    /// Appends a body row. Missing trailing cells render blank; extra cells
    /// beyond the heading count are dropped.
    pub fn add_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = cells
            .into_iter()
            .map(Into::into)
            .take(self.headings.len())
            .collect();
        self.rows.push(Row::Cells(cells));
        self
    }

    /// Appends a horizontal rule between body rows.
    pub fn add_separator(&mut self) -> &mut Self {
        self.rows.push(Row::Separator);
        self
    }

    /// Sets the alignment of the zero-based `column`. Out-of-range columns
    /// are ignored.
    pub fn align_column(&mut self, column: usize, alignment: Alignment) -> &mut Self {
        if let Some(slot) = self.alignments.get_mut(column) {
            *slot = alignment;
        }
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headings.iter().map(|h| h.chars().count()).collect();

        for row in &self.rows {
            if let Row::Cells(cells) = row {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        widths
    }

    /// Renders the table. The result has no trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();

        let border = {
            let mut line = String::from("+");
            for width in &widths {
                line.push_str(&"-".repeat(width + 2));
                line.push('+');
            }
            line
        };

        let mut lines = vec![
            border.clone(),
            render_line(&widths, &self.headings, |_| Alignment::Left),
            border.clone(),
        ];

        for row in &self.rows {
            match row {
                Row::Cells(cells) => {
                    lines.push(render_line(&widths, cells, |col| self.alignments[col]));
                }
                Row::Separator => lines.push(border.clone()),
            }
        }

        lines.push(border);
        lines.join("\n")
    }
}

fn render_line(widths: &[usize], cells: &[String], align: impl Fn(usize) -> Alignment) -> String {
    let mut line = String::from("|");
    for (col, width) in widths.iter().enumerate() {
        let cell = cells.get(col).map(String::as_str).unwrap_or("");
        let padding = " ".repeat(width - cell.chars().count());
        match align(col) {
            Alignment::Left => line.push_str(&format!(" {cell}{padding} |")),
            Alignment::Right => line.push_str(&format!(" {padding}{cell} |")),
        }
    }
    line
}

// =============================================================================
// Unit Tests
// =============================================================================
