use std::ops::{Deref, DerefMut};

/// A grid of string cells.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table(pub Vec<Row>);

impl Table {
    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Right-pads every row with empty cells to `width`.
    pub fn pad_to(&mut self, width: usize) {
        for row in self.iter_mut() {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }

    /// Transposed view of the cells, one `Vec` per column. Rows shorter than
    /// the widest row contribute nothing to the missing columns.
    pub fn columns(&self) -> Vec<Vec<&str>> {
        let mut columns: Vec<Vec<&str>> = vec![Vec::with_capacity(self.len()); self.width()];
        for row in self.iter() {
            for (col, cell) in row.iter().enumerate() {
                columns[col].push(cell.as_str());
            }
        }
        columns
    }
}

impl Deref for Table {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, R> From<C> for Table
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        Table(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(pub Vec<String>);

impl Deref for Row {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(Into::into).collect())
    }
}
