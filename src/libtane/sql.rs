use std::fmt;

/// Wraps `text` in single quotes, doubling any quote inside it.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    TextArray(Vec<String>),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(text) => write!(f, "{}", quote(text)),
            SqlValue::TextArray(items) => {
                let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
                write!(f, "ARRAY[{}]", quoted.join(", "))
            }
        }
    }
}

/// A single multi-row `INSERT`, preceded by a comment line.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    pub header: String,
    pub table: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl InsertStatement {
    pub fn new(header: &str, table: &str, columns: Vec<&'static str>) -> Self {
        Self {
            header: header.to_string(),
            table: table.to_string(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<SqlValue>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {}", self.header)?;
        writeln!(
            f,
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.columns.join(", ")
        )?;
        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let values: Vec<String> = row.iter().map(|value| value.to_string()).collect();
                format!("({})", values.join(", "))
            })
            .collect();
        write!(f, "{};", tuples.join(",\n"))
    }
}
