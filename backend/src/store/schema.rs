//! Column layout of an entity store.
//!
//! A schema is an ordered list of typed columns. The order is the order of the
//! CSV header; the kind decides the value a freshly created row starts with.
//! Widening the schema bumps its version so callers can tell that the header
//! on disk changed.

use common::model::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// `"True"` / `"False"`.
    Flag,
    /// Likert value, stored as digits.
    Rating,
    /// Comma-joined list of uploaded file names.
    MediaList,
}

impl ColumnKind {
    pub fn default_value(self) -> &'static str {
        match self {
            ColumnKind::Flag => "False",
            ColumnKind::Text | ColumnKind::Rating | ColumnKind::MediaList => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    version: u32,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            version: 1,
            columns,
        }
    }

    /// Rebuilds a schema from a header read off disk. Column kinds are taken
    /// from `base` where it knows the column, `Text` otherwise.
    pub fn from_header<'a, I>(header: I, base: &Schema) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, base.kind_of(name)))
            .collect();
        let added = columns.iter().filter(|c| !base.contains(&c.name)).count() as u32;
        Self {
            version: base.version + added,
            columns,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn kind_of(&self, name: &str) -> ColumnKind {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
            .unwrap_or(ColumnKind::Text)
    }

    /// Appends `name` to the end of the layout. Returns `false` when the
    /// column already exists.
    pub fn add_column(&mut self, name: &str, kind: ColumnKind) -> bool {
        if self.contains(name) {
            return false;
        }
        self.columns.push(Column::new(name, kind));
        self.version += 1;
        true
    }

    /// Widens the layout with every column of `record` it does not know yet,
    /// in column-name order.
    pub fn absorb(&mut self, record: &Record, base: &Schema) -> bool {
        let mut widened = false;
        for name in record.field_names() {
            widened |= self.add_column(name, base.kind_of(name));
        }
        widened
    }

    /// A record with every column of the layout set to its default value.
    pub fn blank_record(&self) -> Record {
        Record::from_pairs(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.kind.default_value().to_string())),
        )
    }
}
