//! Flat-file record store.
//!
//! Each entity kind lives in its own comma-delimited file whose first row is a
//! header naming the columns. The whole file is small, so every read loads all
//! rows and every mutation rewrites the file:
//!
//! - reads never lock; they always see a complete file because rewrites go
//!   through a temporary file in the same directory and an atomic rename.
//! - mutations are serialized by one writer mutex per store, so two
//!   concurrent load-modify-rewrite cycles can no longer lose each other's
//!   changes inside this process.
//! - appending a row whose columns are already known writes a single line and
//!   leaves the header alone.

pub mod error;
pub mod schema;

use chrono::Utc;
use common::model::record::{Record, ID_FIELD};
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;

pub use error::{Result, StoreError};
pub use schema::{Column, ColumnKind, Schema};

/// What was on disk at the time of a read.
struct Snapshot {
    schema: Schema,
    records: Vec<Record>,
    /// `false` when the file is missing or has no header yet.
    has_header: bool,
}

pub struct RecordStore {
    path: PathBuf,
    base: Schema,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Opens the store backed by `path`. Nothing is read or created until the
    /// first operation. `base` is the layout used for a brand new file and the
    /// source of column kinds.
    pub fn open(path: impl Into<PathBuf>, base: Schema) -> Self {
        Self {
            path: path.into(),
            base,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record in file order. A missing or empty file is an empty store.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        Ok(self.read()?.records)
    }

    /// First record whose id equals `id`, compared as text.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    /// The current column layout, as the header on disk describes it.
    pub fn schema(&self) -> Result<Schema> {
        Ok(self.read()?.schema)
    }

    /// Sets one field of the record `id`. Returns `false`, without touching
    /// the file, when no such record exists.
    pub fn update_field(&self, id: &str, field: &str, value: &str) -> Result<bool> {
        self.update_fields(id, &[(field, value)])
    }

    /// Sets several fields of the record `id` in one rewrite.
    pub fn update_fields<F, V>(&self, id: &str, updates: &[(F, V)]) -> Result<bool>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let fields: Vec<&str> = updates.iter().map(|(f, _)| f.as_ref()).collect();
        self.modify(id, &fields, |record| {
            for (field, value) in updates {
                record.set(field.as_ref(), value.as_ref());
            }
        })
    }

    /// Replaces `field` of the record `id` with `compute(current value)`.
    ///
    /// The read and the write happen under the writer lock, so concurrent
    /// callers cannot interleave. Returns the stored value, or `None` when
    /// the record does not exist.
    pub fn update_field_with<F>(&self, id: &str, field: &str, compute: F) -> Result<Option<String>>
    where
        F: FnOnce(&str) -> String,
    {
        let mut stored = None;
        self.modify(id, &[field], |record| {
            let value = compute(record.get(field));
            record.set(field, value.clone());
            stored = Some(value);
        })?;
        Ok(stored)
    }

    /// Adds an empty column to every record. Returns `false` if the column
    /// already exists.
    pub fn add_column(&self, name: &str, kind: ColumnKind) -> Result<bool> {
        let _guard = self.lock();
        let Snapshot {
            mut schema,
            mut records,
            ..
        } = self.read()?;

        if !schema.add_column(name, kind) {
            return Ok(false);
        }
        info!(
            "{}: added column '{}' (schema v{})",
            self.path.display(),
            name,
            schema.version()
        );
        fill_missing_columns(&schema, &mut records);
        self.rewrite(&schema, &records)?;
        Ok(true)
    }

    /// Appends `record` at the end of the store.
    ///
    /// The record must carry an id that is not in use yet. If the file
    /// already has a header and the record introduces no new column, a single
    /// line is appended; otherwise the whole file is rewritten with the
    /// widened header.
    pub fn append_record(&self, record: Record) -> Result<()> {
        let _guard = self.lock();
        let snapshot = self.read()?;
        self.append_locked(snapshot, record)
    }

    /// Appends `record` under a freshly assigned id and returns that id.
    ///
    /// Ids are the current Unix time in seconds, bumped past the largest
    /// numeric id already stored so that creates within the same second stay
    /// unique.
    pub fn insert_new(&self, mut record: Record) -> Result<String> {
        let _guard = self.lock();
        let snapshot = self.read()?;
        let id = next_id(&snapshot.records)?;
        record.set(ID_FIELD, id.clone());
        self.append_locked(snapshot, record)?;
        Ok(id)
    }

    /// Removes the record `id`. Returns `false`, without touching the file,
    /// when no such record exists. Removing the last record leaves a
    /// header-only file behind.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let _guard = self.lock();
        let Snapshot {
            schema,
            mut records,
            ..
        } = self.read()?;

        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            debug!("{}: delete of unknown id {}", self.path.display(), id);
            return Ok(false);
        }
        self.rewrite(&schema, &records)?;
        info!("{}: deleted record {}", self.path.display(), id);
        Ok(true)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn modify<A>(&self, id: &str, fields: &[&str], apply: A) -> Result<bool>
    where
        A: FnOnce(&mut Record),
    {
        let _guard = self.lock();
        let Snapshot {
            mut schema,
            mut records,
            ..
        } = self.read()?;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            debug!("{}: no record with id {}", self.path.display(), id);
            return Ok(false);
        };

        for field in fields {
            if schema.add_column(field, self.base.kind_of(field)) {
                info!(
                    "{}: widening header with '{}' (schema v{})",
                    self.path.display(),
                    field,
                    schema.version()
                );
            }
        }
        fill_missing_columns(&schema, &mut records);

        apply(&mut records[index]);
        self.rewrite(&schema, &records)?;
        Ok(true)
    }

    fn append_locked(&self, snapshot: Snapshot, record: Record) -> Result<()> {
        let id = record.id().to_string();
        if id.is_empty() {
            return Err(StoreError::MissingId);
        }
        if snapshot.records.iter().any(|r| r.id() == id) {
            return Err(StoreError::DuplicateId(id));
        }

        let Snapshot {
            mut schema,
            mut records,
            has_header,
        } = snapshot;

        let widened = schema.absorb(&record, &self.base);
        if has_header && !widened {
            self.append_line(&schema, &record)?;
        } else {
            records.push(record);
            fill_missing_columns(&schema, &mut records);
            self.rewrite(&schema, &records)?;
        }
        debug!("{}: appended record {}", self.path.display(), id);
        Ok(())
    }

    fn read(&self) -> Result<Snapshot> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(self.empty_snapshot()),
            Err(e) => return Err(StoreError::read(&self.path, e.into())),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);
        let header = reader
            .headers()
            .map_err(|e| StoreError::read(&self.path, e))?
            .clone();
        if header.is_empty() {
            return Ok(self.empty_snapshot());
        }

        let schema = Schema::from_header(header.iter(), &self.base);
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| StoreError::read(&self.path, e))?;
            records.push(Record::from_pairs(header.iter().zip(row.iter())));
        }

        Ok(Snapshot {
            schema,
            records,
            has_header: true,
        })
    }

    fn empty_snapshot(&self) -> Snapshot {
        Snapshot {
            schema: self.base.clone(),
            records: Vec::new(),
            has_header: false,
        }
    }

    /// Writes header and rows to a temporary file next to the store and
    /// renames it over the store file.
    fn rewrite(&self, schema: &Schema, records: &[Record]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::write(&self.path, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::write(&self.path, e))?;
        {
            let mut writer = csv_writer(tmp.as_file_mut());
            writer
                .write_record(schema.names())
                .map_err(|e| StoreError::write(&self.path, e))?;
            for record in records {
                writer
                    .write_record(schema.names().map(|name| record.get(name)))
                    .map_err(|e| StoreError::write(&self.path, e))?;
            }
            writer.flush().map_err(|e| StoreError::write(&self.path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::write(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::write(&self.path, e))?;

        debug!(
            "{}: rewrote {} records",
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    fn append_line(&self, schema: &Schema, record: &Record) -> Result<()> {
        let write_err = |e: io::Error| StoreError::write(&self.path, e);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;

        let mut line = Vec::new();
        if file.metadata().map_err(write_err)?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1)).map_err(write_err)?;
            file.read_exact(&mut last).map_err(write_err)?;
            if last[0] != b'\n' {
                line.extend_from_slice(b"\r\n");
            }
        }
        {
            let mut writer = csv_writer(&mut line);
            writer
                .write_record(schema.names().map(|name| record.get(name)))
                .map_err(|e| StoreError::write(&self.path, e))?;
            writer.flush().map_err(write_err)?;
        }

        append_or_roll_back(&mut file, &line).map_err(write_err)
    }
}

/// Writes `bytes` at the end of `file`. On failure the file is cut back to
/// its previous length so no partial row is left behind.
fn append_or_roll_back(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    let len = file.metadata()?.len();
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    if let Err(e) = written {
        if let Err(undo) = file.set_len(len) {
            warn!("could not truncate after failed append: {}", undo);
        }
        return Err(e);
    }
    Ok(())
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(inner)
}

fn fill_missing_columns(schema: &Schema, records: &mut [Record]) {
    for record in records.iter_mut() {
        for name in schema.names() {
            record.ensure_field(name, "");
        }
    }
}

fn next_id(records: &[Record]) -> Result<String> {
    let now = Utc::now().timestamp().max(0) as u64;
    let highest = records.iter().filter_map(|r| r.id().parse::<u64>().ok()).max();
    match highest {
        Some(h) if h >= now => h
            .checked_add(1)
            .map(|id| id.to_string())
            .ok_or_else(|| StoreError::DuplicateId(h.to_string())),
        _ => Ok(now.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn cafe_schema() -> Schema {
        Schema::new(vec![
            Column::new("id", ColumnKind::Text),
            Column::new("nombre", ColumnKind::Text),
            Column::new("visitada", ColumnKind::Flag),
            Column::new("media_files", ColumnKind::MediaList),
        ])
    }

    fn setup() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = RecordStore::open(dir.path().join("data/cafeterias.csv"), cafe_schema());
        (dir, store)
    }

    fn cafe(id: &str, nombre: &str) -> Record {
        Record::from_pairs([
            ("id", id),
            ("nombre", nombre),
            ("visitada", "False"),
            ("media_files", ""),
        ])
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let (_dir, store) = setup();
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.find_by_id("1").unwrap(), None);
    }

    #[test]
    fn zero_byte_file_is_an_empty_store() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();
        assert!(store.load_all().unwrap().is_empty());

        store.append_record(cafe("1", "Café Uno")).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("id,nombre,visitada,media_files\r\n"));
    }

    #[test]
    fn append_update_find_scenario() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Café Uno")).unwrap();

        assert!(store.update_field("1", "visitada", "True").unwrap());

        let found = store.find_by_id("1").unwrap().expect("record 1");
        assert_eq!(found.get("visitada"), "True");
        assert_eq!(found.get("nombre"), "Café Uno");
    }

    #[test]
    fn numeric_ids_are_compared_as_text() {
        let (_dir, store) = setup();
        store.append_record(cafe("42", "Numérico")).unwrap();
        assert!(store.find_by_id(&42.to_string()).unwrap().is_some());
        assert!(store.find_by_id("042").unwrap().is_none());
    }

    #[test]
    fn update_leaves_other_records_untouched() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        store.append_record(cafe("2", "Dos")).unwrap();
        store.append_record(cafe("3", "Tres")).unwrap();
        let before = store.load_all().unwrap();

        store.update_field("2", "nombre", "Dos, con coma").unwrap();

        let after = store.load_all().unwrap();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].get("nombre"), "Dos, con coma");
        assert_eq!(after[1].get("visitada"), before[1].get("visitada"));
    }

    #[test]
    fn update_of_missing_id_does_not_rewrite() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        let bytes_before = fs::read(store.path()).unwrap();

        assert!(!store.update_field("999", "nombre", "Fantasma").unwrap());
        assert!(!store.update_field("999", "nueva_columna", "x").unwrap());

        assert_eq!(fs::read(store.path()).unwrap(), bytes_before);
        assert!(!store.schema().unwrap().contains("nueva_columna"));
    }

    #[test]
    fn new_field_widens_every_record() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        store.append_record(cafe("2", "Dos")).unwrap();

        store.update_field("2", "google_photos_link", "https://photos").unwrap();

        let schema = store.schema().unwrap();
        assert_eq!(schema.names().last(), Some("google_photos_link"));
        for record in store.load_all().unwrap() {
            assert!(record.has_field("google_photos_link"));
        }
        let uno = store.find_by_id("1").unwrap().unwrap();
        assert_eq!(uno.get("google_photos_link"), "");
    }

    #[test]
    fn columns_added_later_round_trip_for_every_record() {
        let (_dir, store) = setup();
        for i in 1..=4 {
            store
                .append_record(cafe(&i.to_string(), &format!("Café {i}")))
                .unwrap();
        }
        store.update_field("2", "ambiance", "4").unwrap();
        store.update_field("4", "want_return", "5").unwrap();
        store
            .append_record(Record::from_pairs([("id", "5"), ("food_quality", "3")]))
            .unwrap();

        let columns: Vec<String> = store.schema().unwrap().names().map(String::from).collect();
        assert_eq!(columns.len(), 7);
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 5);
        for record in &records {
            for column in &columns {
                assert!(record.has_field(column), "{} lacks {}", record.id(), column);
            }
        }
        assert_eq!(records[0].get("ambiance"), "");
        assert_eq!(records[1].get("ambiance"), "4");
        assert_eq!(records[4].get("nombre"), "");
        assert_eq!(records[4].get("food_quality"), "3");
    }

    #[test]
    fn append_goes_last_and_keeps_order() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        store.append_record(cafe("2", "Dos")).unwrap();
        let before = store.load_all().unwrap();

        store.append_record(cafe("3", "Tres")).unwrap();

        let after = store.load_all().unwrap();
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(after.last().unwrap().id(), "3");
    }

    #[test]
    fn append_reuses_existing_header_order() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "nombre,id,visitada,media_files\r\nUno,1,True,\r\n").unwrap();

        store.append_record(cafe("2", "Dos")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "nombre,id,visitada,media_files\r\nUno,1,True,\r\nDos,2,False,\r\n"
        );
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "id,nombre,visitada,media_files\nUno,1,False,").unwrap();

        store.append_record(cafe("2", "Dos")).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn append_rejects_duplicate_and_missing_ids() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        assert!(matches!(
            store.append_record(cafe("1", "Otra")),
            Err(StoreError::DuplicateId(id)) if id == "1"
        ));
        assert!(matches!(
            store.append_record(Record::from_pairs([("nombre", "Sin id")])),
            Err(StoreError::MissingId)
        ));
    }

    #[test]
    fn insert_new_assigns_unique_increasing_ids() {
        let (_dir, store) = setup();
        let a = store.insert_new(cafe("", "Uno")).unwrap();
        let b = store.insert_new(cafe("", "Dos")).unwrap();
        let c = store.insert_new(cafe("", "Tres")).unwrap();

        let (a, b, c): (u64, u64, u64) = (a.parse().unwrap(), b.parse().unwrap(), c.parse().unwrap());
        assert!(a < b && b < c);
        assert_eq!(store.load_all().unwrap().len(), 3);
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let (_dir, store) = setup();
        for id in ["1", "2", "3"] {
            store.append_record(cafe(id, id)).unwrap();
        }

        assert!(store.delete_by_id("2").unwrap());

        assert_eq!(store.find_by_id("2").unwrap(), None);
        let ids: Vec<String> = store
            .load_all()
            .unwrap()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn deleting_last_record_empties_the_store() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();

        assert!(store.delete_by_id("1").unwrap());

        assert!(store.load_all().unwrap().is_empty());
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "id,nombre,visitada,media_files\r\n");

        store.append_record(cafe("2", "Dos")).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_of_missing_id_is_a_no_op() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        assert!(!store.delete_by_id("7").unwrap());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn malformed_row_is_reported() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "id,nombre,visitada\r\n1,Uno,False\r\n2,Dos\r\n").unwrap();

        match store.load_all() {
            Err(StoreError::MalformedRecord {
                line,
                expected,
                found,
                ..
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_not_rewritten() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        fs::write(store.path(), "id,nombre,visitada\r\n1,Uno\r\n").unwrap();
        let bytes_before = fs::read(store.path()).unwrap();

        assert!(store.update_field("1", "nombre", "x").is_err());
        assert_eq!(fs::read(store.path()).unwrap(), bytes_before);
    }

    #[test]
    fn add_column_is_explicit_and_idempotent() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();

        assert!(store.add_column("food_quality", ColumnKind::Rating).unwrap());
        assert!(!store.add_column("food_quality", ColumnKind::Rating).unwrap());

        let schema = store.schema().unwrap();
        assert_eq!(schema.kind_of("food_quality"), ColumnKind::Text);
        assert_eq!(schema.version(), 2);
        assert_eq!(store.find_by_id("1").unwrap().unwrap().get("food_quality"), "");
    }

    #[test]
    fn update_field_with_sees_current_value() {
        let (_dir, store) = setup();
        let mut record = cafe("1", "Uno");
        record.set("media_files", "a.jpg");
        store.append_record(record).unwrap();

        let stored = store
            .update_field_with("1", "media_files", |old| format!("{old},b.mp4"))
            .unwrap();
        assert_eq!(stored.as_deref(), Some("a.jpg,b.mp4"));
        assert_eq!(
            store.update_field_with("9", "media_files", |_| String::new()).unwrap(),
            None
        );
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .update_field_with("1", "media_files", |old| {
                            if old.is_empty() {
                                format!("f{i}")
                            } else {
                                format!("{old},f{i}")
                            }
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let record = store.find_by_id("1").unwrap().unwrap();
        assert_eq!(record.media_files().len(), 8);
    }

    #[test]
    fn insert_new_refuses_to_overflow_ids() {
        let (_dir, store) = setup();
        store.append_record(cafe(&u64::MAX.to_string(), "Última")).unwrap();

        let err = store.insert_new(cafe("", "Otra")).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId(id) if id == u64::MAX.to_string()));
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::os::unix::fs::symlink(dir.path().join("gone/deeper"), &data).unwrap();
        let store = RecordStore::open(data.join("cafeterias.csv"), cafe_schema());
        assert!(store.load_all().unwrap().is_empty());

        let err = store.append_record(cafe("1", "Uno")).unwrap_err();

        assert!(matches!(err, StoreError::StorageWrite { .. }), "{err:?}");
        assert!(!dir.path().join("gone").exists());
    }

    #[test]
    fn failed_append_leaves_file_as_it_was() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let mut read_only = File::open(store.path()).unwrap();
        assert!(append_or_roll_back(&mut read_only, b"2,Dos,False,\r\n").is_err());

        assert_eq!(fs::read(store.path()).unwrap(), before);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn no_temp_files_are_left_behind() {
        let (_dir, store) = setup();
        store.append_record(cafe("1", "Uno")).unwrap();
        store.update_field("1", "nombre", "x").unwrap();
        store.delete_by_id("1").unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("cafeterias.csv")]);
    }
}
