//! The two kinds of entries the application tracks and where each one lives.

use crate::store::{Column, ColumnKind, RecordStore, Schema};
use common::model::record::Record;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A café, visited or still on the list.
    Cafe,
    /// A planned outing.
    Outing,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Cafe, EntityKind::Outing];

    pub fn csv_file(self) -> &'static str {
        match self {
            EntityKind::Cafe => "cafeterias.csv",
            EntityKind::Outing => "citas.csv",
        }
    }

    /// Sub-directory of the upload root holding this kind's files.
    pub fn upload_subdir(self) -> &'static str {
        match self {
            EntityKind::Cafe => "cafeterias",
            EntityKind::Outing => "citas",
        }
    }

    /// Singular URL segment, also the prefix of cover image file names.
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Cafe => "cafeteria",
            EntityKind::Outing => "cita",
        }
    }

    /// Plural URL segment of the listing page.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Cafe => "cafeterias",
            EntityKind::Outing => "citas",
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            EntityKind::Cafe => "Nueva Cafetería",
            EntityKind::Outing => "Nueva Cita",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            EntityKind::Cafe => "Cafetería no encontrada",
            EntityKind::Outing => "Cita no encontrada",
        }
    }

    /// Whether entries of this kind carry a Likert evaluation.
    pub fn has_evaluation(self) -> bool {
        matches!(self, EntityKind::Cafe)
    }

    /// Fields written by the edit form, with the value used when the form
    /// leaves one out. Unchecked checkboxes are absent from the form, hence
    /// the `"False"` defaults.
    pub fn editable_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityKind::Cafe => &[
                ("nombre", ""),
                ("ubicacion", ""),
                ("google_maps_url", ""),
                ("visitada", "False"),
                ("fecha_visita", ""),
            ],
            EntityKind::Outing => &[
                ("nombre", ""),
                ("ubicacion", ""),
                ("fecha", ""),
                ("realizada", "False"),
                ("fecha_realizada", ""),
            ],
        }
    }

    /// Column layout of a brand new store file.
    pub fn base_schema(self) -> Schema {
        use ColumnKind::*;
        let columns: &[(&str, ColumnKind)] = match self {
            EntityKind::Cafe => &[
                ("id", Text),
                ("nombre", Text),
                ("ubicacion", Text),
                ("visitada", Flag),
                ("imagen", Text),
                ("fecha_visita", Text),
                ("google_maps_url", Text),
                ("food_quality", Rating),
                ("ambiance", Rating),
                ("want_return", Rating),
                ("google_photos_link", Text),
                ("media_files", MediaList),
            ],
            EntityKind::Outing => &[
                ("id", Text),
                ("nombre", Text),
                ("ubicacion", Text),
                ("realizada", Flag),
                ("imagen", Text),
                ("fecha", Text),
                ("fecha_realizada", Text),
                ("google_photos_link", Text),
                ("media_files", MediaList),
            ],
        };
        Schema::new(
            columns
                .iter()
                .map(|(name, kind)| Column::new(name, *kind))
                .collect(),
        )
    }

    /// Default values of a freshly created entry, without an id.
    pub fn seed_record(self) -> Record {
        let mut record = self.base_schema().blank_record();
        record.set("nombre", self.default_name());
        record
    }

    pub fn list_path(self) -> String {
        format!("/{}", self.plural())
    }

    pub fn detail_path(self, id: &str) -> String {
        format!("/{}/{}", self.singular(), id)
    }

    pub fn edit_path(self, id: &str) -> String {
        format!("/edit-{}/{}", self.singular(), id)
    }
}

/// One entity kind's store together with its upload directory.
pub struct EntityRepo {
    pub kind: EntityKind,
    pub store: RecordStore,
    pub upload_dir: PathBuf,
}

impl EntityRepo {
    pub fn open(kind: EntityKind, data_dir: &Path, upload_root: &Path) -> Self {
        Self {
            kind,
            store: RecordStore::open(data_dir.join(kind.csv_file()), kind.base_schema()),
            upload_dir: upload_root.join(kind.upload_subdir()),
        }
    }
}
