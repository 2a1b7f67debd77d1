//! The Typst `World` backing one render: a single main source, a map of
//! binary assets, and the shared font cache. Nothing touches the real
//! filesystem during compilation.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use crate::compiler::RenderError;

pub struct ReportWorld {
    main: Source,
    assets: HashMap<FileId, Bytes>,
    font_cache: &'static FontCache,
    library: LazyHash<Library>,
    book: LazyHash<FontBook>,
    /// Timestamp fixed at construction so `datetime.today()` is stable
    /// within one render.
    now: chrono::DateTime<Utc>,
}

impl ReportWorld {
    pub fn new(
        source: String,
        inputs: HashMap<String, serde_json::Value>,
        assets: HashMap<String, Vec<u8>>,
    ) -> Result<Self, RenderError> {
        let main_id = FileId::new(None, VirtualPath::new("/main.typ"));
        let main = Source::new(main_id, source);

        let mut asset_map = HashMap::new();
        for (path, bytes) in assets {
            if path.contains("..") {
                return Err(RenderError::InvalidInput(format!(
                    "asset path '{path}' escapes the document root"
                )));
            }
            let id = FileId::new(None, VirtualPath::new(&normalize_path(&path)));
            asset_map.insert(id, Bytes::from(bytes));
        }

        let inputs = inputs_dict(inputs)?;
        let library = Library::builder().with_inputs(inputs).build();
        let font_cache = global_font_cache();

        Ok(Self {
            main,
            assets: asset_map,
            font_cache,
            library: LazyHash::new(library),
            book: LazyHash::new(font_cache.book().clone()),
            now: Utc::now(),
        })
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.assets
            .get(&id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.now + chrono::Duration::hours(offset.unwrap_or(0));
        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

fn normalize_path(path: &str) -> String {
    let mut normalized = path.to_string();
    if !normalized.starts_with('/') {
        normalized = format!("/{normalized}");
    }
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    normalized
}

fn inputs_dict(inputs: HashMap<String, serde_json::Value>) -> Result<Dict, RenderError> {
    let mut dict = Dict::new();
    for (key, value) in inputs {
        dict.insert(key.into(), json_to_value(&value)?);
    }
    Ok(dict)
}

fn json_to_value(json: &serde_json::Value) -> Result<Value, RenderError> {
    match json {
        serde_json::Value::Null => Ok(Value::None),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(RenderError::InvalidInput(format!("invalid number: {n}")))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.as_str().into())),
        serde_json::Value::Array(items) => {
            let values: Vec<Value> = items
                .iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(Array::from(values.as_slice())))
        }
        serde_json::Value::Object(entries) => {
            let mut dict = Dict::new();
            for (key, value) in entries {
                dict.insert(key.as_str().into(), json_to_value(value)?);
            }
            Ok(Value::Dict(dict))
        }
    }
}
