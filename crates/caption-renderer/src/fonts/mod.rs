//! Shared font database with a readiness gate
//!
//! Fonts may arrive after rendering has started (a web font finishing its
//! download, a directory scanned on a worker thread). Measuring before a
//! family is present yields widths for the wrong face, so callers that hit
//! [`RenderError::FontNotLoaded`] park on [`FontRegistry::wait_for_families`]
//! until a load adds the family or the deadline passes.

use crate::utils::RenderError;
use caption_core::FontStyle;
use fontdb::{Database as FontDatabase, Family, Query, Stretch, Style, Weight, ID as FontId};
use parking_lot::{Condvar, Mutex, RwLock};
use std::path::Path;
use std::time::{Duration, Instant};

/// Thread-safe font database shared by measurement and rasterization
pub struct FontRegistry {
    database: RwLock<FontDatabase>,
    generation: Mutex<u64>,
    loaded: Condvar,
}

impl FontRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_font_database(FontDatabase::new())
    }

    /// Create a registry with every system font loaded
    pub fn with_system_fonts() -> Self {
        let registry = Self::new();
        registry.load_system_fonts();
        registry
    }

    /// Wrap an already populated database
    pub fn with_font_database(font_database: FontDatabase) -> Self {
        Self {
            database: RwLock::new(font_database),
            generation: Mutex::new(0),
            loaded: Condvar::new(),
        }
    }

    /// Load every font the platform exposes
    pub fn load_system_fonts(&self) {
        self.database.write().load_system_fonts();
        self.notify_loaded("system fonts");
    }

    /// Load all fonts found under `dir`
    pub fn load_fonts_dir(&self, dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        self.database.write().load_fonts_dir(dir);
        self.notify_loaded(&dir.display().to_string());
    }

    /// Load a single font file
    pub fn load_font_file(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.database
            .write()
            .load_font_file(path)
            .map_err(|e| RenderError::FontError(format!("{}: {e}", path.display())))?;
        self.notify_loaded(&path.display().to_string());
        Ok(())
    }

    /// Load font data held in memory
    pub fn load_font_data(&self, data: Vec<u8>) {
        self.database.write().load_font_data(data);
        self.notify_loaded("in-memory font");
    }

    fn notify_loaded(&self, source: &str) {
        let faces = self.database.read().len();
        let mut generation = self.generation.lock();
        *generation += 1;
        log::debug!("loaded fonts from {source}, {faces} faces registered");
        self.loaded.notify_all();
    }

    /// Number of registered faces
    pub fn face_count(&self) -> usize {
        self.database.read().len()
    }

    /// Whether any face of `family` is registered
    pub fn has_family(&self, family: &str) -> bool {
        self.database.read().faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    /// Sorted, de-duplicated family names
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .database
            .read()
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Best face of `family` for the requested weight and style
    pub fn query(&self, family: &str, weight: u16, style: FontStyle) -> Option<FontId> {
        let families = [Family::Name(family)];
        let query = Query {
            families: &families,
            weight: Weight(weight),
            stretch: Stretch::Normal,
            style: match style {
                FontStyle::Normal => Style::Normal,
                FontStyle::Italic => Style::Italic,
                FontStyle::Oblique => Style::Oblique,
            },
        };
        self.database.read().query(&query)
    }

    /// Run `f` with the raw font file bytes and face index of `id`
    pub fn with_face_data<R>(&self, id: FontId, f: impl FnOnce(&[u8], u32) -> R) -> Option<R> {
        self.database.read().with_face_data(id, f)
    }

    /// Block until every family in `families` is registered.
    ///
    /// Returns [`RenderError::FontsUnavailable`] naming the families still
    /// missing once `timeout` elapses.
    pub fn wait_for_families(&self, families: &[&str], timeout: Duration) -> Result<(), RenderError> {
        let deadline = Instant::now() + timeout;
        let mut generation = self.generation.lock();
        loop {
            let missing: Vec<String> = families
                .iter()
                .filter(|family| !self.has_family(family))
                .map(|family| (*family).to_string())
                .collect();
            if missing.is_empty() {
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                log::warn!("gave up waiting for fonts: {}", missing.join(", "));
                return Err(RenderError::FontsUnavailable {
                    families: missing,
                    waited_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }

            log::debug!("waiting for fonts: {}", missing.join(", "));
            self.loaded.wait_for(&mut generation, deadline - now);
        }
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("faces", &self.face_count())
            .finish()
    }
}
