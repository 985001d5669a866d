//! Embedded image cache.
//!
//! Image properties are resolved to [`EmbeddedAsset`]s that are shared by every form
//! referring to the same file. The cache is internally synchronized and is handed
//! to each generator explicitly.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use crate::encoding::{ImageDescription, ImageKind};
use crate::error::{CoreError, Result};

static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a cached asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u64);

impl AssetId {
    fn next() -> Self {
        AssetId(NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct EncodedState {
    payload: Vec<u8>,
    source_time: Option<SystemTime>,
}

/// An image whose data is written into generated source.
#[derive(Debug)]
pub struct EmbeddedAsset {
    id: AssetId,
    filename: String,
    array_name: String,
    kind: ImageKind,
    state: Mutex<EncodedState>,
}

impl EmbeddedAsset {
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Path the asset was loaded from, as written in the property.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Identifier of the generated data array.
    pub fn array_name(&self) -> &str {
        &self.array_name
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// A copy of the encoded bytes.
    pub fn payload(&self) -> Vec<u8> {
        self.state.lock().payload.clone()
    }

    pub fn payload_len(&self) -> usize {
        self.state.lock().payload.len()
    }

    /// Modification time of the source file when it was last encoded.
    pub fn source_time(&self) -> Option<SystemTime> {
        self.state.lock().source_time
    }
}

/// Where asset bytes come from.
pub trait AssetSource: Send + Sync {
    /// Modification time of `path`, or `None` when it doesn't exist.
    fn modified(&self, path: &str) -> Option<SystemTime>;

    /// Read the whole file.
    fn load(&self, path: &str) -> std::io::Result<Vec<u8>>;
}

/// Reads assets from disk, relative to a project directory.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl AssetSource for FsAssetSource {
    fn modified(&self, path: &str) -> Option<SystemTime> {
        std::fs::metadata(self.full_path(path))
            .and_then(|meta| meta.modified())
            .ok()
    }

    fn load(&self, path: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.full_path(path))
    }
}

/// In-memory asset source for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    files: RwLock<IndexMap<String, (Vec<u8>, SystemTime)>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, stamping it with the current time.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files
            .write()
            .insert(path.into(), (bytes.into(), SystemTime::now()));
    }

    /// Add or replace a file with an explicit modification time.
    pub fn insert_at(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>, time: SystemTime) {
        self.files.write().insert(path.into(), (bytes.into(), time));
    }

    pub fn remove(&self, path: &str) {
        self.files.write().shift_remove(path);
    }
}

impl AssetSource for MemoryAssetSource {
    fn modified(&self, path: &str) -> Option<SystemTime> {
        self.files.read().get(path).map(|(_, time)| *time)
    }

    fn load(&self, path: &str) -> std::io::Result<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
    }
}

impl<S: AssetSource + ?Sized> AssetSource for Arc<S> {
    fn modified(&self, path: &str) -> Option<SystemTime> {
        (**self).modified(path)
    }

    fn load(&self, path: &str) -> std::io::Result<Vec<u8>> {
        (**self).load(path)
    }
}

/// Thread-safe cache of embedded assets keyed by filename.
pub struct AssetCache {
    source: Box<dyn AssetSource>,
    assets: RwLock<IndexMap<String, Arc<EmbeddedAsset>>>,
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCache")
            .field("assets", &self.assets.read().len())
            .finish()
    }
}

impl AssetCache {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            assets: RwLock::new(IndexMap::new()),
        }
    }

    /// Cache reading from the project directory.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FsAssetSource::new(root))
    }

    /// Resolve an image property string.
    ///
    /// Returns `Ok(None)` when the file doesn't exist or the kind isn't embedded
    /// (art provider, XPM and header images are referenced, not cached).
    pub fn resolve(&self, description: &str) -> Result<Option<Arc<EmbeddedAsset>>> {
        let description = ImageDescription::parse(description)?;
        self.resolve_description(&description)
    }

    pub fn resolve_description(&self, description: &ImageDescription) -> Result<Option<Arc<EmbeddedAsset>>> {
        if !description.kind.is_embedded() {
            return Ok(None);
        }
        let path = description.path.as_str();
        if let Some(asset) = self.assets.read().get(path) {
            return Ok(Some(Arc::clone(asset)));
        }

        let Some(source_time) = self.source.modified(path) else {
            return Ok(None);
        };
        let payload = self.source.load(path).map_err(|source| CoreError::AssetIo {
            path: path.to_string(),
            source,
        })?;
        let array_name = array_name_for(path);

        let mut assets = self.assets.write();
        // Another thread may have loaded it while we were reading the file.
        if let Some(asset) = assets.get(path) {
            return Ok(Some(Arc::clone(asset)));
        }
        if let Some(existing) = assets.values().find(|asset| asset.array_name == array_name) {
            return Err(CoreError::AssetNameConflict {
                first: existing.filename.clone(),
                second: path.to_string(),
                array_name,
            });
        }

        let asset = Arc::new(EmbeddedAsset {
            id: AssetId::next(),
            filename: path.to_string(),
            array_name,
            kind: description.kind,
            state: Mutex::new(EncodedState {
                payload,
                source_time: Some(source_time),
            }),
        });
        assets.insert(path.to_string(), Arc::clone(&asset));
        Ok(Some(asset))
    }

    /// A previously resolved asset.
    pub fn get(&self, filename: &str) -> Option<Arc<EmbeddedAsset>> {
        self.assets.read().get(filename).cloned()
    }

    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }

    /// True when the source file changed since the asset was encoded.
    ///
    /// A file that has disappeared keeps its cached data.
    pub fn needs_reencode(&self, asset: &EmbeddedAsset) -> bool {
        match self.source.modified(&asset.filename) {
            Some(time) => asset.source_time() != Some(time),
            None => false,
        }
    }

    /// Reload the asset's data from its source file.
    pub fn reencode(&self, asset: &EmbeddedAsset) -> Result<()> {
        let source_time = self.source.modified(&asset.filename);
        let payload = self
            .source
            .load(&asset.filename)
            .map_err(|source| CoreError::AssetIo {
                path: asset.filename.clone(),
                source,
            })?;
        let mut state = asset.state.lock();
        state.payload = payload;
        state.source_time = source_time;
        Ok(())
    }
}

/// Name of the data array generated for `path`: the snake-cased file stem followed
/// by the extension, e.g. `images/Save-As.png` becomes `save_as_png`.
pub fn array_name_for(path: &str) -> String {
    let path = Path::new(path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let mut name = stem.trim().to_case(Case::Snake);
    if let Some(ext) = path.extension() {
        name.push('_');
        name.push_str(&ext.to_string_lossy().to_ascii_lowercase());
    }
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "img_");
    }
    name
}
