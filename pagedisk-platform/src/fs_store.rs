//! File-per-page store on the host filesystem.

use pagedisk::{PageKey, PageStore};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Default database name, the first directory level under the root.
pub const DEFAULT_DB_NAME: &str = "pagedisk";

/// Default store name, the directory holding the page files.
pub const DEFAULT_STORE_NAME: &str = "disk_pages";

/// Where an [`FsPageStore`] keeps its pages.
///
/// Pages live in `root/db_name/store_name/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStoreConfig {
    /// Base directory.
    pub root: PathBuf,
    /// Database directory name.
    pub db_name: String,
    /// Store directory name.
    pub store_name: String,
}

impl FsStoreConfig {
    /// Configuration with default database and store names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            db_name: DEFAULT_DB_NAME.into(),
            store_name: DEFAULT_STORE_NAME.into(),
        }
    }

    /// Override the database name.
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Override the store name.
    pub fn with_store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self
    }

    /// Directory holding the page files.
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(&self.db_name).join(&self.store_name)
    }
}

/// [`PageStore`] keeping each page in its own file.
///
/// Writes go to a temporary file which is synced and then renamed over the
/// page file, so a page on disk is always either the old or the new contents.
///
/// # Example
///
/// ```ignore
/// let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
/// store.put(&PageIndex::new(3).key(), &page).await?;
/// ```
#[derive(Debug)]
pub struct FsPageStore {
    dir: PathBuf,
    ready: AtomicBool,
}

impl FsPageStore {
    /// Create a store for `config` without touching the filesystem.
    ///
    /// The directory is created by the first [`PageStore::open`] call.
    pub fn new(config: FsStoreConfig) -> Self {
        Self {
            dir: config.pages_dir(),
            ready: AtomicBool::new(false),
        }
    }

    /// Create a store for `config` and make sure its directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(config: FsStoreConfig) -> io::Result<Self> {
        let store = Self::new(config);
        PageStore::open(&store).await?;
        Ok(store)
    }

    /// Directory holding the page files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of pages currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub async fn page_count(&self) -> io::Result<usize> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if name
                .to_str()
                .and_then(file_name_to_key)
                .is_some()
            {
                count += 1;
            }
        }
        Ok(count)
    }

    fn page_path(&self, key: &PageKey) -> PathBuf {
        self.dir.join(key_to_file_name(key))
    }
}

/// `page:7` becomes `page_7`; ':' is not a valid file name character on Windows.
fn key_to_file_name(key: &PageKey) -> String {
    key.as_str().replace(':', "_")
}

fn file_name_to_key(name: &str) -> Option<PageKey> {
    PageKey::parse(&name.replacen('_', ":", 1))
}

/// Flush the directory entry table so a completed rename survives a crash.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl PageStore for FsPageStore {
    type Error = io::Error;

    async fn open(&self) -> Result<(), Self::Error> {
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }

        fs::create_dir_all(&self.dir).await?;
        self.ready.store(true, Ordering::Release);

        #[cfg(feature = "log")]
        log::debug!("Opened page store at {}", self.dir.display());

        Ok(())
    }

    async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        match fs::read(self.page_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error> {
        let path = self.page_path(key);
        let tmp = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &path).await {
            #[cfg(feature = "log")]
            log::warn!("Failed to commit {}: {}", path.display(), e);

            // Best effort, the rename error is what matters
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        sync_dir(&self.dir).await?;

        #[cfg(feature = "log")]
        log::trace!("Stored {} ({} bytes)", key, data.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagedisk::PageIndex;

    #[test]
    fn test_file_name_round_trip() {
        let key = PageIndex::new(42).key();
        assert_eq!(key_to_file_name(&key), "page_42");
        assert_eq!(file_name_to_key("page_42"), Some(key));
        assert_eq!(file_name_to_key("page_42.tmp"), None);
        assert_eq!(file_name_to_key("notes.txt"), None);
    }

    #[tokio::test]
    async fn test_sync_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        sync_dir(dir.path()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_put_commits_into_synced_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
        let key = PageIndex::new(5).key();

        store.put(&key, &[3u8; 32]).await?;

        let names: Vec<String> = std::fs::read_dir(store.dir())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, vec!["page_5".to_owned()]);
        assert_eq!(store.get(&key).await?, Some(vec![3u8; 32]));
        Ok(())
    }

    #[test]
    fn test_config_defaults() {
        let config = FsStoreConfig::new("/data");
        assert_eq!(config.db_name, "pagedisk");
        assert_eq!(config.store_name, "disk_pages");
        assert_eq!(config.pages_dir(), PathBuf::from("/data/pagedisk/disk_pages"));

        let config = config.with_db_name("vm").with_store_name("sda");
        assert_eq!(config.pages_dir(), PathBuf::from("/data/vm/sda"));
    }
}
