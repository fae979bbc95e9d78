//! File-backed store driven through the paged disk and sector device.

use anyhow::Result;
use pagedisk::{PageConfig, PageIndex, PageStore, PagedDisk};
use pagedisk_platform::{FsPageStore, FsStoreConfig};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn test_open_creates_directory() -> Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;

    let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
    assert!(store.dir().is_dir());
    assert!(store.dir().ends_with("pagedisk/disk_pages"));
    assert_eq!(store.page_count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_get_missing_page_is_none() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;

    assert_eq!(store.get(&PageIndex::new(9).key()).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_put_replaces_page() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
    let key = PageIndex::new(1).key();

    store.put(&key, &[1u8; 64]).await?;
    store.put(&key, &[2u8; 64]).await?;

    assert_eq!(store.get(&key).await?, Some(vec![2u8; 64]));
    assert_eq!(store.page_count().await?, 1);
    assert!(store.dir().join("page_1").is_file());
    assert!(!store.dir().join("page_1.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_store_without_directory_is_created_on_first_use() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FsPageStore::new(FsStoreConfig::new(dir.path()).with_store_name("lazy"));
    assert!(!store.dir().exists());
    assert_eq!(store.page_count().await?, 0);

    let disk = PagedDisk::new(store, PageConfig::new(4096, 2)?);
    disk.write(10, b"hello").await?;

    assert!(disk.store().dir().is_dir());
    assert_eq!(disk.store().page_count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_sectors_survive_reopen() -> Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let config = PageConfig::new(4096, 2)?;
    let total_bytes = 64 * 1024;

    let sector: Vec<u8> = (0..1024).map(|i| (i % 253) as u8).collect();
    {
        let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
        let device = PagedDisk::new(store, config).into_block_device(total_bytes);
        // Sectors 7 and 8 straddle the first page boundary
        device.write_sectors(7, 2, &sector).await?;
    }

    let store = FsPageStore::open(FsStoreConfig::new(dir.path())).await?;
    assert_eq!(store.page_count().await?, 2);

    let device = PagedDisk::new(store, config).into_block_device(total_bytes);
    let mut read_back = vec![0u8; 1024];
    device.read_sectors(7, 2, &mut read_back).await?;
    assert_eq!(read_back, sector);

    let mut untouched = vec![0xAAu8; 512];
    device.read_sectors(100, 1, &mut untouched).await?;
    assert_eq!(untouched, vec![0u8; 512]);
    Ok(())
}

#[tokio::test]
async fn test_unusable_root_is_store_unavailable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file")?;

    let store = FsPageStore::new(FsStoreConfig::new(&blocker));
    let disk = PagedDisk::new(store, PageConfig::new(4096, 2)?);

    let mut buf = [0u8; 16];
    let err = disk.read(0, &mut buf).await.unwrap_err();
    assert!(matches!(err, pagedisk::DiskError::StoreUnavailable(_)));
    Ok(())
}
