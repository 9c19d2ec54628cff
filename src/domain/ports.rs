use crate::core::snapshot::CatalogSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level storage backend. A missing file must surface as an
/// `io::ErrorKind::NotFound` inside `CinemaError::IoError`.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn max_width(&self) -> u32;
    fn max_height(&self) -> u32;
    fn data_dir(&self) -> Option<&str>;
    fn snapshot_file(&self) -> &str;
}

/// Load/save boundary for the catalog state.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load_snapshot(&self) -> Result<Option<CatalogSnapshot>>;
    async fn save_snapshot(&self, snapshot: &CatalogSnapshot) -> Result<()>;
}
