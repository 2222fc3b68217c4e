use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ncommon::BoxFuture;

use crate::backend::SecretStore;
use crate::error::StorageError;

/// Stores each secret in its own file under `root`, named by the hex-encoded key.
#[derive(Debug)]
pub struct FileSecretStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileSecretStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        create_private_dir(&root).map_err(|error| {
            StorageError::unavailable(format!("failed to create secret store root: {error}"))
        })?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.secret", hex_encode(key.as_bytes())))
    }
}

impl SecretStore for FileSecretStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;
            let path = self.entry_path(key);
            if !path.exists() {
                return Ok(None);
            }

            let value = fs::read_to_string(&path).map_err(|error| {
                StorageError::unavailable(format!("failed to read secret file: {error}"))
            })?;
            Ok(Some(value))
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;
            write_atomic(&self.entry_path(key), value.as_bytes())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;
            let path = self.entry_path(key);
            if !path.exists() {
                return Ok(());
            }

            fs::remove_file(&path).map_err(|error| {
                StorageError::unavailable(format!("failed to remove secret file: {error}"))
            })
        })
    }
}

pub(crate) fn default_secret_root() -> PathBuf {
    if let Some(explicit) = std::env::var_os("NYAYA_SECRET_DIR") {
        return PathBuf::from(explicit);
    }

    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        return PathBuf::from(home).join(".nyaya").join("secrets");
    }

    PathBuf::from(".nyaya-secrets")
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let Some(parent) = path.parent() else {
        return Err(StorageError::unavailable(
            "secret file missing parent directory",
        ));
    };
    create_private_dir(parent).map_err(|error| {
        StorageError::unavailable(format!("failed to create parent directory: {error}"))
    })?;

    let tmp = path.with_extension("secret.tmp");
    write_private_file(&tmp, bytes).map_err(|error| {
        let _ = fs::remove_file(&tmp);
        StorageError::unavailable(format!("failed to write temporary secret file: {error}"))
    })?;

    // rename replaces the target in one step; readers never observe a missing record.
    fs::rename(&tmp, path)
        .map_err(|error| StorageError::unavailable(format!("failed to finalize secret file: {error}")))
}

fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(0o700);
        builder.create(dir)?;
        // DirBuilder leaves an existing directory's mode alone.
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
    }
    #[cfg(not(unix))]
    {
        builder.create(dir)
    }
}

fn write_private_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    // A leftover temp file from a crash would keep its old mode through truncate.
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn hex_encode(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input {
        output.push(nibble_to_hex(byte >> 4));
        output.push(nibble_to_hex(byte & 0x0f));
    }
    output
}

fn nibble_to_hex(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'a' + (nibble - 10)) as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("nauth-{prefix}-{unique}"))
    }

    #[test]
    fn hex_encode_produces_lowercase_pairs() {
        assert_eq!(hex_encode(b"a.b"), "612e62");
        assert_eq!(hex_encode(&[0x0f, 0xa0]), "0fa0");
    }

    #[tokio::test]
    async fn file_store_sets_gets_and_deletes() {
        let root = temp_dir("roundtrip");
        let store = FileSecretStore::new(&root).expect("store should open");

        assert_eq!(store.get("k").await.expect("get"), None);

        store.set("k", "v1".to_string()).await.expect("set");
        store.set("k", "v2".to_string()).await.expect("overwrite");
        assert_eq!(store.get("k").await.expect("get"), Some("v2".to_string()));

        store.delete("k").await.expect("delete");
        store.delete("k").await.expect("second delete is a no-op");
        assert_eq!(store.get("k").await.expect("get"), None);

        let _ = fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let root = temp_dir("persist");
        {
            let store = FileSecretStore::new(&root).expect("store should open");
            store
                .set("nyaya.credential", "{}".to_string())
                .await
                .expect("set");
        }

        let reopened = FileSecretStore::new(&root).expect("store should reopen");
        assert_eq!(
            reopened.get("nyaya.credential").await.expect("get"),
            Some("{}".to_string())
        );

        let _ = fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn overwrite_leaves_no_temp_files_behind() {
        let root = temp_dir("overwrite");
        let store = FileSecretStore::new(&root).expect("store should open");

        store.set("nyaya.credential", "old".to_string()).await.expect("set");
        store.set("nyaya.credential", "new".to_string()).await.expect("overwrite");

        assert_eq!(
            store.get("nyaya.credential").await.expect("get"),
            Some("new".to_string())
        );
        let leftovers: Vec<_> = fs::read_dir(&root)
            .expect("root should be readable")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "unexpected temp files: {leftovers:?}");

        let _ = fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn stale_temp_file_does_not_block_writes() {
        let root = temp_dir("stale-tmp");
        let store = FileSecretStore::new(&root).expect("store should open");
        let tmp = store.entry_path("k").with_extension("secret.tmp");
        fs::write(&tmp, "half-written").expect("seed stale temp file");

        store.set("k", "v".to_string()).await.expect("set");

        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
        assert!(!tmp.exists());

        let _ = fs::remove_dir_all(root);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn secret_files_are_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let root = temp_dir("perms");
        fs::create_dir_all(&root).expect("pre-create root");
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).expect("widen root");

        let store = FileSecretStore::new(&root).expect("store should open");
        store
            .set("nyaya.credential", "{\"token\":\"t\"}".to_string())
            .await
            .expect("set");
        store
            .set("nyaya.credential", "{\"token\":\"u\"}".to_string())
            .await
            .expect("overwrite");

        let dir_mode = fs::metadata(&root).expect("root metadata").permissions().mode();
        let file_mode = fs::metadata(store.entry_path("nyaya.credential"))
            .expect("file metadata")
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o077, 0, "root mode {dir_mode:o}");
        assert_eq!(file_mode & 0o077, 0, "file mode {file_mode:o}");

        let _ = fs::remove_dir_all(root);
    }
}
