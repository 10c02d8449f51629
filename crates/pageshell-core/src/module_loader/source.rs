use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::module_loader::error::ModuleLoadError;
use crate::module_loader::ModuleSource;

/// WebAssembly binary magic, `\0asm`
const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// Binary format version understood by current engines
const WASM_VERSION: u32 = 1;

/// Check the preamble of a WebAssembly binary.
///
/// Returns the format version on success.
pub fn validate_wasm_header(bytes: &[u8]) -> Result<u32, String> {
    if bytes.len() < 8 {
        return Err(format!("expected at least 8 bytes, found {}", bytes.len()));
    }
    if bytes[..4] != WASM_MAGIC {
        return Err("missing WebAssembly magic number".to_string());
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != WASM_VERSION {
        return Err(format!("unsupported binary version {}", version));
    }
    Ok(version)
}

/// Loads the module from the local filesystem.
///
/// `path` is resolved against `base_dir`. Initialization validates the
/// WebAssembly preamble; the module body is left to its own runtime.
#[derive(Debug, Clone)]
pub struct FsModuleSource {
    base_dir: PathBuf,
}

impl FsModuleSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait(?Send)]
impl ModuleSource for FsModuleSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn load_and_init(&self, path: &str) -> Result<(), ModuleLoadError> {
        let full_path = self.base_dir.join(path);
        let bytes = tokio::fs::read(&full_path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModuleLoadError::NotFound { path: full_path.clone() }
            } else {
                ModuleLoadError::Io { path: full_path.clone(), source }
            }
        })?;

        let version = validate_wasm_header(&bytes).map_err(|reason| ModuleLoadError::InvalidModule {
            path: full_path.display().to_string(),
            reason,
        })?;
        log::debug!(
            "Module '{}' validated ({} bytes, binary version {})",
            full_path.display(),
            bytes.len(),
            version
        );
        Ok(())
    }
}
