//! Named image assets and the providers that resolve them.
//!
//! A build needs at most two images: the institutional logo and the sender's
//! signature. Both are optional in the sense that a report is still produced when
//! either cannot be found or decoded; the slot is left blank and a
//! [`Notice::AssetUnavailable`] is recorded on the document.

use crate::document::Notice;
use crate::error::AssetError;
use crate::image::ImageAsset;
use derive_more::Display;
use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// The logical names assets are requested by
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetName {
    #[display("logo")]
    Logo,
    #[display("signature")]
    Signature,
}

/// The outcome of resolving an asset, as seen by the section renderers
#[derive(Debug, Clone)]
pub enum AssetRef {
    Resolved(Arc<ImageAsset>),
    Absent,
}

impl AssetRef {
    pub fn is_absent(&self) -> bool {
        matches!(self, AssetRef::Absent)
    }
}

/// Something that can turn an [`AssetName`] into image data.
///
/// Each build asks for every asset at most once. Implementations report failures as
/// errors; the builder decides what a failure means for the document.
pub trait AssetProvider {
    fn resolve(
        &self,
        name: AssetName,
    ) -> impl Future<Output = Result<ImageAsset, AssetError>> + Send;
}

/// The assets of one build, resolved before any section is laid out
#[derive(Debug, Clone)]
pub struct ResolvedAssets {
    pub logo: AssetRef,
    pub signature: AssetRef,
    pub notices: Vec<Notice>,
}

impl ResolvedAssets {
    /// No assets at all, and nothing to report about it
    pub fn none() -> ResolvedAssets {
        ResolvedAssets {
            logo: AssetRef::Absent,
            signature: AssetRef::Absent,
            notices: Vec::new(),
        }
    }

    pub fn get(&self, name: AssetName) -> &AssetRef {
        match name {
            AssetName::Logo => &self.logo,
            AssetName::Signature => &self.signature,
        }
    }

    /// Resolve the signature, and the logo when `want_logo` is set, concurrently.
    /// Failed lookups degrade to [`AssetRef::Absent`].
    pub async fn resolve<P: AssetProvider>(provider: &P, want_logo: bool) -> ResolvedAssets {
        let logo = async {
            if want_logo {
                Some(provider.resolve(AssetName::Logo).await)
            } else {
                None
            }
        };
        let signature = provider.resolve(AssetName::Signature);
        let (logo, signature) = tokio::join!(logo, signature);

        let mut notices = Vec::new();
        let logo = match logo {
            Some(result) => settle(AssetName::Logo, result, &mut notices),
            None => AssetRef::Absent,
        };
        let signature = settle(AssetName::Signature, signature, &mut notices);

        ResolvedAssets {
            logo,
            signature,
            notices,
        }
    }
}

fn settle(
    name: AssetName,
    result: Result<ImageAsset, AssetError>,
    notices: &mut Vec<Notice>,
) -> AssetRef {
    match result {
        Ok(asset) => {
            log::debug!("resolved {name} ({}x{} px)", asset.width, asset.height);
            AssetRef::Resolved(Arc::new(asset))
        }
        Err(e) => {
            log::warn!("{name} unavailable, leaving its space blank: {e}");
            notices.push(Notice::AssetUnavailable {
                asset: name,
                reason: e.to_string(),
            });
            AssetRef::Absent
        }
    }
}

/// A provider that never has anything
#[derive(Debug, Default, Copy, Clone)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn resolve(
        &self,
        name: AssetName,
    ) -> impl Future<Output = Result<ImageAsset, AssetError>> + Send {
        async move { Err(AssetError::NotFound(name)) }
    }
}

/// Assets held in memory as encoded file contents (PNG, JPEG, ...)
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    files: HashMap<AssetName, Arc<[u8]>>,
}

impl MemoryAssets {
    pub fn new() -> MemoryAssets {
        MemoryAssets::default()
    }

    pub fn with<B: Into<Vec<u8>>>(mut self, name: AssetName, bytes: B) -> MemoryAssets {
        self.files.insert(name, Arc::from(bytes.into()));
        self
    }
}

impl AssetProvider for MemoryAssets {
    fn resolve(
        &self,
        name: AssetName,
    ) -> impl Future<Output = Result<ImageAsset, AssetError>> + Send {
        let bytes = self.files.get(&name).cloned();
        async move {
            let bytes = bytes.ok_or(AssetError::NotFound(name))?;
            ImageAsset::from_bytes(&bytes)
        }
    }
}

/// Reads `logo.*` and `signature.*` from a directory. PNG and JPEG files are
/// recognised, in that order.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

impl DirectoryAssets {
    pub fn new<P: Into<PathBuf>>(root: P) -> DirectoryAssets {
        DirectoryAssets { root: root.into() }
    }
}

impl AssetProvider for DirectoryAssets {
    fn resolve(
        &self,
        name: AssetName,
    ) -> impl Future<Output = Result<ImageAsset, AssetError>> + Send {
        let root = self.root.clone();
        async move {
            for ext in EXTENSIONS {
                let path = root.join(format!("{name}.{ext}"));
                let bytes = match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                };
                log::debug!("decoding {}", path.display());
                return tokio::task::spawn_blocking(move || ImageAsset::from_bytes(&bytes))
                    .await
                    .map_err(io::Error::other)?;
            }
            Err(AssetError::NotFound(name))
        }
    }
}
