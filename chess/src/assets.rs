//! Piece images

use crate::registry::{self, Facing};
use crate::types::{Color, PieceKind, Side};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;
use thiserror::Error;

/// Image of a piece, as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    /// Raw contents of an image file
    Image { path: PathBuf, bytes: Arc<[u8]> },
    /// Nothing could be loaded, so the renderer draws the piece by itself
    Placeholder,
}

impl Asset {
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Asset::Placeholder)
    }
}

/// Error loading a piece image
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("asset {0} not found")]
    Missing(PathBuf),
    #[error("cannot read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of piece images
pub trait AssetResolver {
    fn resolve(&self, kind: PieceKind, side: Side, facing: Facing) -> Result<Asset, AssetLoadError>;
}

/// Resolver that never loads anything
#[derive(Debug, Default, Copy, Clone)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn resolve(
        &self,
        _kind: PieceKind,
        _side: Side,
        _facing: Facing,
    ) -> Result<Asset, AssetLoadError> {
        Ok(Asset::Placeholder)
    }
}

/// Resolver reading `<dir>/<stem><color>.PNG` files
///
/// The stem is the kind name, except for knights, which use `horseleft` and `horseright`. The
/// player's pieces use `player_color`, the opponent's pieces use the other color.
#[derive(Debug, Clone)]
pub struct FsAssetResolver {
    dir: PathBuf,
    player_color: Color,
}

impl FsAssetResolver {
    pub fn new(dir: impl Into<PathBuf>, player_color: Color) -> FsAssetResolver {
        FsAssetResolver {
            dir: dir.into(),
            player_color,
        }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn color_of(&self, side: Side) -> Color {
        match side {
            Side::Player => self.player_color,
            Side::Opponent => self.player_color.inv(),
        }
    }

    /// Returns the path where the image for the given piece is expected
    pub fn path_for(&self, kind: PieceKind, side: Side, facing: Facing) -> PathBuf {
        self.dir.join(format!(
            "{}{}.PNG",
            registry::asset_stem(kind, facing),
            self.color_of(side)
        ))
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(
        &self,
        kind: PieceKind,
        side: Side,
        facing: Facing,
    ) -> Result<Asset, AssetLoadError> {
        let path = self.path_for(kind, side, facing);
        match fs::read(&path) {
            Ok(bytes) => Ok(Asset::Image {
                path,
                bytes: bytes.into(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetLoadError::Missing(path)),
            Err(source) => Err(AssetLoadError::Io { path, source }),
        }
    }
}

/// Resolves the image, falling back to [`Asset::Placeholder`] on failure
pub fn resolve_or_placeholder(
    resolver: &dyn AssetResolver,
    kind: PieceKind,
    side: Side,
    facing: Facing,
) -> Asset {
    resolver.resolve(kind, side, facing).unwrap_or_else(|e| {
        warn!("using placeholder for {} {}: {}", side, kind.name(), e);
        Asset::Placeholder
    })
}
