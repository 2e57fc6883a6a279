//! Texture palettes for construction pieces, floors and decorations.
//!
//! Tiles are numbered from 1 and named `{prefix}-{n}`; the sprite for a tile
//! lives at `/static/css/images/myHome/{prefix}/{prefix}-{n}.png`.

use std::fmt;

/// The three tile catalogs shown in the editor palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Construction,
    Floor,
    Decoration,
}

impl TextureKind {
    /// Every palette, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Construction, Self::Floor, Self::Decoration];

    /// Number of tiles in the catalog.
    #[must_use]
    pub const fn tile_count(self) -> u32 {
        match self {
            Self::Construction => 11,
            Self::Floor => 79,
            Self::Decoration => 167,
        }
    }

    /// Texture name prefix, also the sprite sub-directory.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Floor => "floor",
            Self::Decoration => "deco",
        }
    }

    /// Name of tile `index` (1-based); `None` when out of range.
    #[must_use]
    pub fn texture(self, index: u32) -> Option<String> {
        (1..=self.tile_count())
            .contains(&index)
            .then(|| format!("{}-{index}", self.prefix()))
    }

    /// All tile names in catalog order.
    pub fn textures(self) -> impl Iterator<Item = String> {
        (1..=self.tile_count()).map(move |index| format!("{}-{index}", self.prefix()))
    }

    /// Whether `texture` names a tile of this catalog.
    #[must_use]
    pub fn contains(self, texture: &str) -> bool {
        texture
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|digits| !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<u32>().ok())
            .is_some_and(|index| (1..=self.tile_count()).contains(&index))
    }

    /// Sprite path for `texture`, relative to the dashboard root.
    #[must_use]
    pub fn sprite_path(self, texture: &str) -> String {
        format!("/static/css/images/myHome/{}/{texture}.png", self.prefix())
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Construction => "construction",
            Self::Floor => "floor",
            Self::Decoration => "decoration",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_catalog_sizes() {
        assert_eq!(TextureKind::Construction.textures().count(), 11);
        assert_eq!(TextureKind::Floor.textures().count(), 79);
        assert_eq!(TextureKind::Decoration.textures().count(), 167);
    }

    #[test]
    fn should_validate_texture_names() {
        assert!(TextureKind::Floor.contains("floor-1"));
        assert!(TextureKind::Floor.contains("floor-79"));
        assert!(!TextureKind::Floor.contains("floor-80"));
        assert!(!TextureKind::Floor.contains("floor-0"));
        assert!(!TextureKind::Floor.contains("floor-07"));
        assert!(!TextureKind::Floor.contains("deco-3"));
        assert!(TextureKind::Decoration.contains("deco-167"));
    }

    #[test]
    fn should_name_tiles_by_index() {
        assert_eq!(
            TextureKind::Construction.texture(3).as_deref(),
            Some("construction-3")
        );
        assert_eq!(TextureKind::Construction.texture(12), None);
    }

    #[test]
    fn should_build_sprite_path() {
        assert_eq!(
            TextureKind::Decoration.sprite_path("deco-12"),
            "/static/css/images/myHome/deco/deco-12.png"
        );
    }
}
