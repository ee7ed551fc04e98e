//! Renderer-facing components
//!
//! Mesh and material components only reference GPU-side resources by id. The
//! renderer that resolves those ids lives outside this crate.

use std::fmt;

/// Identifier of a geometry resource owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Identifier of a texture resource owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// Mesh component: which geometry to draw for the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshComponent {
    /// Geometry reference
    pub mesh: MeshId,
}

impl MeshComponent {
    /// Create a mesh component
    pub fn new(mesh: MeshId) -> Self {
        Self { mesh }
    }
}

/// Maximum number of texture slots a material can reference
pub const MAX_MATERIAL_TEXTURES: usize = 8;

/// Material component: ordered texture slots (albedo first)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaterialComponent {
    textures: Vec<TextureId>,
}

impl MaterialComponent {
    /// Create a material from texture slots, keeping at most
    /// [`MAX_MATERIAL_TEXTURES`] of them
    pub fn new(textures: impl IntoIterator<Item = TextureId>) -> Self {
        let textures: Vec<_> = textures.into_iter().collect();
        if textures.len() > MAX_MATERIAL_TEXTURES {
            log::warn!(
                "Material given {} textures, keeping the first {}",
                textures.len(),
                MAX_MATERIAL_TEXTURES
            );
        }
        Self {
            textures: textures.into_iter().take(MAX_MATERIAL_TEXTURES).collect(),
        }
    }

    /// Texture slots in order
    pub fn textures(&self) -> &[TextureId] {
        &self.textures
    }

    /// Texture in the given slot
    pub fn texture(&self, slot: usize) -> Option<TextureId> {
        self.textures.get(slot).copied()
    }

    /// Replace or append a slot. Returns false when the slot is past the cap.
    pub fn set_texture(&mut self, slot: usize, texture: TextureId) -> bool {
        if slot >= MAX_MATERIAL_TEXTURES || slot > self.textures.len() {
            return false;
        }
        if slot == self.textures.len() {
            self.textures.push(texture);
        } else {
            self.textures[slot] = texture;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_caps_texture_slots() {
        let material = MaterialComponent::new((0..12).map(TextureId));
        assert_eq!(material.textures().len(), MAX_MATERIAL_TEXTURES);
        assert_eq!(material.texture(0), Some(TextureId(0)));
        assert_eq!(material.texture(MAX_MATERIAL_TEXTURES), None);
    }

    #[test]
    fn test_material_set_texture() {
        let mut material = MaterialComponent::default();
        assert!(material.set_texture(0, TextureId(3)));
        assert!(material.set_texture(0, TextureId(4)));
        assert!(!material.set_texture(2, TextureId(5)));
        assert_eq!(material.textures(), &[TextureId(4)]);
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(MeshId(7).to_string(), "mesh#7");
        assert_eq!(TextureId(2).to_string(), "texture#2");
    }
}
