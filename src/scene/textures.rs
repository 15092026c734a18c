//! Tag-addressed texture slots.

use crate::abs::Texture;

/// Number of texture units the scene may occupy.
pub const MAX_TEXTURE_SLOTS: usize = 16;

#[derive(Debug)]
pub struct TextureSlot<T> {
    pub tag: String,
    pub texture: T,
}

/// Append-only list of up to [`MAX_TEXTURE_SLOTS`] textures, looked up by tag.
///
/// The slot index doubles as the texture unit the texture is bound to.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    slots: Vec<TextureSlot<T>>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_TEXTURE_SLOTS),
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `texture` in the next free slot and returns that slot.
    pub fn register(&mut self, tag: impl Into<String>, texture: T) -> Result<usize, String> {
        let tag = tag.into();
        if self.slots.len() >= MAX_TEXTURE_SLOTS {
            return Err(format!(
                "cannot register texture '{tag}': all {MAX_TEXTURE_SLOTS} slots are in use"
            ));
        }
        self.slots.push(TextureSlot { tag, texture });
        Ok(self.slots.len() - 1)
    }

    /// Returns the first texture registered under `tag`.
    pub fn find_texture_id(&self, tag: &str) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.tag == tag)
            .map(|slot| &slot.texture)
    }

    /// Returns the slot of the first texture registered under `tag`.
    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl TextureRegistry<Texture> {
    /// Binds every loaded texture to the unit matching its slot.
    pub fn bind_all(&self) {
        for (unit, slot) in self.slots.iter().enumerate() {
            slot.texture.bind(unit as u32);
        }
    }
}
