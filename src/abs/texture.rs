//! Structs and functions for handling textures.
//!
//! The module provides [`load_image`] for decoding image files into [`DecodedImage`] and the
//! [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// Pixel data decoded from an image file, flipped so the first row is the bottom one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Either 3 (RGB8) or 4 (RGBA8).
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Converts a decoded [`DynamicImage`], rejecting anything that is not RGB or RGBA.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let channels = image.color().channel_count();
        let image = image.flipv();
        let pixels = match channels {
            3 => image.to_rgb8().into_raw(),
            4 => image.to_rgba8().into_raw(),
            n => return Err(format!("not implemented to handle image with {n} channels")),
        };
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    fn formats(&self) -> (i32, u32) {
        if self.channels == 4 {
            (glow::RGBA8 as i32, glow::RGBA)
        } else {
            (glow::RGB8 as i32, glow::RGB)
        }
    }
}

/// Decodes the image file at `path`.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, String> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| format!("could not load image {}: {e}", path.display()))?;
    let decoded =
        DecodedImage::from_dynamic(image).map_err(|e| format!("{}: {e}", path.display()))?;
    log::info!(
        "Successfully loaded image: {}, width: {}, height: {}, channels: {}",
        path.display(),
        decoded.width,
        decoded.height,
        decoded.channels
    );
    Ok(decoded)
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads `image` into a new mipmapped texture with repeat wrapping and linear filtering.
    pub fn from_image(gl: &Arc<glow::Context>, image: &DecodedImage) -> Result<Self, String> {
        let (internal_format, format) = image.formats();
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            // RGB rows are not 4-byte aligned for odd widths.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                image.width as i32,
                image.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: image.width,
                height: image.height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
