//! Texture images and sampling

use std::path::Path;

use crate::color::{argb_a, argb_b, argb_g, argb_r, lerp8, mul8, Rgba8};
use crate::error::{Error, Result};

/// Pixel format of a texture image
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PixelFormat {
    /// One 8-bit coverage value per texel; color comes from the fill
    Alpha,
    /// Packed 0x00RRGGBB, implicitly opaque
    Rgb,
    /// Packed 0xAARRGGBB
    Rgba,
}

/// Texture image: packed texel data with a format tag
///
/// Texel coordinates are in texel units; sampling clamps to the edge,
/// there is no wraparound.
#[derive(Debug,Clone)]
pub struct Texture {
    pub data: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
}

fn pack(c: Rgba8) -> u32 {
    (u32::from(c.a) << 24) | (u32::from(c.r) << 16) | (u32::from(c.g) << 8) | u32::from(c.b)
}

impl Texture {
    /// Wrap caller-provided packed texel data
    pub fn from_argb(data: Vec<u32>, width: usize, height: usize,
                     format: PixelFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyTexture { width, height });
        }
        if data.len() != width * height {
            return Err(Error::TextureSize { len: data.len(), width, height });
        }
        Ok(Texture { data, width, height, format })
    }
    /// Decode an image file into an Rgba texture
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let img = image::open(filename)?.to_rgba();
        let (w, h) = img.dimensions();
        let data = img.pixels()
            .map(|p| pack(Rgba8::new(p.data[0], p.data[1], p.data[2], p.data[3])))
            .collect();
        Texture::from_argb(data, w as usize, h as usize, PixelFormat::Rgba)
    }
    /// Decode in-memory image bytes into an Rgba texture
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba();
        let (w, h) = img.dimensions();
        let data = img.pixels()
            .map(|p| pack(Rgba8::new(p.data[0], p.data[1], p.data[2], p.data[3])))
            .collect();
        Texture::from_argb(data, w as usize, h as usize, PixelFormat::Rgba)
    }
    /// Single-color Rgba texture
    pub fn solid(width: usize, height: usize, color: Rgba8) -> Result<Self> {
        Texture::from_argb(vec![pack(color); width * height], width, height,
                           PixelFormat::Rgba)
    }
    /// Two-color Rgba check pattern with square cells of `cell` texels
    pub fn checkerboard(width: usize, height: usize, cell: usize,
                        c1: Rgba8, c2: Rgba8) -> Result<Self> {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let on = ((x / cell) + (y / cell)) % 2 == 0;
                data.push(pack(if on { c1 } else { c2 }));
            }
        }
        Texture::from_argb(data, width, height, PixelFormat::Rgba)
    }

    fn texel(&self, tx: usize, ty: usize) -> u32 {
        self.data[ty * self.width + tx]
    }

    /// Channels of a raw texel under this texture's format
    fn channels(&self, p: u32) -> (u32, u32, u32, u32) {
        match self.format {
            PixelFormat::Alpha => (0, 0, 0, p & 0xff),
            PixelFormat::Rgb => (argb_r(p), argb_g(p), argb_b(p), 255),
            PixelFormat::Rgba => (argb_r(p), argb_g(p), argb_b(p), argb_a(p)),
        }
    }

    /// Fold sampled channels together with the fill color into one
    /// output color, keeping the compositor format-agnostic
    fn combine(&self, r: u32, g: u32, b: u32, a: u32, fill: Rgba8) -> Rgba8 {
        let fa = u32::from(fill.a);
        match self.format {
            PixelFormat::Alpha => Rgba8::new(fill.r, fill.g, fill.b,
                                             mul8(a, fa) as u8),
            PixelFormat::Rgb => Rgba8::new(mul8(r, u32::from(fill.r)) as u8,
                                           mul8(g, u32::from(fill.g)) as u8,
                                           mul8(b, u32::from(fill.b)) as u8,
                                           fill.a),
            PixelFormat::Rgba => Rgba8::new(mul8(r, u32::from(fill.r)) as u8,
                                            mul8(g, u32::from(fill.g)) as u8,
                                            mul8(b, u32::from(fill.b)) as u8,
                                            mul8(a, fa) as u8),
        }
    }

    /// Sample at fractional texel coordinates (`u`,`v`) and fold with
    /// the fill color; bilinear when `smooth`, nearest otherwise
    pub fn sample(&self, u: f32, v: f32, smooth: bool, fill: Rgba8) -> Rgba8 {
        // clamping the position (not just the indices) keeps the
        // bilinear weights in [0,255]
        let u = u.max(0.0).min((self.width - 1) as f32);
        let v = v.max(0.0).min((self.height - 1) as f32);
        let tu = u as usize;
        let tv = v as usize;

        if smooth {
            let uf1 = (255.0 * (u - tu as f32)) as u32;
            let vf1 = (255.0 * (v - tv as f32)) as u32;

            // edge texels reuse themselves as their missing neighbor
            let p00 = self.texel(tu, tv);
            let p10 = if tu < self.width - 1 { self.texel(tu + 1, tv) } else { p00 };
            let p01 = if tv < self.height - 1 { self.texel(tu, tv + 1) } else { p00 };
            let p11 = if tu < self.width - 1 && tv < self.height - 1 {
                self.texel(tu + 1, tv + 1)
            } else {
                p00
            };

            let (r00, g00, b00, a00) = self.channels(p00);
            let (r10, g10, b10, a10) = self.channels(p10);
            let (r01, g01, b01, a01) = self.channels(p01);
            let (r11, g11, b11, a11) = self.channels(p11);

            let r = lerp8(lerp8(r00, r10, uf1), lerp8(r01, r11, uf1), vf1);
            let g = lerp8(lerp8(g00, g10, uf1), lerp8(g01, g11, uf1), vf1);
            let b = lerp8(lerp8(b00, b10, uf1), lerp8(b01, b11, uf1), vf1);
            let a = lerp8(lerp8(a00, a10, uf1), lerp8(a01, a11, uf1), vf1);
            self.combine(r, g, b, a, fill)
        } else {
            let (r, g, b, a) = self.channels(self.texel(tu, tv));
            self.combine(r, g, b, a, fill)
        }
    }
}
