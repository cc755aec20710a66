//! Pixel compositing

use crate::buffer::Framebuffer;
use crate::color::{argb_b, argb_g, argb_r, pack_argb, Rgba8};
use crate::ZBUFFER_MIN_COVERAGE;

/// Blend one 8-bit channel, `(new*a + old*(255-a)) >> 8`
fn blend_channel(new: u32, old: u32, a: u32) -> u32 {
    (new * a + old * (255 - a)) >> 8
}

/// Composite a fragment into the target at linear index `offset`
///
/// Alpha 254 and 255 store the color opaque and always write depth.
/// Partial alpha blends with the destination and only wins the depth
/// buffer above the minimum coverage threshold, so feathered edge
/// pixels never occlude geometry behind them.
pub fn blend_pixel(fb: &mut Framebuffer, offset: usize, color: Rgba8, z: f32) {
    let (r, g, b, a) = (u32::from(color.r), u32::from(color.g),
                        u32::from(color.b), u32::from(color.a));
    if a >= 254 {
        fb.pixels[offset] = pack_argb(r, g, b);
        fb.zbuffer[offset] = z;
    } else {
        let old = fb.pixels[offset];
        fb.pixels[offset] = pack_argb(blend_channel(r, argb_r(old), a),
                                      blend_channel(g, argb_g(old), a),
                                      blend_channel(b, argb_b(old), a));
        if a > ZBUFFER_MIN_COVERAGE {
            fb.zbuffer[offset] = z;
        }
    }
}
