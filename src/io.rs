//! Framebuffer snapshots
//!
//! Reading and writing of image files for tests and tools.

use std::path::Path;

use crate::buffer::Framebuffer;
use crate::color::{argb_b, argb_g, argb_r};
use crate::error::Result;

/// Write the pixel contents of `fb` as an RGB image file
pub fn write_file<P: AsRef<Path>>(fb: &Framebuffer, filename: P) -> Result<()> {
    let mut buf = Vec::with_capacity(fb.width * fb.height * 3);
    for &p in &fb.pixels {
        buf.push(argb_r(p) as u8);
        buf.push(argb_g(p) as u8);
        buf.push(argb_b(p) as u8);
    }
    image::save_buffer(filename, &buf, fb.width as u32, fb.height as u32,
                       image::RGB(8))?;
    Ok(())
}

/// Read an image file as RGB bytes plus dimensions
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>, usize, usize)> {
    let img = image::open(filename)?.to_rgb();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

/// Compare two image files pixel for pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let (d1, w1, h1) = read_file(f1)?;
    let (d2, w2, h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        return Ok(false);
    }
    let mut flag = true;
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            println!("{} [{},{},{}]: {} {}", i, (i / 3) % w1, (i / 3) / w1, i % 3, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
