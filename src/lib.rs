
/// How a polygon becomes pixels
///    poly = Polygon::new()
///    poly.reset(0)
///    v = poly.next_vertex()          -- fill X,Y,Z,R,G,B,A,U,V
///    poly.redundant_vertex(x,y,z)    -- drop zero-length edges
///    poly.set_texture(&img)          -- optional
///    poly.render(&mut fb, opts)
///      scale into the 8x8 sub-grid when smoothing
///      find the top vertex
///      walk the left chain ccw and the right chain cw
///         edge_over_y / step          -- per-scanline chain stepping
///         scanline per row, or per group of 8 sub-rows
///           span_over_x / step        -- per-pixel attribute stepping
///           depth test, texture sample or flat color
///           Coverage::weight          -- edge anti-aliasing
///           blend_pixel               -- composite, gated depth write
///    poly.unscale()                  -- reuse vertices after smoothing

pub mod color;
pub mod error;
pub mod buffer;
pub mod vertex;
pub mod interp;
pub mod texture;
pub mod coverage;
pub mod composite;
pub mod raster;
pub mod io;

pub use crate::color::*;
pub use crate::error::*;
pub use crate::buffer::*;
pub use crate::vertex::*;
pub use crate::interp::*;
pub use crate::texture::*;
pub use crate::coverage::*;
pub use crate::composite::*;
pub use crate::raster::*;

/// Sub-columns per device pixel in the anti-aliasing grid
pub const SUBXRES: i32 = 8;
/// Sub-rows per device pixel in the anti-aliasing grid
pub const SUBYRES: i32 = 8;
/// Coverage sum of a fully covered 8x8 sub-grid cell
pub const MAX_COVERAGE: i32 = SUBXRES * SUBYRES;
/// Coverage above which a blended fragment may update the depth buffer
pub const ZBUFFER_MIN_COVERAGE: u32 = 204;
