//! Polygon rasterizer
//!
//! Scanline fill of one polygon: active left/right edge chains walked
//! top to bottom, screen-space attribute interpolation, per-pixel depth
//! test, texture mapping, and coverage anti-aliasing.

use log::{debug, trace};

use crate::buffer::{Framebuffer, RenderOptions};
use crate::color::{cu8, mul8, Rgba8};
use crate::composite::blend_pixel;
use crate::coverage::Coverage;
use crate::error::{Error, Result};
use crate::interp::{edge_over_y, span_over_x, step, Interp, Scratch};
use crate::texture::Texture;
use crate::vertex::{Vertex, VertexStore, A, B, G, R, U, V, X, Y, Z};
use crate::{SUBXRES, SUBYRES};

/// Values fixed for the duration of one render call, passed explicitly
/// into the span routine
struct ScanCtx {
    caps: Interp,
    /// Walk-grid width: device pixels, or sub-columns while smoothing
    width: i32,
    /// Final sub-row that will be emitted; forces the flush of a
    /// partial trailing group
    last_y: i32,
    smoothing: bool,
    no_depth_test: bool,
    tex_smooth: bool,
    flat: Rgba8,
}

/// Scanline polygon rasterizer
///
/// The vertex store and interpolation scratch persist and grow across
/// renders; texture binding and coverage state are re-derived each
/// call. The edge walk assumes a single descending left chain and a
/// single descending right chain: self-intersecting or y-concave
/// polygons produce unspecified (memory-safe) results and should be
/// decomposed before rendering.
#[derive(Debug,Default)]
pub struct Polygon<'t> {
    store: VertexStore,
    scratch: Scratch,
    interp: Interp,
    texture: Option<&'t Texture>,
    coverage: Coverage,
    scaled: bool,
}

impl<'t> Polygon<'t> {
    pub fn new() -> Self {
        let store = VertexStore::new();
        let scratch = Scratch::with_capacity(store.capacity());
        Polygon {
            store, scratch,
            interp: Interp::default(),
            texture: None,
            coverage: Coverage::new(),
            scaled: false,
        }
    }

    /// Begin a new polygon with `count` live vertices, capability flags
    /// back to defaults, texture unbound
    pub fn reset(&mut self, count: usize) {
        self.store.reset(count);
        self.scratch.grow(self.store.capacity());
        self.interp = Interp::default();
        self.texture = None;
    }

    /// Live vertex count
    pub fn vertex_count(&self) -> usize {
        self.store.len()
    }

    /// Vertex `i` of the current polygon
    pub fn vertex(&self, i: usize) -> &Vertex {
        &self.store[i]
    }

    /// Mutable vertex `i`, for callers that reset to a fixed count and
    /// fill slots in place
    pub fn vertex_mut(&mut self, i: usize) -> &mut Vertex {
        &mut self.store[i]
    }

    /// Writable handle to the next vertex slot
    ///
    /// Grows the store by doubling when full, and the interpolation
    /// scratch with it. The caller must fill every attribute before
    /// rendering.
    pub fn next_vertex(&mut self) -> &mut Vertex {
        if self.store.is_full() {
            self.store.grow();
            self.scratch.grow(self.store.capacity());
        }
        self.store.next_vertex()
    }

    /// Drop the just-added vertex when its position repeats the
    /// previous one; reports whether it did
    pub fn redundant_vertex(&mut self, x: f32, y: f32, z: f32) -> bool {
        self.store.redundant_vertex(x, y, z)
    }

    /// Bind a texture for the upcoming render and turn on UV
    /// interpolation
    pub fn set_texture(&mut self, image: &'t Texture) -> Result<()> {
        if image.width == 0 || image.height == 0 {
            return Err(Error::EmptyTexture {
                width: image.width,
                height: image.height,
            });
        }
        debug!("texture bound: {}x{} {:?}", image.width, image.height, image.format);
        self.texture = Some(image);
        self.interp.uv = true;
        Ok(())
    }

    /// True when any vertex colors the polygon differently from vertex 0
    fn colors_vary(&self) -> bool {
        let first = self.store[0];
        (1..self.store.len()).any(|i| {
            let v = &self.store[i];
            v[R] != first[R] || v[G] != first[G] ||
            v[B] != first[B] || v[A] != first[A]
        })
    }

    /// Rasterize the current polygon into `fb`
    ///
    /// A no-op below 3 vertices. Spans and scanlines outside the
    /// target are clamped or skipped; nothing here fails.
    pub fn render(&mut self, fb: &mut Framebuffer, opts: RenderOptions) {
        if self.store.len() < 3 {
            return;
        }
        let count = self.store.len();
        let smoothing = opts.smooth;
        trace!("render: {} vertices, smooth={}, textured={}",
               count, smoothing, self.texture.is_some());

        let caps = Interp {
            x: true,
            z: self.interp.z,
            rgba: self.interp.rgba && self.colors_vary(),
            uv: self.interp.uv && self.texture.is_some(),
        };

        // flat color for the whole polygon when vertex 0 speaks for all
        let v0 = self.store[0];
        let flat = Rgba8::new(cu8(v0[R]), cu8(v0[G]), cu8(v0[B]), cu8(v0[A]));

        let width = if smoothing { fb.width as i32 * SUBXRES } else { fb.width as i32 };
        let height = if smoothing { fb.height as i32 * SUBYRES } else { fb.height as i32 };

        self.scratch.grow(self.store.capacity());
        self.scratch.clear_edges();

        if smoothing {
            for i in 0..count {
                let v = &mut self.store[i];
                v[X] *= SUBXRES as f32;
                v[Y] *= SUBYRES as f32;
            }
            self.coverage.begin_group();
        }
        self.scaled = smoothing;

        // topmost vertex; on a tie the first occurrence wins
        let mut topi = 0;
        let mut ymin = self.store[0][Y];
        let mut ymax = ymin;
        for i in 1..count {
            if self.store[i][Y] < ymin {
                ymin = self.store[i][Y];
                topi = i;
            }
            if self.store[i][Y] > ymax {
                ymax = self.store[i][Y];
            }
        }

        let ctx = ScanCtx {
            caps,
            width,
            last_y: (ymax - 0.5) as i32,
            smoothing,
            no_depth_test: opts.no_depth_test,
            tex_smooth: smoothing || opts.texture_smooth,
            flat,
        };

        let mut lefti = topi;
        let mut righti = topi;
        let mut y = (ymin + 0.5) as i32;
        let mut lefty = y - 1;
        let mut righty = y - 1;
        let mut remaining = count;

        // scan in y, activating new edges on both chains as the line
        // passes over their upper vertices
        while remaining > 0 {
            // left chain, counter-clockwise
            while lefty <= y && remaining > 0 {
                remaining -= 1;
                let i = if lefti != 0 { lefti - 1 } else { count - 1 };
                let from = self.store[lefti];
                let to = self.store[i];
                edge_over_y(caps, &from, &to,
                            &mut self.scratch.l, &mut self.scratch.dl, y);
                lefty = (to[Y] + 0.5) as i32;
                lefti = i;
            }
            // right chain, clockwise
            while righty <= y && remaining > 0 {
                remaining -= 1;
                let i = if righti != count - 1 { righti + 1 } else { 0 };
                let from = self.store[righti];
                let to = self.store[i];
                edge_over_y(caps, &from, &to,
                            &mut self.scratch.r, &mut self.scratch.dr, y);
                righty = (to[Y] + 0.5) as i32;
                righti = i;
            }
            // emit scanlines until one chain runs out
            while y < lefty && y < righty {
                if y >= 0 && y < height {
                    // whichever chain is at smaller x bounds the span
                    // on the left, so crossing chains cannot produce a
                    // negative-width span
                    let swap = self.scratch.l[X] > self.scratch.r[X];
                    self.scanline(fb, &ctx, y, swap);
                }
                y += 1;
                step(caps, &mut self.scratch.l, &self.scratch.dl);
                step(caps, &mut self.scratch.r, &self.scratch.dr);
            }
        }
    }

    /// Undo the sub-grid scaling a smoothed render applied to the
    /// vertex positions, so the buffer can feed a non-rasterizing
    /// consumer afterwards
    pub fn unscale(&mut self) {
        if !self.scaled {
            return;
        }
        for i in 0..self.store.len() {
            let v = &mut self.store[i];
            v[X] /= SUBXRES as f32;
            v[Y] /= SUBYRES as f32;
        }
        self.scaled = false;
    }

    /// Fill one span between the chain attribute vectors at scanline
    /// `y`; while smoothing this mostly records sub-row extents,
    /// rasterizing once per group of 8
    fn scanline(&mut self, fb: &mut Framebuffer, ctx: &ScanCtx, y: i32, swap: bool) {
        self.scratch.clear_span();

        let Polygon { scratch, coverage, texture, .. } = self;
        let tex = *texture;
        let Scratch { l, r, sp, sdp, .. } = scratch;
        let (l, r) = if swap { (&*r, &*l) } else { (&*l, &*r) };

        let mut lx = (l[X] + 0.49999) as i32;
        if lx < 0 {
            lx = 0;
        }
        let mut rx = (r[X] - 0.5) as i32;
        if rx > ctx.width - 1 {
            rx = ctx.width - 1;
        }
        if lx > rx {
            return;
        }

        if ctx.smoothing {
            let mod_y = y & (SUBYRES - 1);
            coverage.record(mod_y, lx, rx);
            // keep collecting until the group of 8 is complete, unless
            // this is the final sub-row overall
            if mod_y != SUBYRES - 1 && y != ctx.last_y {
                return;
            }
            coverage.seal();
        }

        // span setup happens in walk-grid units, before lx/rx drop to
        // device pixels
        span_over_x(ctx.caps, l, r, sp, sdp, lx, ctx.smoothing);

        let row = (if ctx.smoothing { y / SUBYRES } else { y }) as usize;
        let offset = fb.width * row;

        let mut true_lx = 0;
        let mut true_rx = 0;
        if ctx.smoothing {
            // the current sub-row's own extent; attribute stepping is
            // suppressed outside it
            true_lx = lx / SUBXRES;
            true_rx = (rx + SUBXRES - 1) / SUBXRES;

            lx = coverage.left_min / SUBXRES;
            rx = (coverage.right_max + SUBXRES - 1) / SUBXRES;
            if lx < 0 {
                lx = 0;
            }
            if rx > fb.width as i32 - 1 {
                rx = fb.width as i32 - 1;
            }
        }

        let span_caps = ctx.caps.span_phase();
        for x in lx..=rx {
            let i = offset + x as usize;
            if ctx.no_depth_test || sp[Z] <= fb.zbuffer[i] {
                let fill = if ctx.caps.rgba {
                    Rgba8::new(cu8(sp[R]), cu8(sp[G]), cu8(sp[B]), cu8(sp[A]))
                } else {
                    ctx.flat
                };

                if let Some(t) = tex {
                    let mut c = t.sample(sp[U], sp[V], ctx.tex_smooth, fill);
                    if ctx.smoothing {
                        c.a = mul8(u32::from(c.a), coverage.weight(x)) as u8;
                    }
                    blend_pixel(fb, i, c, sp[Z]);
                } else {
                    let weight = if ctx.smoothing { coverage.weight(x) } else { 255 };
                    let a = mul8(weight, u32::from(fill.a));
                    blend_pixel(fb, i, Rgba8::new(fill.r, fill.g, fill.b, a as u8),
                                sp[Z]);
                }
            }
            // pixels pulled in from other sub-rows' extents reuse the
            // boundary attribute values
            if !ctx.smoothing || (x >= true_lx && x <= true_rx) {
                step(span_caps, sp, sdp);
            }
        }

        if ctx.smoothing {
            coverage.begin_group();
        }
    }
}
