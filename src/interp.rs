//! Attribute interpolation
//!
//! Edges are walked incrementally: a setup call derives the starting
//! attribute vector and a constant per-step delta, then `step` advances
//! one scanline (or one pixel of a span) at a time.

use crate::vertex::{Vertex, A, B, G, R, U, V, X, Y, Z};
use crate::SUBXRES;

/// Which vertex attributes a render interpolates
///
/// Computed once per render and passed by value through the edge and
/// span routines; never mutated mid-render.
#[derive(Debug,Copy,Clone)]
pub struct Interp {
    pub x: bool,
    pub z: bool,
    pub rgba: bool,
    pub uv: bool,
}

impl Default for Interp {
    fn default() -> Interp {
        Interp { x: true, z: true, rgba: true, uv: false }
    }
}

impl Interp {
    /// Capability set for stepping across a span, where x is the loop
    /// variable and must not accumulate
    pub fn span_phase(self) -> Interp {
        Interp { x: false, ..self }
    }
}

/// Per-render interpolation scratch
///
/// Current value and per-step delta vectors for the left chain, the
/// right chain, and the span walk. Sized to the vertex capacity and
/// regrown with the store; only the attribute field slots are read.
#[derive(Debug,Default)]
pub struct Scratch {
    pub l: Vec<f32>,
    pub dl: Vec<f32>,
    pub r: Vec<f32>,
    pub dr: Vec<f32>,
    pub sp: Vec<f32>,
    pub sdp: Vec<f32>,
}

impl Scratch {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut s = Scratch::default();
        s.grow(capacity);
        s
    }
    /// Resize all six vectors to `capacity`, keeping them in lockstep
    /// with the vertex store; never shrinks
    pub fn grow(&mut self, capacity: usize) {
        if capacity <= self.l.len() {
            return;
        }
        self.l.resize(capacity, 0.0);
        self.dl.resize(capacity, 0.0);
        self.r.resize(capacity, 0.0);
        self.dr.resize(capacity, 0.0);
        self.sp.resize(capacity, 0.0);
        self.sdp.resize(capacity, 0.0);
    }
    /// Zero the chain vectors at the start of a render
    pub fn clear_edges(&mut self) {
        self.l.iter_mut().for_each(|v| *v = 0.0);
        self.dl.iter_mut().for_each(|v| *v = 0.0);
        self.r.iter_mut().for_each(|v| *v = 0.0);
        self.dr.iter_mut().for_each(|v| *v = 0.0);
    }
    /// Zero the span vectors at the start of a scanline
    pub fn clear_span(&mut self) {
        self.sp.iter_mut().for_each(|v| *v = 0.0);
        self.sdp.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Derive the starting value and per-scanline delta of each enabled
/// attribute for the edge `from` -> `to`, evaluated at scanline `y`
///
/// A zero vertical extent gets a nominal unit delta, so horizontal
/// edges degrade to constant attributes instead of dividing by zero.
pub fn edge_over_y(caps: Interp, from: &Vertex, to: &Vertex,
                   p: &mut [f32], dp: &mut [f32], y: i32) {
    let mut delta = to[Y] - from[Y];
    if delta == 0.0 {
        delta = 1.0;
    }
    let fraction = y as f32 + 0.5 - from[Y];

    if caps.x {
        dp[X] = (to[X] - from[X]) / delta;
        p[X] = from[X] + dp[X] * fraction;
    }
    if caps.z {
        dp[Z] = (to[Z] - from[Z]) / delta;
        p[Z] = from[Z] + dp[Z] * fraction;
    }
    if caps.rgba {
        dp[R] = (to[R] - from[R]) / delta;
        dp[G] = (to[G] - from[G]) / delta;
        dp[B] = (to[B] - from[B]) / delta;
        dp[A] = (to[A] - from[A]) / delta;
        p[R] = from[R] + dp[R] * fraction;
        p[G] = from[G] + dp[G] * fraction;
        p[B] = from[B] + dp[B] * fraction;
        p[A] = from[A] + dp[A] * fraction;
    }
    if caps.uv {
        dp[U] = (to[U] - from[U]) / delta;
        dp[V] = (to[V] - from[V]) / delta;
        p[U] = from[U] + dp[U] * fraction;
        p[V] = from[V] + dp[V] * fraction;
    }
}

/// Same as [edge_over_y] keyed on x, from the left span boundary to the
/// right, evaluated at column `x`
///
/// While smoothing, the boundaries are in sub-grid units but the span
/// is walked in device pixels, so delta and fraction both shrink by
/// the sub-column factor.
pub fn span_over_x(caps: Interp, from: &[f32], to: &[f32],
                   p: &mut [f32], dp: &mut [f32], x: i32, smoothing: bool) {
    let mut delta = to[X] - from[X];
    if delta == 0.0 {
        delta = 1.0;
    }
    let mut fraction = x as f32 + 0.5 - from[X];
    if smoothing {
        delta /= SUBXRES as f32;
        fraction /= SUBXRES as f32;
    }

    if caps.x {
        dp[X] = (to[X] - from[X]) / delta;
        p[X] = from[X] + dp[X] * fraction;
    }
    if caps.z {
        dp[Z] = (to[Z] - from[Z]) / delta;
        p[Z] = from[Z] + dp[Z] * fraction;
    }
    if caps.rgba {
        dp[R] = (to[R] - from[R]) / delta;
        dp[G] = (to[G] - from[G]) / delta;
        dp[B] = (to[B] - from[B]) / delta;
        dp[A] = (to[A] - from[A]) / delta;
        p[R] = from[R] + dp[R] * fraction;
        p[G] = from[G] + dp[G] * fraction;
        p[B] = from[B] + dp[B] * fraction;
        p[A] = from[A] + dp[A] * fraction;
    }
    if caps.uv {
        dp[U] = (to[U] - from[U]) / delta;
        dp[V] = (to[V] - from[V]) / delta;
        p[U] = from[U] + dp[U] * fraction;
        p[V] = from[V] + dp[V] * fraction;
    }
}

/// Advance each enabled attribute by its delta, in place
pub fn step(caps: Interp, p: &mut [f32], dp: &[f32]) {
    if caps.x {
        p[X] += dp[X];
    }
    if caps.z {
        p[Z] += dp[Z];
    }
    if caps.rgba {
        p[R] += dp[R];
        p[G] += dp[G];
        p[B] += dp[B];
        p[A] += dp[A];
    }
    if caps.uv {
        p[U] += dp[U];
        p[V] += dp[V];
    }
}
