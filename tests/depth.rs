
extern crate softpoly;

use softpoly::{pack_argb, Framebuffer, Polygon, RenderOptions};
use softpoly::{A, B, G, R, U, V, X, Y, Z};

fn push_vertex(poly: &mut Polygon, x: f32, y: f32, z: f32, rgba: [f32; 4]) {
    let v = poly.next_vertex();
    v[X] = x; v[Y] = y; v[Z] = z;
    v[R] = rgba[0]; v[G] = rgba[1]; v[B] = rgba[2]; v[A] = rgba[3];
    v[U] = 0.0; v[V] = 0.0;
}

fn push_tri(poly: &mut Polygon, z: f32, rgba: [f32; 4]) {
    poly.reset(0);
    push_vertex(poly, 0.0, 0.0, z, rgba);
    push_vertex(poly, 30.0, 0.0, z, rgba);
    push_vertex(poly, 0.0, 30.0, z, rgba);
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

#[test]
fn far_then_near_keeps_the_near_triangle() {
    let mut fb = Framebuffer::new(32, 32);
    let mut poly = Polygon::new();

    push_tri(&mut poly, 0.8, RED);
    poly.render(&mut fb, RenderOptions::default());
    push_tri(&mut poly, 0.2, BLUE);
    poly.render(&mut fb, RenderOptions::default());

    assert_eq!(fb.pixel(5, 5), pack_argb(0, 0, 255));
    assert_eq!(fb.pixel(2, 10), pack_argb(0, 0, 255));
    assert_eq!(fb.depth(5, 5), 0.2);
}

#[test]
fn near_then_far_keeps_the_near_triangle() {
    let mut fb = Framebuffer::new(32, 32);
    let mut poly = Polygon::new();

    push_tri(&mut poly, 0.2, BLUE);
    poly.render(&mut fb, RenderOptions::default());
    push_tri(&mut poly, 0.8, RED);
    poly.render(&mut fb, RenderOptions::default());

    assert_eq!(fb.pixel(5, 5), pack_argb(0, 0, 255));
    assert_eq!(fb.pixel(2, 10), pack_argb(0, 0, 255));
    assert_eq!(fb.depth(5, 5), 0.2);
}

#[test]
fn equal_depth_replaces() {
    // coplanar polygons must replace each other or abutting shapes
    // would leave seams
    let mut fb = Framebuffer::new(32, 32);
    let mut poly = Polygon::new();

    push_tri(&mut poly, 0.5, RED);
    poly.render(&mut fb, RenderOptions::default());
    push_tri(&mut poly, 0.5, GREEN);
    poly.render(&mut fb, RenderOptions::default());

    assert_eq!(fb.pixel(5, 5), pack_argb(0, 255, 0));
    assert_eq!(fb.depth(5, 5), 0.5);
}

#[test]
fn no_depth_test_hint_always_overwrites() {
    let mut fb = Framebuffer::new(32, 32);
    let mut poly = Polygon::new();
    let opts = RenderOptions { no_depth_test: true, ..RenderOptions::default() };

    push_tri(&mut poly, 0.2, BLUE);
    poly.render(&mut fb, opts);
    push_tri(&mut poly, 0.8, RED);
    poly.render(&mut fb, opts);

    // the far triangle still lands because the test is disabled
    assert_eq!(fb.pixel(5, 5), pack_argb(255, 0, 0));
    assert_eq!(fb.depth(5, 5), 0.8);
}

#[test]
fn interpolated_depth_slopes_across_a_triangle() {
    let mut fb = Framebuffer::new(32, 32);
    let mut poly = Polygon::new();

    // depth rises toward the right vertex
    poly.reset(0);
    push_vertex(&mut poly, 0.0, 0.0, 0.0, RED);
    push_vertex(&mut poly, 30.0, 0.0, 1.0, RED);
    push_vertex(&mut poly, 0.0, 30.0, 0.0, RED);
    poly.render(&mut fb, RenderOptions::default());

    let z_near = fb.depth(1, 0);
    let z_far = fb.depth(25, 0);
    assert!(z_near < z_far, "{} should be nearer than {}", z_near, z_far);
    assert!(z_far <= 1.0);
}
