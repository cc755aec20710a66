
extern crate softpoly;

use softpoly::{Framebuffer, Rgba8};

#[test]
fn snapshot_round_trips_through_png() {
    let mut fb = Framebuffer::new(8, 8);
    fb.clear(Rgba8::new(40, 50, 60, 255));
    fb.set_pixel(3, 4, Rgba8::new(10, 20, 30, 255));

    let p1 = std::env::temp_dir().join("softpoly_snapshot_1.png");
    let p2 = std::env::temp_dir().join("softpoly_snapshot_2.png");
    softpoly::io::write_file(&fb, &p1).unwrap();
    softpoly::io::write_file(&fb, &p2).unwrap();

    assert!(softpoly::io::img_diff(&p1, &p2).unwrap());

    let (data, w, h) = softpoly::io::read_file(&p1).unwrap();
    assert_eq!((w, h), (8, 8));
    let i = (4 * 8 + 3) * 3;
    assert_eq!(&data[i..i + 3], &[10, 20, 30]);
    assert_eq!(&data[0..3], &[40, 50, 60]);
}
