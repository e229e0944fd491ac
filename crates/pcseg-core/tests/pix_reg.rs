//! Pix regression test: clipping and outline rendering as used for
//! segment crops and debug overlays
//!
//! Run with:
//! ```
//! cargo test -p pcseg-core --test pix_reg
//! ```

use pcseg_core::{Box, Color, Pix};
use pcseg_test::RegParams;

#[test]
fn pix_reg() {
    let mut rp = RegParams::new("pix");

    let mut pm = Pix::new_filled(200, 100, Color::WHITE).unwrap().to_mut();
    pm.fill_box_color(&Box::new_unchecked(20, 10, 60, 30), Color::RED);
    let page: Pix = pm.into();

    // Clip inside the page
    let crop = page.clip_rectangle(&Box::new_unchecked(20, 10, 60, 30)).unwrap();
    rp.compare_values(60.0, crop.width() as f64, 0.0);
    rp.compare_values(30.0, crop.height() as f64, 0.0);
    let all_red = crop.data().iter().all(|&p| Color::from_pixel32(p) == Color::RED);
    rp.compare_values(1.0, all_red as u8 as f64, 0.0);

    // Clip overlapping the border is cut to the page
    let crop = page.clip_rectangle(&Box::new_unchecked(180, 90, 50, 50)).unwrap();
    rp.compare_values(20.0, crop.width() as f64, 0.0);
    rp.compare_values(10.0, crop.height() as f64, 0.0);

    // Clip outside the page fails
    rp.compare_values(
        1.0,
        page.clip_rectangle(&Box::new_unchecked(300, 0, 10, 10)).is_err() as u8 as f64,
        0.0,
    );

    // Outline: border pixels colored, interior and outside untouched
    let mut pm = page.to_mut();
    pm.render_box_color(&Box::new_unchecked(100, 40, 50, 40), 1, Color::GREEN)
        .unwrap();
    let overlay: Pix = pm.into();
    rp.compare_values(1.0, (overlay.get_rgb(100, 40) == Some((0, 255, 0))) as u8 as f64, 0.0);
    rp.compare_values(1.0, (overlay.get_rgb(149, 79) == Some((0, 255, 0))) as u8 as f64, 0.0);
    rp.compare_values(1.0, (overlay.get_rgb(125, 60) == Some((255, 255, 255))) as u8 as f64, 0.0);
    rp.compare_values(1.0, (overlay.get_rgb(150, 79) == Some((255, 255, 255))) as u8 as f64, 0.0);
    // the source page is unchanged
    rp.compare_values(1.0, (page.get_rgb(100, 40) == Some((255, 255, 255))) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}
