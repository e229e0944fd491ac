//! Working-height scaling regression test
//!
//! Run with:
//! ```
//! cargo test -p pcseg-transform --test scale_reg
//! ```

use pcseg_core::{Color, ImageFormat};
use pcseg_test::{MaskBuilder, RegParams};
use pcseg_transform::{ScaleMethod, scale_to_height, scaled_width};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // Page-sized mask: 2480x3508 (A4 at 300 dpi) scaled to 300 rows
    rp.compare_values(212.0, scaled_width(2480, 3508, 300) as f64, 0.0);

    let mask = MaskBuilder::new(620, 877)
        .unwrap()
        .block(62, 88, 558, 300, Color::RED)
        .block(62, 400, 300, 800, Color::GREEN)
        .build();

    // Sampling keeps every class color intact
    let small = scale_to_height(&mask, 300, ScaleMethod::Sampling).unwrap();
    rp.compare_values(300.0, small.height() as f64, 0.0);
    rp.compare_values(212.0, small.width() as f64, 0.0);
    let palette = [Color::WHITE, Color::RED, Color::GREEN];
    let clean = small
        .data()
        .iter()
        .all(|&p| palette.contains(&Color::from_pixel32(p)));
    rp.compare_values(1.0, clean as u8 as f64, 0.0);

    // Area mapping keeps block interiors but blends their borders
    let smooth = scale_to_height(&mask, 300, ScaleMethod::AreaMap).unwrap();
    rp.compare_values(1.0, (smooth.get_rgb(100, 60) == Some((255, 0, 0))) as u8 as f64, 0.0);
    rp.compare_values(1.0, (smooth.get_rgb(60, 200) == Some((0, 255, 0))) as u8 as f64, 0.0);
    let blended = smooth
        .data()
        .iter()
        .any(|&p| !palette.contains(&Color::from_pixel32(p)));
    rp.compare_values(1.0, blended as u8 as f64, 0.0);

    // Already at the working height: shared, not copied
    let same = scale_to_height(&small, 300, ScaleMethod::AreaMap).unwrap();
    rp.compare_pix(&small, &same);

    if rp.display() {
        rp.write_pix_and_check(&small, ImageFormat::Png).unwrap();
        rp.write_pix_and_check(&smooth, ImageFormat::Png).unwrap();
    }
    assert!(rp.cleanup());
}
