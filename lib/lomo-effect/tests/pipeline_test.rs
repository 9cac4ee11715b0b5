// cargo test -p lomo-effect --test pipeline_test

use image::{Rgb, RgbImage};
use lomo_effect::{
    Channel, ColorState, FilterSession, RadiusMode, apply_mask, build_lookup_table, build_mask,
    pixel_radius, remap_channel,
};

fn init_logger() {
    _ = env_logger::builder().is_test(true).try_init();
}

fn solid(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

#[test]
fn test_color_filter_on_white_image() -> anyhow::Result<()> {
    init_logger();
    let mut session = FilterSession::new(solid(4, 4, 255));
    let output = session.set_steepness(10)?.clone();

    let x = 255.0 / 256.0;
    let expected = (256.0 / (1.0 + (-(x - 0.5) / 0.1_f64).exp())).round_ties_even() as u8;
    assert_eq!(build_lookup_table(10)[255], expected);

    for pixel in output.pixels() {
        assert_eq!(pixel.0, [expected, 255, 255]);
    }
    Ok(())
}

#[test]
fn test_halo_with_zero_radius() -> anyhow::Result<()> {
    let mut session = FilterSession::new(solid(10, 10, 200));
    let output = session.set_radius(0)?.clone();

    assert_eq!(session.last_pixel_radius(), Some(1));
    assert_eq!(output.get_pixel(5, 5).0, [200, 200, 200]);

    for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
        assert_eq!(output.get_pixel(x, y).0, [100, 100, 100], "({x}, {y})");
    }
    Ok(())
}

#[test]
fn test_halo_composes_on_color_result() -> anyhow::Result<()> {
    init_logger();
    let (w, h) = (20, 20);
    let original = solid(w, h, 200);
    let mut session = FilterSession::new(original.clone());

    session.set_steepness(10)?;
    let output = session.set_radius(50)?.clone();

    let table = build_lookup_table(10);
    let mask = build_mask(w, h, pixel_radius(w, h, 50))?;
    let colored = remap_channel(&original, Channel::Red, &table);
    assert_eq!(output, apply_mask(&colored, &mask)?);

    // The corner shows both the curve and the darkening.
    let corner = output.get_pixel(0, 0);
    let factor = mask.get_pixel(0, 0)[0];
    assert_eq!(corner[0], (table[200] as f32 * factor).round_ties_even() as u8);
    assert_eq!(corner[1], (200.0 * factor).round_ties_even() as u8);
    assert_ne!(output, apply_mask(&original, &mask)?);
    Ok(())
}

#[test]
fn test_halo_without_color_uses_original() -> anyhow::Result<()> {
    let (w, h) = (24, 16);
    let original = RgbImage::from_fn(w, h, |x, y| Rgb([(x * 10) as u8, (y * 15) as u8, 77]));
    let mut session = FilterSession::new(original.clone());

    let output = session.set_radius(75)?.clone();
    let mask = build_mask(w, h, pixel_radius(w, h, 75))?;

    assert_eq!(output, apply_mask(&original, &mask)?);
    assert_eq!(session.color_state(), &ColorState::Original);
    assert_eq!(session.result(), &original);
    Ok(())
}

#[test]
fn test_color_after_halo_drops_halo() {
    let original = solid(12, 12, 90);
    let mut session = FilterSession::new(original.clone());

    session.set_radius(100).unwrap();
    let output = session.set_steepness(9).unwrap().clone();

    assert_eq!(output, remap_channel(&original, Channel::Red, &build_lookup_table(9)));
}

#[test]
fn test_radius_modes_diverge_on_reapply() -> anyhow::Result<()> {
    let image = solid(64, 64, 180);

    let mut separate = FilterSession::new(image.clone());
    let mut legacy = FilterSession::new(image).with_radius_mode(RadiusMode::Legacy);

    separate.set_radius(100)?;
    legacy.set_radius(100)?;
    assert_eq!(separate.display(), legacy.display());

    separate.reapply_halo()?;
    legacy.reapply_halo()?;
    assert_eq!(separate.last_pixel_radius(), Some(32));
    // 64 * 32 / 200 = 10
    assert_eq!(legacy.last_pixel_radius(), Some(10));
    assert_ne!(separate.display(), legacy.display());
    Ok(())
}

#[test]
fn test_save_and_reopen_display() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("output.png");

    let mut session = FilterSession::new(solid(16, 12, 140));
    session.set_steepness(10)?;
    session.set_radius(60)?;
    session.save_display(&path)?;

    let reopened = FilterSession::open(&path)?;
    assert_eq!(reopened.original(), session.display());
    Ok(())
}

#[test]
fn test_save_before_any_filter_writes_original() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("untouched.png");

    let session = FilterSession::new(solid(5, 5, 33));
    session.save_display(&path)?;

    let reopened = FilterSession::open(&path)?;
    assert_eq!(reopened.original(), session.original());
    Ok(())
}

#[test]
fn test_open_rejects_non_image() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image")?;

    let err = FilterSession::open(&path).unwrap_err();
    assert!(err.to_string().contains("notes.txt"));
    Ok(())
}
