use ext_icons::{
    canvas::Color,
    lab_icon::{generate_drawn, render_icon, IconLayout, Palette},
    sizes::SizeSet,
};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const BLUE: [u8; 4] = [59, 130, 246, 255];

fn assert_close(actual: &Rgba<u8>, expected: [u8; 4]) {
    for (channel, (a, e)) in actual.0.iter().zip(expected).enumerate() {
        assert!(
            a.abs_diff(e) <= 1,
            "channel {channel}: got {:?}, expected {:?}",
            actual.0,
            expected
        );
    }
}

fn is_tube(pixel: &Rgba<u8>) -> bool {
    pixel[3] == 242 && pixel[0] >= 254
}

#[test]
fn test_render_has_exact_dimensions() {
    for size in [1, 2, 7, 16, 32, 48, 100, 128, 300] {
        let icon = render_icon(size, &Palette::default()).unwrap();
        assert_eq!(icon.dimensions(), (size, size), "size {size}");
    }
}

#[test]
fn test_render_zero_size_fails() {
    assert!(render_icon(0, &Palette::default()).is_err());
}

#[test]
fn test_tube_spans_reference_box_at_128() {
    let icon = render_icon(128, &Palette::default()).unwrap();
    let row = 50;

    // Tube body columns 50..=78 on a row above the liquid and clear of ticks.
    assert!(!is_tube(icon.get_pixel(49, row)));
    assert!(is_tube(icon.get_pixel(50, row)));
    assert!(is_tube(icon.get_pixel(78, row)));
    assert!(!is_tube(icon.get_pixel(79, row)));

    // Rows 30..=98, checked down the middle column where the liquid ends at 94.
    assert!(is_tube(icon.get_pixel(64, 40)));
    assert!(is_tube(icon.get_pixel(64, 96)));
    assert!(is_tube(icon.get_pixel(64, 98)));
    assert!(!is_tube(icon.get_pixel(64, 99)));
}

#[test]
fn test_tube_spans_scaled_box_at_64() {
    let icon = render_icon(64, &Palette::default()).unwrap();
    let row = 30;

    assert_close(icon.get_pixel(24, row), BLUE);
    assert!(is_tube(icon.get_pixel(25, row)));
    assert!(is_tube(icon.get_pixel(39, row)));
    assert_close(icon.get_pixel(40, row), BLUE);

    assert!(is_tube(icon.get_pixel(32, 49)));
    assert_close(icon.get_pixel(32, 50), BLUE);
}

#[test]
fn test_layer_colors_at_128() {
    let icon = render_icon(128, &Palette::default()).unwrap();

    // Panel, liquid, measurement tick and accent replace what is beneath them.
    assert_close(icon.get_pixel(10, 64), BLUE);
    assert_close(icon.get_pixel(64, 80), [96, 165, 250, 153]);
    assert_close(icon.get_pixel(55, 45), [59, 130, 246, 128]);
    assert_close(icon.get_pixel(32, 100), [255, 255, 255, 38]);

    // Cross center and the ring, with the gap between them showing the panel.
    assert_close(icon.get_pixel(88, 20), [255, 255, 255, 230]);
    assert_close(icon.get_pixel(88, 7), [255, 255, 255, 230]);
    assert_close(icon.get_pixel(80, 12), BLUE);

    // Rounded panel corners stay transparent.
    assert_eq!(icon.get_pixel(0, 0)[3], 0);
    assert_eq!(icon.get_pixel(127, 127)[3], 0);
}

#[test]
fn test_layout_scales_linearly() {
    let palette = Palette::default();
    let reference = IconLayout::new(128, &palette);

    for size in [16, 32, 48, 64, 96, 256] {
        let layout = IconLayout::new(size, &palette);
        for (shape, base) in layout.shapes().zip(reference.shapes()) {
            let (scaled, base) = (shape.bounds(), base.bounds());
            let expected = |v: i32| (v as f64 * size as f64 / 128.0) as i32;

            // Derived edges (centers ± radius) truncate twice, allow one pixel.
            for (got, want) in [
                (scaled.left, expected(base.left)),
                (scaled.top, expected(base.top)),
                (scaled.right, expected(base.right)),
                (scaled.bottom, expected(base.bottom)),
            ] {
                assert!(
                    (got - want).abs() <= 1,
                    "size {size}: {scaled:?} vs reference {base:?}"
                );
            }
        }
    }
}

#[test]
fn test_small_sizes_degrade_without_error() {
    for size in 1..=16 {
        let icon: RgbaImage = render_icon(size, &Palette::default()).unwrap();
        assert!(icon.pixels().any(|p| p[3] > 0), "size {size} is blank");
    }
}

#[test]
fn test_custom_background_is_used() {
    let palette = Palette::with_background(Color::from_css("#10b981").unwrap());
    let icon = render_icon(128, &palette).unwrap();
    assert_close(icon.get_pixel(10, 64), [16, 185, 129, 255]);
    assert_close(icon.get_pixel(55, 55), [16, 185, 129, 128]);
}

#[test]
fn test_generate_drawn_writes_one_file_per_size() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("icons");
    let sizes = SizeSet::new(vec![48, 16, 48]).unwrap();

    let report = generate_drawn(&out_dir, &sizes, &Palette::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.written_sizes().collect::<Vec<_>>(), vec![48, 16]);

    let mut files: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(files, ["icon16.png", "icon48.png"]);

    let saved = image::open(out_dir.join("icon48.png")).unwrap().to_rgba8();
    assert_eq!(saved, render_icon(48, &Palette::default()).unwrap());
}

#[test]
fn test_generate_drawn_continues_after_failure() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("icons");
    std::fs::create_dir_all(out_dir.join("icon16.png")).unwrap();

    let sizes = SizeSet::new(vec![16, 32]).unwrap();
    let report = generate_drawn(&out_dir, &sizes, &Palette::default()).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 16);
    assert_eq!(report.written_sizes().collect::<Vec<_>>(), vec![32]);
    assert!(out_dir.join("icon32.png").is_file());
}

#[test]
fn test_wide_ticks_match_their_descriptors() {
    let palette = Palette::default();

    for (size, expected) in [(128, 52..=60), (256, 104..=120), (512, 208..=240)] {
        let layout = IconLayout::new(size, &palette);
        let bounds = layout.ticks[0].bounds();
        assert_eq!((bounds.left, bounds.right), (*expected.start(), *expected.end()));

        let icon = render_icon(size, &palette).unwrap();
        let row = bounds.top as u32;
        let columns: Vec<u32> = (0..size)
            .filter(|&x| icon.get_pixel(x, row)[3] == 128)
            .collect();

        let drawn = columns.first().copied().zip(columns.last().copied());
        assert_eq!(
            drawn,
            Some((*expected.start() as u32, *expected.end() as u32)),
            "size {size}"
        );
        assert_eq!(columns.len(), expected.clone().count(), "size {size}");
    }
}
