use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use songsheet::raster::FontResolver;
use songsheet::{BandSplit, Label, LayoutConfig, PlaylistError, Rect, Renderer};

const FONT_FIXTURE: &str = "tests/fixtures/DejaVuSansMono.ttf";

fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn labels(count: usize) -> Vec<Label> {
    (0..count).map(|i| Label::new(format!("Track {i:02}"))).collect()
}

/// Renderer writing into `dir`, one label per line, with the built-in font only.
fn renderer(dir: &Path, line_height: u32) -> Renderer {
    let config = LayoutConfig {
        font_candidates: Vec::new(),
        max_labels_per_line: 1,
        line_height: Some(line_height),
        output_dir: dir.to_path_buf(),
        public_prefix: Some("/static/generated".to_string()),
        ..LayoutConfig::default()
    };
    Renderer::new(config)
        .with_fonts(FontResolver::with_dirs(Vec::new()))
        .at_timestamp(1_700_000_000)
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

#[test]
fn single_image_height_follows_line_count() {
    let dir = tempfile::tempdir().unwrap();
    let background = RgbImage::from_pixel(64, 2000, Rgb([20, 40, 60]));

    let output = renderer(dir.path(), 80)
        .render_image(&png_bytes(&background), &labels(5), BandSplit::new(120, 1560))
        .unwrap();

    assert_eq!(output.lines, 5);
    assert_eq!(output.height, 120 + 5 * 80 + 440);
    assert_eq!(output.image.public_path, "/static/generated/playlist_1700000000.png");
    let written = image::open(&output.image.path).unwrap();
    assert_eq!(written.height(), 960);
    assert_eq!(written.width(), 64);
}

#[test]
fn pages_mode_writes_pages_and_archive() {
    let dir = tempfile::tempdir().unwrap();
    let background = RgbImage::from_pixel(300, 400, Rgb([230, 230, 230]));

    let output = renderer(dir.path(), 80)
        .render_pages(
            &png_bytes(&background),
            &labels(10),
            Rect::new(20, 50, 280, 300),
        )
        .unwrap();

    assert_eq!(output.lines, 10);
    assert_eq!(output.lines_per_page, 3);
    assert_eq!(output.pages.len(), 4);
    assert_eq!(
        dir_entries(dir.path()),
        vec![
            "playlist_page_1700000000_01.png",
            "playlist_page_1700000000_02.png",
            "playlist_page_1700000000_03.png",
            "playlist_page_1700000000_04.png",
            "playlist_pages_1700000000.zip",
        ]
    );
    for page in &output.pages {
        let img = image::open(&page.path).unwrap();
        assert_eq!((img.width(), img.height()), (300, 400));
    }

    let archive = zip::ZipArchive::new(File::open(&output.archive.path).unwrap()).unwrap();
    assert_eq!(archive.len(), 4);
    assert_eq!(
        output.archive.public_path,
        "/static/generated/playlist_pages_1700000000.zip"
    );
}

#[test]
fn empty_playlist_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let background = png_bytes(&RgbImage::new(10, 10));

    let err = renderer(&out, 80)
        .render_image(&background, &[], BandSplit::new(1, 5))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(!out.exists());
}

#[test]
fn out_of_bounds_geometry_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let background = png_bytes(&RgbImage::new(80, 80));
    let renderer = renderer(dir.path(), 80);

    let err = renderer
        .render_pages(&background, &labels(3), Rect::new(0, 0, 100, 50))
        .unwrap_err();
    assert!(matches!(err, PlaylistError::Validation(_)));

    let err = renderer
        .render_image(&background, &labels(3), BandSplit::new(40, 81))
        .unwrap_err();
    assert!(err.is_validation());

    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn same_second_renders_overwrite_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let background = png_bytes(&RgbImage::from_pixel(64, 300, Rgb([0, 0, 0])));
    let renderer = renderer(dir.path(), 80);
    let split = BandSplit::new(50, 250);

    let first = renderer.render_image(&background, &labels(2), split).unwrap();
    let second = renderer.render_image(&background, &labels(4), split).unwrap();

    assert_eq!(first.image.path, second.image.path);
    assert_ne!(first.image.sha256, second.image.sha256);
    assert_eq!(dir_entries(dir.path()), vec!["playlist_1700000000.png"]);
    let survivor = image::open(&second.image.path).unwrap();
    assert_eq!(survivor.height(), second.height);
}

#[test]
fn bands_export_as_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let background = png_bytes(&RgbImage::new(16, 100));

    let files = renderer(dir.path(), 80)
        .export_bands(&background, BandSplit::new(10, 70))
        .unwrap();

    let heights: Vec<u32> = files
        .iter()
        .map(|f| image::open(&f.path).unwrap().height())
        .collect();
    assert_eq!(heights, vec![10, 60, 30]);
    assert_eq!(
        dir_entries(dir.path()),
        vec!["content_bg.png", "end_bg.png", "head_bg.png"]
    );
}

#[test]
fn empty_bands_are_not_exported() {
    let dir = tempfile::tempdir().unwrap();
    let background = png_bytes(&RgbImage::new(16, 100));

    let files = renderer(dir.path(), 80)
        .export_bands(&background, BandSplit::new(0, 100))
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(dir_entries(dir.path()), vec!["content_bg.png"]);
}

#[test]
fn configured_font_path_renders_outline_text() {
    let dir = tempfile::tempdir().unwrap();
    let background = png_bytes(&RgbImage::from_pixel(200, 300, Rgb([0, 0, 0])));
    let config = LayoutConfig {
        font_path: Some(Path::new(env!("CARGO_MANIFEST_DIR")).join(FONT_FIXTURE)),
        font_candidates: Vec::new(),
        output_dir: dir.path().to_path_buf(),
        ..LayoutConfig::default()
    };

    let output = Renderer::new(config)
        .with_fonts(FontResolver::with_dirs(Vec::new()))
        .at_timestamp(1_700_000_000)
        .render_image(&background, &labels(1), BandSplit::new(50, 250))
        .unwrap();

    let written = image::open(&output.image.path).unwrap().to_rgb8();
    let lit_rows: Vec<u32> = written
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != Rgb([0, 0, 0]))
        .map(|(_, y, _)| y)
        .collect();
    assert!(lit_rows.len() > 100);
    // One 200 px slot below the 50 px head.
    assert!(lit_rows.iter().all(|y| (50..250).contains(y)));
}
