use std::path::{Path, PathBuf};

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("pipeline_unit").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, buf: PixelBuffer) {
    save_image(path, &DynamicImage::from(buf), DEFAULT_QUALITY).unwrap();
}

#[test]
fn blur_rejects_radius_before_touching_input() {
    let params = BlurParams {
        input: PathBuf::from("target/pipeline_unit/missing.png"),
        output: PathBuf::from("target/pipeline_unit/never.png"),
        radius: 0,
        edge: EdgeMode::Fold,
        accumulation: Accumulation::Truncating,
        quality: DEFAULT_QUALITY,
    };
    assert!(matches!(
        blur(&params),
        Err(PixfxError::InvalidParameter(_))
    ));
}

#[test]
fn empty_input_path_is_rejected() {
    let params = EdgeParams {
        input: PathBuf::new(),
        output: PathBuf::from("target/pipeline_unit/never.png"),
        narrowing: Narrowing::Saturate,
        quality: DEFAULT_QUALITY,
    };
    let err = edges(&params).unwrap_err();
    assert!(err.to_string().contains("no source image path"));
}

#[test]
fn resize_rejects_zero_target_before_touching_input() {
    let params = ResizeParams {
        input: PathBuf::from("target/pipeline_unit/missing.png"),
        output: PathBuf::from("target/pipeline_unit/never.png"),
        width: 10,
        height: 0,
        quality: DEFAULT_QUALITY,
    };
    assert!(matches!(
        resize(&params),
        Err(PixfxError::InvalidParameter(_))
    ));
}

#[test]
fn blur_file_to_file() {
    let dir = scratch_dir("blur");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, PixelBuffer::filled(6, 4, [128, 128, 128, 255]).unwrap());

    blur(&BlurParams {
        input,
        output: output.clone(),
        radius: 2,
        edge: EdgeMode::Wrap,
        accumulation: Accumulation::Exact,
        quality: DEFAULT_QUALITY,
    })
    .unwrap();

    let out = PixelBuffer::from_image(&load_image(&output).unwrap()).unwrap();
    assert_eq!(out, PixelBuffer::filled(6, 4, [128, 128, 128, 255]).unwrap());
}

#[test]
fn edges_file_to_file_is_two_pixels_smaller() {
    let dir = scratch_dir("edges");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, PixelBuffer::filled(7, 5, [10, 20, 30, 255]).unwrap());

    edges(&EdgeParams {
        input,
        output: output.clone(),
        narrowing: Narrowing::Saturate,
        quality: DEFAULT_QUALITY,
    })
    .unwrap();

    let out = load_image(&output).unwrap().to_luma8();
    assert_eq!(out.dimensions(), (5, 3));
    assert!(out.into_raw().iter().all(|&v| v == 0));
}

#[test]
fn resize_file_to_file() {
    let dir = scratch_dir("resize");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, PixelBuffer::filled(10, 10, [1, 2, 3, 255]).unwrap());

    resize(&ResizeParams {
        input,
        output: output.clone(),
        width: 4,
        height: 7,
        quality: DEFAULT_QUALITY,
    })
    .unwrap();

    let out = load_image(&output).unwrap();
    assert_eq!((out.width(), out.height()), (4, 7));
}

#[test]
fn brick_mosaic_keeps_size_on_exact_multiple() {
    let src = PixelBuffer::filled(6, 4, [100, 100, 100, 255]).unwrap();
    let brick = PixelBuffer::filled(3, 2, [255, 255, 255, 255]).unwrap();
    let out = brick_mosaic(&src, &brick).unwrap();
    assert_eq!((out.width(), out.height()), (6, 4));
    // A white layer stays white under overlay.
    assert!(out.as_bytes().iter().all(|&b| b == 255));
}

#[test]
fn brick_mosaic_shrinks_source_to_brick_grid() {
    let src = PixelBuffer::filled(7, 5, [100, 100, 100, 255]).unwrap();
    let brick = PixelBuffer::filled(3, 2, [0, 0, 0, 255]).unwrap();
    let out = brick_mosaic(&src, &brick).unwrap();
    assert_eq!((out.width(), out.height()), (6, 4));
    // A black layer stays black under overlay; alpha 255 stays 255.
    assert!(out.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn brick_larger_than_source_is_rejected() {
    let src = PixelBuffer::filled(2, 8, [1, 1, 1, 255]).unwrap();
    let brick = PixelBuffer::filled(3, 2, [1, 1, 1, 255]).unwrap();
    assert!(matches!(
        brick_mosaic(&src, &brick),
        Err(PixfxError::InvalidParameter(_))
    ));
}

#[test]
fn brick_file_to_file() {
    let dir = scratch_dir("brick");
    let input = dir.join("in.png");
    let tile_path = dir.join("brick.png");
    let output = dir.join("out.jpg");
    let _ = std::fs::remove_file(&output);
    write_png(&input, PixelBuffer::filled(9, 9, [200, 50, 50, 255]).unwrap());
    write_png(&tile_path, PixelBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap());

    brick(&BrickParams {
        input,
        brick: tile_path,
        output: output.clone(),
        quality: 90,
    })
    .unwrap();

    let out = load_image(&output).unwrap();
    assert_eq!((out.width(), out.height()), (8, 8));
}
