use super::*;
use crate::foundation::core::Bounds;

fn gray_image(width: u32, height: u32, samples: &[(u32, u32, u8)]) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(width, height, [0, 0, 0, 255]).unwrap();
    for &(x, y, v) in samples {
        buf.set(x, y, [v, v, v, 255]);
    }
    buf
}

#[test]
fn luma_of_gray_is_identity_and_primaries_are_weighted() {
    for v in [0u8, 1, 77, 128, 254, 255] {
        assert_eq!(luma([v, v, v, 0]), v);
    }
    assert_eq!(luma([255, 0, 0, 255]), 76);
    assert_eq!(luma([0, 255, 0, 255]), 150);
    assert_eq!(luma([0, 0, 255, 255]), 29);
}

#[test]
fn uniform_input_has_zero_response() {
    let src = PixelBuffer::filled(6, 5, [90, 90, 90, 255]).unwrap();
    let out = EdgeDetector::default().detect(&src).unwrap();
    assert_eq!((out.width(), out.height()), (4, 3));
    assert!(out.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn mid_gray_4x4_gives_2x2_zero_map() {
    let src = PixelBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap();
    let out = EdgeDetector::default().detect(&src).unwrap();
    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out.as_bytes(), &[0, 0, 0, 0]);
    assert_eq!(out.bounds(), Bounds::new(1, 1, 3, 3));
}

#[test]
fn single_bright_pixel_reproduces_kernel_weights() {
    // The bright sample sits at each neighbour offset of the centre in turn.
    for ky in 0..3u32 {
        for kx in 0..3u32 {
            let src = gray_image(3, 3, &[(kx, ky, 10)]);
            let gray = grayscale(&src).unwrap();
            let (gy, gx) = gradients(&gray, 1, 1);
            assert_eq!(gy, 10 * SOBEL_Y[ky as usize][kx as usize]);
            assert_eq!(gx, 10 * SOBEL_X[ky as usize][kx as usize]);
        }
    }
}

#[test]
fn magnitude_combines_both_kernels() {
    let src = gray_image(5, 5, &[(2, 2, 100)]);
    let out = EdgeDetector::default().detect(&src).unwrap();
    assert_eq!((out.width(), out.height()), (3, 3));

    // Diagonal neighbours see (-100, -100) or similar: sqrt(20000) = 141.42.
    assert_eq!(out.get(0, 0), 141);
    assert_eq!(out.get(2, 0), 141);
    assert_eq!(out.get(0, 2), 141);
    assert_eq!(out.get(2, 2), 141);
    // Edge-adjacent neighbours see a single weight of 2.
    assert_eq!(out.get(1, 0), 200);
    assert_eq!(out.get(0, 1), 200);
    assert_eq!(out.get(2, 1), 200);
    assert_eq!(out.get(1, 2), 200);
    // Centre weights are zero in both kernels.
    assert_eq!(out.get(1, 1), 0);
}

#[test]
fn overflowing_magnitude_saturates_or_wraps() {
    // Corner pixel: gy = gx = 255, magnitude 360.62.
    let corner = gray_image(3, 3, &[(0, 0, 255)]);
    let sat = EdgeDetector::new(Narrowing::Saturate)
        .detect(&corner)
        .unwrap();
    assert_eq!(sat.as_bytes(), &[255]);
    let wrap = EdgeDetector::new(Narrowing::Wrap).detect(&corner).unwrap();
    assert_eq!(wrap.as_bytes(), &[104]);

    // Top-middle pixel: gx = 510.
    let top = gray_image(3, 3, &[(1, 0, 255)]);
    let wrap = EdgeDetector::new(Narrowing::Wrap).detect(&top).unwrap();
    assert_eq!(wrap.as_bytes(), &[254]);
}

#[test]
fn narrowing_truncates_fraction() {
    assert_eq!(Narrowing::Saturate.narrow(141.99), 141);
    assert_eq!(Narrowing::Wrap.narrow(141.99), 141);
    assert_eq!(Narrowing::Saturate.narrow(1000.0), 255);
    assert_eq!(Narrowing::Wrap.narrow(256.5), 0);
}

#[test]
fn inputs_without_interior_are_rejected() {
    let thin = PixelBuffer::filled(2, 10, [1, 2, 3, 4]).unwrap();
    assert!(matches!(
        EdgeDetector::default().detect(&thin),
        Err(PixfxError::InvalidParameter(_))
    ));
}

#[test]
#[should_panic(expected = "not an interior sample")]
fn gradients_outside_interior_panics() {
    let gray = grayscale(&PixelBuffer::new_blank(3, 3).unwrap()).unwrap();
    let _ = gradients(&gray, 0, 1);
}
