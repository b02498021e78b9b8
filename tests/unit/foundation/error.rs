use std::error::Error as _;

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PixfxError::invalid("x")
            .to_string()
            .contains("invalid parameter:")
    );

    let base = image::ImageError::IoError(std::io::Error::other("boom"));
    assert!(
        PixfxError::io("read 'a.png'", base)
            .to_string()
            .contains("io error: read 'a.png'")
    );
}

#[test]
fn io_preserves_source() {
    let base = image::ImageError::IoError(std::io::Error::other("boom"));
    let err = PixfxError::io("write 'out.jpg'", base);
    let source = err.source().expect("io error keeps its source");
    assert!(source.to_string().contains("boom"));
}
