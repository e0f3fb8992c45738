//! Tests for pixel channel access and image conversions

#[cfg(test)]
mod tests {
    use image::Rgba;
    use pixelsort::buffer::Pixel;

    // Tests channel accessors read the matching array slot
    // Verified by swapping the green and blue accessors
    #[test]
    fn test_channel_accessors() {
        let pixel = Pixel::new(10, 20, 30, 40);

        assert_eq!(pixel.r(), 10);
        assert_eq!(pixel.g(), 20);
        assert_eq!(pixel.b(), 30);
        assert_eq!(pixel.a(), 40);
    }

    // Tests opaque pixels carry full alpha
    // Verified by setting alpha to zero in opaque
    #[test]
    fn test_opaque_sets_full_alpha() {
        assert_eq!(Pixel::opaque(1, 2, 3), Pixel([1, 2, 3, 255]));
        assert_eq!(Pixel::TRANSPARENT.a(), 0);
    }

    // Tests extreme channels ignore alpha
    // Verified by including alpha in max_rgb
    #[test]
    fn test_max_and_min_ignore_alpha() {
        let pixel = Pixel::new(90, 10, 50, 255);

        assert_eq!(pixel.max_rgb(), 90);
        assert_eq!(pixel.min_rgb(), 10);
    }

    // Tests conversion to and from the image crate's pixel type
    // Verified by reversing channel order in From<Pixel>
    #[test]
    fn test_rgba_conversion() {
        let pixel = Pixel::new(4, 3, 2, 1);
        let rgba: Rgba<u8> = pixel.into();

        assert_eq!(rgba, Rgba([4, 3, 2, 1]));
        assert_eq!(Pixel::from(rgba), pixel);
        assert_eq!(Pixel::from([4, 3, 2, 1]), pixel);
    }
}
