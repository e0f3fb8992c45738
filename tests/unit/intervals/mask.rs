//! Tests for boolean masks and their set operations

#[cfg(test)]
mod tests {
    use pixelsort::buffer::{Pixel, PixelBuffer};
    use pixelsort::intervals::Mask;

    // Tests reads outside the grid are off and writes are ignored
    // Verified by wrapping coordinates into the next row
    #[test]
    fn test_out_of_bounds_access() {
        let mut mask = Mask::filled(3, 2, true);

        assert!(mask.get(2, 1));
        assert!(!mask.get(3, 0));
        assert!(!mask.get(0, 2));

        mask.set(5, 5, false);
        assert_eq!(mask.count_on(), 6);
    }

    // Tests buffer thresholding uses lightness
    // Verified by thresholding on the red channel only
    #[test]
    fn test_from_buffer_thresholds_lightness() {
        let buffer = PixelBuffer::from_rows(vec![vec![
            Pixel::opaque(0, 0, 0),
            Pixel::opaque(0, 0, 200),
            Pixel::opaque(100, 20, 20),
        ]])
        .unwrap();

        let mask = Mask::from_buffer(&buffer, 0.5);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
    }

    // Tests nearest-neighbor scaling keeps blocks aligned
    // Verified by scaling with swapped axes
    #[test]
    fn test_scaled_blocks() {
        let mask = Mask::from_fn(2, 1, |x, _| x == 1);
        let scaled = mask.scaled(4, 3);

        assert_eq!((scaled.width(), scaled.height()), (4, 3));
        for y in 0..3 {
            assert!(!scaled.get(0, y));
            assert!(!scaled.get(1, y));
            assert!(scaled.get(2, y));
            assert!(scaled.get(3, y));
        }
        assert!(Mask::new(0, 0).scaled(2, 2).is_blank());
    }

    // Tests intersection and inversion
    // Verified by using union in intersection
    #[test]
    fn test_intersection_and_inversion() {
        let left = Mask::from_fn(4, 1, |x, _| x < 2);
        let odd = Mask::from_fn(4, 1, |x, _| x % 2 == 1);

        let both = left.intersection(&odd);
        assert_eq!(both.count_on(), 1);
        assert!(both.get(1, 0));

        let inverted = left.inverted();
        assert!(!inverted.get(0, 0));
        assert!(inverted.get(3, 0));
        assert_eq!(inverted.count_on(), 2);
    }

    // Tests rendering and display
    // Verified by rendering off cells as white
    #[test]
    fn test_to_buffer_and_display() {
        let mask = Mask::from_fn(2, 1, |x, _| x == 0);
        let buffer = mask.to_buffer();

        assert_eq!(buffer.get(0, 0), Some(Pixel::opaque(255, 255, 255)));
        assert_eq!(buffer.get(1, 0), Some(Pixel::opaque(0, 0, 0)));
        assert_eq!(mask.to_string(), "Mask(2x1, 1 on)");
    }
}
