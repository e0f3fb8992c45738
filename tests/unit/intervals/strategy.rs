//! Tests for the strategy catalog and per-row interval engine

#[cfg(test)]
mod tests {
    use pixelsort::SortError;
    use pixelsort::buffer::{Pixel, PixelBuffer};
    use pixelsort::intervals::strategy::retain_sorted;
    use pixelsort::intervals::{Interval, IntervalEngine, IntervalStrategy};
    use pixelsort::sorting::{MaskSource, SortingConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine_for(config: &SortingConfig, canvas: &PixelBuffer) -> IntervalEngine {
        let mut rng = StdRng::seed_from_u64(config.seed);
        IntervalEngine::prepare(config, canvas, &mut rng).unwrap()
    }

    fn row_intervals(config: &SortingConfig, canvas: &PixelBuffer) -> Vec<Interval> {
        let engine = engine_for(config, canvas);
        let mut rng = StdRng::seed_from_u64(0);
        engine.intervals(0, canvas.row(0).unwrap(), 0..canvas.width(), &mut rng)
    }

    fn config(interval: IntervalStrategy) -> SortingConfig {
        SortingConfig {
            interval,
            ..SortingConfig::default()
        }
    }

    fn gray_row(levels: &[u8]) -> PixelBuffer {
        PixelBuffer::from_rows(vec![
            levels.iter().map(|&v| Pixel::opaque(v, v, v)).collect(),
        ])
        .unwrap()
    }

    // Tests catalog names resolve both ways, including the legacy alias
    // Verified by removing the "file" alias
    #[test]
    fn test_strategy_names() {
        for strategy in IntervalStrategy::ALL {
            assert_eq!(strategy.name().parse::<IntervalStrategy>().unwrap(), strategy);
        }
        assert_eq!("none".parse::<IntervalStrategy>().unwrap(), IntervalStrategy::Whole);
        assert_eq!("file".parse::<IntervalStrategy>().unwrap(), IntervalStrategy::FileMask);
        assert_eq!(IntervalStrategy::names().len(), 10);
    }

    // Tests unknown names report the catalog
    // Verified by returning the default strategy for unknown names
    #[test]
    fn test_unknown_strategy() {
        let err = "spiral".parse::<IntervalStrategy>().unwrap_err();

        assert!(matches!(
            err,
            SortError::UnknownFunction { kind: "interval", ref name, ref available }
                if name == "spiral" && available.contains(&"shuffle-axis")
        ));
        assert!(err.to_string().contains("spiral"));
    }

    // Tests effect and mask classification
    // Verified by classifying edges as mask-driven
    #[test]
    fn test_strategy_classification() {
        assert!(IntervalStrategy::Snap.is_effect());
        assert!(IntervalStrategy::ShuffleTotal.is_effect());
        assert!(!IntervalStrategy::Waves.is_effect());
        assert!(IntervalStrategy::FileEdges.needs_mask());
        assert!(!IntervalStrategy::Edges.needs_mask());
    }

    // Tests the whole strategy yields one interval per row
    // Verified by returning an empty partition
    #[test]
    fn test_whole_row() {
        let canvas = gray_row(&[10, 20, 30, 40]);
        let intervals = row_intervals(&config(IntervalStrategy::Whole), &canvas);

        assert_eq!(intervals, vec![Interval::new(0, 4)]);
    }

    // Tests random and wave intervals tile the row for several lengths
    // Verified by skipping the final clipped interval
    #[test]
    fn test_random_and_waves_tile_row() {
        let canvas = gray_row(&[128; 97]);
        for strategy in [IntervalStrategy::Random, IntervalStrategy::Waves] {
            for length in [0, 1, 3, 50, 500] {
                let config = SortingConfig {
                    characteristic_length: length,
                    ..config(strategy)
                };
                let intervals = row_intervals(&config, &canvas);

                let mut cursor = 0;
                for interval in &intervals {
                    assert_eq!(interval.start, cursor);
                    assert!(!interval.is_empty());
                    cursor = interval.end;
                }
                assert_eq!(cursor, 97, "{strategy} with length {length}");
            }
        }
    }

    // Tests wave widths stay within length plus jitter
    // Verified by drawing jitter from a wider range
    #[test]
    fn test_wave_widths() {
        let canvas = gray_row(&[0; 400]);
        let config = SortingConfig {
            characteristic_length: 20,
            ..config(IntervalStrategy::Waves)
        };
        let intervals = row_intervals(&config, &canvas);

        let (last, full) = intervals.split_last().unwrap();
        assert!(full.iter().all(|interval| (20..=30).contains(&interval.len())));
        assert!(last.len() <= 30);
    }

    // Tests huge characteristic lengths cover the row with one interval
    // Verified by adding the wave jitter without saturation
    #[test]
    fn test_huge_length_covers_row() {
        let canvas = gray_row(&[64; 25]);
        for strategy in [IntervalStrategy::Random, IntervalStrategy::Waves] {
            let config = SortingConfig {
                characteristic_length: usize::MAX,
                ..config(strategy)
            };

            assert_eq!(
                row_intervals(&config, &canvas),
                vec![Interval::new(0, 25)],
                "{strategy}"
            );
        }
    }

    // Tests threshold intervals are runs of in-range lightness
    // Verified by including out-of-range pixels in runs
    #[test]
    fn test_threshold_runs() {
        let canvas = gray_row(&[10, 100, 150, 250, 120, 130, 5]);
        let intervals = row_intervals(&config(IntervalStrategy::Threshold), &canvas);

        assert_eq!(intervals, vec![Interval::new(1, 3), Interval::new(4, 6)]);
    }

    // Tests full-range thresholds behave like the whole strategy
    // Verified by using exclusive bounds
    #[test]
    fn test_full_threshold_equals_whole() {
        let canvas = gray_row(&[0, 255, 17, 200]);
        let full = SortingConfig {
            lower_threshold: 0.0,
            upper_threshold: 1.0,
            ..config(IntervalStrategy::Threshold)
        };

        assert_eq!(
            row_intervals(&full, &canvas),
            row_intervals(&config(IntervalStrategy::Whole), &canvas)
        );
    }

    // Tests edges split rows at detected boundaries
    // Verified by sorting across edge pixels
    #[test]
    fn test_edges_split_at_boundaries() {
        let canvas = gray_row(&[0, 0, 0, 255, 255, 255]);
        let uniform = gray_row(&[90; 6]);

        assert_eq!(
            row_intervals(&config(IntervalStrategy::Edges), &canvas),
            vec![Interval::new(0, 2), Interval::new(4, 6)]
        );
        assert_eq!(
            row_intervals(&config(IntervalStrategy::Edges), &uniform),
            vec![Interval::new(0, 6)]
        );
    }

    // Tests file-mask intervals are runs of mask "on" cells
    // Verified by inverting the image mask
    #[test]
    fn test_file_mask_runs() {
        let canvas = gray_row(&[50; 4]);
        let mask = gray_row(&[255, 255, 0, 0]);
        let config = SortingConfig {
            mask: MaskSource::Image(mask),
            ..config(IntervalStrategy::FileMask)
        };

        assert_eq!(row_intervals(&config, &canvas), vec![Interval::new(0, 2)]);
    }

    // Tests file-edges intervals stop at the mask's outer contour
    // Verified by using the inner contour cells as boundaries
    #[test]
    fn test_file_edges_runs() {
        let canvas = gray_row(&[50; 6]);
        let mask = gray_row(&[255, 255, 0, 0, 0, 255]);
        let config = SortingConfig {
            mask: MaskSource::Image(mask),
            ..config(IntervalStrategy::FileEdges)
        };

        assert_eq!(
            row_intervals(&config, &canvas),
            vec![Interval::new(0, 2), Interval::new(3, 4), Interval::new(5, 6)]
        );
    }

    // Tests mask strategies fail without a mask source
    // Verified by treating a disabled source as a full mask
    #[test]
    fn test_mask_strategy_without_source() {
        let canvas = gray_row(&[1, 2, 3]);
        let config = SortingConfig {
            mask: MaskSource::Disabled,
            ..config(IntervalStrategy::FileMask)
        };
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            IntervalEngine::prepare(&config, &canvas, &mut rng),
            Err(SortError::MaskUnavailable { .. })
        ));
    }

    // Tests automaton masks are built for the canvas
    // Verified by leaving the mask unset for automaton sources
    #[test]
    fn test_automaton_source_builds_mask() {
        let canvas = PixelBuffer::new(40, 12, Pixel::opaque(1, 1, 1));
        let config = SortingConfig {
            mask: MaskSource::Automaton { rule: Some(90) },
            ..config(IntervalStrategy::FileMask)
        };
        let engine = engine_for(&config, &canvas);

        let mask = engine.mask().unwrap();
        assert_eq!((mask.width(), mask.height()), (40, 12));
        assert!(!mask.is_blank());
        assert_eq!(engine.strategy(), IntervalStrategy::FileMask);
    }

    // Tests spans restrict intervals and offsets are applied
    // Verified by returning span-local coordinates
    #[test]
    fn test_span_offsets_and_short_rows() {
        let canvas = gray_row(&[9; 10]);
        let engine = engine_for(&config(IntervalStrategy::Whole), &canvas);
        let mut rng = StdRng::seed_from_u64(0);
        let row = canvas.row(0).unwrap();

        assert_eq!(
            engine.intervals(0, row, 3..8, &mut rng),
            vec![Interval::new(3, 8)]
        );
        assert!(engine.intervals(0, row, 4..5, &mut rng).is_empty());
        assert!(engine.intervals(0, row, 0..0, &mut rng).is_empty());
    }

    // Tests effect strategies produce no intervals
    // Verified by treating snap as whole
    #[test]
    fn test_effects_have_no_intervals() {
        let canvas = gray_row(&[1, 2, 3, 4]);

        assert!(row_intervals(&config(IntervalStrategy::Snap), &canvas).is_empty());
    }

    // Tests randomness extremes keep everything or nothing
    // Verified by inverting the skip comparison
    #[test]
    fn test_retain_sorted_extremes() {
        let intervals = vec![Interval::new(0, 3), Interval::new(3, 9)];
        let mut rng = StdRng::seed_from_u64(8);

        assert_eq!(retain_sorted(intervals.clone(), 0.0, &mut rng), intervals);
        assert!(retain_sorted(intervals, 1.0, &mut rng).is_empty());
    }
}
