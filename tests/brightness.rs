mod tests {
    use ornament_twinkle::ThresholdComparator;
    use ornament_twinkle::brightness::{
        BrightnessPipeline, BrightnessScaler, BrightnessSensor, DEFAULT_SWEEP_CODES,
        MovingAverageFilter, RING_CAPACITY, SweepOutcome,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        SetThreshold(u8),
        Poll,
        ClearLatch,
        EnableEdges,
        DisableEdges,
    }

    /// Comparator that trips once the `trip_at`-th threshold has been set
    struct FakeComparator {
        trip_at: Option<usize>,
        thresholds_set: usize,
        latched: bool,
        edges_enabled: bool,
        calls: Vec<Call>,
    }

    impl FakeComparator {
        fn new(trip_at: Option<usize>) -> Self {
            Self {
                trip_at,
                thresholds_set: 0,
                latched: false,
                edges_enabled: false,
                calls: Vec::new(),
            }
        }

        fn thresholds(&self) -> Vec<u8> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::SetThreshold(code) => Some(*code),
                    _ => None,
                })
                .collect()
        }
    }

    impl ThresholdComparator for FakeComparator {
        fn set_threshold(&mut self, code: u8) {
            self.calls.push(Call::SetThreshold(code));
            self.thresholds_set += 1;
            if self.edges_enabled && Some(self.thresholds_set) == self.trip_at {
                self.latched = true;
            }
        }

        fn poll_transition(&mut self) -> bool {
            self.calls.push(Call::Poll);
            self.latched
        }

        fn clear_transition_latch(&mut self) {
            self.calls.push(Call::ClearLatch);
            self.latched = false;
        }

        fn enable_edge_detection(&mut self) {
            self.calls.push(Call::EnableEdges);
            self.edges_enabled = true;
        }

        fn disable_edge_detection(&mut self) {
            self.calls.push(Call::DisableEdges);
            self.edges_enabled = false;
        }
    }

    #[test]
    fn test_moving_average_window() {
        let mut filter = MovingAverageFilter::<8>::new();
        let mut last = 0;
        for sample in 1..=8 {
            last = filter.update(sample);
        }
        assert_eq!(last, 4);
        assert_eq!(filter.update(9), 5);
    }

    #[test]
    fn test_moving_average_startup_bias() {
        let mut filter = MovingAverageFilter::<RING_CAPACITY>::new();
        assert_eq!(filter.update(63), 7);
        assert_eq!(filter.update(63), 15);
        for _ in 0..6 {
            filter.update(63);
        }
        assert_eq!(filter.average(), 63);
    }

    #[test]
    fn test_moving_average_cursor_wraps() {
        let mut filter = MovingAverageFilter::<4>::new();
        for _ in 0..4 {
            filter.update(1);
        }
        assert_eq!(filter.cursor(), 0);
        filter.update(1);
        assert_eq!(filter.cursor(), 1);

        filter.reset();
        assert_eq!(filter.cursor(), 0);
        assert_eq!(filter.average(), 0);
    }

    #[test]
    fn test_moving_average_full_scale() {
        let mut filter = MovingAverageFilter::<16>::new();
        for _ in 0..16 {
            filter.update(255);
        }
        assert_eq!(filter.average(), 255);
    }

    #[test]
    fn test_scaler() {
        let scaler = BrightnessScaler::default();
        assert_eq!(scaler.scale(0), 66);
        assert_eq!(scaler.scale(10), 96);
        assert_eq!(scaler.scale(63), 255);
        assert_eq!(scaler.scale(70), 255);
        assert_eq!(scaler.scale(255), 255);
    }

    #[test]
    fn test_scaler_custom() {
        let scaler = BrightnessScaler::new(0, 4);
        assert_eq!(scaler.scale(0), 0);
        assert_eq!(scaler.scale(63), 252);
        assert_eq!(scaler.scale(64), 255);
    }

    #[test]
    fn test_sweep_returns_tripping_code() {
        for k in 1..=DEFAULT_SWEEP_CODES.len() {
            let mut sensor = BrightnessSensor::new(DEFAULT_SWEEP_CODES);
            let mut comparator = FakeComparator::new(Some(k));
            let code = sensor.measure(&mut comparator);
            assert_eq!(code, DEFAULT_SWEEP_CODES[k - 1], "k = {k}");
            assert_eq!(sensor.last_code(), code);
        }
    }

    #[test]
    fn test_sweep_exhausted_falls_back_to_brightest() {
        let mut sensor = BrightnessSensor::new(DEFAULT_SWEEP_CODES);
        let mut comparator = FakeComparator::new(None);
        assert_eq!(
            sensor.measure_outcome(&mut comparator),
            SweepOutcome::Exhausted(63)
        );

        let mut expected: Vec<u8> = DEFAULT_SWEEP_CODES.to_vec();
        expected.push(63);
        assert_eq!(comparator.thresholds(), expected);
    }

    #[test]
    fn test_sweep_comparator_protocol() {
        let mut sensor = BrightnessSensor::new(DEFAULT_SWEEP_CODES);
        let mut comparator = FakeComparator::new(Some(3));
        comparator.latched = true;

        assert_eq!(
            sensor.measure_outcome(&mut comparator),
            SweepOutcome::Tripped(55)
        );
        assert_eq!(
            comparator.calls,
            vec![
                Call::ClearLatch,
                Call::EnableEdges,
                Call::SetThreshold(63),
                Call::Poll,
                Call::SetThreshold(59),
                Call::Poll,
                Call::SetThreshold(55),
                Call::Poll,
                Call::SetThreshold(63),
                Call::DisableEdges,
            ]
        );
        assert!(!comparator.edges_enabled);
    }

    #[test]
    fn test_sweep_custom_table() {
        let mut sensor = BrightnessSensor::new([24, 20, 16]);
        assert_eq!(sensor.codes(), &[24, 20, 16]);
        assert_eq!(sensor.last_code(), 24);
        let mut comparator = FakeComparator::new(Some(2));
        assert_eq!(sensor.measure(&mut comparator), 20);
        assert_eq!(comparator.thresholds().last(), Some(&24));
    }

    #[test]
    fn test_pipeline() {
        let mut pipeline = BrightnessPipeline::default();
        assert_eq!(pipeline.scaler(), &BrightnessScaler::DEFAULT);
        assert_eq!(pipeline.sensor().codes(), &DEFAULT_SWEEP_CODES);

        let mut comparator = FakeComparator::new(None);
        let reading = pipeline.run(&mut comparator);
        assert_eq!(reading.raw(), 63);
        assert_eq!(reading.smoothed, 7);
        assert_eq!(reading.amplitude, 87);

        for _ in 0..7 {
            let mut comparator = FakeComparator::new(None);
            pipeline.run(&mut comparator);
        }
        assert_eq!(pipeline.filter().average(), 63);

        // Darkest code pulls the average down one slot at a time
        let mut comparator = FakeComparator::new(Some(17));
        let reading = pipeline.run(&mut comparator);
        assert_eq!(reading.outcome, SweepOutcome::Tripped(0));
        assert_eq!(pipeline.sensor().last_code(), 0);
        assert_eq!(reading.smoothed, 55);
        assert_eq!(reading.amplitude, 231);
    }
}
