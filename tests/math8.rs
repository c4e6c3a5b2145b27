mod tests {
    use ornament_twinkle::math8::{mul_recip16, recip16, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_scale8_full_scale_is_identity() {
        for value in 0..=255u8 {
            assert_eq!(scale8(value, 255), value);
            assert_eq!(scale8(value, 0), 0);
        }
    }

    #[test]
    fn test_recip16_rounds_to_nearest() {
        assert_eq!(recip16(2), 32768);
        assert_eq!(recip16(3), 21845);
        assert_eq!(recip16(20), 3277);
        assert_eq!(recip16(2000), 33);
    }

    #[test]
    fn test_mul_recip16() {
        let recip = recip16(20);
        assert_eq!(mul_recip16(2000 * 19, recip), 1900);
        assert_eq!(mul_recip16(2000, recip), 100);
        assert_eq!(mul_recip16(99, recip), 4);
        assert_eq!(mul_recip16(20, recip), 1);
        assert_eq!(mul_recip16(19, recip), 0);
    }

    #[test]
    fn test_mul_recip16_bias_is_accepted() {
        // 100 / 3 = 33.3; the reciprocal is rounded down, so is the result
        assert_eq!(mul_recip16(100, recip16(3)), 33);
        // 65535 / 3 = 21845 exactly, reciprocal multiply lands one short
        assert_eq!(mul_recip16(65535, recip16(3)), 21844);
    }
}
