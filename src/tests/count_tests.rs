#[cfg(test)]
mod count_tests {
    use crate::buffer::element_bytes;
    use crate::config::{parse_count, parse_gpu_index};
    use crate::errors::CountError;

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_count("256"), Ok(256));
        assert_eq!(parse_count("1"), Ok(1));
        assert_eq!(parse_count("007"), Ok(7));
    }

    #[test]
    fn test_kilo_and_mega_suffix() {
        assert_eq!(parse_count("2k"), Ok(2048));
        assert_eq!(parse_count("4m"), Ok(4 * 1024 * 1024));
        assert_eq!(parse_count("1m"), Ok(1_048_576));
    }

    #[test]
    fn test_suffix_is_case_insensitive() {
        assert_eq!(parse_count("2K"), Ok(2048));
        assert_eq!(parse_count("4M"), Ok(4_194_304));
    }

    #[test]
    fn test_rejects_non_digits() {
        for input in ["12x", "k", "m", "", "+5", "-5", "1.5k", "2kk", "1 0", "0x10"] {
            assert!(
                matches!(parse_count(input), Err(CountError::InvalidDigits(_))),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(parse_count("0"), Err(CountError::Zero));
        assert_eq!(parse_count("0k"), Err(CountError::Zero));
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(matches!(parse_count("5000000m"), Err(CountError::Overflow(_))));
        assert!(matches!(parse_count("99999999999999999999999"), Err(CountError::Overflow(_))));
        // u32::MAX still fits
        assert_eq!(parse_count("4294967295"), Ok(u32::MAX));
        assert!(matches!(parse_count("4194304k"), Err(CountError::Overflow(_))));
    }

    #[test]
    fn test_error_message_names_the_flag() {
        let err = parse_count("12x").unwrap_err();
        assert!(err.to_string().contains("-n requires a number"));
    }

    #[test]
    fn test_element_bytes() {
        assert_eq!(element_bytes(1), Some(4));
        assert_eq!(element_bytes(2048), Some(8192));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_element_bytes_max_count_fits_on_64_bit() {
        assert_eq!(element_bytes(u32::MAX), Some(u32::MAX as usize * 4));
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_element_bytes_overflow_on_32_bit() {
        assert_eq!(element_bytes(u32::MAX), None);
        assert_eq!(element_bytes(1 << 30), None);
    }

    #[test]
    fn test_buffer_too_large_message() {
        let err = crate::errors::P2pError::BufferTooLarge { count: u32::MAX };
        assert!(err.to_string().contains("4294967295"));
    }

    #[test]
    fn test_gpu_index() {
        assert_eq!(parse_gpu_index("0"), Ok(0));
        assert_eq!(parse_gpu_index("1"), Ok(1));
        assert!(parse_gpu_index("2").is_err());
        assert!(parse_gpu_index("-1").is_err());
        assert!(parse_gpu_index("one").is_err());
        assert!(parse_gpu_index("").is_err());
    }
}
