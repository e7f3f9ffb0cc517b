#[cfg(test)]
mod verify_tests {
    use crate::errors::P2pError;
    use crate::verify::{check_copy, check_fill, Mismatch};

    #[test]
    fn test_equal_slices_pass() {
        let data = vec![1, 1, 1, 1];
        let check = check_copy("local_read_from_remote", &data, &data);
        assert!(check.passed());
        assert_eq!(check.checked, 4);
        assert_eq!(check.first_mismatch, None);
        assert!(check.into_result().is_ok());
    }

    #[test]
    fn test_reports_first_mismatch() {
        let expected = [1, 1, 1, 1, 1];
        let actual = [1, 1, 0, 1, 0];
        let check = check_copy("local_read_from_remote", &expected, &actual);
        assert!(!check.passed());
        assert_eq!(check.mismatches, 2);
        assert_eq!(
            check.first_mismatch,
            Some(Mismatch { index: 2, expected: 1, actual: 0 })
        );

        match check.into_result() {
            Err(P2pError::VerificationFailed { kernel, mismatches, index, .. }) => {
                assert_eq!(kernel, "local_read_from_remote");
                assert_eq!(mismatches, 2);
                assert_eq!(index, 2);
            }
            other => panic!("expected verification failure, got {:?}", other.map(|c| c.kernel)),
        }
    }

    #[test]
    fn test_length_difference_counts_as_mismatch() {
        let check = check_copy("k", &[5, 5, 5], &[5]);
        assert_eq!(check.checked, 1);
        assert_eq!(check.mismatches, 2);
        assert_eq!(
            check.first_mismatch,
            Some(Mismatch { index: 1, expected: 5, actual: 0 })
        );
    }

    #[test]
    fn test_fill_check() {
        assert!(check_fill("local_write_to_remote", 2, &[2, 2, 2]).passed());

        let check = check_fill("local_write_to_remote", 2, &[2, 1, 2]);
        assert_eq!(check.mismatches, 1);
        assert_eq!(check.first_mismatch.map(|m| m.index), Some(1));
    }
}
