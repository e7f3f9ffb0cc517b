#[cfg(test)]
mod report_tests {
    use serde_json::Value;

    use crate::buffer::format_preview;
    use crate::config::Config;
    use crate::p2p::P2pCapability;
    use crate::report::RunReport;
    use crate::verify::check_copy;
    use crate::ze::ffi::{ZeResult, ZE_DEVICE_P2P_PROPERTY_FLAG_ACCESS};

    #[test]
    fn test_preview_short_buffer() {
        assert_eq!(format_preview(&[0, 1, 2], 8), "0 1 2");
        assert_eq!(format_preview(&[], 8), "");
    }

    #[test]
    fn test_preview_elides_middle() {
        let values: Vec<i32> = (0..10).collect();
        assert_eq!(format_preview(&values, 2), "0 1 ... 8 9");

        let exact: Vec<i32> = (0..4).collect();
        assert_eq!(format_preview(&exact, 2), "0 1 2 3");
    }

    #[test]
    fn test_result_names() {
        assert!(ZeResult::SUCCESS.is_success());
        assert_eq!(
            ZeResult(0x7800_0004).to_string(),
            "ZE_RESULT_ERROR_INVALID_ARGUMENT (0x78000004)"
        );
        assert_eq!(ZeResult(0x1234).name(), None);
        assert_eq!(ZeResult(0x1234).to_string(), "unknown result 0x1234");
    }

    #[test]
    fn test_p2p_flags() {
        let cap = P2pCapability::from_flags(0, 1, true, ZE_DEVICE_P2P_PROPERTY_FLAG_ACCESS);
        assert!(cap.access);
        assert!(!cap.atomics);
        assert_eq!(
            cap.to_string(),
            "GPU 0 -> GPU 1: can access peer = yes, P2P access = yes, P2P atomics = no"
        );
    }

    #[test]
    fn test_report_json() {
        let mut report = RunReport::new(Config::default());
        report.p2p.push(P2pCapability::from_flags(0, 1, true, 0b11));
        report.checks.push(check_copy("local_read_from_remote", &[1, 1], &[1, 1]));
        assert!(report.passed());

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["config"]["data_count"], 1024);
        assert!(json["config"].get("report_path").is_none());
        assert_eq!(json["p2p"][0]["atomics"], true);
        assert_eq!(json["checks"][0]["mismatches"], 0);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_report_fails_on_bad_check() {
        let mut report = RunReport::new(Config::default());
        report.checks.push(check_copy("local_read_from_remote", &[1, 1], &[1, 1]));
        report.checks.push(check_copy("local_write_to_remote", &[2, 2], &[2, 1]));
        assert!(!report.passed());

        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("local_write_to_remote"));
    }
}
