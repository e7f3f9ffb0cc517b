#[cfg(test)]
mod cli_tests {
    use clap::Parser;
    use std::path::PathBuf;

    use crate::cli::Args;
    use crate::config::{Config, DEFAULT_KERNEL_PATH};

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("lz_p2p").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.local, 0);
        assert_eq!(args.remote, 1);
        assert_eq!(args.count, 1024);
        assert!(args.report.is_none());
        if std::env::var_os("LZ_P2P_KERNEL").is_none() {
            assert_eq!(args.kernel, PathBuf::from(DEFAULT_KERNEL_PATH));
        }
    }

    #[test]
    fn test_end_to_end_flags() {
        let config = parse(&["-l", "0", "-r", "1", "-n", "2k"]).unwrap().into_config();
        assert_eq!(config.local_gpu, 0);
        assert_eq!(config.remote_gpu, 1);
        assert_eq!(config.data_count, 2048);
    }

    #[test]
    fn test_swapped_devices_and_long_flags() {
        let config = parse(&["--local", "1", "--remote", "0", "--count", "4M"])
            .unwrap()
            .into_config();
        assert_eq!(config.local_gpu, 1);
        assert_eq!(config.remote_gpu, 0);
        assert_eq!(config.data_count, 4_194_304);
    }

    #[test]
    fn test_kernel_and_report_paths() {
        let config = parse(&["--kernel", "kernels/p2p.spv", "--report", "out.json"])
            .unwrap()
            .into_config();
        assert_eq!(config.kernel_path, PathBuf::from("kernels/p2p.spv"));
        assert_eq!(config.report_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_invalid_device_index_fails() {
        for flag in ["-l", "-r"] {
            let err = parse(&[flag, "2"]).unwrap_err();
            assert_ne!(err.exit_code(), 0);
            assert!(err.to_string().contains("must be 0 or 1"));
        }
    }

    #[test]
    fn test_missing_value_fails() {
        for flag in ["-l", "-r", "-n"] {
            let err = parse(&[flag]).unwrap_err();
            assert_ne!(err.exit_code(), 0, "{} without a value should fail", flag);
        }
    }

    #[test]
    fn test_malformed_count_fails() {
        let err = parse(&["-n", "12x"]).unwrap_err();
        assert_ne!(err.exit_code(), 0);
        assert!(err.to_string().contains("-n requires a number"));
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let args = parse(&["-l", "1", "-l", "0"]).unwrap();
        assert_eq!(args.local, 0);

        let args = parse(&["-n", "2k", "-n", "4"]).unwrap();
        assert_eq!(args.count, 4);

        let args = parse(&["-r", "0", "--remote", "1"]).unwrap();
        assert_eq!(args.remote, 1);
    }

    #[test]
    fn test_repeated_flag_still_validates_each_value() {
        assert!(parse(&["-l", "0", "-l", "7"]).is_err());
        assert!(parse(&["-n", "12x", "-n", "4"]).is_err());
    }

    #[test]
    fn test_kernel_help_names_expected_semantics() {
        use clap::CommandFactory;
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("kernels/p2p_kernels.cl"));
    }

    #[test]
    fn test_unknown_argument_fails() {
        assert!(parse(&["-x"]).is_err());
        assert!(parse(&["stray"]).is_err());
    }

    #[test]
    fn test_into_config_matches_default() {
        let mut config = parse(&[]).unwrap().into_config();
        config.kernel_path = PathBuf::from(DEFAULT_KERNEL_PATH);
        assert_eq!(config, Config::default());
        assert_eq!(config.buffer_bytes(), Some(4096));
    }
}
