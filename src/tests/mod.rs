mod cli_tests;
mod count_tests;
mod report_tests;
mod verify_tests;
