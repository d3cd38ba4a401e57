mod runner_tests;
pub mod utils;
