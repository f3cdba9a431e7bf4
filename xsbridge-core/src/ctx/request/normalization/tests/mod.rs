mod header_tests;
mod path_tests;
mod test_helpers;
