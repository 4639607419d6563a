use lrtrace::parsers::Tables;

#[allow(dead_code)]
/// Helper function to read in an entire test data file
pub fn read_test_file(filename: &str) -> String {
    std::fs::read_to_string(test_file_path(filename)).expect("failed to read test file")
}

#[allow(dead_code)]
/// Helper function to load tables from the tables test data directory
pub fn load_tables(name: &str) -> Tables {
    Tables::from_json(&read_test_file(&format!("tables/{}.json", name)))
        .expect("failed to load tables")
}

/// Helper function to get an valid path to a test file in the testdata directory
pub fn test_file_path(filename: &str) -> String {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push(format!("tests/testdata/{}", filename));

    p.into_os_string()
        .into_string()
        .expect("failed to build filename")
}
