use std::{fs::File, io::Read};

/// Load a packet stored as a hex string under `tests/packet_examples`.
pub fn file_to_packet(fname: &str) -> Vec<u8> {
    // The test is executed under the crate root directory.
    let mut program_path = std::env::current_dir().unwrap();
    program_path.push("tests");
    program_path.push("packet_examples");
    program_path.push(fname);

    let mut file = File::open(program_path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    hex_to_packet(content.trim())
}

/// Decode a contiguous hex string such as `"0001080006"`.
pub fn hex_to_packet(content: &str) -> Vec<u8> {
    assert!(content.len() % 2 == 0, "odd number of hex digits");
    (0..content.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&content[i..i + 2], 16).unwrap())
        .collect()
}
