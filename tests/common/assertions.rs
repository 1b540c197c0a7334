//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

/// Assert the file at `path` starts with the given netpbm magic number.
pub fn assert_netpbm(path: &Path, magic: &str) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected {} to exist: {}", path.display(), e));
    assert!(
        bytes.len() > magic.len(),
        "Expected {} to hold an image, got {} bytes",
        path.display(),
        bytes.len()
    );
    assert_eq!(
        std::str::from_utf8(&bytes[..2]).ok(),
        Some(magic),
        "Expected magic {} in {}",
        magic,
        path.display()
    );
}

/// Assert every listed file exists in `dir` and has the magic for its extension.
pub fn assert_outputs(dir: &Path, names: &[&str]) {
    for name in names {
        let magic = match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("ppm") => "P6",
            Some("pgm") => "P5",
            Some("pbm") => "P4",
            other => panic!("Unexpected extension {:?} for {}", other, name),
        };
        assert_netpbm(&dir.join(name), magic);
    }
}
