//! Config file locations.
//!
//! ## Layout
//!
//! ```text
//! <project>/
//! └── .resload/
//!     └── config.yaml
//! ```

use std::path::PathBuf;

/// Project config file path relative to a project root
pub fn project_config_file() -> PathBuf {
    PathBuf::from(super::CONFIG_DIR).join(super::CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_config_file_is_relative() {
        let path = project_config_file();
        assert!(path.is_relative());
        assert_eq!(path, PathBuf::from(".resload/config.yaml"));
    }
}
