//! CLI configuration utilities

use anyhow::Result;
use glow_core::GlowSettings;
use std::path::Path;

/// Save settings to a JSON file, creating parent directories
pub fn save_settings<P: AsRef<Path>>(settings: &GlowSettings, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Generate a default settings file
pub fn generate_default_settings<P: AsRef<Path>>(path: P) -> Result<()> {
    save_settings(&GlowSettings::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("glow.json");

        generate_default_settings(&path).unwrap();
        let loaded = GlowSettings::load(Some(&path)).unwrap();
        assert_eq!(loaded.base_url, GlowSettings::default().base_url);
        assert_eq!(loaded.credential_key, GlowSettings::default().credential_key);
    }
}
