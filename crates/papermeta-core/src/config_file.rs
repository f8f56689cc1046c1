use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub extraction: Option<ExtractionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<String>,
    pub max_upload_mb: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub max_ner_authors: Option<usize>,
    pub title_scan_lines: Option<usize>,
    pub title_fallback_lines: Option<usize>,
    pub expand_ligatures: Option<bool>,
}

/// Platform config directory path: `<config_dir>/papermeta/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papermeta").join("config.toml"))
}

/// Load config by cascading CWD `.papermeta.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".papermeta.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let overlay_server = overlay.server.unwrap_or_default();
    let base_extraction = base.extraction.unwrap_or_default();
    let overlay_extraction = overlay.extraction.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            bind: overlay_server.bind.or(base_server.bind),
            port: overlay_server.port.or(base_server.port),
            upload_dir: overlay_server.upload_dir.or(base_server.upload_dir),
            max_upload_mb: overlay_server.max_upload_mb.or(base_server.max_upload_mb),
        }),
        extraction: Some(ExtractionConfig {
            max_ner_authors: overlay_extraction
                .max_ner_authors
                .or(base_extraction.max_ner_authors),
            title_scan_lines: overlay_extraction
                .title_scan_lines
                .or(base_extraction.title_scan_lines),
            title_fallback_lines: overlay_extraction
                .title_fallback_lines
                .or(base_extraction.title_fallback_lines),
            expand_ligatures: overlay_extraction
                .expand_ligatures
                .or(base_extraction.expand_ligatures),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_deserializes() {
        let toml_str = "[server]\nport = 8080\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let server = parsed.server.unwrap();
        assert_eq!(server.port, Some(8080));
        assert!(server.upload_dir.is_none());
        assert!(parsed.extraction.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            server: Some(ServerConfig {
                port: Some(5000),
                upload_dir: Some("/base/uploads".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            server: Some(ServerConfig {
                port: Some(6000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).server.unwrap();
        assert_eq!(merged.port, Some(6000));
        assert_eq!(merged.upload_dir.as_deref(), Some("/base/uploads"));
    }

    #[test]
    fn merge_extraction_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            extraction: Some(ExtractionConfig {
                max_ner_authors: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.extraction.unwrap().max_ner_authors, Some(3));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[extraction]\nexpand_ligatures = false\ntitle_scan_lines = 20\n",
        )
        .unwrap();
        let config = load_from_path(&path).unwrap();
        let extraction = config.extraction.unwrap();
        assert_eq!(extraction.expand_ligatures, Some(false));
        assert_eq!(extraction.title_scan_lines, Some(20));
    }

    #[test]
    fn load_from_path_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[server\nport = ").unwrap();
        assert!(load_from_path(&bad).is_none());
    }
}
