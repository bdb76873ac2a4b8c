// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BuildError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = BuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.maven, raw.project))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_command(cfg)?;
    validate_java_home(cfg)?;
    validate_buffer(cfg)?;
    Ok(())
}

fn validate_command(cfg: &RawConfigFile) -> Result<()> {
    if let Some(cmd) = &cfg.maven.command {
        if cmd.trim().is_empty() {
            return Err(BuildError::Config(
                "[maven].command must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_java_home(cfg: &RawConfigFile) -> Result<()> {
    if let Some(home) = &cfg.maven.java_home {
        if home.trim().is_empty() {
            return Err(BuildError::Config(
                "[maven].java_home must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_buffer(cfg: &RawConfigFile) -> Result<()> {
    if cfg.maven.max_buffer_bytes == 0 {
        return Err(BuildError::Config(
            "[maven].max_buffer_bytes must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(toml_src: &str) -> RawConfigFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn empty_file_gets_defaults() {
        let cfg = ConfigFile::try_from(raw("")).unwrap();
        assert_eq!(cfg.maven.pause_ms, 100);
        assert!(cfg.maven.command.is_none());
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let err = ConfigFile::try_from(raw("[maven]\nmax_buffer_bytes = 0\n")).unwrap_err();
        assert!(matches!(err, BuildError::Config(msg) if msg.contains("max_buffer_bytes")));
    }

    #[test]
    fn blank_command_is_rejected() {
        let err = ConfigFile::try_from(raw("[maven]\ncommand = \"  \"\n")).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }
}
