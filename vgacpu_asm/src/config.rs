use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AsmError;
use crate::image::DEFAULT_IMAGE_SIZE;

/// Largest image the 16-bit listing addresses can describe.
pub const MAX_IMAGE_SIZE: usize = 0x1_0000;

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblerConfig {
  /// Bytes in the output image.
  pub image_size: usize,
}

impl Default for AssemblerConfig {
  fn default() -> Self {
    AssemblerConfig { image_size: DEFAULT_IMAGE_SIZE }
  }
}

impl AssemblerConfig {
  pub fn from_toml(content: &str) -> Result<Self, AsmError> {
    toml::from_str(content).map_err(|e| AsmError::Config { path: None, message: e.to_string() })
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AsmError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| AsmError::io(path, e))?;
    toml::from_str(&content).map_err(|e| AsmError::Config {
      path: Some(path.to_path_buf()),
      message: e.to_string(),
    })
  }

  pub fn validate(&self) -> Result<(), AsmError> {
    if self.image_size == 0 || self.image_size > MAX_IMAGE_SIZE {
      return Err(AsmError::Config {
        path: None,
        message: format!("image_size must be between 1 and {}, got {}", MAX_IMAGE_SIZE, self.image_size),
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = AssemblerConfig::from_toml("").unwrap();
    assert_eq!(config, AssemblerConfig::default());
    assert_eq!(config.image_size, 16384);
  }

  #[test]
  fn test_image_size() {
    let config = AssemblerConfig::from_toml("image_size = 4096\n").unwrap();
    assert_eq!(config.image_size, 4096);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_unknown_key_rejected() {
    assert!(matches!(
      AssemblerConfig::from_toml("imagesize = 1"),
      Err(AsmError::Config { .. })
    ));
  }

  #[test]
  fn test_wrong_type_rejected() {
    assert!(matches!(
      AssemblerConfig::from_toml("image_size = \"big\""),
      Err(AsmError::Config { .. })
    ));
  }

  #[test]
  fn test_size_limits() {
    assert!(AssemblerConfig { image_size: 0 }.validate().is_err());
    assert!(AssemblerConfig { image_size: MAX_IMAGE_SIZE }.validate().is_ok());
    assert!(AssemblerConfig { image_size: MAX_IMAGE_SIZE + 1 }.validate().is_err());
  }
}
