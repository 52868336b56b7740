//! Company profile and record defaults

use crate::{PayslipError, Result};
use log::debug;
use pdf_core::ImageXObject;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run configuration, loaded from JSON
///
/// Every field is optional:
///
/// ```json
/// {
///   "company": {
///     "name": "AbegaTech Pvt. Ltd.",
///     "address_lines": ["P No 147, Floor 1 Rd No7, Sri Madhavam,"],
///     "logo": "logo.png"
///   },
///   "defaults": { "month": "Jan", "year": "2025" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipConfig {
    pub company: CompanyProfile,
    pub defaults: RecordDefaults,
}

/// Header and footer content of every payslip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub address_lines: Vec<String>,
    /// PNG or JPEG shown in the header
    pub logo: Option<PathBuf>,
    pub disclaimer: String,
    /// Logo bytes, read by [`CompanyProfile::load_logo`]
    #[serde(skip)]
    logo_data: Option<Vec<u8>>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "AbegaTech Pvt. Ltd.".to_string(),
            address_lines: vec![
                "P No 147, Floor 1 Rd No7, Sri Madhavam,".to_string(),
                "Madeenaguda, Miyapur, Hyderabad 500049".to_string(),
            ],
            logo: None,
            disclaimer:
                "** This is computer generated payslip and doesn't require signature and stamp"
                    .to_string(),
            logo_data: None,
        }
    }
}

impl CompanyProfile {
    /// Read and decode the configured logo file
    ///
    /// Does nothing when no logo is configured.
    pub fn load_logo(&mut self) -> Result<()> {
        let Some(path) = &self.logo else {
            self.logo_data = None;
            return Ok(());
        };

        let data = std::fs::read(path).map_err(|e| PayslipError::Logo {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        // Decode fully so a damaged file fails here rather than per employee
        let image = ImageXObject::from_bytes(&data).map_err(|e| PayslipError::Logo {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(
            "Loaded {}x{} logo from {}",
            image.width,
            image.height,
            path.display()
        );

        self.logo_data = Some(data);
        Ok(())
    }

    /// Logo bytes, if a logo was loaded
    pub fn logo_data(&self) -> Option<&[u8]> {
        self.logo_data.as_deref()
    }
}

/// Values substituted when a row leaves the period blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDefaults {
    pub month: String,
    pub year: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            month: "Dec".to_string(),
            year: "2024".to_string(),
        }
    }
}

impl PayslipConfig {
    /// Parse configuration JSON without touching the logo file
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.defaults.month.trim().is_empty() || config.defaults.year.trim().is_empty() {
            return Err(PayslipError::Config(
                "defaults.month and defaults.year must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from a JSON file and read its logo
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PayslipError::Config(format!("Failed to read {}: {e}", path.as_ref().display()))
        })?;
        let mut config = Self::from_json(&json)?;
        config.company.load_logo()?;
        Ok(config)
    }

    /// Replace the configured logo and read it
    pub fn with_logo<P: Into<PathBuf>>(mut self, path: P) -> Result<Self> {
        self.company.logo = Some(path.into());
        self.company.load_logo()?;
        Ok(self)
    }
}
