use anyhow::Result;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    Apk,
    Xapk,
}

impl PackageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageFormat::Apk => "APK",
            PackageFormat::Xapk => "XAPK",
        }
    }

    /// File extension used for the downloaded artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            PackageFormat::Apk => "apk",
            PackageFormat::Xapk => "xapk",
        }
    }
}

/// Format preference selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    Auto,
    Apk,
    Xapk,
}

impl FromStr for FormatChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FormatChoice::Auto),
            "apk" => Ok(FormatChoice::Apk),
            "xapk" => Ok(FormatChoice::Xapk),
            _ => anyhow::bail!("Unknown package format: {}", s),
        }
    }
}

/// A resolved mirror download: direct URL, artifact format, and the size
/// advertised by the mirror when it sent one.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub url: String,
    pub format: PackageFormat,
    pub size: Option<u64>,
}
