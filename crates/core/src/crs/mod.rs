//! Coordinate Reference System descriptors
//!
//! A CRS is carried as one of three textual forms: an EPSG code, a PROJ
//! string or a WKT definition. No datum math happens here; the descriptor is
//! only attached to rasters and written into the GeoTIFF key directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinate Reference System representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CRS {
    /// Registered EPSG code
    Epsg(u32),
    /// PROJ string, e.g. `+proj=utm +zone=10 +datum=WGS84`
    Proj(String),
    /// WKT (1 or 2) definition
    Wkt(String),
}

/// WKT root keywords accepted by [`CRS::from_str`]
const WKT_ROOTS: &[&str] = &[
    "GEOGCS[", "PROJCS[", "GEOCCS[", "COMPD_CS[", "GEOGCRS[", "PROJCRS[", "GEODCRS[",
    "GEOGRAPHICCRS[", "PROJECTEDCRS[", "COMPOUNDCRS[",
];

impl CRS {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        CRS::Epsg(code)
    }

    /// WGS84 geographic longitude/latitude (EPSG:4326)
    pub fn wgs84() -> Self {
        CRS::Epsg(4326)
    }

    /// UTM zone on WGS84, north (EPSG:326xx) or south (EPSG:327xx)
    pub fn utm_wgs84(zone: u8, north: bool) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(Error::InvalidCrs(format!("UTM zone {zone}")));
        }
        let base = if north { 32600 } else { 32700 };
        Ok(CRS::Epsg(base + zone as u32))
    }

    /// EPSG code if this CRS is registered
    pub fn epsg(&self) -> Option<u32> {
        match self {
            CRS::Epsg(code) => Some(*code),
            _ => None,
        }
    }

    /// Whether coordinates are longitude/latitude degrees.
    ///
    /// EPSG geographic 2D systems live in the 4000-4999 block. PROJ strings
    /// are checked for `longlat`/`latlong`, WKT for a geographic root.
    pub fn is_geographic(&self) -> bool {
        match self {
            CRS::Epsg(code) => (4000..5000).contains(code),
            CRS::Proj(proj) => proj.contains("=longlat") || proj.contains("=latlong"),
            CRS::Wkt(wkt) => {
                let head = wkt.trim_start().to_ascii_uppercase();
                head.starts_with("GEOGCS[")
                    || head.starts_with("GEOGCRS[")
                    || head.starts_with("GEOGRAPHICCRS[")
            }
        }
    }

    /// Check if two CRS descriptors name the same system.
    ///
    /// Only identical forms compare; an EPSG code is never resolved against
    /// an equivalent PROJ or WKT text.
    pub fn is_equivalent(&self, other: &CRS) -> bool {
        match (self, other) {
            (CRS::Epsg(a), CRS::Epsg(b)) => a == b,
            (CRS::Proj(a), CRS::Proj(b)) => normalize_proj(a) == normalize_proj(b),
            (CRS::Wkt(a), CRS::Wkt(b)) => a.trim() == b.trim(),
            _ => false,
        }
    }

    /// String identifier, parseable back with [`CRS::from_str`]
    pub fn identifier(&self) -> String {
        match self {
            CRS::Epsg(code) => format!("EPSG:{code}"),
            CRS::Proj(proj) => proj.clone(),
            CRS::Wkt(wkt) => wkt.clone(),
        }
    }
}

fn normalize_proj(proj: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = proj.split_whitespace().collect();
    parts.sort_unstable();
    parts
}

impl FromStr for CRS {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(code) = s
            .strip_prefix("EPSG:")
            .or_else(|| s.strip_prefix("epsg:"))
        {
            return code
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&c| c > 0)
                .map(CRS::Epsg)
                .ok_or_else(|| Error::InvalidCrs(s.to_string()));
        }
        if s.starts_with("+proj=") {
            return Ok(CRS::Proj(s.to_string()));
        }
        let upper = s.to_ascii_uppercase();
        if WKT_ROOTS.iter().any(|root| upper.starts_with(root)) {
            return Ok(CRS::Wkt(s.to_string()));
        }
        Err(Error::InvalidCrs(s.to_string()))
    }
}

impl TryFrom<String> for CRS {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CRS> for String {
    fn from(crs: CRS) -> Self {
        crs.identifier()
    }
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CRS::Wkt(wkt) if wkt.chars().count() > 50 => {
                let head: String = wkt.chars().take(50).collect();
                write!(f, "WKT:{head}...")
            }
            _ => write!(f, "{}", self.identifier()),
        }
    }
}

impl Default for CRS {
    fn default() -> Self {
        Self::wgs84()
    }
}
