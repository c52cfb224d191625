//! GeoTIFF key directory encoding for [`CRS`] descriptors.
//!
//! Layout of `GeoKeyDirectoryTag` (34735): a 4-short header
//! `[version, revision, minor, key_count]` followed by one
//! `[key_id, tag_location, count, value]` entry per key, sorted by key id.
//! Text values live in `GeoAsciiParamsTag` (34737) and are `|`-terminated.

use crate::crs::CRS;

const GT_MODEL_TYPE: u16 = 1024;
const GT_RASTER_TYPE: u16 = 1025;
const GT_CITATION: u16 = 1026;
const GEOGRAPHIC_TYPE: u16 = 2048;
const PROJECTED_CS_TYPE: u16 = 3072;

const MODEL_PROJECTED: u16 = 1;
const MODEL_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// Tag id of `GeoAsciiParamsTag`, used as the location of text keys
pub const GEO_ASCII_PARAMS: u16 = 34737;

/// Encoded key directory plus the ASCII parameters it points into
#[derive(Debug, Clone, PartialEq)]
pub struct GeoKeys {
    pub directory: Vec<u16>,
    pub ascii: Option<String>,
}

/// Encode the key directory for `crs`.
///
/// EPSG codes go in the geographic or projected type key. PROJ and WKT
/// descriptors have no numeric code, so their text is stored as the
/// citation.
pub fn encode(crs: &CRS) -> GeoKeys {
    let model = if crs.is_geographic() {
        MODEL_GEOGRAPHIC
    } else {
        MODEL_PROJECTED
    };

    let mut keys: Vec<[u16; 4]> = vec![
        [GT_MODEL_TYPE, 0, 1, model],
        [GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA],
    ];
    let mut ascii = None;

    match crs {
        CRS::Epsg(code) => {
            let key = if model == MODEL_GEOGRAPHIC {
                GEOGRAPHIC_TYPE
            } else {
                PROJECTED_CS_TYPE
            };
            // codes above u16 are not representable as a short key value
            match u16::try_from(*code) {
                Ok(value) => keys.push([key, 0, 1, value]),
                Err(_) => ascii = Some(crs.identifier()),
            }
        }
        CRS::Proj(_) | CRS::Wkt(_) => ascii = Some(crs.identifier()),
    }

    let ascii = ascii.map(|text| {
        let param = format!("{}|", text);
        keys.push([GT_CITATION, GEO_ASCII_PARAMS, param.len() as u16, 0]);
        param
    });

    keys.sort_by_key(|k| k[0]);

    let mut directory = vec![1, 1, 0, keys.len() as u16];
    directory.extend(keys.iter().flatten());

    GeoKeys { directory, ascii }
}

/// Decode a CRS from a key directory and optional ASCII parameters.
///
/// Returns `None` when neither an EPSG type key nor a parseable citation
/// is present.
pub fn decode(directory: &[u16], ascii: Option<&str>) -> Option<CRS> {
    if directory.len() < 4 {
        return None;
    }
    let key_count = directory[3] as usize;
    let mut citation = None;

    for entry in directory[4..].chunks_exact(4).take(key_count) {
        let (key_id, location, count, value) = (entry[0], entry[1], entry[2], entry[3]);
        match key_id {
            GEOGRAPHIC_TYPE | PROJECTED_CS_TYPE if location == 0 && value > 0 => {
                return Some(CRS::Epsg(value as u32));
            }
            GT_CITATION if location == GEO_ASCII_PARAMS => {
                citation = ascii.and_then(|text| {
                    let start = value as usize;
                    let end = start + count as usize;
                    text.get(start..end)
                });
            }
            _ => {}
        }
    }

    citation
        .map(|text| text.trim_end_matches('|'))
        .and_then(|text| text.parse().ok())
}
