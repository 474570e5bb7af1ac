//! Fluorescence color profiles used to segment worms from the background.
//!
//! A profile is an inclusive per-channel color range. Worm pixels are the ones
//! whose every channel lies inside `[lower, upper]`.

use std::path::Path;

use image::Rgb;
use log::info;

use crate::error::{Error, Result};

// Hardcoded ranges for the two supported fluorophores, in RGB channel order.
const GFP_LOWER: Rgb<u8> = Rgb([0, 51, 0]);
const GFP_UPPER: Rgb<u8> = Rgb([184, 252, 181]);
const MCHERRY_LOWER: Rgb<u8> = Rgb([68, 0, 0]);
const MCHERRY_UPPER: Rgb<u8> = Rgb([220, 1, 4]);

/// The color range used to isolate worm pixels.
///
/// Exactly one profile is active per run. It is resolved once at startup from
/// the caller's configuration and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorProfile {
    /// Green fluorescent protein. The default when nothing is specified.
    Gfp,
    /// Red fluorescent protein (mCherry).
    MCherry,
    /// User-supplied bounds loaded from a bounds file.
    Custom { lower: Rgb<u8>, upper: Rgb<u8> },
}

impl ColorProfile {
    /// Resolves a profile from an optional mode name and an optional path to a
    /// custom-bounds file.
    ///
    /// A bounds file takes precedence over any mode name. With neither given,
    /// the profile defaults to [`ColorProfile::Gfp`]. An unrecognized mode
    /// name is a fatal configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColorMode`] for an unrecognized mode name, or
    /// [`Error::CustomBounds`] / [`Error::Io`] if the bounds file cannot be
    /// read or parsed.
    pub fn resolve(mode: Option<&str>, bounds_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = bounds_file {
            info!("Running with custom RGB vectors");
            return Self::from_bounds_file(path);
        }

        let profile = match mode {
            None | Some("GFP") => Self::Gfp,
            Some("mCherry") => Self::MCherry,
            Some(other) => return Err(Error::UnknownColorMode(other.to_string())),
        };
        info!("Running in {} color mode", profile.name());

        Ok(profile)
    }

    /// Loads a [`ColorProfile::Custom`] from a plain-text bounds file.
    ///
    /// The file must contain exactly two non-empty lines, each a
    /// comma-separated numeric triple in blue,green,red channel order (the
    /// order used by existing bounds files): the lower bound first, then the
    /// upper bound. Values must be finite and within `0..=255`.
    pub fn from_bounds_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() != 2 {
            return Err(Error::CustomBounds(format!(
                "expected exactly 2 lines (lower, upper), found {}",
                lines.len()
            )));
        }

        let lower = parse_bgr_triple(lines[0])?;
        let upper = parse_bgr_triple(lines[1])?;

        Ok(Self::Custom { lower, upper })
    }

    /// The inclusive `(lower, upper)` RGB bounds of this profile.
    pub fn bounds(&self) -> (Rgb<u8>, Rgb<u8>) {
        match *self {
            Self::Gfp => (GFP_LOWER, GFP_UPPER),
            Self::MCherry => (MCHERRY_LOWER, MCHERRY_UPPER),
            Self::Custom { lower, upper } => (lower, upper),
        }
    }

    /// Returns `true` if every channel of `pixel` lies within the profile's
    /// inclusive bounds.
    pub fn contains(&self, pixel: Rgb<u8>) -> bool {
        let (lower, upper) = self.bounds();
        pixel
            .0
            .iter()
            .zip(lower.0.iter().zip(upper.0.iter()))
            .all(|(&value, (&lo, &hi))| lo <= value && value <= hi)
    }

    /// Human-readable profile name, used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gfp => "GFP",
            Self::MCherry => "mCherry",
            Self::Custom { .. } => "Custom",
        }
    }
}

/// Parses one `blue,green,red` line into an RGB-ordered pixel value.
fn parse_bgr_triple(line: &str) -> Result<Rgb<u8>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(Error::CustomBounds(format!(
            "expected 3 comma-separated values, found {} in {line:?}",
            fields.len()
        )));
    }

    let mut bgr = [0u8; 3];
    for (slot, field) in bgr.iter_mut().zip(&fields) {
        let value: f32 = field
            .parse()
            .map_err(|_| Error::CustomBounds(format!("{field:?} is not a number")))?;
        if !value.is_finite() || !(0.0..=255.0).contains(&value) {
            return Err(Error::CustomBounds(format!(
                "channel value {value} is outside 0..=255"
            )));
        }
        *slot = value.round() as u8;
    }

    Ok(Rgb([bgr[2], bgr[1], bgr[0]]))
}
