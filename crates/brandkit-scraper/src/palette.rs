//! Six-swatch palette extraction from raster images.
//!
//! Pixels are downsampled, bucketed into a 5-bit-per-channel histogram, and
//! the most populated buckets are scored against vibrant/muted targets at
//! dark, normal and light lightness.

use std::collections::HashMap;

use brandkit_core::Rgb;
use image::GenericImageView;

use crate::ScraperError;

/// Images are scaled to fit this box before sampling.
const SAMPLE_EDGE: u32 = 100;
const MIN_ALPHA: u8 = 125;
const NEAR_WHITE: u8 = 250;
const QUANT_SHIFT: u8 = 3;
const MAX_BUCKETS: usize = 64;

const TARGET_DARK_LUMA: f64 = 0.26;
const MAX_DARK_LUMA: f64 = 0.45;
const MIN_LIGHT_LUMA: f64 = 0.55;
const TARGET_LIGHT_LUMA: f64 = 0.74;
const MIN_NORMAL_LUMA: f64 = 0.3;
const TARGET_NORMAL_LUMA: f64 = 0.5;
const MAX_NORMAL_LUMA: f64 = 0.7;
const TARGET_MUTED_SATURATION: f64 = 0.3;
const MAX_MUTED_SATURATION: f64 = 0.4;
const TARGET_VIBRANT_SATURATION: f64 = 1.0;
const MIN_VIBRANT_SATURATION: f64 = 0.35;

const WEIGHT_SATURATION: f64 = 3.0;
const WEIGHT_LUMA: f64 = 6.5;
const WEIGHT_POPULATION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwatchKind {
    Vibrant,
    DarkVibrant,
    LightVibrant,
    Muted,
    DarkMuted,
    LightMuted,
}

impl SwatchKind {
    /// Selection order: each kind claims its best bucket before the next.
    const PICK_ORDER: [Self; 6] = [
        Self::Vibrant,
        Self::LightVibrant,
        Self::DarkVibrant,
        Self::Muted,
        Self::LightMuted,
        Self::DarkMuted,
    ];

    /// Order in which swatches are offered as card backgrounds.
    pub const DISPLAY_ORDER: [Self; 6] = [
        Self::DarkVibrant,
        Self::DarkMuted,
        Self::Vibrant,
        Self::Muted,
        Self::LightVibrant,
        Self::LightMuted,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vibrant => "vibrant",
            Self::DarkVibrant => "dark_vibrant",
            Self::LightVibrant => "light_vibrant",
            Self::Muted => "muted",
            Self::DarkMuted => "dark_muted",
            Self::LightMuted => "light_muted",
        }
    }

    fn target(self) -> Target {
        let (luma, saturation) = match self {
            Self::Vibrant => (NORMAL_LUMA, VIBRANT_SATURATION),
            Self::DarkVibrant => (DARK_LUMA, VIBRANT_SATURATION),
            Self::LightVibrant => (LIGHT_LUMA, VIBRANT_SATURATION),
            Self::Muted => (NORMAL_LUMA, MUTED_SATURATION),
            Self::DarkMuted => (DARK_LUMA, MUTED_SATURATION),
            Self::LightMuted => (LIGHT_LUMA, MUTED_SATURATION),
        };
        Target { luma, saturation }
    }
}

/// Inclusive range with a preferred value inside it.
#[derive(Debug, Clone, Copy)]
struct Band {
    min: f64,
    target: f64,
    max: f64,
}

impl Band {
    fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

const DARK_LUMA: Band = Band {
    min: 0.0,
    target: TARGET_DARK_LUMA,
    max: MAX_DARK_LUMA,
};
const NORMAL_LUMA: Band = Band {
    min: MIN_NORMAL_LUMA,
    target: TARGET_NORMAL_LUMA,
    max: MAX_NORMAL_LUMA,
};
const LIGHT_LUMA: Band = Band {
    min: MIN_LIGHT_LUMA,
    target: TARGET_LIGHT_LUMA,
    max: 1.0,
};
const VIBRANT_SATURATION: Band = Band {
    min: MIN_VIBRANT_SATURATION,
    target: TARGET_VIBRANT_SATURATION,
    max: 1.0,
};
const MUTED_SATURATION: Band = Band {
    min: 0.0,
    target: TARGET_MUTED_SATURATION,
    max: MAX_MUTED_SATURATION,
};

#[derive(Debug, Clone, Copy)]
struct Target {
    luma: Band,
    saturation: Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub kind: SwatchKind,
    pub rgb: Rgb,
    pub population: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    #[must_use]
    pub fn get(&self, kind: SwatchKind) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.kind == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Hex colors of the present swatches in [`SwatchKind::DISPLAY_ORDER`].
    #[must_use]
    pub fn ordered(&self) -> Vec<String> {
        SwatchKind::DISPLAY_ORDER
            .iter()
            .filter_map(|&kind| self.get(kind))
            .map(|s| s.rgb.to_hex())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    rgb: Rgb,
    population: u32,
    hue_sat_luma: (f64, f64, f64),
}

/// Decodes `bytes` (any format the `image` crate sniffs) and extracts its
/// palette. An image with no opaque, non-white pixels yields an empty
/// palette.
///
/// # Errors
///
/// Returns [`ScraperError::Image`] when the bytes cannot be decoded.
pub fn extract_palette(bytes: &[u8]) -> Result<Palette, ScraperError> {
    let mut image = image::load_from_memory(bytes)?;
    let (width, height) = GenericImageView::dimensions(&image);
    if width > SAMPLE_EDGE || height > SAMPLE_EDGE {
        image = image.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE);
    }
    let pixels = image.to_rgba8();

    let mut histogram: HashMap<(u8, u8, u8), [u64; 4]> = HashMap::new();
    for px in pixels.pixels() {
        let [r, g, b, a] = px.0;
        if a < MIN_ALPHA || (r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE) {
            continue;
        }
        let key = (r >> QUANT_SHIFT, g >> QUANT_SHIFT, b >> QUANT_SHIFT);
        let acc = histogram.entry(key).or_default();
        acc[0] += u64::from(r);
        acc[1] += u64::from(g);
        acc[2] += u64::from(b);
        acc[3] += 1;
    }

    let mut buckets: Vec<Bucket> = histogram.into_values().map(bucket_from_sums).collect();
    buckets.sort_by(|a, b| b.population.cmp(&a.population));
    buckets.truncate(MAX_BUCKETS);

    Ok(Palette {
        swatches: pick_swatches(&buckets),
    })
}

// Averages of u8 channels always fit in u8; the pixel count of a 100x100
// sample fits in u32.
#[allow(clippy::cast_possible_truncation)]
fn bucket_from_sums([r, g, b, count]: [u64; 4]) -> Bucket {
    let avg = |sum: u64| (sum / count) as u8;
    let rgb = Rgb::new(avg(r), avg(g), avg(b));
    Bucket {
        rgb,
        population: count as u32,
        hue_sat_luma: to_hsl(rgb),
    }
}

fn pick_swatches(buckets: &[Bucket]) -> Vec<Swatch> {
    let max_population = buckets.iter().map(|b| b.population).max().unwrap_or(0);
    let mut used = vec![false; buckets.len()];
    let mut swatches = Vec::new();

    for kind in SwatchKind::PICK_ORDER {
        let target = kind.target();
        let best = buckets
            .iter()
            .enumerate()
            .filter(|(i, bucket)| {
                let (_, sat, luma) = bucket.hue_sat_luma;
                !used[*i] && target.luma.contains(luma) && target.saturation.contains(sat)
            })
            .map(|(i, bucket)| (i, score(bucket, target, max_population)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((i, _)) = best {
            used[i] = true;
            swatches.push(Swatch {
                kind,
                rgb: buckets[i].rgb,
                population: buckets[i].population,
            });
        }
    }

    swatches
}

fn score(bucket: &Bucket, target: Target, max_population: u32) -> f64 {
    let (_, sat, luma) = bucket.hue_sat_luma;
    let population = if max_population == 0 {
        0.0
    } else {
        f64::from(bucket.population) / f64::from(max_population)
    };

    let weighted = invert_diff(sat, target.saturation.target) * WEIGHT_SATURATION
        + invert_diff(luma, target.luma.target) * WEIGHT_LUMA
        + population * WEIGHT_POPULATION;
    weighted / (WEIGHT_SATURATION + WEIGHT_LUMA + WEIGHT_POPULATION)
}

fn invert_diff(value: f64, target: f64) -> f64 {
    1.0 - (value - target).abs()
}

/// `(hue 0..1, saturation 0..1, lightness 0..1)`.
fn to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let d = max - min;
    if d == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    #[allow(clippy::float_cmp)]
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}
