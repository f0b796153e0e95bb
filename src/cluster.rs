//! K-Means color clustering.

use crate::error::{PaletteError, Result};
use image::RgbImage;
use kmeans_colors::get_kmeans;
use log::debug;
use palette::Srgb;
use std::collections::HashSet;

/// Upper bound on `k` imposed by the K-Means backend (labels are `u8`).
pub const MAX_CLUSTERS: usize = 256;

/// Tunables for a clustering run. Identical configs on identical images
/// always produce identical palettes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// Seed for the first run; run `i` uses `seed + i` (wrapping).
    pub seed: u64,
    pub max_iter: usize,
    /// Stop once the squared norm of the summed centroid displacement (in
    /// 0-255 units) falls below this value. Opposite movements cancel out.
    pub converge: f32,
    /// Independent runs; the one with the lowest sum of squared distances
    /// wins.
    pub runs: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_iter: 300,
            converge: 1e-4,
            runs: 1,
        }
    }
}

/// Ordered representative colors, one per cluster. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Srgb<u8>>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PaletteError::InvalidArgument(
                "palette must contain at least one color".into(),
            ));
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Srgb<u8>> {
        self.colors.iter()
    }
}

/// Extract `k` representative colors with the default [`ClusterConfig`].
pub fn extract(image: &RgbImage, k: usize) -> Result<Palette> {
    extract_with(image, k, &ClusterConfig::default())
}

/// Extract `k` representative colors from `image`.
///
/// Centroid channels are truncated toward zero, not rounded. Colors come back
/// in cluster label order.
pub fn extract_with(image: &RgbImage, k: usize, config: &ClusterConfig) -> Result<Palette> {
    let pixel_count = image.width() as usize * image.height() as usize;
    if k == 0 {
        return Err(PaletteError::InvalidArgument(
            "number of colors must be at least 1".into(),
        ));
    }
    if k > pixel_count {
        return Err(PaletteError::InvalidArgument(format!(
            "number of colors ({k}) exceeds pixel count ({pixel_count})"
        )));
    }
    if k > MAX_CLUSTERS {
        return Err(PaletteError::InvalidArgument(format!(
            "number of colors ({k}) exceeds the maximum of {MAX_CLUSTERS}"
        )));
    }
    if config.runs == 0 {
        return Err(PaletteError::InvalidArgument(
            "at least one clustering run is required".into(),
        ));
    }

    // With no more distinct colors than clusters the optimum is the colors themselves.
    let distinct = distinct_colors(image, k + 1);
    if distinct.len() < k {
        return Err(PaletteError::Clustering(format!(
            "image has only {} distinct colors, cannot form {k} clusters",
            distinct.len()
        )));
    }
    if distinct.len() == k {
        debug!("image has exactly {k} distinct colors, skipping k-means");
        let colors = distinct
            .into_iter()
            .map(|[r, g, b]| Srgb::new(r, g, b))
            .collect();
        return Palette::new(colors);
    }

    let samples: Vec<Srgb> = image
        .pixels()
        .map(|p| Srgb::new(p[0] as f32, p[1] as f32, p[2] as f32))
        .collect();

    let best = best_run(&samples, k, config)?;
    let colors = best
        .centroids
        .iter()
        .map(truncate)
        .collect::<Result<Vec<_>>>()?;
    Palette::new(colors)
}

/// Winning K-Means run.
struct Run {
    seed: u64,
    centroids: Vec<Srgb>,
    error: f64,
}

/// Run K-Means `config.runs` times and keep the run with the lowest sum of
/// squared distances. Runs that leave a cluster empty are discarded.
fn best_run(samples: &[Srgb], k: usize, config: &ClusterConfig) -> Result<Run> {
    let mut best: Option<Run> = None;
    let mut last_err = None;
    for run in 0..config.runs as u64 {
        let seed = config.seed.wrapping_add(run);
        let result = get_kmeans(k, config.max_iter, config.converge, false, samples, seed);
        match score_run(samples, k, &result.centroids, &result.indices) {
            Ok(error) => {
                debug!("k-means seed {seed}: error {error}");
                if best.as_ref().is_none_or(|b| error < b.error) {
                    best = Some(Run {
                        seed,
                        centroids: result.centroids,
                        error,
                    });
                }
            }
            Err(e) => {
                debug!("k-means seed {seed} discarded: {e}");
                last_err = Some(e);
            }
        }
    }

    match best {
        Some(run) => {
            debug!(
                "k-means: k={k} samples={} runs={} picked seed {} (error {})",
                samples.len(),
                config.runs,
                run.seed,
                run.error
            );
            Ok(run)
        }
        None => Err(last_err.unwrap_or_else(|| {
            PaletteError::Clustering("no clustering run completed".into())
        })),
    }
}

/// Sum of squared distances from each sample to its centroid.
///
/// Fails if the run did not produce `k` centroids or left a cluster without
/// members (the backend refills empty clusters with random colors that no
/// sample maps to).
fn score_run(samples: &[Srgb], k: usize, centroids: &[Srgb], indices: &[u8]) -> Result<f64> {
    if centroids.len() != k {
        return Err(PaletteError::Clustering(format!(
            "expected {k} centroids, got {}",
            centroids.len()
        )));
    }

    let mut counts = vec![0usize; k];
    let mut error = 0.0f64;
    for (sample, &label) in samples.iter().zip(indices) {
        let label = label as usize;
        let centroid = centroids.get(label).ok_or_else(|| {
            PaletteError::Clustering(format!("sample labelled with unknown cluster {label}"))
        })?;
        counts[label] += 1;
        let dr = (sample.red - centroid.red) as f64;
        let dg = (sample.green - centroid.green) as f64;
        let db = (sample.blue - centroid.blue) as f64;
        error += dr * dr + dg * dg + db * db;
    }

    if let Some(empty) = counts.iter().position(|&n| n == 0) {
        return Err(PaletteError::Clustering(format!("cluster {empty} has no members")));
    }
    Ok(error)
}

/// Up to `limit` distinct colors in first-occurrence order.
fn distinct_colors(image: &RgbImage, limit: usize) -> Vec<[u8; 3]> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for p in image.pixels() {
        if seen.insert(p.0) {
            ordered.push(p.0);
            if ordered.len() >= limit {
                break;
            }
        }
    }
    ordered
}

fn truncate(c: &Srgb) -> Result<Srgb<u8>> {
    let (r, g, b) = c.into_components();
    if !(r.is_finite() && g.is_finite() && b.is_finite()) {
        return Err(PaletteError::Clustering(format!(
            "non-finite centroid ({r}, {g}, {b})"
        )));
    }
    let channel = |v: f32| v.clamp(0.0, 255.0).trunc() as u8;
    Ok(Srgb::new(channel(r), channel(g), channel(b)))
}
