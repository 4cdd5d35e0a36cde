//! Frame-pair blockage detection.
//!
//! A tick counts as blocked when two consecutive frames are nearly identical
//! in appearance ([`similarity`]) and show almost no motion
//! ([`motion_magnitude`]). Blocked time accumulates across ticks and resets
//! as soon as either signal moves.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// A captured window frame.
pub type Frame = RgbImage;

/// Downsampled resolution used for the similarity score.
const SIMILARITY_WIDTH: u32 = 288;
const SIMILARITY_HEIGHT: u32 = 160;

/// Largest resolution the flow field is solved at. Bigger overlaps are
/// downscaled to fit, keeping their aspect ratio.
const FLOW_MAX_WIDTH: u32 = SIMILARITY_WIDTH;
const FLOW_MAX_HEIGHT: u32 = SIMILARITY_HEIGHT;

/// Overlaps smaller than this on either axis carry no usable motion signal.
const MIN_OVERLAP: u32 = 4;

/// Half-size of the Lucas-Kanade aggregation window (5x5).
const FLOW_RADIUS: i64 = 2;

/// Structure-tensor determinant below which a pixel has no defined flow.
const MIN_TENSOR_DET: f64 = 1e-4;

/// Sobel kernels scale the derivative by 8.
const SOBEL_SCALE: f64 = 8.0;

/// Thresholds for [`BlockedStateTracker`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlockedConfig {
    /// Minimum similarity in `[0, 1]` for two frames to count as static.
    pub similarity_threshold: f64,
    /// Median flow magnitude (pixels) below which the frames count as still.
    pub motion_threshold: f64,
}

impl Default for BlockedConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.995,
            motion_threshold: 0.2,
        }
    }
}

/// Accumulates time spent on a frozen screen.
#[derive(Debug, Default)]
pub struct BlockedStateTracker {
    config: BlockedConfig,
    previous: Option<Frame>,
    blocked_seconds: f64,
}

impl BlockedStateTracker {
    pub fn new(config: BlockedConfig) -> Self {
        Self {
            config,
            previous: None,
            blocked_seconds: 0.0,
        }
    }

    pub fn blocked_seconds(&self) -> f64 {
        self.blocked_seconds
    }

    /// Folds the next frame in and returns the new blocked time.
    ///
    /// The first frame has nothing to compare against and yields zero.
    pub fn observe(&mut self, frame: &Frame, dt: f64) -> f64 {
        self.blocked_seconds = match &self.previous {
            None => 0.0,
            Some(previous) => update(
                previous,
                frame,
                self.blocked_seconds,
                dt,
                &self.config,
            ),
        };
        self.previous = Some(frame.clone());
        self.blocked_seconds
    }
}

/// Next blocked time given the previous/current frame pair.
///
/// Returns `prev_blocked + dt` when the pair is at least
/// `config.similarity_threshold` similar and its motion stays under
/// `config.motion_threshold`, zero otherwise.
pub fn update(prev: &Frame, curr: &Frame, prev_blocked: f64, dt: f64, config: &BlockedConfig) -> f64 {
    let sim = similarity(prev, curr);
    if sim < config.similarity_threshold {
        return 0.0;
    }
    let motion = motion_magnitude(prev, curr);
    tracing::trace!(sim, motion, "frame pair");
    if motion < config.motion_threshold {
        prev_blocked + dt
    } else {
        0.0
    }
}

/// Appearance similarity of two frames, rescaled into `[0, 1]`.
///
/// Both frames are downsampled to a fixed resolution, converted to
/// intensity and z-score normalized; the score is the mean of their
/// element-wise product mapped from `[-1, 1]` to `[0, 1]`.
pub fn similarity(prev: &Frame, curr: &Frame) -> f64 {
    let a = normalized_intensity(prev);
    let b = normalized_intensity(curr);
    let correlation = a.iter().zip(&b).map(|(x, y)| x * y).sum::<f64>() / a.len() as f64;
    (correlation + 1.0) / 2.0
}

fn normalized_intensity(frame: &Frame) -> Vec<f64> {
    let small = imageops::resize(frame, SIMILARITY_WIDTH, SIMILARITY_HEIGHT, FilterType::Triangle);
    let gray = imageops::grayscale(&small);
    let values: Vec<f64> = gray.pixels().map(|p| f64::from(p.0[0])).collect();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt() + 1e-6;
    values.into_iter().map(|v| (v - mean) / std).collect()
}

/// Median dense optical-flow magnitude between two frames, in frame pixels.
///
/// Frames of different sizes are compared over their common top-left
/// region. The flow is solved on that region scaled down to at most
/// 288x160 and the result is scaled back to frame pixels. An overlap too
/// small to measure, or any numerical failure, reports zero motion.
pub fn motion_magnitude(prev: &Frame, curr: &Frame) -> f64 {
    let (g1, g2) = aligned_intensity(prev, curr);
    if g1.width() < MIN_OVERLAP || g1.height() < MIN_OVERLAP {
        return 0.0;
    }
    let (width, height, scale) = flow_dimensions(g1.width(), g1.height());
    let (g1, g2) = if scale < 1.0 {
        (
            imageops::resize(&g1, width, height, FilterType::Triangle),
            imageops::resize(&g2, width, height, FilterType::Triangle),
        )
    } else {
        (g1, g2)
    };
    if width < MIN_OVERLAP || height < MIN_OVERLAP {
        return 0.0;
    }
    match median_flow(&g1, &g2) {
        Some(motion) => motion / scale,
        None => {
            tracing::debug!("optical flow degenerate, reporting no motion");
            0.0
        }
    }
}

fn aligned_intensity(prev: &Frame, curr: &Frame) -> (GrayImage, GrayImage) {
    let g1 = imageops::grayscale(prev);
    let g2 = imageops::grayscale(curr);
    if g1.dimensions() == g2.dimensions() {
        return (g1, g2);
    }
    let width = g1.width().min(g2.width());
    let height = g1.height().min(g2.height());
    (
        imageops::crop_imm(&g1, 0, 0, width, height).to_image(),
        imageops::crop_imm(&g2, 0, 0, width, height).to_image(),
    )
}

/// Working size for the flow field and the factor from frame pixels to it.
fn flow_dimensions(width: u32, height: u32) -> (u32, u32, f64) {
    let scale = (f64::from(FLOW_MAX_WIDTH) / f64::from(width))
        .min(f64::from(FLOW_MAX_HEIGHT) / f64::from(height))
        .min(1.0);
    if scale >= 1.0 {
        return (width, height, 1.0);
    }
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (scaled(width), scaled(height), scale)
}

/// Summed-area table over a `width x height` grid of values.
struct Integral {
    width: usize,
    sums: Vec<f64>,
}

impl Integral {
    fn new(values: &[f64], width: usize, height: usize) -> Self {
        let stride = width + 1;
        let mut sums = vec![0.0; stride * (height + 1)];
        for y in 0..height {
            let mut row = 0.0;
            for x in 0..width {
                row += values[y * width + x];
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self { width, sums }
    }

    /// Sum over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let stride = self.width + 1;
        self.sums[(y1 + 1) * stride + x1 + 1] - self.sums[y0 * stride + x1 + 1]
            - self.sums[(y1 + 1) * stride + x0]
            + self.sums[y0 * stride + x0]
    }
}

/// Lucas-Kanade flow solved at every pixel over a 5x5 window.
fn median_flow(g1: &GrayImage, g2: &GrayImage) -> Option<f64> {
    let (w, h) = (g1.width() as usize, g1.height() as usize);
    let gx = horizontal_sobel(g1);
    let gy = vertical_sobel(g1);

    let n = w * h;
    let (mut xx, mut yy, mut xy, mut xt, mut yt) =
        (vec![0.0; n], vec![0.0; n], vec![0.0; n], vec![0.0; n], vec![0.0; n]);
    for (i, ((dx, dy), (p1, p2))) in gx
        .pixels()
        .zip(gy.pixels())
        .zip(g1.pixels().zip(g2.pixels()))
        .enumerate()
    {
        let ix = f64::from(dx.0[0]) / SOBEL_SCALE;
        let iy = f64::from(dy.0[0]) / SOBEL_SCALE;
        let it = f64::from(p2.0[0]) - f64::from(p1.0[0]);
        xx[i] = ix * ix;
        yy[i] = iy * iy;
        xy[i] = ix * iy;
        xt[i] = ix * it;
        yt[i] = iy * it;
    }
    let (sxx, syy, sxy, sxt, syt) = (
        Integral::new(&xx, w, h),
        Integral::new(&yy, w, h),
        Integral::new(&xy, w, h),
        Integral::new(&xt, w, h),
        Integral::new(&yt, w, h),
    );

    let clamp = |v: i64, max: usize| v.clamp(0, max as i64 - 1) as usize;
    let mut magnitudes = Vec::with_capacity(n);
    for y in 0..h {
        let (y0, y1) = (clamp(y as i64 - FLOW_RADIUS, h), clamp(y as i64 + FLOW_RADIUS, h));
        for x in 0..w {
            let (x0, x1) = (clamp(x as i64 - FLOW_RADIUS, w), clamp(x as i64 + FLOW_RADIUS, w));
            let a = sxx.window(x0, y0, x1, y1);
            let d = syy.window(x0, y0, x1, y1);
            let b = sxy.window(x0, y0, x1, y1);
            let det = a * d - b * b;
            if det.abs() < MIN_TENSOR_DET {
                magnitudes.push(0.0);
                continue;
            }
            let ex = sxt.window(x0, y0, x1, y1);
            let ey = syt.window(x0, y0, x1, y1);
            let u = (-d * ex + b * ey) / det;
            let v = (b * ex - a * ey) / det;
            magnitudes.push(u.hypot(v));
        }
    }
    median(magnitudes)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let len = values.len();
    let mid = len / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if len % 2 == 1 {
        return Some(upper);
    }
    let lower = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lower + upper) / 2.0)
}
