//! Geometric resize with stretch or vertical center-crop policies.
//!
//! The filter is separable. Along an axis where the source region is at
//! least as large as the target, each target sample is the area average of
//! the source pixels its footprint covers (fractional coverage at the edges).
//! Along an axis that is being enlarged, samples are bilinear. Accumulation
//! happens on premultiplied alpha so transparent pixels do not bleed their
//! colour; the result is converted back to straight alpha.
//!
//! Coordinates outside the source are clamped to the nearest edge pixel.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGBA8;

use crate::error::AssetError;
use crate::raster::RasterBuffer;

/// How the source maps onto the target rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CropPolicy {
    /// Whole source onto whole target; aspect ratio is not preserved.
    StretchFit,
    /// Uniform scale from the width, vertically centered band of the source.
    CenterCropFit,
}

/// Region of the source, in source pixel units, that maps onto the target.
///
/// May extend past the source edges (e.g. a negative `y`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    /// Compute the sampled region for a policy.
    ///
    /// For [`CropPolicy::CenterCropFit`] the scale is `src_w / dst_w`, the band
    /// height is `dst_h * scale` and it is centered vertically. No horizontal
    /// cropping happens.
    pub fn for_policy(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, policy: CropPolicy) -> Self {
        match policy {
            CropPolicy::StretchFit => Self {
                x: 0.0,
                y: 0.0,
                width: f64::from(src_w),
                height: f64::from(src_h),
            },
            CropPolicy::CenterCropFit => {
                let scale = f64::from(src_w) / f64::from(dst_w);
                let band = f64::from(dst_h) * scale;
                Self {
                    x: 0.0,
                    y: (f64::from(src_h) - band) / 2.0,
                    width: f64::from(src_w),
                    height: band,
                }
            }
        }
    }

    /// Rows `[start, end)` of the source this region covers, unclamped.
    pub fn row_span(&self) -> (f64, f64) {
        (self.y, self.y + self.height)
    }
}

/// Filter taps for one target sample: (clamped source index, weight).
type Taps = Vec<(usize, f32)>;

fn clamp_index(j: i64, len: u32) -> usize {
    j.clamp(0, i64::from(len) - 1) as usize
}

/// Normalised taps for every target sample along one axis.
fn axis_taps(src_len: u32, start: f64, extent: f64, dst_len: u32) -> Vec<Taps> {
    let scale = extent / f64::from(dst_len);
    let mut all = Vec::with_capacity(dst_len as usize);

    for i in 0..dst_len {
        let mut taps: Taps = Vec::new();
        if scale >= 1.0 {
            let a = start + f64::from(i) * scale;
            let b = a + scale;
            let mut j = a.floor() as i64;
            while (j as f64) < b {
                let lo = a.max(j as f64);
                let hi = b.min((j + 1) as f64);
                let cover = hi - lo;
                if cover > 1e-9 {
                    taps.push((clamp_index(j, src_len), cover as f32));
                }
                j += 1;
            }
        } else {
            let center = start + (f64::from(i) + 0.5) * scale - 0.5;
            let j0 = center.floor();
            let frac = (center - j0) as f32;
            let j0 = j0 as i64;
            taps.push((clamp_index(j0, src_len), 1.0 - frac));
            if frac > 0.0 {
                taps.push((clamp_index(j0 + 1, src_len), frac));
            }
        }

        let sum: f32 = taps.iter().map(|&(_, w)| w).sum();
        if sum > 0.0 {
            for tap in &mut taps {
                tap.1 /= sum;
            }
        } else {
            let center = start + (f64::from(i) + 0.5) * scale;
            taps = vec![(clamp_index(center.floor() as i64, src_len), 1.0)];
        }
        all.push(taps);
    }
    all
}

fn premultiply(px: RGBA8) -> [f32; 4] {
    let a = f32::from(px.a) / 255.0;
    [
        f32::from(px.r) * a,
        f32::from(px.g) * a,
        f32::from(px.b) * a,
        a,
    ]
}

fn unpremultiply(acc: [f32; 4]) -> [u8; 4] {
    let a = acc[3].clamp(0.0, 1.0);
    let alpha = (a * 255.0).round() as u8;
    if alpha == 0 {
        return [0, 0, 0, 0];
    }
    let ch = |v: f32| (v / a).round().clamp(0.0, 255.0) as u8;
    [ch(acc[0]), ch(acc[1]), ch(acc[2]), alpha]
}

/// Resample `src` to exactly `dst_w` x `dst_h` under `policy`.
///
/// `src` is only read; the result is a fresh buffer.
pub fn resample(
    src: &RasterBuffer,
    dst_w: u32,
    dst_h: u32,
    policy: CropPolicy,
    stop: impl Stop,
) -> Result<RasterBuffer, AssetError> {
    let rect = SourceRect::for_policy(src.width(), src.height(), dst_w, dst_h, policy);
    resample_rect(src, rect, dst_w, dst_h, &stop)
}

/// Resample an arbitrary source region onto the full target extent.
pub fn resample_rect(
    src: &RasterBuffer,
    rect: SourceRect,
    dst_w: u32,
    dst_h: u32,
    stop: &dyn Stop,
) -> Result<RasterBuffer, AssetError> {
    if dst_w == 0 || dst_h == 0 {
        return Err(AssetError::InvalidDimensions {
            width: dst_w,
            height: dst_h,
        });
    }
    if !(rect.width > 0.0 && rect.height > 0.0) || !rect.x.is_finite() || !rect.y.is_finite() {
        return Err(AssetError::InvalidDimensions {
            width: dst_w,
            height: dst_h,
        });
    }
    let out_len = crate::raster::rgba_len(dst_w, dst_h)?;

    let x_taps = axis_taps(src.width(), rect.x, rect.width, dst_w);
    let y_taps = axis_taps(src.height(), rect.y, rect.height, dst_h);

    // Only the source rows the vertical taps touch go through the first pass.
    let (row_lo, row_hi) = y_taps
        .iter()
        .flatten()
        .fold((usize::MAX, 0usize), |(lo, hi), &(j, _)| (lo.min(j), hi.max(j)));
    let rows = row_hi + 1 - row_lo;
    let w = dst_w as usize;

    let pixels = src.as_rgba();
    let src_w = src.width() as usize;

    // Horizontal pass: source rows -> dst_w premultiplied samples.
    let mut horiz = vec![[0f32; 4]; rows * w];
    for (r, out_row) in horiz.chunks_exact_mut(w).enumerate() {
        if r % 16 == 0 {
            stop.check()?;
        }
        let y = row_lo + r;
        let src_row = &pixels[y * src_w..(y + 1) * src_w];
        for (out, taps) in out_row.iter_mut().zip(&x_taps) {
            let mut acc = [0f32; 4];
            for &(j, wt) in taps {
                let p = premultiply(src_row[j]);
                for c in 0..4 {
                    acc[c] += p[c] * wt;
                }
            }
            *out = acc;
        }
    }

    // Vertical pass: combine intermediate rows into the target.
    let mut out = vec![0u8; out_len];
    for (y, (out_row, taps)) in out.chunks_exact_mut(w * 4).zip(&y_taps).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, dst) in out_row.chunks_exact_mut(4).enumerate() {
            let mut acc = [0f32; 4];
            for &(j, wt) in taps {
                let p = horiz[(j - row_lo) * w + x];
                for c in 0..4 {
                    acc[c] += p[c] * wt;
                }
            }
            dst.copy_from_slice(&unpremultiply(acc));
        }
    }

    RasterBuffer::new(dst_w, dst_h, out)
}
