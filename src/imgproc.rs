//! Shared CPU image kernels.
//!
//! Buffers are row-major f32 on the 0-255 scale with an explicit channel
//! count, matching what [`crate::frame::Frame::to_f32`] produces.

use rand::Rng;

/// Normalized 1D Gaussian kernel for the given sigma, truncated at 3 sigma.
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil() as i32;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-(i * i) as f32 / denom).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Sigma implied by an odd kernel size, following OpenCV's convention.
pub fn sigma_for_ksize(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn convolve_axis(data: &[f32], w: usize, h: usize, c: usize, kernel: &[f32], horizontal: bool) -> Vec<f32> {
    let radius = (kernel.len() / 2) as i32;
    let mut out = vec![0.0f32; data.len()];
    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                let mut acc = 0.0;
                for (k, &weight) in kernel.iter().enumerate() {
                    let offset = k as i32 - radius;
                    // Edge handling: clamp to the border pixel.
                    let (sx, sy) = if horizontal {
                        (((x as i32 + offset).clamp(0, w as i32 - 1)) as usize, y)
                    } else {
                        (x, ((y as i32 + offset).clamp(0, h as i32 - 1)) as usize)
                    };
                    acc += weight * data[(sy * w + sx) * c + ch];
                }
                out[(y * w + x) * c + ch] = acc;
            }
        }
    }
    out
}

/// Separable Gaussian blur with independent horizontal/vertical sigmas.
pub fn gaussian_blur(data: &[f32], w: u32, h: u32, c: u8, sigma_x: f32, sigma_y: f32) -> Vec<f32> {
    let (w, h, c) = (w as usize, h as usize, c as usize);
    let blurred = if sigma_x > 0.0 {
        convolve_axis(data, w, h, c, &gaussian_kernel(sigma_x), true)
    } else {
        data.to_vec()
    };
    if sigma_y > 0.0 {
        convolve_axis(&blurred, w, h, c, &gaussian_kernel(sigma_y), false)
    } else {
        blurred
    }
}

/// Gaussian blur specified by odd kernel size (OpenCV-style sigma derivation).
pub fn gaussian_blur_ksize(data: &[f32], w: u32, h: u32, c: u8, ksize: u32) -> Vec<f32> {
    if ksize <= 1 {
        return data.to_vec();
    }
    let sigma = sigma_for_ksize(ksize);
    gaussian_blur(data, w, h, c, sigma, sigma)
}

/// Circular shift by (dx, dy); pixels that fall off one edge re-enter on the
/// opposite edge.
pub fn roll(data: &[f32], w: u32, h: u32, c: u8, dx: i32, dy: i32) -> Vec<f32> {
    let (w, h, c) = (w as usize, h as usize, c as usize);
    let mut out = vec![0.0f32; data.len()];
    for y in 0..h {
        let sy = (y as i32 - dy).rem_euclid(h as i32) as usize;
        for x in 0..w {
            let sx = (x as i32 - dx).rem_euclid(w as i32) as usize;
            let src = (sy * w + sx) * c;
            let dst = (y * w + x) * c;
            out[dst..dst + c].copy_from_slice(&data[src..src + c]);
        }
    }
    out
}

/// RGB (0-1) to HSV with hue in degrees (0-360).
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

/// HSV (hue in degrees) back to RGB, all components 0-1.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

/// Rec. 601 luminance of an RGB pixel on any consistent scale.
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Sample a zero-mean normal distribution via Box-Muller.
pub fn sample_normal(rng: &mut impl Rng, std_dev: f32) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos() * std_dev
}
