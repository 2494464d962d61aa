//! Separable Gaussian blur over premultiplied RGBA pixmaps

use tiny_skia::Pixmap;

/// Gaussian blur with a fixed standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBlur {
    sigma: f32,
    kernel: Vec<f32>,
}

impl GaussianBlur {
    /// Blur with standard deviation `sigma` pixels; the kernel spans 3 sigma
    /// on each side
    pub fn from_sigma(sigma: f32) -> Self {
        let sigma = sigma.max(0.0);
        Self {
            sigma,
            kernel: Self::create_kernel(sigma),
        }
    }

    /// Standard deviation in pixels
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Pixels the blur spreads past a shape's edge
    pub fn extent(&self) -> u32 {
        (self.kernel.len() / 2) as u32
    }

    fn create_kernel(sigma: f32) -> Vec<f32> {
        if sigma < 0.01 {
            return vec![1.0];
        }
        let half = (sigma * 3.0).ceil() as i32;
        let sigma2 = sigma * sigma;
        let mut kernel: Vec<f32> = (-half..=half)
            .map(|i| {
                let x = i as f32;
                (-x * x / (2.0 * sigma2)).exp()
            })
            .collect();

        // Normalize kernel
        let sum: f32 = kernel.iter().sum();
        for weight in &mut kernel {
            *weight /= sum;
        }
        kernel
    }

    /// Blur `pixmap` in place
    pub fn apply(&self, pixmap: &mut Pixmap) {
        if self.kernel.len() == 1 {
            return;
        }
        let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);
        let pixels = pixmap.data_mut();
        let mut temp = vec![0u8; pixels.len()];

        // Two-pass separable blur
        Self::pass(&self.kernel, pixels, &mut temp, width, height, (4, width * 4));
        Self::pass(&self.kernel, &temp, pixels, height, width, (width * 4, 4));
    }

    /// Convolve along one axis. `len` pixels per run, `runs` runs;
    /// `step` is (byte step along the run, byte step between runs).
    fn pass(kernel: &[f32], src: &[u8], dst: &mut [u8], len: usize, runs: usize, step: (usize, usize)) {
        let half = (kernel.len() / 2) as isize;
        let last = len as isize - 1;
        for run in 0..runs {
            let base = run * step.1;
            for i in 0..len {
                let mut acc = [0.0f32; 4];
                for (k, &weight) in kernel.iter().enumerate() {
                    let j = (i as isize + k as isize - half).clamp(0, last) as usize;
                    let idx = base + j * step.0;
                    for (c, value) in acc.iter_mut().enumerate() {
                        *value += f32::from(src[idx + c]) * weight;
                    }
                }
                let idx = base + i * step.0;
                for (c, value) in acc.iter().enumerate() {
                    dst[idx + c] = value.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
        // Premultiplied channels must not exceed alpha after rounding.
        for px in dst.chunks_exact_mut(4) {
            let alpha = px[3];
            for channel in &mut px[..3] {
                *channel = (*channel).min(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn kernel_is_normalized() {
        let blur = GaussianBlur::from_sigma(2.0);
        let sum: f32 = blur.kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(blur.extent(), 6);
        assert_eq!(GaussianBlur::from_sigma(0.0).extent(), 0);
    }

    #[test]
    fn spreads_a_single_pixel() {
        let mut pixmap = Pixmap::new(9, 9).unwrap();
        pixmap.fill(Color::TRANSPARENT);
        let center = (4 * 9 + 4) * 4;
        pixmap.data_mut()[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        GaussianBlur::from_sigma(1.0).apply(&mut pixmap);
        let data = pixmap.data();
        assert!(data[center + 3] < 255);
        assert!(data[center + 3 + 4] > 0);
        assert!(data.chunks_exact(4).all(|px| px[0] <= px[3]));
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mut pixmap = Pixmap::new(3, 3).unwrap();
        pixmap.fill(Color::from_rgba8(10, 20, 30, 255));
        let before = pixmap.data().to_vec();
        GaussianBlur::from_sigma(0.0).apply(&mut pixmap);
        assert_eq!(pixmap.data(), before.as_slice());
    }
}
