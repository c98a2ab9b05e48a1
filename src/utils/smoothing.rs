use serde::{Deserialize, Serialize};

/// Smoothing applied to a trace before looking for peaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SmoothingMethod {
    None,
    SavitzkyGolay { window: usize, polynomial: usize },
    Gaussian { sigma: f64 },
}

impl SmoothingMethod {
    pub const DEFAULT_GAUSSIAN_SIGMA: f64 = 2.0;
    pub const DEFAULT_SG_POLYNOMIAL: usize = 2;
    pub const DEFAULT_SG_WINDOW: usize = 5;

    pub fn default_savitzky_golay() -> Self {
        Self::SavitzkyGolay {
            window: Self::DEFAULT_SG_WINDOW,
            polynomial: Self::DEFAULT_SG_POLYNOMIAL,
        }
    }

    pub fn default_gaussian() -> Self {
        Self::Gaussian {
            sigma: Self::DEFAULT_GAUSSIAN_SIGMA,
        }
    }

    /// Returns the smoothed trace, same length as the input.
    pub fn apply(&self, data: &[f64]) -> Vec<f64> {
        match self {
            SmoothingMethod::None => data.to_vec(),
            SmoothingMethod::SavitzkyGolay { window, polynomial } => {
                savitzky_golay_smooth(data, *window, *polynomial)
            }
            SmoothingMethod::Gaussian { sigma } => gaussian_smooth(data, *sigma),
        }
    }
}

impl Default for SmoothingMethod {
    fn default() -> Self {
        Self::default_savitzky_golay()
    }
}

/// Convolves `data` with `kernel` (centered), renormalizing the weights
/// at the edges so the ends do not get dragged towards zero.
fn convolve_centered(data: &[f64], kernel: &[f64]) -> Vec<f64> {
    let radius = kernel.len() / 2;
    let mut smoothed = Vec::with_capacity(data.len());

    for point_idx in 0..data.len() {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (kernel_offset, weight) in kernel.iter().enumerate() {
            let Some(data_idx) = (point_idx + kernel_offset).checked_sub(radius) else {
                continue;
            };
            if data_idx < data.len() {
                weighted_sum += data[data_idx] * weight;
                weight_total += weight;
            }
        }

        if weight_total > 0.0 {
            smoothed.push(weighted_sum / weight_total);
        } else {
            smoothed.push(data[point_idx]);
        }
    }

    smoothed
}

/// Savitzky-Golay-like smoothing.
/// Uses a polynomial weight decay from the center instead of a full
/// least squares fit, plenty for locating apexes.
fn savitzky_golay_smooth(data: &[f64], window: usize, polynomial: usize) -> Vec<f64> {
    if data.len() < window || window < 3 || window % 2 == 0 || polynomial >= window {
        return data.to_vec();
    }
    let weights = compute_savitzky_golay_weights(window, polynomial);
    convolve_centered(data, &weights)
}

fn compute_savitzky_golay_weights(window_size: usize, polynomial_order: usize) -> Vec<f64> {
    let half_window = window_size / 2;

    (0..window_size)
        .map(|position| {
            let distance_from_center = (position as f64 - half_window as f64).abs();
            // +1 so the outermost points keep a small weight
            let normalized_distance = distance_from_center / (half_window as f64 + 1.0);
            match polynomial_order {
                0 | 1 => 1.0 - normalized_distance,
                order => (1.0 - normalized_distance.powi(order as i32)).max(0.0),
            }
        })
        .collect()
}

fn gaussian_smooth(data: &[f64], sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || !sigma.is_finite() || data.len() < 3 {
        return data.to_vec();
    }

    // Anything wider than the trace weighs the same points.
    let radius = (3.0 * sigma).ceil();
    let kernel_radius = if radius >= data.len() as f64 {
        data.len()
    } else {
        radius as usize
    };
    let Some(kernel_size) = kernel_radius
        .checked_mul(2)
        .and_then(|x| x.checked_add(1))
    else {
        return data.to_vec();
    };
    let kernel: Vec<f64> = (0..kernel_size)
        .map(|kernel_pos| {
            let distance_from_center = kernel_pos as f64 - kernel_radius as f64;
            (-0.5 * (distance_from_center / sigma).powi(2)).exp()
        })
        .collect();

    convolve_centered(data, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_smoothing_is_identity() {
        let data = vec![1.0, 5.0, 2.0];
        assert_eq!(SmoothingMethod::None.apply(&data), data);
    }

    #[test]
    fn test_smoothing_keeps_constant_traces() {
        let data = vec![4.0; 20];
        for method in [
            SmoothingMethod::default_savitzky_golay(),
            SmoothingMethod::default_gaussian(),
        ] {
            let out = method.apply(&data);
            assert_eq!(out.len(), data.len());
            assert!(out.iter().all(|x| (x - 4.0).abs() < 1e-9), "{:?}", out);
        }
    }

    #[test]
    fn test_smoothing_flattens_spikes() {
        let mut data = vec![0.0; 21];
        data[10] = 100.0;
        let out = SmoothingMethod::default_gaussian().apply(&data);
        assert!(out[10] < 100.0);
        assert!(out[9] > 0.0);
        // Apex stays where it was
        let apex = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|x| x.0);
        assert_eq!(apex, Some(10));
    }

    #[test]
    fn test_huge_sigma_averages_the_whole_trace() {
        let data = vec![1.0, 2.0, 3.0, 2.0, 1.0];
        let out = SmoothingMethod::Gaussian { sigma: 1e300 }.apply(&data);
        assert_eq!(out.len(), data.len());
        assert!(out.iter().all(|x| (x - 1.8).abs() < 1e-9), "{:?}", out);

        let out = SmoothingMethod::Gaussian { sigma: 1e8 }.apply(&data);
        assert_eq!(out.len(), data.len());
    }

    #[test]
    fn test_bad_window_is_ignored() {
        let data = vec![1.0, 9.0, 1.0, 9.0];
        let method = SmoothingMethod::SavitzkyGolay {
            window: 4,
            polynomial: 2,
        };
        assert_eq!(method.apply(&data), data);
    }
}
