//! Position-based priority weights.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a priority's position in the list translates into its weight.
///
/// Position 0 is the most important priority. Weights always sum to 1,
/// so a team that satisfies every priority scores exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeightScheme {
    /// `w_i = (P - i) / (1 + 2 + ... + P)`.
    ///
    /// Mild, roughly proportional emphasis on earlier priorities.
    Linear,

    /// `w_i = 2^(P - 1 - i) / (2^P - 1)`.
    ///
    /// Near-lexicographic: satisfying one priority outweighs satisfying
    /// all later ones together.
    Exponential,
}

impl WeightScheme {
    /// Weights for `count` priorities, in priority order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_teamform::objective::WeightScheme;
    ///
    /// let w = WeightScheme::Linear.weights(3);
    /// assert!((w[0] - 3.0 / 6.0).abs() < 1e-12);
    /// assert!((w[2] - 1.0 / 6.0).abs() < 1e-12);
    ///
    /// let w = WeightScheme::Exponential.weights(3);
    /// assert!((w[0] - 4.0 / 7.0).abs() < 1e-12);
    /// ```
    pub fn weights(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let p = count as f64;
        match self {
            WeightScheme::Linear => {
                let total = p * (p + 1.0) / 2.0;
                (0..count).map(|i| (p - i as f64) / total).collect()
            }
            WeightScheme::Exponential => {
                // Same weights as 2^-(i+1) / (1 - 2^-P), which never forms 2^P.
                let exponent = i32::try_from(count).unwrap_or(i32::MAX);
                let mut weight = 0.5 / (1.0 - 0.5f64.powi(exponent));
                (0..count)
                    .map(|_| {
                        let w = weight;
                        weight *= 0.5;
                        w
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for scheme in [WeightScheme::Linear, WeightScheme::Exponential] {
            for count in 1..12 {
                let sum: f64 = scheme.weights(count).iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "{scheme:?} x {count}: {sum}");
            }
        }
    }

    #[test]
    fn test_single_priority_weight_is_one() {
        assert_eq!(WeightScheme::Linear.weights(1), vec![1.0]);
        assert_eq!(WeightScheme::Exponential.weights(1), vec![1.0]);
    }

    #[test]
    fn test_exponential_is_lexicographic() {
        let w = WeightScheme::Exponential.weights(6);
        for i in 0..w.len() {
            let later: f64 = w[i + 1..].iter().sum();
            assert!(w[i] > later, "weight {i} must outweigh all later ones");
        }
    }

    #[test]
    fn test_exponential_stays_finite_for_long_lists() {
        let w = WeightScheme::Exponential.weights(1100);
        assert_eq!(w.len(), 1100);
        assert!(w.iter().all(|x| x.is_finite() && *x >= 0.0));
        assert_eq!(w[0], 0.5);
        assert!(w[0] > w[1]);
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "{sum}");
    }

    #[test]
    fn test_linear_is_not_lexicographic() {
        let w = WeightScheme::Linear.weights(4);
        assert!(w[0] < w[1] + w[2]);
        assert!(w.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_empty() {
        assert!(WeightScheme::Linear.weights(0).is_empty());
    }
}
