use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Tanh,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Identity => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActivationFunction;

    fn numeric_derivative(f: ActivationFunction, x: f64) -> f64 {
        let h = 1e-6;
        (f.function(x + h) - f.function(x - h)) / (2.0 * h)
    }

    #[test]
    fn derivatives_match_finite_differences() {
        for f in [ActivationFunction::Tanh, ActivationFunction::Identity] {
            for x in [-2.0, -0.3, 0.0, 0.7, 1.5] {
                assert!((f.derivative(x) - numeric_derivative(f, x)).abs() < 1e-6, "{f:?} at {x}");
            }
        }
    }

    #[test]
    fn tanh_is_bounded() {
        assert_eq!(ActivationFunction::Tanh.function(0.0), 0.0);
        assert!(ActivationFunction::Tanh.function(50.0) <= 1.0);
        assert!(ActivationFunction::Tanh.function(-50.0) >= -1.0);
    }
}
