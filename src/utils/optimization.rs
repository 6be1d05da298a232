//! Derivative-free optimization for smoothing-parameter estimation.

/// Configuration for Nelder-Mead simplex optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the simplex value spread.
    pub tolerance: f64,
    /// Initial simplex step size.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Result of Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub optimal_point: Vec<f64>,
    /// Objective value at the best point.
    pub optimal_value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the value spread fell below the tolerance.
    pub converged: bool,
}

fn clamp_to_bounds(point: &mut [f64], bounds: Option<&[(f64, f64)]>) {
    if let Some(bounds) = bounds {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds.iter()) {
            *x = x.clamp(lo, hi);
        }
    }
}

/// Minimize `objective` with the Nelder-Mead simplex method.
///
/// Standard reflection/expansion/contraction/shrink coefficients
/// (1.0 / 2.0 / 0.5 / 0.5). Each candidate vertex is clamped to `bounds`
/// before evaluation, which is sufficient for the box-constrained smoothing
/// parameters this crate estimates.
///
/// # Example
/// ```
/// use spendcast::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// // Minimize (x - 2)^2
/// let result = nelder_mead(
///     |p| (p[0] - 2.0).powi(2),
///     &[0.5],
///     Some(&[(0.0, 10.0)]),
///     NelderMeadConfig::default(),
/// );
/// assert!((result.optimal_point[0] - 2.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    // Build the initial simplex: the start point plus one perturbed vertex
    // per dimension.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        clamp_to_bounds(&mut vertex, bounds);
        simplex.push(vertex);
    }

    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        // Order vertices best-to-worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let second_worst = order[n - 1];
        let worst = order[n];

        if values[worst] - values[best] < config.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (idx, vertex) in simplex.iter().enumerate() {
            if idx == worst {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(vertex.iter()) {
                *c += x / n as f64;
            }
        }

        let try_point = |coeff: f64| -> (Vec<f64>, f64) {
            let mut p: Vec<f64> = centroid
                .iter()
                .zip(simplex[worst].iter())
                .map(|(c, w)| c + coeff * (c - w))
                .collect();
            clamp_to_bounds(&mut p, bounds);
            let value = objective(&p);
            (p, value)
        };

        // Reflection
        let (reflected, f_reflected) = try_point(1.0);

        if f_reflected < values[best] {
            // Expansion
            let (expanded, f_expanded) = try_point(2.0);
            if f_expanded < f_reflected {
                simplex[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            }
        } else if f_reflected < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = f_reflected;
        } else {
            // Contraction toward the centroid
            let (contracted, f_contracted) = try_point(-0.5);
            if f_contracted < values[worst] {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
            } else {
                // Shrink toward the best vertex
                let best_vertex = simplex[best].clone();
                for idx in 0..=n {
                    if idx == best {
                        continue;
                    }
                    for (x, b) in simplex[idx].iter_mut().zip(best_vertex.iter()) {
                        *x = b + 0.5 * (*x - b);
                    }
                    clamp_to_bounds(&mut simplex[idx], bounds);
                    values[idx] = objective(&simplex[idx]);
                }
            }
        }
    }

    let best_idx = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    NelderMeadResult {
        optimal_point: simplex[best_idx].clone(),
        optimal_value: values[best_idx],
        iterations,
        converged,
    }
}
