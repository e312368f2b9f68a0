//! Regularised least squares: `(XᵀX + diag(λ)) β = Xᵀy`.

use {crate::forecast::ForecastError, rayon::prelude::*};

const PIVOT_EPS: f64 = 1e-12;

/// Accumulates `XᵀX` (row-major, `p x p`) and `Xᵀy` over the design rows.
fn normal_equations(rows: &[Vec<f64>], y: &[f64], p: usize) -> (Vec<f64>, Vec<f64>) {
    rows.par_iter()
        .zip(y.par_iter())
        .fold(
            || (vec![0.0; p * p], vec![0.0; p]),
            |(mut xtx, mut xty), (row, &yi)| {
                for i in 0..p {
                    let xi = row[i];
                    if xi == 0.0 {
                        continue;
                    }
                    xty[i] += xi * yi;
                    for j in i..p {
                        xtx[i * p + j] += xi * row[j];
                    }
                }
                (xtx, xty)
            },
        )
        .reduce(
            || (vec![0.0; p * p], vec![0.0; p]),
            |(mut a, mut ay), (b, by)| {
                a.iter_mut().zip(&b).for_each(|(x, y)| *x += y);
                ay.iter_mut().zip(&by).for_each(|(x, y)| *x += y);
                (a, ay)
            },
        )
}

/// Solves the ridge system for design `rows` (each of length `penalties.len()`).
pub fn solve_ridge(rows: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<Vec<f64>, ForecastError> {
    let p = penalties.len();
    if rows.len() != y.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "{} design rows for {} targets",
            rows.len(),
            y.len()
        )));
    }
    if let Some(bad) = rows.iter().find(|r| r.len() != p) {
        return Err(ForecastError::InvalidParameter(format!(
            "design row has {} columns, expected {}",
            bad.len(),
            p
        )));
    }

    let (mut a, b) = normal_equations(rows, y, p);
    // Only the upper triangle was accumulated.
    for i in 0..p {
        for j in 0..i {
            a[i * p + j] = a[j * p + i];
        }
        a[i * p + i] += penalties[i];
    }
    gauss_jordan(a, b, p)
}

/// Solves `A x = b` for a dense row-major `n x n` matrix with partial pivoting.
pub fn gauss_jordan(mut a: Vec<f64>, mut b: Vec<f64>, n: usize) -> Result<Vec<f64>, ForecastError> {
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[r1 * n + col].abs().total_cmp(&a[r2 * n + col].abs()))
            .unwrap_or(col);
        let pivot = a[pivot_row * n + col];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPS {
            return Err(ForecastError::NumericalError(format!(
                "singular system at column {}",
                col
            )));
        }

        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
            }
            b.swap(col, pivot_row);
        }

        for j in 0..n {
            a[col * n + j] /= pivot;
        }
        b[col] /= pivot;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row * n + col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[row * n + j] -= factor * a[col * n + j];
            }
            b[row] -= factor * b[col];
        }
    }

    if b.iter().any(|x| !x.is_finite()) {
        return Err(ForecastError::NumericalError(
            "non-finite coefficients".to_string(),
        ));
    }
    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system_needing_a_pivot() {
        // 0x + 2y = 4, 3x + 1y = 5 -> x = 1, y = 2
        let x = gauss_jordan(vec![0.0, 2.0, 3.0, 1.0], vec![4.0, 5.0], 2).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_is_an_error() {
        let r = gauss_jordan(vec![1.0, 2.0, 2.0, 4.0], vec![1.0, 2.0], 2);
        assert!(matches!(r, Err(ForecastError::NumericalError(_))));
    }

    #[test]
    fn unpenalised_fit_recovers_a_line() {
        let rows: Vec<Vec<f64>> = (0..50).map(|i| vec![1.0, i as f64]).collect();
        let y: Vec<f64> = (0..50).map(|i| 3.0 + 0.5 * i as f64).collect();
        let beta = solve_ridge(&rows, &y, &[0.0, 0.0]).unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-9);
        assert!((beta[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 2.0 * i as f64).collect();
        let free = solve_ridge(&rows, &y, &[0.0]).unwrap()[0];
        let shrunk = solve_ridge(&rows, &y, &[100.0]).unwrap()[0];
        assert!((free - 2.0).abs() < 1e-9);
        assert!(shrunk < free && shrunk > 0.0);
    }
}
