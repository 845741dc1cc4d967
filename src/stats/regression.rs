//! Price Model Module
//! Ordinary least squares over the five prepared features, plus the
//! correlation statistics shown on the plot page.

use crate::data::PreparedTable;
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

/// Significance threshold for the correlation p-value
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Number of model features (everything in the prepared table except price).
pub const FEATURE_COUNT: usize = 5;

// Design matrix width with the intercept column.
const P: usize = FEATURE_COUNT + 1;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Not enough complete rows to fit the model ({0} usable)")]
    TooFewRows(usize),
    #[error("Normal equations are singular; features are linearly dependent")]
    Singular,
}

/// OLS price model: price ~ carwidth + enginesize + horsepower
/// + drivewheel_fwd + car_company_buick.
///
/// Solved through the normal equations `(X^T X) beta = X^T y`; rows with any
/// non-finite value are skipped during fitting.
#[derive(Debug, Clone)]
pub struct PriceModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    r_squared: f64,
    n_rows: usize,
}

impl PriceModel {
    /// Fit on the prepared table.
    pub fn fit(table: &PreparedTable) -> Result<Self, ModelError> {
        let mut xs: Vec<[f64; FEATURE_COUNT]> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();
        for i in 0..table.len() {
            let row = table.feature_row(i);
            let y = table.price[i];
            if row.iter().all(|v| v.is_finite()) && y.is_finite() {
                xs.push(row);
                ys.push(y);
            }
        }
        if xs.len() <= FEATURE_COUNT {
            return Err(ModelError::TooFewRows(xs.len()));
        }

        // Accumulate X^T X and X^T y with an implicit leading 1 per row.
        let mut xtx = [[0.0f64; P]; P];
        let mut xty = [0.0f64; P];
        for (row, &y) in xs.iter().zip(&ys) {
            let mut full = [1.0f64; P];
            full[1..].copy_from_slice(row);
            for a in 0..P {
                xty[a] += full[a] * y;
                for b in 0..P {
                    xtx[a][b] += full[a] * full[b];
                }
            }
        }

        let beta = solve(xtx, xty).ok_or(ModelError::Singular)?;
        let intercept = beta[0];
        let mut coefficients = [0.0f64; FEATURE_COUNT];
        coefficients.copy_from_slice(&beta[1..]);

        // Training R^2 against the fitted rows.
        let mean_y = ys.iter().sum::<f64>() / ys.len() as f64;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (row, &y) in xs.iter().zip(&ys) {
            let pred = intercept
                + row
                    .iter()
                    .zip(coefficients.iter())
                    .map(|(x, c)| x * c)
                    .sum::<f64>();
            ss_res += (y - pred).powi(2);
            ss_tot += (y - mean_y).powi(2);
        }
        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else {
            f64::NAN
        };

        Ok(Self {
            coefficients,
            intercept,
            r_squared,
            n_rows: xs.len(),
        })
    }

    /// Predicted price for one feature row.
    pub fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + features
                .iter()
                .zip(self.coefficients.iter())
                .map(|(x, c)| x * c)
                .sum::<f64>()
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Solve a PxP linear system by Gaussian elimination with partial pivoting.
/// Returns None when the matrix is (numerically) singular.
fn solve(mut a: [[f64; P]; P], mut b: [f64; P]) -> Option<[f64; P]> {
    for col in 0..P {
        // Pivot on the largest magnitude entry in this column.
        let mut pivot = col;
        for row in col + 1..P {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < 1e-10 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..P {
            let factor = a[row][col] / a[col][col];
            for k in col..P {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; P];
    for col in (0..P).rev() {
        let mut sum = b[col];
        for k in col + 1..P {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Some(x)
}

/// Pearson correlation of two paired columns with a two-tailed p-value from
/// the t-distribution. Pairs with a non-finite member are skipped; returns
/// None with fewer than three usable pairs or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    let n = pairs.len();
    if n < 3 {
        return None;
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);

    // Two-tailed p-value for H0: rho = 0.
    let df = nf - 2.0;
    if (1.0 - r * r) < 1e-12 {
        return Some((r, 0.0));
    }
    let t = r * (df / (1.0 - r * r)).sqrt();
    let p = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    };
    Some((r, p))
}

/// Least-squares line `y = a + b x` for the scatter trend overlay.
/// Returns (intercept, slope), or None when x has no variance.
pub fn trend_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let nf = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (a, b) in &pairs {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
    }
    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    Some((mean_y - slope * mean_x, slope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PreparedTable;

    /// Table whose price is an exact linear function of the features:
    /// price = 100 + 50*carwidth + 10*enginesize + 20*horsepower
    ///         + 500*fwd + 2000*buick
    fn synthetic_table() -> PreparedTable {
        let carwidth = vec![60.0, 62.0, 64.0, 66.0, 68.0, 70.0, 61.0, 63.5, 67.2, 69.9];
        let enginesize = vec![
            100.0, 120.0, 140.0, 90.0, 200.0, 300.0, 110.0, 170.0, 130.0, 250.0,
        ];
        let horsepower = vec![50.0, 70.0, 90.0, 60.0, 150.0, 200.0, 55.0, 95.0, 120.0, 180.0];
        let drivewheel_fwd = vec![1, 0, 1, 0, 0, 0, 1, 1, 0, 0];
        let car_company_buick = vec![0, 1, 0, 0, 1, 0, 0, 0, 1, 0];
        let price = (0..10)
            .map(|i| {
                100.0
                    + 50.0 * carwidth[i]
                    + 10.0 * enginesize[i]
                    + 20.0 * horsepower[i]
                    + 500.0 * f64::from(drivewheel_fwd[i])
                    + 2000.0 * f64::from(car_company_buick[i])
            })
            .collect();

        PreparedTable {
            carwidth,
            enginesize,
            horsepower,
            drivewheel_fwd,
            car_company_buick,
            price,
        }
    }

    #[test]
    fn ols_recovers_exact_linear_relation() {
        let table = synthetic_table();
        let model = PriceModel::fit(&table).unwrap();

        assert!((model.intercept() - 100.0).abs() < 1e-6);
        let expected = [50.0, 10.0, 20.0, 500.0, 2000.0];
        for (got, want) in model.coefficients().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
        assert!(model.r_squared() > 0.999999);
        assert_eq!(model.n_rows(), 10);

        let pred = model.predict([65.0, 150.0, 100.0, 1.0, 0.0]);
        let want = 100.0 + 50.0 * 65.0 + 10.0 * 150.0 + 20.0 * 100.0 + 500.0;
        assert!((pred - want).abs() < 1e-6);
    }

    #[test]
    fn rows_with_nan_are_skipped() {
        let mut table = synthetic_table();
        table.horsepower[3] = f64::NAN;
        let model = PriceModel::fit(&table).unwrap();
        assert_eq!(model.n_rows(), 9);
        assert!(model.r_squared() > 0.999999);
    }

    #[test]
    fn too_few_rows_is_an_error() {
        let table = PreparedTable {
            carwidth: vec![60.0, 61.0],
            enginesize: vec![100.0, 110.0],
            horsepower: vec![50.0, 55.0],
            drivewheel_fwd: vec![1, 0],
            car_company_buick: vec![0, 1],
            price: vec![7000.0, 9000.0],
        };
        assert!(matches!(
            PriceModel::fit(&table),
            Err(ModelError::TooFewRows(2))
        ));
    }

    #[test]
    fn constant_feature_is_singular() {
        let mut table = synthetic_table();
        table.drivewheel_fwd = vec![0; 10];
        table.car_company_buick = vec![0; 10];
        assert!(matches!(PriceModel::fit(&table), Err(ModelError::Singular)));
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        let (r, p) = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        assert!(p < 1e-9);
    }

    #[test]
    fn pearson_needs_variance_and_pairs() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[2.0, 3.0]).is_none());
    }

    #[test]
    fn trend_line_recovers_slope() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        let (a, b) = trend_line(&x, &y).unwrap();
        assert!((a - 1.0).abs() < 1e-9);
        assert!((b - 2.0).abs() < 1e-9);
    }
}
