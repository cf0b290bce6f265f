//! Dense combined cost matrix.

use crate::error::{RouteError, RouteResult};

/// A dense n×n cost matrix stored in row-major order.
///
/// Entries are non-negative and finite. Symmetry is never assumed: `cost(a, b)`
/// and `cost(b, a)` are looked up independently.
///
/// # Examples
///
/// ```
/// use u_zoneroute::cost::CostModel;
///
/// let distance = vec![vec![0.0, 4.0], vec![4.0, 0.0]];
/// let fuel = vec![vec![0.0, 1.5], vec![1.0, 0.0]];
/// let model = CostModel::combine(&distance, &fuel).unwrap();
///
/// assert_eq!(model.cost(0, 1).unwrap(), 5.5);
/// assert_eq!(model.cost(1, 0).unwrap(), 5.0);
/// assert_eq!(model.route_cost(&[0, 1, 0]).unwrap(), 10.5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCostModel"))]
pub struct CostModel {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked wire form of [`CostModel`]; deserialization goes through
/// [`CostModel::from_data`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCostModel {
    data: Vec<f64>,
    size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCostModel> for CostModel {
    type Error = RouteError;

    fn try_from(raw: RawCostModel) -> RouteResult<Self> {
        Self::from_data(raw.size, raw.data)
    }
}

impl CostModel {
    /// Creates a model from a row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`RouteError::DataUnavailable`] if `size` is zero.
    /// - [`RouteError::DimensionMismatch`] if `data.len() != size * size`.
    /// - [`RouteError::InvalidCost`] for a negative or non-finite entry.
    pub fn from_data(size: usize, data: Vec<f64>) -> RouteResult<Self> {
        if size == 0 {
            return Err(RouteError::DataUnavailable("cost matrix is empty".into()));
        }
        let cells = size
            .checked_mul(size)
            .ok_or(RouteError::DimensionMismatch {
                left: usize::MAX,
                right: data.len(),
            })?;
        if data.len() != cells {
            return Err(RouteError::DimensionMismatch {
                left: cells,
                right: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(RouteError::InvalidCost {
                from: pos / size,
                to: pos % size,
                value: data[pos],
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a model from a grid of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> RouteResult<Self> {
        let size = check_square(rows)?;
        let data = rows.iter().flatten().copied().collect();
        Self::from_data(size, data)
    }

    /// Builds the combined model as the element-wise sum of a distance matrix
    /// and a fuel-cost matrix.
    pub fn combine(distance: &[Vec<f64>], fuel: &[Vec<f64>]) -> RouteResult<Self> {
        let left = check_square(distance)?;
        let right = check_square(fuel)?;
        if left != right {
            return Err(RouteError::DimensionMismatch { left, right });
        }
        let data = distance
            .iter()
            .flatten()
            .zip(fuel.iter().flatten())
            .map(|(d, f)| d + f)
            .collect();
        Self::from_data(left, data)
    }

    /// Number of locations covered by this model.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of travelling from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`RouteError::IndexOutOfRange`] if either id is `>= size()`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> RouteResult<f64> {
        let size = self.size;
        for index in [from, to] {
            if index >= size {
                return Err(RouteError::IndexOutOfRange { index, size });
            }
        }
        Ok(self.data[from * size + to])
    }

    /// Sum of `cost(route[i], route[i + 1])` over consecutive pairs.
    ///
    /// Routes with fewer than two stops cost 0.
    pub fn route_cost(&self, route: &[usize]) -> RouteResult<f64> {
        route
            .windows(2)
            .try_fold(0.0, |acc, pair| -> RouteResult<f64> {
                Ok(acc + self.cost(pair[0], pair[1])?)
            })
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| {
                (self.data[i * self.size + j] - self.data[j * self.size + i]).abs() <= tol
            })
        })
    }
}

/// Checks a grid of rows is non-empty and square, returning its dimension.
fn check_square(rows: &[Vec<f64>]) -> RouteResult<usize> {
    if rows.is_empty() {
        return Err(RouteError::DataUnavailable("cost matrix is empty".into()));
    }
    let n = rows.len();
    match rows.iter().position(|row| row.len() != n) {
        Some(row) => Err(RouteError::NotSquare {
            rows: n,
            row,
            len: rows[row].len(),
        }),
        None => Ok(n),
    }
}
