use ndarray::Array2;
use tracing::debug;

/// Alignment outcome produced by the DTW solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    /// `(reference_index, user_index)` pairs from `(0, 0)` to `(N - 1, M - 1)`.
    pub path: Vec<(usize, usize)>,
    /// User contour on the reference axis; always `reference.len()` long.
    pub aligned: Vec<f32>,
    pub total_cost: f32,
}

/// Executes an unbanded dynamic time warping of `user` onto `reference`.
///
/// Empty input on either side produces an all-zero contour of the reference's length.
pub fn align(reference: &[f32], user: &[f32]) -> Alignment {
    if reference.is_empty() || user.is_empty() {
        return Alignment {
            path: Vec::new(),
            aligned: vec![0.0; reference.len()],
            total_cost: 0.0,
        };
    }
    let cost = cost_matrix(reference, user);
    let path = backtrack(&cost);
    let aligned = project_onto_reference(&path, user, reference.len());
    let total_cost = cost[[reference.len() - 1, user.len() - 1]];
    debug!(
        reference_len = reference.len(),
        user_len = user.len(),
        total_cost,
        "dtw alignment computed"
    );
    Alignment {
        path,
        aligned,
        total_cost,
    }
}

/// Cumulative absolute-difference cost of matching each reference prefix to each user prefix.
pub fn cost_matrix(reference: &[f32], user: &[f32]) -> Array2<f32> {
    let (rows, cols) = (reference.len(), user.len());
    let mut cost = Array2::<f32>::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            let local = (reference[i] - user[j]).abs();
            let previous = match (i, j) {
                (0, 0) => 0.0,
                (0, _) => cost[[0, j - 1]],
                (_, 0) => cost[[i - 1, 0]],
                _ => cost[[i - 1, j]]
                    .min(cost[[i, j - 1]])
                    .min(cost[[i - 1, j - 1]]),
            };
            cost[[i, j]] = local + previous;
        }
    }
    cost
}

/// Walk back from the last cell to `(0, 0)`, returning the path in forward order.
///
/// Interior ties prefer the diagonal, then a reference step, then a user step.
pub fn backtrack(cost: &Array2<f32>) -> Vec<(usize, usize)> {
    let (rows, cols) = cost.dim();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let (mut i, mut j) = (rows - 1, cols - 1);
    let mut path = Vec::with_capacity(rows + cols);
    path.push((i, j));
    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let diagonal = cost[[i - 1, j - 1]];
            let reference_step = cost[[i - 1, j]];
            let user_step = cost[[i, j - 1]];
            let best = diagonal.min(reference_step).min(user_step);
            if diagonal == best {
                i -= 1;
                j -= 1;
            } else if reference_step == best {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        path.push((i, j));
    }
    path.reverse();
    path
}

/// Resample `user` onto `reference_len` frames; the last path entry per reference index wins.
pub fn project_onto_reference(
    path: &[(usize, usize)],
    user: &[f32],
    reference_len: usize,
) -> Vec<f32> {
    let mut aligned = vec![0.0; reference_len];
    for &(r, u) in path {
        aligned[r] = user[u];
    }
    aligned
}
