use log::debug;

use crate::config::Matrix;

/// Computes the Schulze strongest-path matrix from a preference matrix.
///
/// x beats y directly with strength d[x][y] when d[x][y] > d[y][x]. A direct
/// tie gives no edge in either direction. The strength of a path is its
/// weakest edge, and p[x][y] is the strength of the strongest path from x
/// to y (0 when there is none). The diagonal stays at 0.
///
/// The widest-path fixed point is unique, so the result does not depend on
/// the order of the candidates.
pub fn strongest_paths(d: &Matrix) -> Matrix {
    let n = d.size();
    let mut p = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if i != j && d.get(i, j) > d.get(j, i) {
                p.set(i, j, d.get(i, j));
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            if i == k {
                continue;
            }
            let p_ik = p.get(i, k);
            // Nothing goes through k from here.
            if p_ik == 0 {
                continue;
            }
            for j in 0..n {
                if j == i || j == k {
                    continue;
                }
                let through_k = p_ik.min(p.get(k, j));
                if through_k > p.get(i, j) {
                    p.set(i, j, through_k);
                }
            }
        }
    }
    debug!("strongest_paths: computed for {} candidates", n);
    p
}
