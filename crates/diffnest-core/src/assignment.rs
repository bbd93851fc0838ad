//! Minimum-cost perfect assignment (Kuhn–Munkres / Hungarian method).
//!
//! Shortest-augmenting-path formulation with row and column potentials,
//! O(n³) for an n×n matrix. Ties resolve to the lowest column index, so the
//! result is deterministic for a given matrix.

/// Solve the assignment problem for a square cost matrix.
///
/// Returns `assignment` where row `i` is assigned column `assignment[i]`;
/// the assignment is a bijection minimising the summed cost. An empty
/// matrix yields an empty assignment.
///
/// # Panics
///
/// Panics if `cost` is not square.
pub fn solve(cost: &[Vec<i64>]) -> Vec<usize> {
    let n = cost.len();
    assert!(
        cost.iter().all(|row| row.len() == n),
        "assignment cost matrix must be square"
    );
    if n == 0 {
        return Vec::new();
    }

    // 1-based internally; index 0 is the virtual start column.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut row_of = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        row_of[0] = row;
        let mut col0 = 0usize;
        let mut min_slack = vec![i64::MAX; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[col0] = true;
            let r = row_of[col0];
            let mut delta = i64::MAX;
            let mut next = 0usize;

            for col in 1..=n {
                if visited[col] {
                    continue;
                }
                let slack = cost[r - 1][col - 1] - u[r] - v[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    next = col;
                }
            }

            for col in 0..=n {
                if visited[col] {
                    u[row_of[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }

            col0 = next;
            if row_of[col0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the start column.
        loop {
            let prev = way[col0];
            row_of[col0] = row_of[prev];
            col0 = prev;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for col in 1..=n {
        if row_of[col] != 0 {
            assignment[row_of[col] - 1] = col - 1;
        }
    }
    assignment
}
