//! Quadratic binary function evaluator.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::InstanceError;
use crate::tabu::{Evaluator, Solution};

/// Evaluates `f(x) = xᵀ A x` for a binary vector `x`, where `x_i = 1`
/// iff element `i` is in the solution.
///
/// The engine minimizes; call [`inverse`](Self::inverse) to obtain the
/// evaluator of `-f` when `f` should be maximized.
///
/// # Examples
///
/// ```
/// use u_tabuqbf::qbf::QbfEvaluator;
/// use u_tabuqbf::tabu::{Evaluator, Solution};
///
/// let qbf = QbfEvaluator::from_matrix(vec![vec![2.0, 1.0], vec![0.0, -1.0]]);
/// let mut sol = Solution::default();
/// sol.add(0);
/// assert_eq!(qbf.evaluate(&mut sol), 2.0);
/// assert_eq!(qbf.evaluate_insertion_cost(&1, &sol), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct QbfEvaluator {
    size: usize,
    a: Vec<f64>,
    sign: f64,
}

impl QbfEvaluator {
    /// Creates an evaluator from a square coefficient matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn from_matrix(matrix: Vec<Vec<f64>>) -> Self {
        let size = matrix.len();
        let mut a = Vec::with_capacity(size * size);
        for row in matrix {
            assert_eq!(row.len(), size, "QBF matrix must be square");
            a.extend(row);
        }
        Self { size, a, sign: 1.0 }
    }

    /// Reads an instance: the domain size `n` followed by the upper
    /// triangle of `A`, row by row (`n - i` values on row `i`). The
    /// lower triangle is zero.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InstanceError> {
        let mut text = String::new();
        BufReader::new(reader).read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();

        let size_token = tokens.next().ok_or(InstanceError::MissingSize)?;
        let size: usize = size_token.parse().map_err(|_| InstanceError::Parse {
            token: size_token.to_string(),
        })?;

        let too_large = InstanceError::SizeTooLarge { size };
        let cells = size
            .checked_mul(size)
            .filter(|&c| {
                c.checked_mul(std::mem::size_of::<f64>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(too_large)?;
        let expected = cells / 2 + size.div_ceil(2);

        // The triangle is read before the matrix is allocated, so a short
        // file with a huge header fails as truncated.
        let mut upper = Vec::new();
        for _ in 0..expected {
            let token = tokens.next().ok_or(InstanceError::Truncated {
                expected,
                found: upper.len(),
            })?;
            upper.push(token.parse::<f64>().map_err(|_| InstanceError::Parse {
                token: token.to_string(),
            })?);
        }

        let mut a = vec![0.0; cells];
        let mut values = upper.into_iter();
        for i in 0..size {
            for j in i..size {
                a[i * size + j] = values.next().unwrap_or(0.0);
            }
        }

        Ok(Self { size, a, sign: 1.0 })
    }

    /// Reads an instance file (see [`from_reader`](Self::from_reader)).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InstanceError> {
        Self::from_reader(File::open(path)?)
    }

    /// Returns the evaluator of `-f`, turning maximization into minimization.
    pub fn inverse(mut self) -> Self {
        self.sign = -self.sign;
        self
    }

    /// Returns `true` if costs are negated.
    pub fn is_inverse(&self) -> bool {
        self.sign < 0.0
    }

    /// Coefficient `A[i][j]`.
    #[inline]
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.a[i * self.size + j]
    }

    /// `f` change of setting `x_i = 1` given the other selected variables.
    fn contribution(&self, i: usize, solution: &Solution<usize>) -> f64 {
        let mut sum = self.coefficient(i, i);
        for &j in solution {
            if j != i {
                sum += self.coefficient(i, j) + self.coefficient(j, i);
            }
        }
        sum
    }

    fn insertion(&self, i: usize, solution: &Solution<usize>) -> f64 {
        if solution.contains(&i) {
            return 0.0;
        }
        self.contribution(i, solution)
    }

    fn removal(&self, i: usize, solution: &Solution<usize>) -> f64 {
        if !solution.contains(&i) {
            return 0.0;
        }
        -self.contribution(i, solution)
    }

    fn exchange(&self, elem_in: usize, elem_out: usize, solution: &Solution<usize>) -> f64 {
        if elem_in == elem_out {
            return 0.0;
        }
        if solution.contains(&elem_in) {
            return self.removal(elem_out, solution);
        }
        if !solution.contains(&elem_out) {
            return self.insertion(elem_in, solution);
        }
        self.contribution(elem_in, solution)
            - self.contribution(elem_out, solution)
            - (self.coefficient(elem_in, elem_out) + self.coefficient(elem_out, elem_in))
    }
}

impl Evaluator<usize> for QbfEvaluator {
    fn domain_size(&self) -> usize {
        self.size
    }

    fn evaluate(&self, solution: &mut Solution<usize>) -> f64 {
        let mut sum = 0.0;
        for &i in solution.iter() {
            for &j in solution.iter() {
                sum += self.coefficient(i, j);
            }
        }
        solution.cost = self.sign * sum;
        solution.cost
    }

    fn evaluate_insertion_cost(&self, element: &usize, solution: &Solution<usize>) -> f64 {
        self.sign * self.insertion(*element, solution)
    }

    fn evaluate_removal_cost(&self, element: &usize, solution: &Solution<usize>) -> f64 {
        self.sign * self.removal(*element, solution)
    }

    fn evaluate_exchange_cost(&self, elem_in: &usize, elem_out: &usize, solution: &Solution<usize>) -> f64 {
        self.sign * self.exchange(*elem_in, *elem_out, solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QbfEvaluator {
        QbfEvaluator::from_matrix(vec![
            vec![1.0, 2.0, -3.0, 0.5],
            vec![0.0, -1.0, 4.0, 1.0],
            vec![0.0, 0.0, 2.0, -2.0],
            vec![0.0, 0.0, 0.0, 3.0],
        ])
    }

    fn solution(elements: &[usize]) -> Solution<usize> {
        let mut sol = Solution::default();
        for &e in elements {
            sol.add(e);
        }
        sol
    }

    fn full(qbf: &QbfEvaluator, elements: &[usize]) -> f64 {
        qbf.evaluate(&mut solution(elements))
    }

    #[test]
    fn test_evaluate_sets_cost() {
        let qbf = sample();
        let mut sol = solution(&[0, 2]);
        let cost = qbf.evaluate(&mut sol);
        // A00 + A02 + A22 = 1 - 3 + 2
        assert!((cost - 0.0).abs() < 1e-12);
        assert_eq!(sol.cost, cost);
    }

    #[test]
    fn test_deltas_match_full_evaluation() {
        for qbf in [sample(), sample().inverse()] {
            let base = [0, 2];
            let sol = solution(&base);
            let base_cost = full(&qbf, &base);

            let ins = qbf.evaluate_insertion_cost(&3, &sol);
            assert!((base_cost + ins - full(&qbf, &[0, 2, 3])).abs() < 1e-12);

            let rem = qbf.evaluate_removal_cost(&0, &sol);
            assert!((base_cost + rem - full(&qbf, &[2])).abs() < 1e-12);

            let exc = qbf.evaluate_exchange_cost(&1, &2, &sol);
            assert!((base_cost + exc - full(&qbf, &[0, 1])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_moves() {
        let qbf = sample();
        let sol = solution(&[1]);
        assert_eq!(qbf.evaluate_insertion_cost(&1, &sol), 0.0);
        assert_eq!(qbf.evaluate_removal_cost(&3, &sol), 0.0);
        assert_eq!(qbf.evaluate_exchange_cost(&1, &1, &sol), 0.0);
        // elem_out absent: behaves as an insertion
        assert_eq!(
            qbf.evaluate_exchange_cost(&0, &3, &sol),
            qbf.evaluate_insertion_cost(&0, &sol)
        );
        // elem_in present: behaves as a removal
        let sol = solution(&[1, 3]);
        assert_eq!(
            qbf.evaluate_exchange_cost(&1, &3, &sol),
            qbf.evaluate_removal_cost(&3, &sol)
        );
    }

    #[test]
    fn test_inverse_negates() {
        let qbf = sample().inverse();
        assert!(qbf.is_inverse());
        assert!((full(&qbf, &[0, 1]) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_reader() {
        let text = "3\n1 2 3\n4 5\n6\n";
        let qbf = QbfEvaluator::from_reader(text.as_bytes()).unwrap();
        assert_eq!(qbf.domain_size(), 3);
        assert_eq!(qbf.coefficient(0, 2), 3.0);
        assert_eq!(qbf.coefficient(1, 2), 5.0);
        assert_eq!(qbf.coefficient(2, 2), 6.0);
        assert_eq!(qbf.coefficient(2, 0), 0.0);
    }

    #[test]
    fn test_from_reader_errors() {
        assert!(matches!(
            QbfEvaluator::from_reader("".as_bytes()),
            Err(InstanceError::MissingSize)
        ));
        assert!(matches!(
            QbfEvaluator::from_reader("2\n1 x\n3".as_bytes()),
            Err(InstanceError::Parse { ref token }) if token == "x"
        ));
        assert!(matches!(
            QbfEvaluator::from_reader("2\n1 2".as_bytes()),
            Err(InstanceError::Truncated { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_from_reader_oversized_header() {
        assert!(matches!(
            QbfEvaluator::from_reader("4294967296\n1 2 3".as_bytes()),
            Err(InstanceError::SizeTooLarge { size: 4294967296 })
        ));
        assert!(matches!(
            QbfEvaluator::from_reader(format!("{}\n1", usize::MAX).as_bytes()),
            Err(InstanceError::SizeTooLarge { .. })
        ));
        // Representable but far larger than the input: fails before allocating.
        assert!(matches!(
            QbfEvaluator::from_reader("100000\n1 2 3".as_bytes()),
            Err(InstanceError::Truncated { found: 3, .. })
        ));
    }
}
