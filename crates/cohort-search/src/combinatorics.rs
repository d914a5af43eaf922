//! Ordered generators for dimension subsets and value tuples.

use cohort_model::Value;

/// Lexicographic `k`-combinations of `0..n`.
///
/// `k == 0` and `k > n` produce no combinations.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        let k = self.indices.len();
        // Highest value position `pos` may hold is n - k + pos.
        for pos in (0..k).rev() {
            if self.indices[pos] < self.n - k + pos {
                self.indices[pos] += 1;
                for next in pos + 1..k {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                return Some(self.indices.clone());
            }
        }
        self.done = true;
        None
    }
}

/// Cartesian product of borrowed domains, leftmost domain varying slowest.
///
/// No tuples are produced when `domains` is empty or any domain is empty.
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    domains: Vec<&'a [Value]>,
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> CartesianProduct<'a> {
    pub fn new(domains: &[&'a [Value]]) -> Self {
        Self {
            domains: domains.to_vec(),
            cursor: vec![0; domains.len()],
            done: domains.is_empty() || domains.iter().any(|domain| domain.is_empty()),
        }
    }
}

impl Iterator for CartesianProduct<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tuple = self
            .cursor
            .iter()
            .zip(&self.domains)
            .map(|(&position, domain)| domain[position].clone())
            .collect();

        // Odometer step from the rightmost domain.
        let mut pos = self.cursor.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.cursor[pos] += 1;
            if self.cursor[pos] < self.domains[pos].len() {
                break;
            }
            self.cursor[pos] = 0;
        }
        Some(tuple)
    }
}

/// Number of candidates an unpruned search over `domains` visits.
///
/// Every dimension either sits out or contributes one of its values, so the
/// total is `prod(1 + |d_i|) - 1`. With no domains, or with any empty
/// domain, the search visits nothing and the size is zero. Returns `None`
/// on overflow.
pub fn search_space_size<D: AsRef<[Value]>>(domains: &[D]) -> Option<u128> {
    if domains.is_empty() || domains.iter().any(|domain| domain.as_ref().is_empty()) {
        return Some(0);
    }
    let mut total: u128 = 1;
    for domain in domains {
        let width = u128::try_from(domain.as_ref().len()).ok()?;
        total = total.checked_mul(width.checked_add(1)?)?;
    }
    Some(total - 1)
}

/// Number of candidates with exactly `size` participating dimensions.
///
/// This is the elementary symmetric polynomial of degree `size` over the
/// domain widths, or zero when any domain is empty. Returns `None` on
/// overflow.
pub fn level_size<D: AsRef<[Value]>>(domains: &[D], size: usize) -> Option<u128> {
    if size > domains.len() || domains.iter().any(|domain| domain.as_ref().is_empty()) {
        return Some(0);
    }
    // coefficients[j] = sum over j-subsets of the widths seen so far.
    let mut coefficients: Vec<u128> = vec![0; size + 1];
    coefficients[0] = 1;
    for domain in domains {
        let width = u128::try_from(domain.as_ref().len()).ok()?;
        for j in (1..=size).rev() {
            let term = coefficients[j - 1].checked_mul(width)?;
            coefficients[j] = coefficients[j].checked_add(term)?;
        }
    }
    Some(if size == 0 { 0 } else { coefficients[size] })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    #[test]
    fn combinations_are_lexicographic() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 3).collect::<Vec<_>>(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn combinations_degenerate_sizes() {
        assert_eq!(Combinations::new(3, 0).count(), 0);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(0, 1).count(), 0);
        assert_eq!(Combinations::new(1, 1).count(), 1);
    }

    #[test]
    fn combinations_count_matches_binomial() {
        assert_eq!(Combinations::new(9, 4).count(), 126);
        assert_eq!(Combinations::new(10, 5).count(), 252);
    }

    #[test]
    fn product_leftmost_varies_slowest() {
        let a = ints(&[1, 2]);
        let b = vec![Value::from("x"), Value::from("y"), Value::from("z")];
        let tuples: Vec<String> = CartesianProduct::new(&[a.as_slice(), b.as_slice()])
            .map(|tuple| {
                tuple
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect();
        assert_eq!(tuples, vec!["1x", "1y", "1z", "2x", "2y", "2z"]);
    }

    #[test]
    fn product_with_empty_domain_is_empty() {
        let a = ints(&[1, 2]);
        let empty: Vec<Value> = Vec::new();
        assert_eq!(CartesianProduct::new(&[a.as_slice(), empty.as_slice()]).count(), 0);
        assert_eq!(CartesianProduct::new(&[]).count(), 0);
    }

    #[test]
    fn search_space_closed_form() {
        let domains = vec![ints(&[1, 2]), ints(&[3, 4, 5]), ints(&[6])];
        // (2+1)(3+1)(1+1) - 1
        assert_eq!(search_space_size(&domains), Some(23));
        assert_eq!(level_size(&domains, 1), Some(6));
        assert_eq!(level_size(&domains, 2), Some(2 * 3 + 2 + 3));
        assert_eq!(level_size(&domains, 3), Some(6));
        assert_eq!(level_size(&domains, 4), Some(0));
        let by_level: u128 = (1..=3).filter_map(|k| level_size(&domains, k)).sum();
        assert_eq!(by_level, 23);
    }

    #[test]
    fn search_space_of_nothing_is_zero() {
        let none: Vec<Vec<Value>> = Vec::new();
        assert_eq!(search_space_size(&none), Some(0));
    }

    #[test]
    fn search_space_with_an_empty_domain_is_zero() {
        let domains = vec![ints(&[1]), Vec::new()];
        assert_eq!(search_space_size(&domains), Some(0));
        assert_eq!(level_size(&domains, 1), Some(0));
    }
}
