//! Column-by-column solving for addition (carry) and subtraction (equal additions).

use crate::core::problem::Problem;
use crate::core::types::{ColumnExpectation, Operation};

/// Solve one column given the carry (or pending borrow) from the column to its right.
///
/// Addition sums every operand digit plus `previous_carry` and passes the tens
/// on unclamped. Subtraction adds `previous_carry` to the bottom digit; when the
/// top digit is smaller it borrows ten and passes a 1 to the next column.
///
/// `previous_carry` is at most 3 for any board this crate builds; larger
/// values saturate instead of overflowing.
pub fn solve_column(problem: &Problem, column: usize, previous_carry: u32) -> ColumnExpectation {
    match problem.operation() {
        Operation::Addition => {
            let digits: u32 = (0..problem.operands().len())
                .map(|index| u32::from(problem.digit(index, column)))
                .sum();
            let sum = digits.saturating_add(previous_carry);
            ColumnExpectation {
                result_digit: (sum % 10) as u8,
                next_carry: sum / 10,
            }
        }
        Operation::Subtraction => {
            let top = u32::from(problem.minuend_digit(column));
            let effective_bottom =
                u32::from(problem.bottom_digit(column)).saturating_add(previous_carry);
            if top < effective_bottom {
                // One ten always suffices while the inbound borrow is 0 or 1.
                let shortfall = effective_bottom - top;
                let borrow = shortfall.div_ceil(10);
                ColumnExpectation {
                    result_digit: ((10 - shortfall % 10) % 10) as u8,
                    next_carry: borrow,
                }
            } else {
                ColumnExpectation {
                    result_digit: (top - effective_bottom) as u8,
                    next_carry: 0,
                }
            }
        }
    }
}

/// Fold [`solve_column`] across every column of the board, starting with no carry.
pub fn create_expectations(problem: &Problem) -> Vec<ColumnExpectation> {
    let mut carry = 0;
    (0..problem.columns())
        .map(|column| {
            let expectation = solve_column(problem, column, carry);
            carry = expectation.next_carry;
            expectation
        })
        .collect()
}

/// Rebuild the integer answer from the expected digits (column 0 least significant).
pub fn reassemble(expectations: &[ColumnExpectation]) -> u64 {
    expectations
        .iter()
        .rev()
        .fold(0u64, |acc, column| acc * 10 + u64::from(column.result_digit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{addition, addition_on, subtraction, subtraction_on};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pairs(expectations: &[ColumnExpectation]) -> Vec<(u8, u32)> {
        expectations
            .iter()
            .map(|column| (column.result_digit, column.next_carry))
            .collect()
    }

    /// 48 + 37: the units carry a one into the tens.
    #[test]
    fn addition_carries_into_next_column() {
        let problem = addition_on(&[48, 37], 2);
        assert_eq!(pairs(&create_expectations(&problem)), vec![(5, 1), (8, 0)]);

        let wide = addition(&[48, 37]);
        let expectations = create_expectations(&wide);
        assert_eq!(expectations.len(), 6);
        assert_eq!(
            pairs(&expectations),
            vec![(5, 1), (8, 0), (0, 0), (0, 0), (0, 0), (0, 0)]
        );
    }

    /// 52 - 48: the units borrow and the tens pay it back on the bottom row.
    #[test]
    fn subtraction_borrows_with_equal_additions() {
        let problem = subtraction_on(52, 48, 2);
        assert_eq!(pairs(&create_expectations(&problem)), vec![(4, 1), (0, 0)]);
        assert_eq!(reassemble(&create_expectations(&problem)), 4);
    }

    /// Four nines plus an inbound carry of three exceed a single-bit carry.
    #[test]
    fn addition_carry_is_not_clamped() {
        let problem = addition(&[99_999, 99_999, 99_999, 99_999]);
        let first = solve_column(&problem, 0, 0);
        assert_eq!(first, ColumnExpectation { result_digit: 6, next_carry: 3 });
        let second = solve_column(&problem, 1, 3);
        assert_eq!(second, ColumnExpectation { result_digit: 9, next_carry: 3 });
        assert_eq!(reassemble(&create_expectations(&problem)), 399_996);
    }

    /// A borrow cascades through zeros one column at a time.
    #[test]
    fn subtraction_cascades_borrows() {
        let problem = subtraction(10_000, 1);
        let expectations = create_expectations(&problem);
        assert_eq!(
            pairs(&expectations),
            vec![(9, 1), (9, 1), (9, 1), (9, 1), (0, 0), (0, 0)]
        );
        assert_eq!(reassemble(&expectations), 9_999);
    }

    /// The final carry of a sum becomes a leading nonzero column.
    #[test]
    fn final_carry_becomes_leading_digit() {
        let problem = addition(&[99_999, 1]);
        let expectations = create_expectations(&problem);
        assert_eq!(expectations[5].result_digit, 1);
        assert_eq!(expectations[5].next_carry, 0);
        assert_eq!(reassemble(&expectations), 100_000);
    }

    /// An absurd inbound carry saturates rather than panicking.
    #[test]
    fn huge_previous_carry_saturates() {
        let sum = addition_on(&[48, 37], 2);
        let column = solve_column(&sum, 0, u32::MAX);
        assert_eq!(column.next_carry, u32::MAX / 10);

        let difference = subtraction_on(52, 48, 2);
        let column = solve_column(&difference, 0, u32::MAX);
        assert!(column.result_digit <= 9);
    }

    #[test]
    fn create_expectations_is_idempotent() {
        let problem = addition(&[12_345, 67_890, 55_555]);
        assert_eq!(create_expectations(&problem), create_expectations(&problem));
    }

    /// Random sums and differences reassemble to the arithmetic result.
    #[test]
    fn reassembly_matches_arithmetic_for_random_problems() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let count = rng.gen_range(2..=4);
            let operands: Vec<u64> = (0..count).map(|_| rng.gen_range(0..=99_999)).collect();
            let sum = addition(&operands);
            let expectations = create_expectations(&sum);
            assert_eq!(reassemble(&expectations), operands.iter().sum::<u64>());
            assert_eq!(expectations.last().map(|c| c.next_carry), Some(0));

            let minuend = rng.gen_range(0..=999_999);
            let subtrahend = rng.gen_range(0..=minuend);
            let difference = subtraction(minuend, subtrahend);
            let expectations = create_expectations(&difference);
            assert_eq!(reassemble(&expectations), minuend - subtrahend);
            assert_eq!(expectations.last().map(|c| c.next_carry), Some(0));
            assert!(expectations.iter().all(|c| c.next_carry <= 1));
        }
    }
}
