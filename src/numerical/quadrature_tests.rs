//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::numerical::quadrature::{QuadratureRule, integrate, riemann_sum, trap_rule};
    use crate::numerical::ram_errors::IntegrationError;
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbolic::symbolic_evaluator::{
        EvaluationError, ExpressionEvaluator, SymbolicEvaluator,
    };
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use strum::IntoEnumIterator;

    /// evaluator stub wrapping a plain closure and counting the calls
    struct CountingEvaluator<F: Fn(f64) -> f64> {
        func: F,
        calls: Cell<usize>,
    }

    impl<F: Fn(f64) -> f64> CountingEvaluator<F> {
        fn new(func: F) -> Self {
            Self {
                func,
                calls: Cell::new(0),
            }
        }
    }

    impl<F: Fn(f64) -> f64> ExpressionEvaluator for CountingEvaluator<F> {
        type Expression = ();

        fn evaluate(&self, _: &(), _: &str, value: f64) -> Result<f64, EvaluationError> {
            self.calls.set(self.calls.get() + 1);
            let res = (self.func)(value);
            if res.is_finite() {
                Ok(res)
            } else {
                Err(EvaluationError::Undefined {
                    expression: format!("f({})", value),
                })
            }
        }

        fn approximate(&self, _: &()) -> Result<f64, EvaluationError> {
            Err(EvaluationError::FreeVariable("x".to_string()))
        }

        fn has_foreign_variable(&self, _: &(), _: &str) -> bool {
            false
        }
    }

    fn run<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, n: usize, rule: QuadratureRule) -> f64 {
        let evaluator = CountingEvaluator::new(f);
        integrate(&evaluator, &(), "x", a, b, n, rule).unwrap()
    }

    #[test]
    fn test_constant_integrand_any_rule() {
        for rule in QuadratureRule::iter() {
            for n in [1, 2, 7, 100] {
                let res = run(|_| 3.5, -1.0, 3.0, n, rule);
                assert_relative_eq!(res, 3.5 * 4.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_trapezoid_exact_for_linear() {
        for n in [1, 2, 3, 10, 51] {
            let res = run(|x| x, 0.0, 1.0, n, QuadratureRule::Trapezoid);
            assert_relative_eq!(res, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_left_right_middle_on_linear() {
        // x over [0,1] with 4 steps: left 0.375, middle 0.5, right 0.625
        let expected = [
            (QuadratureRule::Left, 0.375),
            (QuadratureRule::Middle, 0.5),
            (QuadratureRule::Right, 0.625),
        ];
        for (rule, value) in expected {
            let res = run(|x| x, 0.0, 1.0, 4, rule);
            assert_relative_eq!(res, value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_square_converges() {
        for rule in QuadratureRule::iter() {
            let res = run(|x| x * x, 0.0, 3.0, 2000, rule);
            assert_relative_eq!(res, 9.0, epsilon = 2e-2);
        }
        // middle sum error for x^2 is (b-a)h^2/12 exactly
        let res = run(|x| x * x, 0.0, 3.0, 3, QuadratureRule::Middle);
        assert_relative_eq!(res, 9.0 - 3.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_left_sum_is_negated_right_sum_with_reversed_bounds() {
        let f = |x: f64| x * x * x - 2.0 * x;
        for n in [1, 5, 16] {
            let left = run(f, 1.0, 5.0, n, QuadratureRule::Left);
            let right_reversed = run(f, 5.0, 1.0, n, QuadratureRule::Right);
            assert_relative_eq!(left, -right_reversed, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_reversed_bounds_negate_result() {
        let f = |x: f64| x.sin() + x * x;
        for rule in [QuadratureRule::Middle, QuadratureRule::Trapezoid] {
            for n in [1, 4, 33] {
                let forward = run(f, 1.0, 5.0, n, rule);
                let backward = run(f, 5.0, 1.0, n, rule);
                assert_relative_eq!(forward, -backward, epsilon = 1e-9);
            }
        }
        // left and right sums only mirror each other when the sample sets coincide
        for rule in [QuadratureRule::Left, QuadratureRule::Right] {
            let forward = run(|_| 2.0, 1.0, 5.0, 8, rule);
            let backward = run(|_| 2.0, 5.0, 1.0, 8, rule);
            assert_relative_eq!(forward, -backward, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sample_counts() {
        for n in [1, 2, 10, 99] {
            for offset in [0.0, 0.5, 1.0, 0.25] {
                let evaluator = CountingEvaluator::new(|x| x);
                riemann_sum(&evaluator, &(), "x", 0.0, 1.0, n, offset).unwrap();
                assert_eq!(evaluator.calls.get(), n);
            }
            let evaluator = CountingEvaluator::new(|x| x);
            trap_rule(&evaluator, &(), "x", 0.0, 1.0, n).unwrap();
            assert_eq!(evaluator.calls.get(), n + 1);
        }
    }

    #[test]
    fn test_single_step_trapezoid_is_two_point_rule() {
        let res = run(|x| x * x, 1.0, 3.0, 1, QuadratureRule::Trapezoid);
        assert_relative_eq!(res, (1.0 + 9.0) * 2.0 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let evaluator = CountingEvaluator::new(|x| x);
        for rule in QuadratureRule::iter() {
            let err = integrate(&evaluator, &(), "x", 0.0, 1.0, 0, rule).unwrap_err();
            assert!(matches!(err, IntegrationError::InvalidArgument(_)));
        }
        assert_eq!(evaluator.calls.get(), 0);
    }

    #[test]
    fn test_evaluator_failure_propagates_unchanged() {
        // 1/x is undefined at the left end of [0, 1]
        let evaluator = CountingEvaluator::new(|x| 1.0 / x);
        let err = riemann_sum(&evaluator, &(), "x", 0.0, 1.0, 4, 0.0).unwrap_err();
        assert_eq!(
            err,
            IntegrationError::Evaluation(EvaluationError::Undefined {
                expression: "f(0)".to_string()
            })
        );
        assert_eq!(evaluator.calls.get(), 1);
        // middle sum never touches x = 0
        let evaluator = CountingEvaluator::new(|x| 1.0 / x);
        assert!(riemann_sum(&evaluator, &(), "x", 0.0, 1.0, 4, 0.5).is_ok());
    }

    #[test]
    fn test_rule_from_index() {
        assert_eq!(QuadratureRule::from_index(0), QuadratureRule::Left);
        assert_eq!(QuadratureRule::from_index(1), QuadratureRule::Middle);
        assert_eq!(QuadratureRule::from_index(2), QuadratureRule::Right);
        for i in [3, 4, 17, u64::MAX] {
            assert_eq!(QuadratureRule::from_index(i), QuadratureRule::Trapezoid);
        }
        let offsets: Vec<Option<f64>> = QuadratureRule::iter().map(|r| r.offset()).collect();
        assert_eq!(offsets, vec![Some(0.0), Some(0.5), Some(1.0), None]);
    }

    #[test]
    fn test_symbolic_evaluator_integration() {
        let evaluator = SymbolicEvaluator::new();
        let f = Expr::parse_expression("exp(x)").unwrap();
        let before = f.clone();
        let rule = QuadratureRule::Trapezoid;
        let res = integrate(&evaluator, &f, "x", 0.0, 1.0, 1000, rule).unwrap();
        assert_relative_eq!(res, std::f64::consts::E - 1.0, epsilon = 1e-6);
        assert_eq!(f, before);
        assert_eq!(evaluator.scratch_depth(), 0);
    }

    #[test]
    fn test_symbolic_evaluator_scratch_after_failure() {
        let evaluator = SymbolicEvaluator::new();
        let f = Expr::parse_expression("ln(x)").unwrap();
        let err = trap_rule(&evaluator, &f, "x", -1.0, 1.0, 10).unwrap_err();
        assert!(matches!(
            err,
            IntegrationError::Evaluation(EvaluationError::Undefined { .. })
        ));
        assert_eq!(evaluator.scratch_depth(), 0);
    }
}
