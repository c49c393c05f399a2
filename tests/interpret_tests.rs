//! Tests for structural interpretation.
//!
//! Interpretation must hand every embedded leaf to the visitor exactly once
//! and must never execute a leaf for real.

mod common;

use common::{Counter, Greet, Probe};
use effect_pipe::Fault;
use effect_pipe::effect::{
    Effect, Leaf, Outcome, Passthrough, Stub, Visitor, effect_name, execute, interpret, pure,
};
use rstest::rstest;

// =============================================================================
// Dry Runs
// =============================================================================

mod dry_runs {
    use super::*;

    #[rstest]
    fn test_interpret_leaves_real_counter_untouched() {
        let counter = Counter::new();
        let probe = counter.clone();
        let program = counter
            .succeed(1)
            .bind(move |first| probe.succeed(2).map(move |second| first + second))
            .map(|sum| sum * 10);

        let mut stub = Stub::new().on(|probe: Probe| probe.planned().clone());
        assert_eq!(interpret(program, &mut stub), Ok(30));
        assert_eq!(counter.get(), 0, "no leaf may run for real");
        assert_eq!(stub.count::<Probe>(), 2);
    }

    #[rstest]
    fn test_visitor_sees_each_leaf_once_in_order() {
        let program = Greet("ada")
            .bind(|first| Greet("grace").map(move |second| vec![first, second]))
            .bind(|mut greetings| {
                Greet("linus").map(move |third| {
                    greetings.push(third);
                    greetings
                })
            });

        let mut names = Vec::new();
        let mut visitor = |leaf: Leaf| {
            let Ok(greet) = leaf.downcast::<Greet>() else {
                panic!("only Greet leaves are embedded");
            };
            names.push(greet.0);
            Outcome::ok::<Greet>(greet.0.to_uppercase())
        };

        let result = program.interpret(&mut visitor);
        assert_eq!(
            result,
            Ok(vec!["ADA".to_string(), "GRACE".to_string(), "LINUS".to_string()])
        );
        assert_eq!(names, vec!["ada", "grace", "linus"]);
    }

    #[rstest]
    fn test_failed_leaf_short_circuits_interpretation() {
        let counter = Counter::new();
        let probe = counter.clone();
        let program = counter.fail("down").bind(move |value| probe.succeed(value));

        let mut stub = Stub::new().on(|probe: Probe| probe.planned().clone());
        assert_eq!(program.interpret(&mut stub), Err("down".to_string()));
        assert_eq!(stub.count::<Probe>(), 1);
        assert_eq!(counter.get(), 0);
    }

    #[rstest]
    fn test_recovery_is_interpreted_too() {
        let counter = Counter::new();
        let program = counter
            .fail("first")
            .map(|value| value.to_string())
            .bind_err(|_| Greet("fallback"))
            .map(|text| text.len());

        let mut stub = Stub::new()
            .on(|probe: Probe| probe.planned().clone())
            .on(|_: Greet| Ok("stubbed".to_string()));
        assert_eq!(program.interpret(&mut stub), Ok(7));
        assert_eq!(
            stub.visited(),
            vec![effect_name::<Probe>(), effect_name::<Greet>()]
        );
    }

    #[rstest]
    fn test_visitor_can_answer_with_error() {
        let mut visitor = |_: Leaf| Outcome::err::<Greet>("rate limited".to_string());
        assert_eq!(Greet("x").interpret(&mut visitor), Err("rate limited".to_string()));
    }
}

// =============================================================================
// Passthrough
// =============================================================================

mod passthrough {
    use super::*;

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_passthrough_interpretation_equals_execution(#[case] succeed: bool) {
        let build = |counter: &Counter| {
            let leaf = if succeed {
                counter.succeed(5)
            } else {
                counter.fail("nope")
            };
            leaf.bind(|value| pure(value + 1))
        };

        let executed = Counter::new();
        let interpreted = Counter::new();

        assert_eq!(
            interpret(build(&interpreted), &mut Passthrough),
            execute(build(&executed))
        );
        assert_eq!(interpreted.get(), executed.get());
        assert_eq!(interpreted.get(), 1);
    }

    #[rstest]
    fn test_stub_passthrough_mixes_real_and_stubbed_leaves() {
        let counter = Counter::new();
        let program = Greet("real").bind({
            let counter = counter.clone();
            move |greeting| counter.succeed(1).map(move |value| (greeting, value))
        });

        let mut stub = Stub::new()
            .passthrough::<Greet>()
            .on(|_: Probe| Ok(99));
        assert_eq!(
            program.interpret(&mut stub),
            Ok(("hello, real".to_string(), 99))
        );
        assert_eq!(counter.get(), 0);
    }
}

// =============================================================================
// Custom Composites
// =============================================================================

mod custom_composites {
    use super::*;

    /// Runs two effects and keeps both results.
    struct Zip<First, Second> {
        first: First,
        second: Second,
    }

    impl<First, Second> Effect for Zip<First, Second>
    where
        First: Effect,
        Second: Effect<Error = First::Error>,
    {
        type Output = (First::Output, Second::Output);
        type Error = First::Error;

        fn execute(self) -> Result<Self::Output, Self::Error> {
            Ok((self.first.execute()?, self.second.execute()?))
        }

        fn interpret(self, visitor: &mut dyn Visitor) -> Result<Self::Output, Self::Error> {
            Ok((self.first.interpret(visitor)?, self.second.interpret(visitor)?))
        }
    }

    /// The same composite without an `interpret` override.
    struct OpaqueZip<First, Second> {
        first: First,
        second: Second,
    }

    impl<First, Second> Effect for OpaqueZip<First, Second>
    where
        First: Effect,
        Second: Effect<Error = First::Error>,
    {
        type Output = (First::Output, Second::Output);
        type Error = First::Error;

        fn execute(self) -> Result<Self::Output, Self::Error> {
            Ok((self.first.execute()?, self.second.execute()?))
        }
    }

    #[rstest]
    fn test_overriding_composite_unfolds_into_leaves() {
        let counter = Counter::new();
        let zip = Zip {
            first: counter.succeed(1),
            second: counter.succeed(2),
        };

        let mut stub = Stub::new().on(|probe: Probe| probe.planned().clone().map(|n| n * 100));
        assert_eq!(zip.interpret(&mut stub), Ok((100, 200)));
        assert_eq!(stub.count::<Probe>(), 2);
        assert_eq!(counter.get(), 0);
    }

    #[rstest]
    fn test_non_overriding_composite_reaches_visitor_as_one_leaf() {
        let counter = Counter::new();
        let zip = OpaqueZip {
            first: counter.succeed(1),
            second: counter.succeed(2),
        };

        let mut visitor = |leaf: Leaf| {
            assert!(leaf.is::<OpaqueZip<Probe, Probe>>());
            leaf.execute()
        };
        assert_eq!(zip.interpret(&mut visitor), Ok((1, 2)));
        assert_eq!(counter.get(), 2, "an opaque composite runs its leaves for real");
    }
}

// =============================================================================
// Faults
// =============================================================================

mod faults {
    use super::*;

    #[rstest]
    fn test_unhandled_leaf_is_a_fault_not_an_error() {
        let counter = Counter::new();
        let program = Greet("x").bind({
            let counter = counter.clone();
            move |_| counter.succeed(1)
        });
        let mut stub = Stub::new().on(|_: Greet| Ok(String::new()));

        let caught = Fault::catch(|| program.interpret(&mut stub));
        assert_eq!(
            caught,
            Err(Fault::UnhandledLeaf {
                effect_type: effect_name::<Probe>()
            })
        );
        assert_eq!(counter.get(), 0);
    }

    #[rstest]
    fn test_wrongly_typed_outcome_is_a_fault() {
        let mut visitor = |_: Leaf| Outcome::ok::<Probe>(1);
        let caught = Fault::catch(|| Greet("x").interpret(&mut visitor));
        assert_eq!(
            caught,
            Err(Fault::OutcomeMismatch {
                expected: effect_name::<Greet>(),
                found: effect_name::<Probe>(),
            })
        );
    }
}
