use fastrand::Rng;
use logsys::enumerate::{
    Budget, Enumerator, ExhaustiveEnumerator, IncrementalBlockingEnumerator,
};
use logsys::error::SolveError;
use logsys::logic::{Formula, Grammar, Translator};
use logsys::report::{DisplayNames, cause_view, effect_view};
use logsys::session::{EquationSystem, SolveOptions, Strategy};
use logsys::system::{Assignment, SolutionSet, VariableSet};

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("x{i}")).collect()
}

/// A random free-form expression over `vars`.
fn random_expr(rng: &mut Rng, vars: &[String], depth: usize) -> String {
    if depth == 0 || rng.u8(..4) == 0 {
        let name = &vars[rng.usize(..vars.len())];
        return if rng.bool() {
            format!("!{name}")
        } else {
            name.clone()
        };
    }
    let op = ["+", "*", "=", "-"][rng.usize(..4)];
    let a = random_expr(rng, vars, depth - 1);
    let b = random_expr(rng, vars, depth - 1);
    format!("({a} {op} {b})")
}

/// A random line in one of the strict shapes.
fn random_strict_line(rng: &mut Rng, vars: &[String]) -> String {
    let var = |rng: &mut Rng| vars[rng.usize(..vars.len())].clone();
    let lit = |rng: &mut Rng| {
        let name = var(rng);
        if rng.bool() { format!("!{name}") } else { name }
    };
    let lits = |rng: &mut Rng, sep: &str| {
        let k = rng.usize(1..=3);
        (0..k).map(|_| lit(rng)).collect::<Vec<_>>().join(sep)
    };
    match rng.u8(..7) {
        0 => format!("{}-({})", var(rng), lits(rng, "+")),
        1 => format!("({})={}", lits(rng, "*"), var(rng)),
        2 => format!("!{}", var(rng)),
        3 => format!("{}+{}", lit(rng), lits(rng, "+")),
        4 => format!("{}*{}", lit(rng), lits(rng, "*")),
        5 => format!("{}={}", var(rng), var(rng)),
        _ => format!("({}) = 1", lits(rng, "+")),
    }
}

fn translate(vars: &VariableSet, grammar: Grammar, text: &str) -> Formula {
    Translator::new(vars, grammar).translate(text).unwrap()
}

fn both(formula: &Formula) -> (SolutionSet, SolutionSet, u64) {
    let exhaustive = ExhaustiveEnumerator::new()
        .enumerate(formula, &Budget::unlimited())
        .unwrap();
    let incremental = IncrementalBlockingEnumerator::new()
        .enumerate(formula, &Budget::unlimited())
        .unwrap();
    assert_eq!(exhaustive.count, exhaustive.solutions.len());
    assert_eq!(incremental.count, incremental.solutions.len());
    (exhaustive.solutions, incremental.solutions, incremental.checks)
}

#[test]
fn strategies_agree_on_random_permissive_systems() {
    let mut rng = Rng::with_seed(0x1061c);
    for n in 1..=8 {
        let vars = VariableSet::new(names(n), n / 2).unwrap();
        for _ in 0..12 {
            let lines = (0..rng.usize(1..=3))
                .map(|_| random_expr(&mut rng, vars.names(), 3))
                .collect::<Vec<_>>()
                .join("\n");
            let formula = translate(&vars, Grammar::Permissive, &lines);
            let (exhaustive, incremental, checks) = both(&formula);
            assert!(
                exhaustive.same_as(&incremental),
                "strategies disagree on:\n{lines}"
            );
            assert_eq!(checks, incremental.len() as u64 + 1);
        }
    }
}

#[test]
fn strategies_agree_on_random_strict_systems() {
    let mut rng = Rng::with_seed(7);
    for n in 1..=8 {
        let vars = VariableSet::new(names(n), 0).unwrap();
        for _ in 0..12 {
            let lines = (0..rng.usize(1..=4))
                .map(|_| random_strict_line(&mut rng, vars.names()))
                .collect::<Vec<_>>()
                .join("\n");
            let formula = translate(&vars, Grammar::Strict, &lines);
            let (exhaustive, incremental, _) = both(&formula);
            assert!(
                exhaustive.same_as(&incremental),
                "strategies disagree on:\n{lines}"
            );
        }
    }
}

#[test]
fn strategies_agree_on_larger_constrained_systems() {
    let mut rng = Rng::with_seed(20);
    for n in [12, 16, 20] {
        let vars = VariableSet::new(names(n), 0).unwrap();
        let free = &vars.names()[..5];
        // pin every variable past the first five to its predecessor
        let mut lines: Vec<String> = (6..=n).map(|i| format!("x{i} = x{}", i - 1)).collect();
        lines.push(random_expr(&mut rng, free, 3));
        let text = lines.join("\n");

        let formula = translate(&vars, Grammar::Permissive, &text);
        let (exhaustive, incremental, checks) = both(&formula);
        assert!(exhaustive.same_as(&incremental), "n = {n}");
        assert!(exhaustive.len() <= 32);
        assert_eq!(checks, exhaustive.len() as u64 + 1);
    }
}

#[test]
fn solving_twice_gives_the_same_result() {
    let system = EquationSystem::from_names(
        ["x1", "x2", "x3"],
        ["y1", "y2"],
        "x1 + x2 - y1\ny2 = (x3 * !x1)",
    )
    .unwrap();
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let options = SolveOptions::new(strategy).with_grammar(Grammar::Permissive);
        let first = system.solve(&options).unwrap();
        let second = system.solve(&options).unwrap();
        assert_eq!(first.solutions.sorted(), second.solutions.sorted());
        assert_eq!(first.count, second.count);
    }
}

#[test]
fn contradiction_yields_empty_set_and_empty_reports() {
    let system = EquationSystem::from_names(["x1"], ["y1"], "x1 * !x1").unwrap();
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let options = SolveOptions::new(strategy).with_grammar(Grammar::Permissive);
        let solved = system.solve(&options).unwrap();
        assert!(solved.solutions.is_empty());
        assert_eq!(solved.count, 0);

        let report = system.report(&solved, &DisplayNames::new());
        assert!(report.view1.contains("No solution"));
        assert_eq!(report.view2, "No matching solution\n");
    }
}

#[test]
fn single_variable_must_hold() {
    let vars = VariableSet::new(["x1"], 1).unwrap();
    let system = EquationSystem::new(vars, "x1");
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let solved = system.solve(&SolveOptions::new(strategy)).unwrap();
        assert_eq!(solved.solutions.sorted(), vec![Assignment::from(&[1u8][..])]);
        assert_eq!(solved.count, 1);
    }
}

#[test]
fn longer_name_is_bound_before_its_prefix() {
    let vars = VariableSet::new(["x1", "x10"], 2).unwrap();
    let system = EquationSystem::new(vars, "x10=1");
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let solved = system.solve(&SolveOptions::new(strategy)).unwrap();
        assert_eq!(
            solved.solutions.sorted(),
            vec![
                Assignment::from(&[0u8, 1][..]),
                Assignment::from(&[1u8, 1][..])
            ]
        );
    }
}

#[test]
fn cause_effect_scenario() {
    let system = EquationSystem::from_names(["x1"], ["y1"], "x1=y1").unwrap();
    let solved = system.solve(&SolveOptions::default()).unwrap();
    let bits: Vec<Vec<u8>> = solved.solutions.iter().map(Assignment::bits).collect();
    assert_eq!(bits, vec![vec![0, 0], vec![1, 1]]);

    let names = DisplayNames::new();
    assert_eq!(
        effect_view(&solved.solutions, system.variables(), &names),
        "y1 (y1) = 1 when the cause variables are:\n  Solution: x1\n"
    );
    assert_eq!(
        cause_view(&solved.solutions, system.variables(), &names),
        "x1 indicate y1\n"
    );

    let labelled: DisplayNames = [("x1", "Fever"), ("y1", "Flu")].into_iter().collect();
    assert_eq!(system.report(&solved, &labelled).view2, "Fever indicate Flu\n");
}

#[test]
fn documented_example_system() {
    let system = EquationSystem::from_names(
        ["x1", "x2"],
        ["y1", "y2"],
        "(x1 + y1) = 0\n(x2 * y2) = 1",
    )
    .unwrap();
    let solved = system.solve(&SolveOptions::default()).unwrap();
    assert_eq!(
        solved.solutions.sorted(),
        vec![Assignment::from(&[0u8, 1, 0, 1][..])]
    );

    // the strict grammar has no shape for an equivalence with 0
    let err = system
        .solve(&SolveOptions::new(Strategy::Incremental))
        .unwrap_err();
    assert_eq!(
        err,
        SolveError::UnsupportedFormat {
            line: "(x1 + y1) = 0".into()
        }
    );
}

#[test]
fn comparisons_bind_tighter_than_connectives() {
    let permissive = |strategy| SolveOptions::new(strategy).with_grammar(Grammar::Permissive);

    // reads as !((x2 * y2 - x1) * (x1 = 1)), which holds exactly when x1 is 0
    let system =
        EquationSystem::from_names(["x1", "x2"], ["y1", "y2"], "!(x2 * y2) - x1 = 1").unwrap();
    let expected: Vec<Assignment> = (0..8u64).map(|i| Assignment::from_index(i, 4)).collect();
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let solved = system.solve(&permissive(strategy)).unwrap();
        assert_eq!(solved.solutions.sorted(), expected, "{strategy}");
    }

    // reads as x1 + (y1 = 0)
    let system = EquationSystem::from_names(["x1"], ["y1"], "x1 + y1 = 0").unwrap();
    for strategy in [Strategy::Exhaustive, Strategy::Incremental] {
        let solved = system.solve(&permissive(strategy)).unwrap();
        assert_eq!(
            solved.solutions.sorted(),
            vec![
                Assignment::from(&[0u8, 0][..]),
                Assignment::from(&[1u8, 0][..]),
                Assignment::from(&[1u8, 1][..]),
            ],
            "{strategy}"
        );
    }
}

#[test]
fn blocking_issues_one_check_more_than_solutions() {
    let system =
        EquationSystem::from_names(["a", "b", "c"], ["d"], "a-(b+c)\n(b*!c)=d").unwrap();
    let solved = system
        .solve(&SolveOptions::new(Strategy::Incremental))
        .unwrap();
    assert!(solved.count > 0);
    assert_eq!(solved.checks, solved.count as u64 + 1);
    assert_eq!(
        solved.backend_stats.map(|s| s.checks as u64),
        Some(solved.checks)
    );
}
