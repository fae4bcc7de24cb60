use logicbench::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    reports::Report,
    structures::{atom::Atom, literal::CLiteral},
    types::err::{self, ErrorKind},
};

/// Atoms for each pigeon and hole, with clauses requiring each pigeon to have a hole and no hole to have two pigeons.
fn pigeonhole(the_context: &mut Context, pigeons: usize, holes: usize) {
    let mut atoms: Vec<Vec<Atom>> = Vec::default();
    for pigeon in 0..pigeons {
        let row = (0..holes)
            .map(|hole| the_context.intern(&format!("p{pigeon}h{hole}")).unwrap())
            .collect();
        atoms.push(row);
    }

    for row in &atoms {
        let clause = row.iter().map(|atom| CLiteral::new(*atom, true)).collect::<Vec<_>>();
        assert!(the_context.add_clause(clause).is_ok());
    }

    for hole in 0..holes {
        for first in 0..pigeons {
            for second in first + 1..pigeons {
                let clause = vec![
                    CLiteral::new(atoms[first][hole], false),
                    CLiteral::new(atoms[second][hole], false),
                ];
                assert!(the_context.add_clause(clause).is_ok());
            }
        }
    }
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.intern("p").unwrap();
        assert!(the_context.add_clause(CLiteral::new(p, true)).is_ok());
        assert!(the_context.solve().is_ok());
        assert_eq!(the_context.report(), Report::Satisfiable);
        assert_eq!(the_context.value_of(p), Some(true));
    }

    #[test]
    fn conflict() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.intern("p").unwrap();
        let q = the_context.intern("q").unwrap();

        for (p_polarity, q_polarity) in [(true, true), (false, false), (true, false), (false, true)] {
            let clause = vec![CLiteral::new(p, p_polarity), CLiteral::new(q, q_polarity)];
            assert!(the_context.add_clause(clause).is_ok());
        }

        assert!(the_context.solve().is_ok());
        assert_eq!(the_context.report(), Report::Unsatisfiable);
    }

    #[test]
    fn assumption() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.intern("p").unwrap();
        let q = the_context.intern("q").unwrap();

        let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
        assert!(the_context.add_clause(p_q_clause).is_ok());
        assert!(the_context.add_clause(CLiteral::new(p, false)).is_ok());

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let the_valuation = the_context.named_valuation().unwrap();
        assert_eq!(the_valuation.get("p"), Some(&false));
        assert_eq!(the_valuation.get("q"), Some(&true));
    }

    #[test]
    fn duplicates() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.intern("p").unwrap();
        let q = the_context.intern("q").unwrap();

        let p_q_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true), CLiteral::new(q, true)];
        assert!(the_context.add_clause(p_q_q_clause).is_ok());

        let q_q_clause = vec![CLiteral::new(q, false), CLiteral::new(q, false)];
        assert!(the_context.add_clause(q_q_clause).is_ok());

        assert_eq!(the_context.clause_db.count(), 2);
        assert_eq!(the_context.clause_db.units(), &[CLiteral::new(q, false)]);

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
        assert_eq!(the_context.value_of(p), Some(true));
    }

    #[test]
    fn tautology_skip() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.intern("p").unwrap();
        let q = the_context.intern("q").unwrap();

        let clause = vec![CLiteral::new(p, true), CLiteral::new(q, true), CLiteral::new(p, false)];
        assert_eq!(the_context.add_clause(clause), Ok(ClauseOk::Tautology));
        assert_eq!(the_context.clause_db.count(), 0);
    }

    #[test]
    fn empty_clause() {
        let mut the_context = Context::from_config(Config::default());
        assert_eq!(
            the_context.add_clause(Vec::default()),
            Err(ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause))
        );
    }

    #[test]
    fn unknown_atom() {
        let mut the_context = Context::from_config(Config::default());
        assert_eq!(
            the_context.add_clause(CLiteral::new(7, true)),
            Err(ErrorKind::ClauseDB(err::ClauseDBError::UnknownAtom))
        );
    }

    #[test]
    fn solve_once() {
        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.solve().is_ok());
        assert_eq!(
            the_context.solve(),
            Err(ErrorKind::State(err::StateError::SolveComplete))
        );
    }

    #[test]
    fn empty_formula() {
        let mut the_context = Context::from_config(Config::default());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
    }
}

mod search {
    use super::*;

    #[test]
    fn pigeonhole_unsatisfiable() {
        let mut the_context = Context::from_config(Config::default());
        pigeonhole(&mut the_context, 4, 3);

        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
        assert!(the_context.counters.total_conflicts > 1);
        assert!(the_context.counters.total_decisions > 0);
    }

    #[test]
    fn pigeonhole_satisfiable() {
        let mut the_context = Context::from_config(Config::default());
        pigeonhole(&mut the_context, 3, 3);

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let the_valuation = the_context.named_valuation().unwrap();
        for pigeon in 0..3 {
            let placed = (0..3).filter(|hole| the_valuation.get(&format!("p{pigeon}h{hole}")) == Some(&true));
            assert!(placed.count() >= 1);
        }
    }

    #[test]
    fn conflict_limit() {
        let mut config = Config::default();
        assert!(config.conflict_limit.set(1));

        let mut the_context = Context::from_config(config);
        pigeonhole(&mut the_context, 4, 3);

        assert_eq!(the_context.solve(), Ok(Report::Unknown));
        assert_eq!(the_context.counters.total_conflicts, 1);
    }

    #[test]
    fn random_decisions_agree() {
        for seed in 0..8 {
            let mut config = Config::default();
            assert!(config.random_decision_bias.set(0.5));
            assert!(config.polarity_lean.set(0.5));
            assert!(config.seed.set(seed));

            let mut unsatisfiable = Context::from_config(config.clone());
            pigeonhole(&mut unsatisfiable, 4, 3);
            assert_eq!(unsatisfiable.solve(), Ok(Report::Unsatisfiable));

            let mut satisfiable = Context::from_config(config);
            pigeonhole(&mut satisfiable, 3, 4);
            assert_eq!(satisfiable.solve(), Ok(Report::Satisfiable));
        }
    }
}
