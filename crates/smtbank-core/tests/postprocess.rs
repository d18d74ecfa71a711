use smtbank_core::catalog;
use smtbank_core::extract::{parse_extractor_output, ExtractorOutput};
use smtbank_core::infer;
use smtbank_core::model::{CheckOutcome, NewResult, Status};
use smtbank_core::rating;
use smtbank_core::registry::SolverRegistry;
use smtbank_core::resolve;
use smtbank_core::storage::Store;

fn setup() -> (Store, SolverRegistry) {
    let store = Store::memory().unwrap();
    store.init_schema().unwrap();
    catalog::install_licenses(&store).unwrap();
    catalog::install_symbols(&store).unwrap();
    smtbank_core::logic::install_all(&store).unwrap();
    let registry = SolverRegistry::new();
    registry.install(&store).unwrap();
    (store, registry)
}

fn extraction(logic: &str, status: &str) -> ExtractorOutput {
    let raw = format!(
        r#"[{{"status": "{status}"}},
            {{"logic": "{logic}", "category": "industrial", "queryCount": 1}}]"#
    );
    parse_extractor_output(&raw).unwrap()
}

fn add_query(store: &Store, registry: &SolverRegistry, path: &str, logic: &str, status: &str) -> i64 {
    catalog::add_benchmark(
        store,
        registry,
        path,
        &extraction(logic, status),
        CheckOutcome::Pass,
        CheckOutcome::Pass,
    )
    .unwrap();
    let (_, family, name) = split(path);
    resolve::resolve_query(store, Some(false), logic, family, name)
        .unwrap()
        .unwrap()
}

fn split(path: &str) -> (&str, &str, &str) {
    let mut it = path.splitn(4, '/');
    it.next().unwrap();
    (it.next().unwrap(), it.next().unwrap(), it.next().unwrap())
}

/// One variant per (evaluation, canonical solver), named after the solver.
fn variant(store: &Store, evaluation: i64, solver: &str) -> i64 {
    let id = store.solver_id(solver).unwrap().unwrap();
    store
        .insert_variant(&format!("{solver}-{evaluation}"), id, Some(evaluation))
        .unwrap()
}

fn result(evaluation: i64, query: i64, variant: i64, status: Status) -> NewResult {
    NewResult {
        evaluation,
        query,
        solver_variant: variant,
        status,
        cpu_time: Some(1.0),
        wallclock_time: Some(1.0),
    }
}

#[test]
fn declared_statuses_are_never_touched() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/known.smt2", "QF_LIA", "sat");

    let e1 = store.create_evaluation("E1", None, None).unwrap();
    let z3 = variant(&store, e1, "Z3");
    let cvc4 = variant(&store, e1, "CVC4");
    // two solvers unanimously contradict the declared status
    store
        .insert_results(&[
            result(e1, q, z3, Status::Unsat),
            result(e1, q, cvc4, Status::Unsat),
        ])
        .unwrap();

    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.examined, 0);
    assert_eq!(store.query_statuses(q).unwrap(), (Status::Sat, None));
}

#[test]
fn a_single_solver_cannot_establish_ground_truth() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/lonely.smt2", "QF_LIA", "unknown");

    // the same solver reports sat in three different evaluations
    for year in 0..3 {
        let ev = store
            .create_evaluation(&format!("E{year}"), None, None)
            .unwrap();
        let z3 = variant(&store, ev, "Z3");
        store.insert_results(&[result(ev, q, z3, Status::Sat)]).unwrap();
    }

    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.examined, 1);
    assert_eq!(summary.inferred(), 0);
    assert_eq!(store.query_statuses(q).unwrap().1, None);
}

#[test]
fn disputed_evaluations_do_not_corroborate() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/disputed.smt2", "QF_LIA", "unknown");

    // every evaluation with a sat answer also contains an unsat answer
    for year in 0..2 {
        let ev = store
            .create_evaluation(&format!("E{year}"), None, None)
            .unwrap();
        let z3 = variant(&store, ev, "Z3");
        let cvc4 = variant(&store, ev, "CVC4");
        store
            .insert_results(&[
                result(ev, q, z3, Status::Sat),
                result(ev, q, cvc4, Status::Unsat),
            ])
            .unwrap();
    }

    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.inferred(), 0);
    assert!(summary.contradictions.is_empty());
    assert_eq!(store.query_statuses(q).unwrap().1, None);
}

#[test]
fn contradictory_records_are_flagged_and_left_unknown() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/contra.smt2", "QF_LIA", "unknown");

    let e1 = store.create_evaluation("E1", None, None).unwrap();
    store
        .insert_results(&[
            result(e1, q, variant(&store, e1, "Z3"), Status::Sat),
            result(e1, q, variant(&store, e1, "CVC4"), Status::Sat),
        ])
        .unwrap();
    let e2 = store.create_evaluation("E2", None, None).unwrap();
    store
        .insert_results(&[
            result(e2, q, variant(&store, e2, "Yices"), Status::Unsat),
            result(e2, q, variant(&store, e2, "MathSAT"), Status::Unsat),
        ])
        .unwrap();

    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.contradictions, vec![q]);
    assert_eq!(summary.inferred(), 0);
    assert_eq!(store.query_statuses(q).unwrap().1, None);
}

#[test]
fn reruns_clear_inferences_the_new_data_no_longer_supports() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/rerun.smt2", "QF_LIA", "unknown");

    let e1 = store.create_evaluation("E1", None, None).unwrap();
    store
        .insert_results(&[
            result(e1, q, variant(&store, e1, "Z3"), Status::Sat),
            result(e1, q, variant(&store, e1, "CVC4"), Status::Sat),
        ])
        .unwrap();
    infer::infer_statuses(&store).unwrap();
    assert_eq!(store.query_statuses(q).unwrap().1, Some(Status::Sat));

    // a later ingestion contradicts the earlier consensus
    let e2 = store.create_evaluation("E2", None, None).unwrap();
    store
        .insert_results(&[
            result(e2, q, variant(&store, e2, "Yices"), Status::Unsat),
            result(e2, q, variant(&store, e2, "MathSAT"), Status::Unsat),
        ])
        .unwrap();
    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.contradictions, vec![q]);
    assert_eq!(store.query_statuses(q).unwrap().1, None);
}

#[test]
fn round_trip_inference_and_rating() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/foo.smt2", "QF_LIA", "unknown");

    let e1 = store.create_evaluation("E1", None, None).unwrap();
    let a = variant(&store, e1, "Z3");
    let b = variant(&store, e1, "CVC4");
    store
        .insert_results(&[
            result(e1, q, a, Status::Sat),
            result(e1, q, b, Status::Unknown),
        ])
        .unwrap();
    let e2 = store.create_evaluation("E2", None, None).unwrap();
    let c = variant(&store, e2, "Yices");
    store.insert_results(&[result(e2, q, c, Status::Sat)]).unwrap();

    // uncontested in E1, corroborated by a second solver in E2
    let summary = infer::infer_statuses(&store).unwrap();
    assert_eq!(summary.inferred_sat, 1);
    assert_eq!(store.query_statuses(q).unwrap().1, Some(Status::Sat));

    let rated = rating::compute_ratings(&store, e1).unwrap();
    assert_eq!(rated.rated_queries, 1);
    let rows = store.ratings_for_evaluation(e1).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].query, q);
    assert_eq!(rows[0].considered_solvers, 1);
    assert_eq!(rows[0].successful_solvers, 1);
    assert_eq!(rows[0].rating, 0.0);
}

#[test]
fn ratings_are_bounded_and_cleared_on_recompute() {
    let (store, registry) = setup();
    let easy = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/easy.smt2", "QF_LIA", "unknown");
    let hard = add_query(&store, &registry, "non-incremental/QF_LIA/2020-acme/hard.smt2", "QF_LIA", "unknown");

    let ev = store.create_evaluation("E1", None, None).unwrap();
    let z3 = variant(&store, ev, "Z3");
    let cvc4 = variant(&store, ev, "CVC4");
    store
        .insert_results(&[
            result(ev, easy, z3, Status::Sat),
            result(ev, easy, cvc4, Status::Sat),
            result(ev, hard, z3, Status::Unknown),
            result(ev, hard, cvc4, Status::Unknown),
        ])
        .unwrap();

    rating::compute_ratings(&store, ev).unwrap();
    let rows = store.ratings_for_evaluation(ev).unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!((0.0..=1.0).contains(&row.rating));
        assert_eq!(row.considered_solvers, 2);
    }
    // everyone solved easy, nobody solved hard
    assert_eq!(rows.iter().find(|r| r.query == easy).unwrap().rating, 0.0);
    assert_eq!(rows.iter().find(|r| r.query == hard).unwrap().rating, 1.0);

    // recomputing replaces rather than appends
    rating::compute_ratings(&store, ev).unwrap();
    assert_eq!(store.ratings_for_evaluation(ev).unwrap().len(), 2);
}

#[test]
fn logics_nobody_solved_produce_no_ratings() {
    let (store, registry) = setup();
    let q = add_query(&store, &registry, "non-incremental/QF_NRA/2020-acme/open.smt2", "QF_NRA", "unknown");

    let ev = store.create_evaluation("E1", None, None).unwrap();
    let z3 = variant(&store, ev, "Z3");
    store.insert_results(&[result(ev, q, z3, Status::Unknown)]).unwrap();

    let summary = rating::compute_ratings(&store, ev).unwrap();
    assert_eq!(summary.rated_queries, 0);
    assert_eq!(summary.skipped_logics, vec!["QF_NRA".to_string()]);
    assert!(store.ratings_for_evaluation(ev).unwrap().is_empty());
}
