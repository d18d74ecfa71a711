use smtbank_core::catalog;
use smtbank_core::extract::{parse_extractor_output, ExtractorOutput};
use smtbank_core::model::CheckOutcome;
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

fn extraction(logic: &str, incremental: bool, queries: usize) -> ExtractorOutput {
    let mut raw = String::from("[");
    for _ in 0..queries {
        raw.push_str(r#"{"status": "unknown"},"#);
    }
    raw.push_str(&format!(
        r#"{{"logic": "{logic}", "isIncremental": {incremental}, "category": "industrial", "queryCount": {queries}}}]"#
    ));
    parse_extractor_output(&raw).unwrap()
}

fn add(store: &Store, registry: &SolverRegistry, path: &str, logic: &str, queries: usize) -> i64 {
    let incremental = path.starts_with("incremental/");
    catalog::add_benchmark(
        store,
        registry,
        path,
        &extraction(logic, incremental, queries),
        CheckOutcome::Pass,
        CheckOutcome::Pass,
    )
    .unwrap()
}

#[test]
fn unique_filename_matches_despite_stale_family_and_logic() {
    let (store, registry) = setup();
    let id = add(&store, &registry, "non-incremental/QF_LIA/2020-acme/foo.smt2", "QF_LIA", 1);

    // The record carries a pre-reclassification logic and a renamed family
    // folder; the filename alone is still unique.
    let found = resolve::resolve_benchmark(&store, Some(false), "QF_AUFLIA", "acme", "foo.smt2")
        .unwrap();
    assert_eq!(found, Some(id));
}

#[test]
fn family_folder_narrows_filename_collisions() {
    let (store, registry) = setup();
    let a = add(&store, &registry, "non-incremental/QF_LIA/2020-acme/foo.smt2", "QF_LIA", 1);
    let b = add(&store, &registry, "non-incremental/QF_LRA/2019-other/foo.smt2", "QF_LRA", 1);

    let found =
        resolve::resolve_benchmark(&store, None, "QF_LIA", "2020-acme", "foo.smt2").unwrap();
    assert_eq!(found, Some(a));
    let found =
        resolve::resolve_benchmark(&store, None, "QF_LRA", "2019-other", "foo.smt2").unwrap();
    assert_eq!(found, Some(b));
}

#[test]
fn incremental_flag_narrows_within_a_family() {
    let (store, registry) = setup();
    let non_inc = add(&store, &registry, "non-incremental/QF_BV/sage/app.smt2", "QF_BV", 1);
    let inc = add(&store, &registry, "incremental/QF_BV/sage/app.smt2", "QF_BV", 3);

    let found = resolve::resolve_benchmark(&store, Some(false), "QF_BV", "sage", "app.smt2")
        .unwrap();
    assert_eq!(found, Some(non_inc));
    let found =
        resolve::resolve_benchmark(&store, Some(true), "QF_BV", "sage", "app.smt2").unwrap();
    assert_eq!(found, Some(inc));

    // Without the flag the pair stays ambiguous all the way down: both
    // candidates share family and logic. Never a guess.
    let found = resolve::resolve_benchmark(&store, None, "QF_BV", "sage", "app.smt2").unwrap();
    assert_eq!(found, None);
}

#[test]
fn logic_is_the_last_resort_key() {
    let (store, registry) = setup();
    let bv = add(&store, &registry, "non-incremental/QF_BV/sage/x.smt2", "QF_BV", 1);
    let abv = add(&store, &registry, "non-incremental/QF_ABV/sage/x.smt2", "QF_ABV", 1);

    let found =
        resolve::resolve_benchmark(&store, Some(false), "QF_ABV", "sage", "x.smt2").unwrap();
    assert_eq!(found, Some(abv));
    let found = resolve::resolve_benchmark(&store, Some(false), "QF_BV", "sage", "x.smt2").unwrap();
    assert_eq!(found, Some(bv));
}

#[test]
fn exact_duplicates_resolve_to_nothing() {
    let (store, registry) = setup();
    add(&store, &registry, "non-incremental/QF_LIA/2020-acme/dup.smt2", "QF_LIA", 1);
    add(&store, &registry, "non-incremental/QF_LIA/2020-acme/dup.smt2", "QF_LIA", 1);

    let found =
        resolve::resolve_benchmark(&store, Some(false), "QF_LIA", "2020-acme", "dup.smt2")
            .unwrap();
    assert_eq!(found, None);
}

#[test]
fn missing_benchmarks_resolve_to_nothing() {
    let (store, registry) = setup();
    add(&store, &registry, "non-incremental/QF_LIA/2020-acme/foo.smt2", "QF_LIA", 1);

    let found =
        resolve::resolve_benchmark(&store, None, "QF_LIA", "2020-acme", "withdrawn.smt2").unwrap();
    assert_eq!(found, None);
}

#[test]
fn query_resolution_distinguishes_tracks() {
    let (store, registry) = setup();
    add(&store, &registry, "non-incremental/QF_LIA/2020-acme/foo.smt2", "QF_LIA", 1);
    add(&store, &registry, "incremental/QF_BV/sage/multi.smt2", "QF_BV", 3);

    let sole = resolve::resolve_query(&store, Some(false), "QF_LIA", "2020-acme", "foo.smt2")
        .unwrap();
    assert!(sole.is_some());

    // incremental benchmarks have no sole query
    let none = resolve::resolve_query(&store, Some(true), "QF_BV", "sage", "multi.smt2").unwrap();
    assert_eq!(none, None);

    let q2 = resolve::resolve_query_at(&store, "QF_BV", "sage", "multi.smt2", 2).unwrap();
    assert!(q2.is_some());
    let q4 = resolve::resolve_query_at(&store, "QF_BV", "sage", "multi.smt2", 4).unwrap();
    assert_eq!(q4, None);
}
