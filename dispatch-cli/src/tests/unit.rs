//! Focused unit tests covering command configuration and execution.

use super::helpers::{
    IMPORT_DOCUMENT, Workspace, read_store, run_cli, write_seeded_store, write_utf8,
};
use super::*;
use crate::assign::AssignConfig;
use crate::courier::CourierConfig;
use crate::import::ImportConfig;
use crate::maintenance::{Collection, CollectionConfig};
use crate::optimize::OptimizeConfig;
use camino::Utf8PathBuf;
use dispatch_core::{BatchState, DispatchStore, OrderState, StoreError};
use dispatch_service::{AssignmentSummary, DispatchConfig, DispatchError};
use log::LevelFilter;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

fn assert_missing(err: CliError, expected_field: &str, expected_env: &str) {
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::no_file(None, Some("store.json"), ARG_IMPORT_PATH, ENV_IMPORT_PATH)]
#[case::no_store(Some("records.json"), None, ARG_STORE, ENV_IMPORT_STORE)]
fn import_requires_file_and_store(
    #[case] import_path: Option<&str>,
    #[case] store: Option<&str>,
    #[case] field: &'static str,
    #[case] env: &'static str,
) {
    let args = ImportArgs {
        import_path: import_path.map(Utf8PathBuf::from),
        store: store.map(Utf8PathBuf::from),
    };
    let err = ImportConfig::try_from(args).expect_err("missing field should error");
    assert_missing(err, field, env);
}

#[rstest]
#[case::show_collection(None, Some("store.json"), ARG_COLLECTION, ENV_SHOW_COLLECTION)]
#[case::show_store(Some(Collection::Orders), None, ARG_STORE, ENV_SHOW_STORE)]
fn show_requires_collection_and_store(
    #[case] collection: Option<Collection>,
    #[case] store: Option<&str>,
    #[case] field: &'static str,
    #[case] env: &'static str,
) {
    let args = ShowArgs {
        collection,
        store: store.map(Utf8PathBuf::from),
    };
    let err = CollectionConfig::try_from(args).expect_err("missing field should error");
    assert_missing(err, field, env);
}

#[rstest]
fn reset_names_its_own_environment_variables() {
    let args = ResetArgs {
        collection: Some(Collection::Batches),
        store: None,
    };
    let err = CollectionConfig::try_from(args).expect_err("missing store should error");
    assert_missing(err, ARG_STORE, ENV_RESET_STORE);

    let no_collection = ResetArgs {
        collection: None,
        store: Some(Utf8PathBuf::from("store.json")),
    };
    let err_collection =
        CollectionConfig::try_from(no_collection).expect_err("missing collection should error");
    assert_missing(err_collection, ARG_COLLECTION, ENV_RESET_COLLECTION);
}

#[rstest]
fn optimise_and_assign_require_a_store() {
    let optimise = OptimizeConfig::try_from(OptimizeArgs::default()).expect_err("no store");
    assert_missing(optimise, ARG_STORE, ENV_OPTIMIZE_STORE);
    let assign = AssignConfig::try_from(AssignArgs::default()).expect_err("no store");
    assert_missing(assign, ARG_STORE, ENV_ASSIGN_STORE);
}

#[rstest]
fn optimise_defaults_follow_the_dispatch_config() {
    let args = OptimizeArgs {
        store: Some(Utf8PathBuf::from("store.json")),
        ..OptimizeArgs::default()
    };
    let config = OptimizeConfig::try_from(args).expect("config should build");
    assert_eq!(config.dispatch, DispatchConfig::default());
    assert_eq!(config.store, Utf8PathBuf::from("store.json"));
}

#[rstest]
fn optimise_overrides_replace_defaults_individually() {
    let args = OptimizeArgs {
        store: Some(Utf8PathBuf::from("store.json")),
        groups: Some(5),
        iterations: None,
        seed: Some(17),
    };
    let config = OptimizeConfig::try_from(args).expect("config should build");
    assert_eq!(config.dispatch, DispatchConfig::new(5, 1_000, 17));
}

#[rstest]
fn optimise_layers_honour_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "store": "from-file.json", "groups": 7, "iterations": 50 }),
        None,
    );
    composer.push_environment(json!({ "store": "from-env.json", "groups": 4 }));
    composer.push_cli(json!({ "seed": 9 }));

    let config = optimize::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.store, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.dispatch, DispatchConfig::new(4, 50, 9));
}

#[rstest]
fn invalid_layers_map_to_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "groups": "many" }));

    let err = optimize::config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn import_layers_take_the_path_from_the_environment() {
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "import_path": "env.json", "store": "env-store.json" }));
    composer.push_cli(json!({ "store": "cli-store.json" }));

    let config =
        import::config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.import_path, Utf8PathBuf::from("env.json"));
    assert_eq!(config.store, Utf8PathBuf::from("cli-store.json"));
}

#[rstest]
fn show_layers_accept_lowercase_collections() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "collection": "batches", "store": "store.json" }), None);

    let config = maintenance::show_config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.collection, Collection::Batches);
}

#[rstest]
#[case(0, LevelFilter::Warn)]
#[case(1, LevelFilter::Info)]
#[case(2, LevelFilter::Debug)]
#[case(3, LevelFilter::Trace)]
#[case(9, LevelFilter::Trace)]
fn verbosity_selects_the_log_level(#[case] verbosity: u8, #[case] expected: LevelFilter) {
    assert_eq!(logging::level_filter(verbosity), expected);
}

#[rstest]
fn global_verbosity_follows_the_subcommand() {
    let cli = Cli::try_parse_from([
        "dispatch", "optimize", "--store", "s.json", "--groups", "2", "-vv",
    ])
    .expect("arguments should parse");
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Command::Optimize(args) => {
            assert_eq!(args.groups, Some(2));
            assert_eq!(args.store, Some(Utf8PathBuf::from("s.json")));
        }
        other => panic!("expected optimize, found {other:?}"),
    }
}

#[rstest]
fn unknown_collections_fail_to_parse() {
    let err = Cli::try_parse_from(["dispatch", "show", "parcels", "--store", "s.json"])
        .map_err(CliError::from)
        .expect_err("unknown collection");
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
fn import_then_duplicate_import_leaves_snapshot_alone() {
    let workspace = Workspace::new();
    let records = workspace.join("records.json");
    let store = workspace.join("state/store.json");
    write_utf8(&records, IMPORT_DOCUMENT.as_bytes());

    let mut stdout = Vec::new();
    run_cli(
        &["dispatch", "import", records.as_str(), "--store", store.as_str()],
        &mut stdout,
    )
    .expect("first import succeeds");
    let summary: serde_json::Value = serde_json::from_slice(&stdout).expect("summary JSON");
    assert_eq!(summary, json!({ "orders": 3, "couriers": 2 }));
    let imported = read_store(&store);

    let err = run_cli(
        &["dispatch", "import", records.as_str(), "--store", store.as_str()],
        &mut Vec::new(),
    )
    .expect_err("duplicates are rejected");
    match err {
        CliError::Import { path, .. } => assert_eq!(path, records),
        other => panic!("expected Import, found {other:?}"),
    }
    assert_eq!(read_store(&store), imported);
}

#[rstest]
fn full_round_trips_through_the_snapshot() {
    let workspace = Workspace::new();
    let store = workspace.join("store.json");
    write_seeded_store(&store, 2);

    let mut optimised = Vec::new();
    run_cli(
        &["dispatch", "optimize", "--store", store.as_str(), "--seed", "3"],
        &mut optimised,
    )
    .expect("optimise succeeds");
    let batches: Vec<dispatch_core::Batch> =
        serde_json::from_slice(&optimised).expect("batch JSON");
    assert_eq!(batches.len(), 3);

    let mut assigned = Vec::new();
    run_cli(&["dispatch", "assign", "--store", store.as_str()], &mut assigned)
        .expect("assign succeeds");
    let summary: AssignmentSummary = serde_json::from_slice(&assigned).expect("summary JSON");
    assert_eq!(summary.assignments.len(), 2);
    assert_eq!(summary.waiting_batches, 1);

    let snapshot = read_store(&store);
    let assigned_batches = snapshot
        .batches()
        .into_iter()
        .filter(|batch| batch.state == BatchState::Assigned)
        .count();
    assert_eq!(assigned_batches, 2);

    let mut reset = Vec::new();
    run_cli(
        &["dispatch", "reset", "orders", "--store", store.as_str()],
        &mut reset,
    )
    .expect("reset succeeds");
    let reset_summary: serde_json::Value = serde_json::from_slice(&reset).expect("reset JSON");
    assert_eq!(reset_summary, json!({ "collection": "orders", "count": 3 }));
    assert!(
        read_store(&store)
            .orders()
            .iter()
            .all(|order| order.state == OrderState::New)
    );
}

#[rstest]
fn optimising_twice_reports_no_new_orders() {
    let workspace = Workspace::new();
    let store = workspace.join("store.json");
    write_seeded_store(&store, 0);

    run_cli(&["dispatch", "optimize", "--store", store.as_str()], &mut Vec::new())
        .expect("first optimise succeeds");
    let err = run_cli(&["dispatch", "optimize", "--store", store.as_str()], &mut Vec::new())
        .expect_err("nothing left to optimise");
    match &err {
        CliError::Dispatch(DispatchError::NoEligibleOrders) => {}
        other => panic!("expected NoEligibleOrders, found {other:?}"),
    }
    assert_eq!(err.to_string(), "no new orders to optimise");
}

#[rstest]
fn show_prints_the_requested_collection() {
    let workspace = Workspace::new();
    let store = workspace.join("store.json");
    write_seeded_store(&store, 2);

    let mut stdout = Vec::new();
    run_cli(
        &["dispatch", "show", "couriers", "--store", store.as_str()],
        &mut stdout,
    )
    .expect("show succeeds");
    let text = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(text.ends_with("]\n"));
    let couriers: Vec<dispatch_core::Courier> = serde_json::from_str(&text).expect("courier JSON");
    let ids: Vec<u64> = couriers.iter().map(|c| c.courier_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[rstest]
fn courier_lookups_require_an_id_and_a_store() {
    let no_id = CourierArgs {
        courier_id: None,
        store: Some(Utf8PathBuf::from("store.json")),
    };
    let err = CourierConfig::try_from(no_id).expect_err("missing id should error");
    assert_missing(err, ARG_COURIER_ID, ENV_COURIER_ID);

    let no_store = CourierOrdersArgs {
        courier_id: Some(1),
        store: None,
    };
    let err_store = CourierConfig::try_from(no_store).expect_err("missing store should error");
    assert_missing(err_store, ARG_STORE, ENV_COURIER_ORDERS_STORE);
}

#[rstest]
fn courier_lookups_follow_assignment() {
    let workspace = Workspace::new();
    let store = workspace.join("store.json");
    write_seeded_store(&store, 2);
    run_cli(&["dispatch", "optimize", "--store", store.as_str()], &mut Vec::new())
        .expect("optimise succeeds");
    run_cli(&["dispatch", "assign", "--store", store.as_str()], &mut Vec::new())
        .expect("assign succeeds");

    let mut courier_out = Vec::new();
    run_cli(
        &["dispatch", "courier", "2", "--store", store.as_str()],
        &mut courier_out,
    )
    .expect("courier lookup succeeds");
    let courier: dispatch_core::Courier =
        serde_json::from_slice(&courier_out).expect("courier JSON");
    assert_eq!(courier.courier_id, 2);
    assert!(!courier.available);

    let mut orders_out = Vec::new();
    run_cli(
        &["dispatch", "courier-orders", "2", "--store", store.as_str()],
        &mut orders_out,
    )
    .expect("courier orders lookup succeeds");
    let orders: Vec<dispatch_core::Order> =
        serde_json::from_slice(&orders_out).expect("orders JSON");
    assert_eq!(orders.len(), 1);
    assert!(
        orders
            .iter()
            .all(|order| order.state == OrderState::Assigned && order.courier_id == Some(2))
    );
}

#[rstest]
fn unknown_couriers_are_reported() {
    let workspace = Workspace::new();
    let store = workspace.join("store.json");
    write_seeded_store(&store, 1);

    let err = run_cli(
        &["dispatch", "courier-orders", "9", "--store", store.as_str()],
        &mut Vec::new(),
    )
    .expect_err("courier 9 does not exist");
    match &err {
        CliError::Lookup(StoreError::UnknownCourier(9)) => {}
        other => panic!("expected UnknownCourier, found {other:?}"),
    }
    assert_eq!(err.to_string(), "courier 9 does not exist");
}
