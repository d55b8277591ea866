//! End-to-end planning over a small installation plan.

use u_logistics::config::PlannerConfig;
use u_logistics::models::{
    AttributeTable, Combination, Comparator, Instance, LogisticPhase, MetoceanSeries, Olc,
    OperationDescriptor, OperationSequence, OperationStrategy, Requirement, RequirementCatalog,
    UtmPoint,
};
use u_logistics::planner::{Planner, PlanningInput};
use u_logistics::scheduler::{FixedDistance, ScheduleError};
use u_logistics::selection::SelectionError;

fn ahts() -> AttributeTable {
    AttributeTable::new("AHTS")
        .with_row(
            Instance::new("Bourbon")
                .with("Bollard pull [t]", 180.0)
                .with("Transit speed [m/s]", 6.0)
                .with("Mob time [h]", 2.0),
        )
        .with_row(
            Instance::new("Skandi")
                .with("Bollard pull [t]", 120.0)
                .with("Transit speed [m/s]", 4.0)
                .with("Mob time [h]", 0.0),
        )
        .with_row(
            Instance::new("Old Tug")
                .with("Bollard pull [t]", 40.0)
                .with("Transit speed [m/s]", 3.0)
                .with("Mob time [h]", 0.0),
        )
}

fn rov() -> AttributeTable {
    AttributeTable::new("rov")
        .with_row(
            Instance::new("WC-12")
                .with("Depth rating [m]", 3000.0)
                .with("ROV class [-]", "Work class")
                .with("Mob time [h]", 1.0),
        )
        .with_row(
            Instance::new("IC-3")
                .with("Depth rating [m]", 300.0)
                .with("ROV class [-]", "Inspection class")
                .with("Mob time [h]", 1.0),
        )
}

fn csv() -> AttributeTable {
    AttributeTable::new("CSV").with_row(
        Instance::new("Seaway")
            .with("Deck loading [t/m^2]", 10.0)
            .with("Transit speed [m/s]", 5.0)
            .with("Mob time [h]", 3.0),
    )
}

fn port() -> UtmPoint {
    UtmPoint::new(500_000.0, 4_300_000.0, "29 S")
}

fn site() -> UtmPoint {
    UtmPoint::new(521_600.0, 4_300_000.0, "29 S")
}

fn mooring_phase() -> LogisticPhase {
    // 21.6 km at 6 m/s = 1 h; at 4 m/s = 1.5 h
    let ops = OperationSequence::new()
        .with_preparation(OperationDescriptor::vessel_lookup("Vessel mobilisation", "Mob time [h]"))
        .with_preparation(OperationDescriptor::equipment_lookup("ROV mobilisation", "Mob time [h]"))
        .with_sea(OperationDescriptor::distance("Transit to site", port(), site()))
        .with_sea(
            OperationDescriptor::fixed("Anchor drop", 1.0).with_olc(Olc::unconstrained().with_hs(2.0)),
        )
        .with_demobilization(OperationDescriptor::fixed("Demobilisation", 4.0));

    LogisticPhase::new("M_Drag")
        .with_description("Drag-embedment anchors")
        .with_strategy(
            OperationStrategy::new("ahts_rov")
                .with_combination(Combination::new().with_vessel(1, ahts()).with_equipment(1, rov()))
                .with_operations(ops),
        )
}

fn device_phase() -> LogisticPhase {
    let ops = OperationSequence::new()
        .with_preparation(OperationDescriptor::parameter("Assembly at port", "assembly duration [h]"))
        .with_sea(
            OperationDescriptor::fixed("Device lift", 2.0)
                .with_olc(Olc::unconstrained().with_hs(1.5).with_ws(12.0)),
        );

    LogisticPhase::new("Devices")
        .with_predecessor("M_Drag")
        .with_strategy(
            OperationStrategy::new("csv_lift")
                .with_combination(Combination::new().with_vessel(1, csv()))
                .with_operations(ops),
        )
        .with_strategy(
            // Nothing in the catalog can meet this strategy's requirements
            OperationStrategy::new("heavy_lift")
                .with_combination(Combination::new().with_vessel(1, ahts()))
                .with_operations(OperationSequence::new().with_sea(OperationDescriptor::fixed("Lift", 1.0))),
        )
}

fn metocean() -> MetoceanSeries {
    let hs = vec![
        1.0, 1.0, 3.0, 3.0, 1.0, 1.0, 1.0, 1.0, 2.5, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2,
    ];
    let ws = vec![
        5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 15.0, 5.0, 5.0, 5.0, 5.0,
    ];
    let time = (0..hs.len()).map(|i| i as f64).collect();
    MetoceanSeries::new(time, hs, ws)
}

fn input() -> PlanningInput {
    PlanningInput::new(vec![device_phase(), mooring_phase()], metocean())
        .with_requirements(
            "M_Drag",
            RequirementCatalog::new()
                .with_vessel("AHTS", Requirement::at_least("Bollard pull [t]", 100.0))
                .with_equipment("rov", Requirement::equal("ROV class [-]", "Work class")),
        )
        .with_requirements(
            "Devices",
            RequirementCatalog::new()
                .with_vessel("CSV", Requirement::at_least("Deck loading [t/m^2]", 5.0))
                .with_vessel("AHTS", Requirement::at_least("Bollard pull [t]", 500.0)),
        )
}

fn planner() -> Planner {
    Planner::new(PlannerConfig::new().with_parameter("assembly duration [h]", 1.0))
}

#[test]
fn test_two_phase_plan() {
    u_logistics::logging::init_test();
    let report = planner().run(&input()).unwrap();

    // Predecessor first, regardless of declaration order
    let order: Vec<&str> = report.phases.iter().map(|p| p.phase_id.as_str()).collect();
    assert_eq!(order, vec!["M_Drag", "Devices"]);

    // Mooring: 2 AHTS × 1 ROV after filtering
    let mooring = report.phase("M_Drag").unwrap();
    let s = mooring.strategy("ahts_rov").unwrap();
    assert_eq!(s.solutions.len(), 2);
    assert_eq!(s.solutions[0].instance_ids(), vec!["Bourbon", "WC-12"]);
    assert_eq!(s.solutions[1].instance_ids(), vec!["Skandi", "WC-12"]);
    assert_eq!(s.olc.max_hs, Some(2.0));

    // Bourbon: prep 2 + 1 = 3, sea 1 + 1 = 2 → window (4, 4), end 4 + 2 + 4 = 10
    let bourbon = s.solutions[0].schedule().unwrap();
    assert!((bourbon.preparation_duration - 3.0).abs() < 1e-9);
    assert!((bourbon.sea_duration - 2.0).abs() < 1e-9);
    assert_eq!(bourbon.window.start, 4.0);
    assert!((bourbon.waiting_time - 1.0).abs() < 1e-9);
    assert!((bourbon.end_time - 10.0).abs() < 1e-9);
    assert_eq!(bourbon.operations.len(), 5);

    // Skandi: prep 0 + 1 = 1, sea 1.5 + 1 = 2.5 → (0, 2) starts too early, (4, 4) hosts it
    let skandi = s.solutions[1].schedule().unwrap();
    assert!((skandi.end_time - 10.5).abs() < 1e-9);
    assert_eq!(mooring.end_time(), Some(10.0));

    // Devices start after mooring: 10 + 1 h assembly = 11
    let devices = report.phase("Devices").unwrap();
    assert_eq!(devices.phase_start, 10.0);
    let lift = devices.strategy("csv_lift").unwrap();
    let record = lift.solutions[0].schedule().unwrap();
    assert_eq!(record.start_time, 11.0);
    // Ws 15 at t = 11 breaks the Hs ≤ 1.5 run; (12, 4) hosts the 2 h lift
    assert_eq!(record.window.start, 12.0);
    assert!((record.waiting_time - 1.0).abs() < 1e-9);

    // Heavy lift: every combination dropped, nothing enumerated
    let heavy = devices.strategy("heavy_lift").unwrap();
    assert!(heavy.solutions.is_empty());
    assert!(matches!(
        heavy.dropped[0].reason,
        SelectionError::NoFeasibleCandidate { .. }
    ));
}

#[test]
fn test_failures_are_reported_not_discarded() {
    let mut input = input();
    // Drag phase sea work can no longer fit any window
    input.phases[1].strategies[0].operations.sea[1] =
        OperationDescriptor::fixed("Anchor drop", 20.0).with_olc(Olc::unconstrained().with_hs(2.0));

    let report = planner().run(&input).unwrap();
    let mooring = report.phase("M_Drag").unwrap();
    let s = mooring.strategy("ahts_rov").unwrap();
    assert_eq!(s.solutions.len(), 2);
    assert!(s.solutions.iter().all(|sol| matches!(
        sol.failure(),
        Some(ScheduleError::ScheduleInfeasible { .. })
    )));

    // Dependent phase is blocked but still reported
    let devices = report.phase("Devices").unwrap();
    let lift = devices.strategy("csv_lift").unwrap();
    assert!(matches!(
        lift.solutions[0].failure(),
        Some(ScheduleError::PredecessorUnscheduled { .. })
    ));

    let kpi = report.kpi();
    assert_eq!(kpi.scheduled, 0);
    assert_eq!(kpi.infeasible, 3);
    assert_eq!(kpi.weather_infeasible, 2);
    assert_eq!(kpi.dropped_combinations, 1);
    assert_eq!(kpi.completion_time, None);
}

#[test]
fn test_kpi_summary() {
    let report = planner().run(&input()).unwrap();
    let kpi = report.kpi();

    assert_eq!(kpi.strategies, 3);
    assert_eq!(kpi.solutions, 3);
    assert_eq!(kpi.scheduled, 3);
    assert_eq!(kpi.best_by_phase["M_Drag"].solution, 0);
    assert_eq!(kpi.best_by_phase["Devices"].strategy_id, "csv_lift");
    assert_eq!(kpi.completion_time, Some(14.0));
}

#[test]
fn test_custom_distance_provider() {
    // Every leg 43.2 km: 2 h for Bourbon, 3 h for Skandi
    let report = planner()
        .with_distance(FixedDistance::new(43.2))
        .run(&input())
        .unwrap();
    let s = report.phase("M_Drag").unwrap().strategy("ahts_rov").unwrap();
    let bourbon = s.solutions[0].schedule().unwrap();
    assert!((bourbon.sea_duration - 3.0).abs() < 1e-9);
}

#[test]
fn test_report_serializes() {
    let report = planner().run(&input()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: u_logistics::planner::PlanningReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phases.len(), 2);
    assert_eq!(back.phases[0].phase_id, "M_Drag");
    assert_eq!(back.kpi().scheduled, report.kpi().scheduled);
}

#[test]
fn test_input_from_json() {
    let json = serde_json::to_string(&input()).unwrap();
    let parsed: PlanningInput = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, input());
}

#[test]
fn test_unknown_comparator_drops_only_its_combination() {
    let mut input = input();
    input.requirements.insert(
        "Devices".into(),
        RequirementCatalog::new().with_vessel(
            "CSV",
            Requirement::new("Deck loading [t/m^2]", Comparator::from("gt".to_string()), 5.0),
        ),
    );
    let json = serde_json::to_string(&input).unwrap();
    assert!(json.contains("\"gt\""));
    let parsed: PlanningInput = serde_json::from_str(&json).unwrap();

    let report = planner().run(&parsed).unwrap();
    let lift = report.phase("Devices").unwrap().strategy("csv_lift").unwrap();
    assert!(lift.solutions.is_empty());
    assert!(matches!(
        &lift.dropped[0].reason,
        SelectionError::UnknownComparator { comparator, .. } if comparator == "gt"
    ));
    assert_eq!(report.phase("M_Drag").unwrap().end_time(), Some(10.0));
}
