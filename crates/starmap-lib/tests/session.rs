mod common;

use common::{fixture_dataset, fixture_explorer, ids};
use starmap_lib::{
    Candidates, ClickOutcome, Explorer, MapMode, PlannerConfig, PlanningStrategy, SelectionEvent,
    SelectionPhase, BACKGROUND_NODE_ID,
};

fn gateway_explorer(strategy: PlanningStrategy) -> Explorer {
    let mut explorer = fixture_explorer();
    explorer.set_mode(MapMode::Gateway);
    explorer.set_strategy(strategy);
    explorer
}

#[test]
fn explore_click_selects_system() {
    let mut explorer = fixture_explorer();
    assert_eq!(
        explorer.click(ids::KATOA),
        ClickOutcome::Selected(ids::KATOA.to_string())
    );
    assert_eq!(explorer.view().selected_system, Some(ids::KATOA));
}

#[test]
fn background_and_unknown_clicks_are_ignored() {
    for mode in [MapMode::Explore, MapMode::Navigation, MapMode::Gateway] {
        let mut explorer = fixture_explorer();
        explorer.set_mode(mode);
        assert_eq!(explorer.click(BACKGROUND_NODE_ID), ClickOutcome::Ignored);
        assert_eq!(explorer.click("not-a-system"), ClickOutcome::Ignored);
        assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
        assert!(explorer.view().route_endpoints.is_empty());
    }
}

#[test]
fn navigation_routes_on_second_click() {
    let mut explorer = fixture_explorer();
    explorer.set_mode(MapMode::Navigation);

    assert_eq!(
        explorer.click(ids::BENTEN),
        ClickOutcome::RoutePending(vec![ids::BENTEN.to_string()])
    );
    match explorer.click(ids::KATOA) {
        ClickOutcome::RouteFound(route) => assert_eq!(route.total_distance, 21.0),
        other => panic!("expected a route, got {other:?}"),
    }
    assert_eq!(explorer.view().route_straight_line, Some(20.0));

    // A third click starts a new query and drops the drawn route.
    explorer.click(ids::HORTUS);
    assert!(explorer.last_route().is_none());
    assert_eq!(explorer.view().route_endpoints, [ids::HORTUS.to_string()]);
}

#[test]
fn unreachable_route_draws_nothing() {
    let mut explorer = fixture_explorer();
    explorer.set_mode(MapMode::Navigation);
    explorer.click(ids::BENTEN);

    assert!(matches!(
        explorer.click(ids::ETHERWIND),
        ClickOutcome::RouteUnavailable { .. }
    ));
    assert!(explorer.last_route().is_none());
}

#[test]
fn leaving_navigation_clears_route() {
    let mut explorer = fixture_explorer();
    explorer.set_mode(MapMode::Navigation);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    assert!(explorer.last_route().is_some());

    explorer.set_mode(MapMode::Explore);
    assert!(explorer.last_route().is_none());
    assert!(explorer.view().route_endpoints.is_empty());
}

#[test]
fn single_strategy_plans_on_second_click() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);

    explorer.click(ids::BENTEN);
    assert!(matches!(explorer.candidates(), Candidates::Single(list) if list.len() == 3));

    match explorer.click(ids::MONTEM) {
        ClickOutcome::Planning {
            event: SelectionEvent::GatewayProposed(proposed),
            added,
        } => {
            assert_eq!(proposed.distance, 5.0);
            assert_eq!(added, vec![1]);
        }
        other => panic!("expected a proposed gateway, got {other:?}"),
    }
    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
    assert!(explorer.candidates().is_empty());
    assert_eq!(explorer.registry().planned()[0].source_name, "Benten");
}

#[test]
fn reclicking_origin_deselects_without_planning() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    let outcome = explorer.click(ids::BENTEN);

    assert!(matches!(
        outcome,
        ClickOutcome::Planning {
            event: SelectionEvent::OriginDeselected(_),
            ref added,
        } if added.is_empty()
    ));
    assert!(explorer.registry().is_empty());
    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
}

#[test]
fn reversed_pair_is_not_planned_twice() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    explorer.click(ids::MONTEM);
    explorer.click(ids::BENTEN);

    assert_eq!(explorer.registry().len(), 1);
}

#[test]
fn single_confirm_matches_clicking_the_candidate() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);

    assert!(explorer.confirm_candidate(ids::HORTUS).is_empty());
    assert_eq!(explorer.confirm_candidate(ids::PROMITOR), vec![1]);
    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
}

#[test]
fn dual_strategy_ranks_midpoints_and_confirms_both_legs() {
    let mut explorer = gateway_explorer(PlanningStrategy::Dual);
    explorer.click(ids::BENTEN);
    assert!(explorer.candidates().is_empty());
    assert_eq!(explorer.view().heatmap.len(), 5);

    explorer.click(ids::HORTUS);
    assert_eq!(explorer.selection().phase(), SelectionPhase::BothOriginsSet);
    assert!(matches!(explorer.candidates(), Candidates::Dual(list) if list.len() == 4));
    assert_eq!(explorer.view().heatmap["9b3a"], "hsl(120, 100%, 50%)");

    assert_eq!(explorer.confirm_candidate(ids::PROMITOR).len(), 2);
    assert!(explorer.registry().contains_pair(ids::BENTEN, ids::PROMITOR));
    assert!(explorer.registry().contains_pair(ids::PROMITOR, ids::HORTUS));
    assert!(explorer.confirm_candidate(ids::PROMITOR).is_empty());
    assert_eq!(explorer.registry().len(), 2);
}

#[test]
fn dual_confirm_skips_already_planned_leg() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    assert_eq!(explorer.registry().len(), 1);

    explorer.set_strategy(PlanningStrategy::Dual);
    explorer.click(ids::BENTEN);
    explorer.click(ids::HORTUS);
    let added = explorer.confirm_candidate(ids::MONTEM);

    assert_eq!(added.len(), 1);
    assert_eq!(explorer.registry().len(), 2);
}

#[test]
fn third_dual_click_restarts_selection() {
    let mut explorer = gateway_explorer(PlanningStrategy::Dual);
    explorer.click(ids::BENTEN);
    explorer.click(ids::HORTUS);

    assert!(matches!(
        explorer.click(ids::KATOA),
        ClickOutcome::Planning {
            event: SelectionEvent::SelectionRestarted(_),
            ..
        }
    ));
    assert_eq!(
        explorer.selection().origin_a().map(|s| s.id.as_str()),
        Some(ids::KATOA)
    );
    assert!(explorer.selection().origin_b().is_none());
}

#[test]
fn strategy_switch_keeps_origin_a() {
    let mut explorer = gateway_explorer(PlanningStrategy::Dual);
    explorer.click(ids::BENTEN);
    explorer.click(ids::HORTUS);

    explorer.set_strategy(PlanningStrategy::Single);
    assert_eq!(explorer.selection().phase(), SelectionPhase::OriginASet);
    assert!(matches!(explorer.candidates(), Candidates::Single(_)));
}

#[test]
fn toggling_gateway_mode_off_resets_selection_but_keeps_plans() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    explorer.click(ids::KATOA);

    assert_eq!(explorer.toggle_gateway_mode(), MapMode::Explore);
    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
    assert!(explorer.candidates().is_empty());
    assert!(explorer.view().heatmap.is_empty());
    assert_eq!(explorer.registry().len(), 1);
}

#[test]
fn remove_and_clear_all() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    explorer.click(ids::PROMITOR);
    explorer.click(ids::KATOA);
    assert_eq!(explorer.registry().len(), 2);

    assert!(explorer.remove_gateway(1));
    assert!(!explorer.remove_gateway(1));
    assert_eq!(explorer.registry().planned()[0].id, 2);

    explorer.click(ids::HORTUS);
    explorer.clear_all();
    assert!(explorer.registry().is_empty());
    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
}

#[test]
fn view_serializes_for_renderers() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);

    let json = serde_json::to_value(explorer.view()).expect("view serializes");
    assert_eq!(json["mode"], "gateway");
    assert_eq!(json["strategy"], "SINGLE");
    assert_eq!(json["candidates"]["strategy"], "single");
    assert_eq!(json["existing_gateways"][0]["targetId"], ids::HORTUS);
    assert_eq!(json["heatmap"][ids::MONTEM], "#228833");
}

#[test]
fn reload_resets_selection_and_keeps_captured_names() {
    let mut explorer = gateway_explorer(PlanningStrategy::Single);
    explorer.click(ids::BENTEN);
    explorer.click(ids::MONTEM);
    explorer.click(ids::KATOA);

    let mut dataset = fixture_dataset();
    dataset.existing_gateways.clear();
    explorer.reload(dataset);

    assert_eq!(explorer.selection().phase(), SelectionPhase::Idle);
    assert!(explorer.candidates().is_empty());
    assert!(explorer.existing_gateways().is_empty());
    assert_eq!(explorer.registry().planned()[0].target_name, "Montem");
    assert_eq!(explorer.planner_config(), &PlannerConfig::default());
}
