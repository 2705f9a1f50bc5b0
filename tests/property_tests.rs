//! Property-based tests for the status guard rules, verifying invariants
//! across arbitrary item-status multisets.

use proptest::prelude::*;

use almoxarifado_api::{
    models::{ItemStatus, RequisitionStatus},
    services::requisition_status::ItemStatusTally,
};

fn item_status_strategy() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Pendente),
        Just(ItemStatus::Separado),
        Just(ItemStatus::Entregue),
        Just(ItemStatus::Parcial),
        Just(ItemStatus::EmFalta),
    ]
}

fn requisition_status_strategy() -> impl Strategy<Value = RequisitionStatus> {
    prop_oneof![
        Just(RequisitionStatus::Pendente),
        Just(RequisitionStatus::Aprovada),
        Just(RequisitionStatus::EmSeparacao),
        Just(RequisitionStatus::Separado),
        Just(RequisitionStatus::EmEntrega),
        Just(RequisitionStatus::Entregue),
        Just(RequisitionStatus::Cancelada),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn tally_totals_are_consistent(statuses in prop::collection::vec(item_status_strategy(), 0..16)) {
        let tally = ItemStatusTally::from_statuses(statuses.iter().copied());

        prop_assert_eq!(tally.total, statuses.len());
        // parcial items count toward the total only, so the categories can
        // undershoot but never overshoot.
        prop_assert!(
            tally.pending + tally.separated + tally.delivered + tally.out_of_stock <= tally.total
        );
    }

    #[test]
    fn a_transition_always_changes_the_status(
        statuses in prop::collection::vec(item_status_strategy(), 0..16),
        current in requisition_status_strategy(),
    ) {
        let tally = ItemStatusTally::from_statuses(statuses);
        if let Some(next) = tally.next_status(current) {
            prop_assert_ne!(next, current);
        }
    }

    #[test]
    fn guards_only_fire_from_workflow_stages(
        statuses in prop::collection::vec(item_status_strategy(), 0..16),
        current in requisition_status_strategy(),
    ) {
        let tally = ItemStatusTally::from_statuses(statuses);
        let from_workflow_stage = matches!(
            current,
            RequisitionStatus::Pendente
                | RequisitionStatus::EmSeparacao
                | RequisitionStatus::Separado
                | RequisitionStatus::EmEntrega
        );
        if !from_workflow_stage {
            prop_assert_eq!(tally.next_status(current), None);
        }
    }

    #[test]
    fn pendente_advances_exactly_when_items_pend(
        statuses in prop::collection::vec(item_status_strategy(), 0..16),
    ) {
        let tally = ItemStatusTally::from_statuses(statuses.iter().copied());
        let expected = statuses.iter().any(|s| *s == ItemStatus::Pendente);
        let fired = tally.next_status(RequisitionStatus::Pendente)
            == Some(RequisitionStatus::EmSeparacao);
        prop_assert_eq!(fired, expected);
    }

    #[test]
    fn separation_completes_only_without_pending_items(
        statuses in prop::collection::vec(item_status_strategy(), 1..16),
    ) {
        let tally = ItemStatusTally::from_statuses(statuses.iter().copied());
        if tally.next_status(RequisitionStatus::EmSeparacao)
            == Some(RequisitionStatus::Separado)
        {
            prop_assert_eq!(tally.pending, 0);
            prop_assert!(tally.separated > 0 || tally.out_of_stock > 0);
        }
    }

    #[test]
    fn full_delivery_is_required_to_complete(
        statuses in prop::collection::vec(item_status_strategy(), 1..16),
    ) {
        let tally = ItemStatusTally::from_statuses(statuses.iter().copied());
        if tally.next_status(RequisitionStatus::EmEntrega)
            == Some(RequisitionStatus::Entregue)
        {
            prop_assert_eq!(tally.delivered, tally.total);
            prop_assert!(statuses.iter().all(|s| *s == ItemStatus::Entregue));
        }
    }

    #[test]
    fn resolved_check_matches_the_closing_rule_domain(
        statuses in prop::collection::vec(item_status_strategy(), 0..16),
    ) {
        let all_resolved = !statuses.is_empty()
            && statuses.iter().all(ItemStatus::is_resolved);
        let by_hand = !statuses.is_empty()
            && statuses
                .iter()
                .all(|s| matches!(s, ItemStatus::Entregue | ItemStatus::EmFalta));
        prop_assert_eq!(all_resolved, by_hand);
    }
}
