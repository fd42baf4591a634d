use chrono::NaiveDate;
use dividend_machine_core::models::fund::{
    available_funds, find_group, fund_groups, FundCategory, FundHolding,
};
use dividend_machine_core::models::plan::Plan;
use dividend_machine_core::models::registry::Registry;
use dividend_machine_core::models::simulation::SimulationPoint;
use std::collections::HashSet;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_funds(weights: [u32; 3]) -> Vec<FundHolding> {
    vec![
        FundHolding::new("1", "Global Equity Index Fund", FundCategory::Growth, 10.5, 1.2)
            .with_weight(weights[0]),
        FundHolding::new("2", "Total Return Bond Fund", FundCategory::Income, 12.1, -0.1)
            .with_weight(weights[1]),
        FundHolding::new("3", "Physical Precious Metals Fund", FundCategory::Hedge, 8.8, 0.5)
            .with_weight(weights[2]),
    ]
}

fn sample_plan() -> Plan {
    Plan::new("Core Income Portfolio", 1_000_000.0, 3, 15, sample_funds([30, 60, 10]))
}

// ═══════════════════════════════════════════════════════════════════
//  FundCategory
// ═══════════════════════════════════════════════════════════════════

mod fund_category {
    use super::*;

    #[test]
    fn display_growth() {
        assert_eq!(FundCategory::Growth.to_string(), "Growth");
    }

    #[test]
    fn display_income() {
        assert_eq!(FundCategory::Income.to_string(), "Income");
    }

    #[test]
    fn display_hedge() {
        assert_eq!(FundCategory::Hedge.to_string(), "Hedge");
    }

    #[test]
    fn serde_roundtrip_json() {
        for cat in [FundCategory::Growth, FundCategory::Income, FundCategory::Hedge] {
            let json = serde_json::to_string(&cat).unwrap();
            let back: FundCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(cat, back);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FundHolding & catalog
// ═══════════════════════════════════════════════════════════════════

mod fund {
    use super::*;

    #[test]
    fn new_starts_with_zero_weight() {
        let f = FundHolding::new("1", "Global Equity Index Fund", FundCategory::Growth, 10.5, 1.2);
        assert_eq!(f.weight, 0);
    }

    #[test]
    fn with_weight_sets_weight() {
        let f = FundHolding::new("2", "Total Return Bond Fund", FundCategory::Income, 12.1, -0.1)
            .with_weight(60);
        assert_eq!(f.weight, 60);
    }

    #[test]
    fn catalog_has_six_funds_with_unique_ids() {
        let funds = available_funds();
        assert_eq!(funds.len(), 6);
        let ids: HashSet<&str> = funds.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn catalog_navs_are_positive() {
        assert!(available_funds().iter().all(|f| f.nav > 0.0));
    }

    #[test]
    fn five_preset_groups() {
        assert_eq!(fund_groups().len(), 5);
    }

    #[test]
    fn every_group_references_catalog_funds() {
        let ids: HashSet<String> = available_funds().into_iter().map(|f| f.id).collect();
        for group in fund_groups() {
            for fund_id in &group.fund_ids {
                assert!(ids.contains(fund_id), "group {} references unknown fund {}", group.id, fund_id);
            }
        }
    }

    #[test]
    fn every_group_is_ordered_growth_income_hedge() {
        let catalog = available_funds();
        let category_of = |id: &str| {
            catalog.iter().find(|f| f.id == id).map(|f| f.category).unwrap()
        };
        for group in fund_groups() {
            assert_eq!(category_of(&group.fund_ids[0]), FundCategory::Growth);
            assert_eq!(category_of(&group.fund_ids[1]), FundCategory::Income);
            assert_eq!(category_of(&group.fund_ids[2]), FundCategory::Hedge);
        }
    }

    #[test]
    fn find_group_known_id() {
        let g = find_group("g1").unwrap();
        assert_eq!(g.name, "Core Income Portfolio");
    }

    #[test]
    fn find_group_unknown_id() {
        assert!(find_group("g99").is_none());
    }

    #[test]
    fn find_group_empty_id() {
        assert!(find_group("").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Plan
// ═══════════════════════════════════════════════════════════════════

mod plan {
    use super::*;

    #[test]
    fn new_defaults() {
        let p = sample_plan();
        assert!(p.is_safety_on);
        assert!(!p.is_manual_pause);
        assert_eq!(p.total_withdrawn, 0.0);
        assert_eq!(p.current_principal, p.initial_principal);
    }

    #[test]
    fn new_assigns_unique_ids() {
        let a = sample_plan();
        let b = sample_plan();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn weight_sum() {
        assert_eq!(sample_plan().weight_sum(), 100);
    }

    #[test]
    fn validate_ok() {
        assert!(sample_plan().validate().is_ok());
    }

    #[test]
    fn validate_rejects_rate_zero() {
        let mut p = sample_plan();
        p.redemption_rate = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_rate_eleven() {
        let mut p = sample_plan();
        p.redemption_rate = 11;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_day_zero() {
        let mut p = sample_plan();
        p.redemption_day = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_day_thirty_two() {
        let mut p = sample_plan();
        p.redemption_day = 32;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_two_funds() {
        let mut p = sample_plan();
        p.funds.pop();
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_weights_not_summing_to_100() {
        let mut p = sample_plan();
        p.funds[0].weight = 40; // 40 + 60 + 10 = 110
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Data integrity"));
    }

    #[test]
    fn projected_monthly_withdrawal() {
        let p = sample_plan();
        assert_eq!(p.projected_monthly_withdrawal(), 30_000.0);
    }

    #[test]
    fn projected_monthly_withdrawal_tracks_current_value() {
        let mut p = sample_plan();
        p.current_principal = 900_000.0;
        assert_eq!(p.projected_monthly_withdrawal(), 27_000.0);
    }

    #[test]
    fn live_performance_percent_counts_withdrawals_as_realized() {
        let mut p = sample_plan();
        p.current_principal = 1_050_000.0;
        p.total_withdrawn = 120_000.0;
        // (1,050,000 + 120,000 - 1,000,000) / 1,000,000 * 100
        assert!((p.live_performance_percent() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn live_performance_percent_zero_at_baseline() {
        let p = sample_plan();
        assert_eq!(p.live_performance_percent(), 0.0);
    }

    #[test]
    fn fund_amounts_are_weight_shares_of_initial() {
        let amounts = sample_plan().fund_amounts();
        assert_eq!(amounts.len(), 3);
        assert_eq!(amounts[0].1, 300_000.0);
        assert_eq!(amounts[1].1, 600_000.0);
        assert_eq!(amounts[2].1, 100_000.0);
    }

    #[test]
    fn serde_roundtrip_json() {
        let p = sample_plan();
        let json = serde_json::to_string(&p).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Plan::redemption_date
// ═══════════════════════════════════════════════════════════════════

mod redemption_date {
    use super::*;

    fn plan_with_day(day: u32) -> Plan {
        let mut p = sample_plan();
        p.redemption_day = day;
        p
    }

    #[test]
    fn same_month_uses_plan_day() {
        let p = plan_with_day(15);
        assert_eq!(p.redemption_date(d(2025, 1, 10), 0), d(2025, 1, 15));
    }

    #[test]
    fn advances_by_month_offset() {
        let p = plan_with_day(15);
        assert_eq!(p.redemption_date(d(2025, 1, 10), 3), d(2025, 4, 15));
    }

    #[test]
    fn crosses_year_boundary() {
        let p = plan_with_day(10);
        assert_eq!(p.redemption_date(d(2025, 11, 1), 2), d(2026, 1, 10));
    }

    #[test]
    fn day_31_clamps_in_april() {
        let p = plan_with_day(31);
        assert_eq!(p.redemption_date(d(2025, 1, 5), 3), d(2025, 4, 30));
    }

    #[test]
    fn day_31_clamps_in_february() {
        let p = plan_with_day(31);
        assert_eq!(p.redemption_date(d(2025, 1, 5), 1), d(2025, 2, 28));
    }

    #[test]
    fn day_31_clamps_in_leap_february() {
        let p = plan_with_day(31);
        assert_eq!(p.redemption_date(d(2024, 1, 5), 1), d(2024, 2, 29));
    }

    #[test]
    fn day_31_survives_in_long_months() {
        let p = plan_with_day(31);
        assert_eq!(p.redemption_date(d(2025, 1, 5), 0), d(2025, 1, 31));
        assert_eq!(p.redemption_date(d(2025, 1, 5), 2), d(2025, 3, 31));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SimulationPoint
// ═══════════════════════════════════════════════════════════════════

mod simulation_point {
    use super::*;

    #[test]
    fn serde_roundtrip_json() {
        let point = SimulationPoint {
            month: 7,
            principal: 954_321.0,
            withdrawn: 210_000.0,
            monthly_withdrawn: 28_630.0,
            is_paused: false,
            performance_percent: 16.4321,
        };
        let json = serde_json::to_string(&point).unwrap();
        let back: SimulationPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Registry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn new_is_empty_with_no_selection() {
        let r = Registry::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(r.selected.is_none());
        assert!(r.selected_plan().is_none());
    }

    #[test]
    fn get_finds_plan_by_id() {
        let mut r = Registry::new();
        let p = sample_plan();
        let id = p.id;
        r.plans.push(p);
        assert_eq!(r.get(id).unwrap().id, id);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let mut r = Registry::new();
        r.plans.push(sample_plan());
        assert!(r.get(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn get_mut_allows_in_place_edit() {
        let mut r = Registry::new();
        let p = sample_plan();
        let id = p.id;
        r.plans.push(p);
        r.get_mut(id).unwrap().name = "Renamed".into();
        assert_eq!(r.get(id).unwrap().name, "Renamed");
    }

    #[test]
    fn selected_plan_follows_selection() {
        let mut r = Registry::new();
        let p = sample_plan();
        let id = p.id;
        r.plans.push(p);
        r.plans.push(sample_plan());
        r.selected = Some(id);
        assert_eq!(r.selected_plan().unwrap().id, id);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut r = Registry::new();
        let first = sample_plan();
        let second = sample_plan();
        let (fid, sid) = (first.id, second.id);
        r.plans.push(first);
        r.plans.push(second);
        assert_eq!(r.plans[0].id, fid);
        assert_eq!(r.plans[1].id, sid);
    }
}
