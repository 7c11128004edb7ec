//! Signal classification.
//!
//! First matching rule wins. The order is load-bearing: the checks are not
//! mutually exclusive, and the earlier rules are the harder disqualifiers
//! (blacklist and risk-report verdicts before market heuristics, turnover
//! manipulation before depth/volume floors, floors before the momentum
//! window).

use std::collections::HashSet;

use crate::config::FilterParams;
use crate::domain::{Classification, MarketSnapshot, RiskReport, RiskStatus};

struct RuleCtx<'a> {
    snap: &'a MarketSnapshot,
    report: Option<&'a RiskReport>,
    filters: &'a FilterParams,
    blacklist: &'a HashSet<String>,
}

type Rule = fn(&RuleCtx<'_>) -> Option<Classification>;

const RULES: &[Rule] = &[
    blacklisted,
    rugcheck_verdict,
    bundled_supply,
    fake_volume,
    low_liquidity,
    low_volume,
    low_mcap,
    momentum_window,
];

/// Pure and deterministic: same inputs, same label, no side effects.
pub fn classify(
    snap: &MarketSnapshot,
    report: Option<&RiskReport>,
    filters: &FilterParams,
    blacklist: &HashSet<String>,
) -> Classification {
    let ctx = RuleCtx {
        snap,
        report,
        filters,
        blacklist,
    };
    RULES
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or(Classification::Unknown)
}

fn blacklisted(ctx: &RuleCtx<'_>) -> Option<Classification> {
    ctx.blacklist
        .contains(&ctx.snap.pair_address)
        .then_some(Classification::Blacklisted)
}

fn rugcheck_verdict(ctx: &RuleCtx<'_>) -> Option<Classification> {
    let report = ctx.report?;
    (report.status != RiskStatus::Good).then_some(Classification::RugcheckRisk)
}

fn bundled_supply(ctx: &RuleCtx<'_>) -> Option<Classification> {
    let report = ctx.report?;
    match report.bundle_ratio {
        Some(ratio) if ratio * 100.0 > ctx.filters.max_bundled_supply_pct => {
            Some(Classification::BundledSupply)
        }
        Some(_) => None,
        None if ctx.filters.missing_bundle_ratio_is_risk => Some(Classification::BundledSupply),
        None => None,
    }
}

fn fake_volume(ctx: &RuleCtx<'_>) -> Option<Classification> {
    let liq = ctx.snap.liquidity_usd;
    if liq <= 0.0 {
        return None;
    }
    let vlr = ctx.snap.volume_h24_usd / liq;
    (vlr > ctx.filters.max_vlr).then_some(Classification::FakeVolume)
}

fn low_liquidity(ctx: &RuleCtx<'_>) -> Option<Classification> {
    (ctx.snap.liquidity_usd < ctx.filters.min_liquidity_usd)
        .then_some(Classification::LowLiquidity)
}

fn low_volume(ctx: &RuleCtx<'_>) -> Option<Classification> {
    (ctx.snap.volume_h24_usd < ctx.filters.min_volume_h24_usd)
        .then_some(Classification::LowVolume)
}

fn low_mcap(ctx: &RuleCtx<'_>) -> Option<Classification> {
    match ctx.snap.market_cap_usd {
        Some(mcap) if mcap != 0.0 && mcap < ctx.filters.min_mcap_usd => {
            Some(Classification::LowMcap)
        }
        _ => None,
    }
}

fn momentum_window(ctx: &RuleCtx<'_>) -> Option<Classification> {
    // Meaningful but not parabolic growth; 5% and 50% are both excluded.
    match ctx.snap.price_change_m5_pct {
        Some(m5) if m5 != 0.0 && m5 > 5.0 && m5 < 50.0 => Some(Classification::GoodCandidate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> FilterParams {
        FilterParams::for_tests()
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            pair_address: "PAIR1".into(),
            token_address: "TOKEN1".into(),
            symbol: "TST".into(),
            liquidity_usd: 5000.0,
            volume_h24_usd: 10000.0,
            market_cap_usd: Some(50000.0),
            price_change_m5_pct: Some(10.0),
            price_usd: Some(1.0),
        }
    }

    fn good_report() -> RiskReport {
        RiskReport {
            status: RiskStatus::Good,
            bundle_ratio: Some(0.10),
        }
    }

    #[test]
    fn nominal_good_candidate() {
        let label = classify(&snapshot(), None, &filters(), &HashSet::new());
        assert_eq!(label, Classification::GoodCandidate);
    }

    #[test]
    fn blacklist_beats_everything() {
        let blacklist: HashSet<String> = ["PAIR1".to_string()].into_iter().collect();
        let label = classify(&snapshot(), Some(&good_report()), &filters(), &blacklist);
        assert_eq!(label, Classification::Blacklisted);
    }

    #[test]
    fn non_good_status_is_rugcheck_risk() {
        let report = RiskReport {
            status: RiskStatus::Flagged,
            bundle_ratio: None,
        };
        let label = classify(&snapshot(), Some(&report), &filters(), &HashSet::new());
        assert_eq!(label, Classification::RugcheckRisk);

        let report = RiskReport {
            status: RiskStatus::Unknown,
            bundle_ratio: None,
        };
        let label = classify(&snapshot(), Some(&report), &filters(), &HashSet::new());
        assert_eq!(label, Classification::RugcheckRisk);
    }

    #[test]
    fn good_status_with_small_bundle_passes() {
        // ratio 0.10 => 10% held, under the 25% ceiling
        let label = classify(&snapshot(), Some(&good_report()), &filters(), &HashSet::new());
        assert_eq!(label, Classification::GoodCandidate);
    }

    #[test]
    fn oversized_bundle_is_flagged() {
        let report = RiskReport {
            status: RiskStatus::Good,
            bundle_ratio: Some(0.30),
        };
        let label = classify(&snapshot(), Some(&report), &filters(), &HashSet::new());
        assert_eq!(label, Classification::BundledSupply);
    }

    #[test]
    fn missing_bundle_ratio_policy() {
        let report = RiskReport {
            status: RiskStatus::Good,
            bundle_ratio: None,
        };

        // Default policy: absent ratio passes through to the heuristics.
        let label = classify(&snapshot(), Some(&report), &filters(), &HashSet::new());
        assert_eq!(label, Classification::GoodCandidate);

        let mut strict = filters();
        strict.missing_bundle_ratio_is_risk = true;
        let label = classify(&snapshot(), Some(&report), &strict, &HashSet::new());
        assert_eq!(label, Classification::BundledSupply);
    }

    #[test]
    fn high_vlr_is_fake_volume_regardless_of_momentum() {
        let mut snap = snapshot();
        snap.liquidity_usd = 2000.0;
        snap.volume_h24_usd = 150000.0; // vlr = 75
        snap.price_change_m5_pct = Some(10.0);
        let label = classify(&snap, None, &filters(), &HashSet::new());
        assert_eq!(label, Classification::FakeVolume);
    }

    #[test]
    fn zero_liquidity_skips_vlr_and_hits_liquidity_floor() {
        let mut snap = snapshot();
        snap.liquidity_usd = 0.0;
        snap.volume_h24_usd = 100000.0;
        let label = classify(&snap, None, &filters(), &HashSet::new());
        assert_eq!(label, Classification::LowLiquidity);
    }

    #[test]
    fn floors_precede_growth_check() {
        // Thin and quiet pairs can never be candidates, whatever the m5 move.
        let mut snap = snapshot();
        snap.liquidity_usd = 0.0;
        snap.volume_h24_usd = 100.0;
        snap.price_change_m5_pct = Some(20.0);
        let label = classify(&snap, None, &filters(), &HashSet::new());
        assert_ne!(label, Classification::GoodCandidate);

        let mut snap = snapshot();
        snap.volume_h24_usd = 100.0;
        snap.price_change_m5_pct = Some(20.0);
        assert_eq!(
            classify(&snap, None, &filters(), &HashSet::new()),
            Classification::LowVolume
        );
    }

    #[test]
    fn small_nonzero_mcap_is_rejected() {
        let mut snap = snapshot();
        snap.market_cap_usd = Some(5000.0);
        let label = classify(&snap, None, &filters(), &HashSet::new());
        assert_eq!(label, Classification::LowMcap);
    }

    #[test]
    fn absent_or_zero_mcap_is_not_rejected() {
        let mut snap = snapshot();
        snap.market_cap_usd = None;
        assert_eq!(
            classify(&snap, None, &filters(), &HashSet::new()),
            Classification::GoodCandidate
        );

        snap.market_cap_usd = Some(0.0);
        assert_eq!(
            classify(&snap, None, &filters(), &HashSet::new()),
            Classification::GoodCandidate
        );
    }

    #[test]
    fn momentum_window_is_exclusive() {
        let mut snap = snapshot();
        for edge in [5.0, 50.0, 0.0, 3.0, 62.5] {
            snap.price_change_m5_pct = Some(edge);
            assert_eq!(
                classify(&snap, None, &filters(), &HashSet::new()),
                Classification::Unknown,
                "m5 change {edge} must not qualify"
            );
        }

        snap.price_change_m5_pct = None;
        assert_eq!(
            classify(&snap, None, &filters(), &HashSet::new()),
            Classification::Unknown
        );

        snap.price_change_m5_pct = Some(5.1);
        assert_eq!(
            classify(&snap, None, &filters(), &HashSet::new()),
            Classification::GoodCandidate
        );
    }
}
