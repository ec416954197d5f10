use std::cmp::Ordering;
use thiserror::Error;
use crate::models::{InvestmentResult, PricePoint};

/// Errors raised before any window is searched
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    #[error("Investment value must be a positive amount (got {0})")]
    InvalidPrincipal(f64),
    #[error("Price on {date} must be positive (got {price})")]
    NonPositivePrice {
        date: chrono::NaiveDate,
        price: f64,
    },
}

/// Profit of buying `principal` worth at `buy` and selling everything at `sell`
///
/// Fractional purchases are allowed: no lot-size rounding is applied.
fn window_profit(principal: f64, buy: f64, sell: f64) -> f64 {
    principal / buy * sell - principal
}

/// Exact value of a positive finite `f64` as `mantissa * 2^exponent`
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    }
}

/// Exact product of two positive finite prices, as `mantissa * 2^exponent`
fn exact_product(a: f64, b: f64) -> (u128, i32) {
    let (ma, ea) = decompose(a);
    let (mb, eb) = decompose(b);
    (ma as u128 * mb as u128, ea + eb)
}

fn cmp_exact((ma, ea): (u128, i32), (mb, eb): (u128, i32)) -> Ordering {
    // bit length plus exponent orders the magnitudes unless they share it
    let la = (128 - ma.leading_zeros()) as i32 + ea;
    let lb = (128 - mb.leading_zeros()) as i32 + eb;
    if la != lb {
        return la.cmp(&lb);
    }
    // same magnitude: the exponents differ by less than the 106 bits in use
    if ea >= eb {
        (ma << (ea - eb)).cmp(&mb)
    } else {
        ma.cmp(&(mb << (eb - ea)))
    }
}

/// Compare the returns `sell_a / buy_a` and `sell_b / buy_b` without rounding
///
/// The profit of a window is monotone in this ratio for any principal, and
/// unlike the rounded profit the ratio is strictly decreasing in the buy
/// price, so two different buys for one sell never tie.
fn cmp_return(buy_a: f64, sell_a: f64, buy_b: f64, sell_b: f64) -> Ordering {
    cmp_exact(exact_product(sell_a, buy_b), exact_product(sell_b, buy_a))
}

/// Reject inputs the search cannot give a meaningful answer for
fn validate(series: &[PricePoint], principal: f64) -> Result<(), OptimizerError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(OptimizerError::InvalidPrincipal(principal));
    }

    if let Some(bad) = series
        .iter()
        .find(|p| !p.price.is_finite() || p.price <= 0.0)
    {
        return Err(OptimizerError::NonPositivePrice {
            date: bad.date,
            price: bad.price,
        });
    }

    Ok(())
}

/// Whether `(buy, sell)` beats the best window so far
///
/// Only a sell strictly above the buy price counts as a window at all.
fn improves(series: &[PricePoint], best: Option<(usize, usize)>, buy: usize, sell: usize) -> bool {
    let (buy_price, sell_price) = (series[buy].price, series[sell].price);
    if sell_price <= buy_price {
        return false;
    }
    match best {
        None => true,
        Some((b, s)) => {
            cmp_return(buy_price, sell_price, series[b].price, series[s].price) == Ordering::Greater
        }
    }
}

fn build_result(
    series: &[PricePoint],
    principal: f64,
    best: Option<(usize, usize)>,
) -> Option<InvestmentResult> {
    best.map(|(buy, sell)| InvestmentResult {
        principal,
        profit: window_profit(principal, series[buy].price, series[sell].price),
        buy_date: series[buy].date,
        sell_date: series[sell].date,
        buy_price: series[buy].price,
        sell_price: series[sell].price,
    })
}

/// Find the most profitable buy/sell window in a single pass
///
/// Tracks the earliest cheapest observation seen so far and evaluates every
/// later observation as a sell against it. Returns `Ok(None)` when the series
/// has fewer than two points or no sell price exceeds an earlier buy price.
/// Ties resolve to the earliest buy date, then the earliest sell date.
///
/// Windows are ranked by their exact `sell / buy` ratio, so the chosen window
/// does not depend on the principal or on rounding of the profit.
pub fn find_best_investment(
    series: &[PricePoint],
    principal: f64,
) -> Result<Option<InvestmentResult>, OptimizerError> {
    validate(series, principal)?;

    if series.len() < 2 {
        return Ok(None);
    }

    let mut min_idx = 0;
    let mut best: Option<(usize, usize)> = None;

    for sell in 1..series.len() {
        if improves(series, best, min_idx, sell) {
            best = Some((min_idx, sell));
        }

        // strict: an equal price later on never displaces the earlier buy
        if series[sell].price < series[min_idx].price {
            min_idx = sell;
        }
    }

    Ok(build_result(series, principal, best))
}

/// Pairwise baseline for [`find_best_investment`]
///
/// Scans every `(buy, sell)` pair, buy ascending then sell ascending, keeping
/// only strictly better windows. Quadratic; the single pass must agree with it.
#[cfg(test)]
pub fn find_best_investment_pairwise(
    series: &[PricePoint],
    principal: f64,
) -> Result<Option<InvestmentResult>, OptimizerError> {
    validate(series, principal)?;

    let mut best: Option<(usize, usize)> = None;

    for buy in 0..series.len().saturating_sub(1) {
        for sell in (buy + 1)..series.len() {
            if improves(series, best, buy, sell) {
                best = Some((buy, sell));
            }
        }
    }

    Ok(build_result(series, principal, best))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn series_of(prices: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(start + Duration::days(i as i64), price))
            .collect()
    }

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_finds_late_dip_and_recovery() {
        let series = series_of(&[100.0, 90.0, 120.0, 80.0, 130.0]);
        let result = find_best_investment(&series, 1000.0).unwrap().unwrap();

        assert_eq!(result.buy_date, day(3));
        assert_eq!(result.sell_date, day(4));
        assert!((result.profit - 625.0).abs() < 1e-9);
        assert_eq!(result.principal, 1000.0);
        assert_eq!(result.buy_price, 80.0);
        assert_eq!(result.sell_price, 130.0);
    }

    #[test]
    fn test_decreasing_series_has_no_window() {
        let series = series_of(&[130.0, 120.0, 100.0]);
        assert_eq!(find_best_investment(&series, 500.0).unwrap(), None);
        assert_eq!(find_best_investment_pairwise(&series, 500.0).unwrap(), None);
    }

    #[test]
    fn test_short_series_has_no_window() {
        for principal in [0.01, 1.0, 1000.0, 1e9] {
            assert_eq!(find_best_investment(&[], principal).unwrap(), None);
            assert_eq!(find_best_investment(&series_of(&[250.0]), principal).unwrap(), None);
            assert_eq!(find_best_investment_pairwise(&series_of(&[250.0]), principal).unwrap(), None);
        }
    }

    #[test]
    fn test_flat_series_has_no_window() {
        let series = series_of(&[200.0, 200.0, 200.0, 200.0]);
        assert_eq!(find_best_investment(&series, 100.0).unwrap(), None);
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let series = series_of(&[1.0, 2.0]);
        assert_eq!(
            find_best_investment(&series, 0.0),
            Err(OptimizerError::InvalidPrincipal(0.0))
        );
        assert_eq!(
            find_best_investment_pairwise(&series, -5.0),
            Err(OptimizerError::InvalidPrincipal(-5.0))
        );
        assert!(find_best_investment(&series, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let series = series_of(&[10.0, 0.0, 12.0]);
        assert_eq!(
            find_best_investment(&series, 100.0),
            Err(OptimizerError::NonPositivePrice {
                date: day(1),
                price: 0.0
            })
        );
    }

    #[test]
    fn test_tie_prefers_earliest_buy() {
        // (0,1) and (2,3) both double the money
        let series = series_of(&[2.0, 4.0, 1.0, 2.0]);
        let result = find_best_investment(&series, 100.0).unwrap().unwrap();
        assert_eq!((result.buy_date, result.sell_date), (day(0), day(1)));
    }

    #[test]
    fn test_tie_prefers_earliest_sell() {
        let series = series_of(&[1.0, 1.0, 3.0, 3.0]);
        let result = find_best_investment(&series, 100.0).unwrap().unwrap();
        assert_eq!((result.buy_date, result.sell_date), (day(0), day(2)));
    }

    #[test]
    fn test_principal_does_not_change_window() {
        let series = series_of(&[263.5, 259.1, 270.8, 255.0, 281.3, 279.9]);
        let small = find_best_investment(&series, 150.0).unwrap().unwrap();
        let large = find_best_investment(&series, 42_000.0).unwrap().unwrap();

        assert_eq!(small.buy_date, large.buy_date);
        assert_eq!(small.sell_date, large.sell_date);
        assert!((small.return_ratio() - large.return_ratio()).abs() < 1e-12);
    }

    #[test]
    fn test_single_pass_matches_pairwise() {
        let mut rng = StdRng::seed_from_u64(0x60_1d);

        for round in 0..500 {
            let len = rng.gen_range(0..40);
            // a tiny price alphabet forces plenty of ties
            let prices: Vec<f64> = (0..len).map(|_| rng.gen_range(1..=6) as f64).collect();
            let principal = rng.gen_range(1..=10_000) as f64;
            let series = series_of(&prices);

            assert_eq!(
                find_best_investment(&series, principal),
                find_best_investment_pairwise(&series, principal),
                "round {} prices {:?}",
                round,
                prices
            );
        }
    }

    #[test]
    fn test_profit_rounding_collision_prefers_cheaper_buy() {
        // both buys round to the same profit on a principal of 1.0
        let series = series_of(&[236.65037654448224, 236.6503765444822, 526.4295143266321]);
        assert_eq!(
            window_profit(1.0, series[0].price, series[2].price),
            window_profit(1.0, series[1].price, series[2].price)
        );

        let fast = find_best_investment(&series, 1.0).unwrap().unwrap();
        let slow = find_best_investment_pairwise(&series, 1.0).unwrap().unwrap();

        assert_eq!(fast, slow);
        assert_eq!((fast.buy_date, fast.sell_date), (day(1), day(2)));
    }

    #[test]
    fn test_cmp_return_is_exact() {
        let (a, b) = (236.65037654448224, 236.6503765444822);
        let sell = 526.4295143266321;

        assert_eq!(cmp_return(b, sell, a, sell), Ordering::Greater);
        assert_eq!(cmp_return(a, sell, b, sell), Ordering::Less);
        assert_eq!(cmp_return(2.0, 4.0, 1.0, 2.0), Ordering::Equal);
        assert_eq!(cmp_return(3.0, 1.0, 1.0, 3.0), Ordering::Less);
        // subnormal and huge prices stay exact
        assert_eq!(cmp_return(f64::MIN_POSITIVE / 8.0, 1.0, 1.0, f64::MAX), Ordering::Greater);
        assert_eq!(cmp_return(5e-324, 1e-323, 1.0, 2.0), Ordering::Equal);
    }

    #[test]
    fn test_single_pass_matches_pairwise_on_neighbouring_floats() {
        let mut rng = StdRng::seed_from_u64(0xf10a7);

        for round in 0..300 {
            let base: f64 = rng.gen_range(100.0..400.0);
            let len = rng.gen_range(2..25);
            // prices a few ulps apart collide after rounding the profit
            let prices: Vec<f64> = (0..len)
                .map(|_| {
                    let scale = [1.0, 1.5, 2.0][rng.gen_range(0..3)];
                    f64::from_bits((base * scale).to_bits() + rng.gen_range(0..4u64))
                })
                .collect();
            let principal = [1.0, 3.0, 1000.0][rng.gen_range(0..3)];
            let series = series_of(&prices);

            assert_eq!(
                find_best_investment(&series, principal),
                find_best_investment_pairwise(&series, principal),
                "round {} prices {:?}",
                round,
                prices
            );
        }
    }

    #[test]
    fn test_single_pass_matches_pairwise_on_real_looking_prices() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let mut price = 250.0;
            let prices: Vec<f64> = (0..120)
                .map(|_| {
                    price = (price + rng.gen_range(-5.0..5.0_f64)).max(1.0);
                    (price * 100.0_f64).round() / 100.0
                })
                .collect();
            let series = series_of(&prices);

            assert_eq!(
                find_best_investment(&series, 1000.0),
                find_best_investment_pairwise(&series, 1000.0)
            );
        }
    }

    #[test]
    fn test_monotonic_decrease_agrees() {
        let prices: Vec<f64> = (1..=50).rev().map(|p| p as f64).collect();
        let series = series_of(&prices);
        assert_eq!(find_best_investment(&series, 10.0).unwrap(), None);
        assert_eq!(find_best_investment_pairwise(&series, 10.0).unwrap(), None);
    }
}
