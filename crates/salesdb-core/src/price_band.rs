use rust_decimal::Decimal;
use serde::Serialize;

/// One bar of the price histogram. `upper` is inclusive; `None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub label: &'static str,
    pub upper: Option<u32>,
}

/// Histogram bands in display order.
pub const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand { label: "0 - 100", upper: Some(100) },
    PriceBand { label: "101 - 200", upper: Some(200) },
    PriceBand { label: "201 - 300", upper: Some(300) },
    PriceBand { label: "301 - 400", upper: Some(400) },
    PriceBand { label: "401 - 500", upper: Some(500) },
    PriceBand { label: "501 - 600", upper: Some(600) },
    PriceBand { label: "601 - 700", upper: Some(700) },
    PriceBand { label: "701 - 800", upper: Some(800) },
    PriceBand { label: "801 - 900", upper: Some(900) },
    PriceBand { label: "901 - above", upper: None },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBandCount {
    pub range: &'static str,
    pub count: i64,
}

impl PriceBand {
    /// Index into [`PRICE_BANDS`] of the first band whose inclusive upper
    /// bound admits `price`. Negative prices land in the first band.
    #[must_use]
    pub fn index_for(price: Decimal) -> usize {
        PRICE_BANDS
            .iter()
            .position(|band| band.upper.is_none_or(|upper| price <= Decimal::from(upper)))
            .unwrap_or(PRICE_BANDS.len() - 1)
    }
}

/// Counts `prices` per band. Always returns every band, in order.
#[must_use]
pub fn histogram<I>(prices: I) -> Vec<PriceBandCount>
where
    I: IntoIterator<Item = Decimal>,
{
    let mut counts = [0_i64; PRICE_BANDS.len()];
    for price in prices {
        counts[PriceBand::index_for(price)] += 1;
    }

    PRICE_BANDS
        .iter()
        .zip(counts)
        .map(|(band, count)| PriceBandCount {
            range: band.label,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(PriceBand::index_for(dec("100")), 0);
        assert_eq!(PriceBand::index_for(dec("100.01")), 1);
        assert_eq!(PriceBand::index_for(dec("200")), 1);
        assert_eq!(PriceBand::index_for(dec("900")), 8);
    }

    #[test]
    fn values_between_labels_take_the_next_band() {
        assert_eq!(PriceBand::index_for(dec("100.5")), 1);
    }

    #[test]
    fn large_prices_fall_into_open_band() {
        assert_eq!(PriceBand::index_for(dec("900.01")), 9);
        assert_eq!(PriceBand::index_for(dec("12000")), 9);
    }

    #[test]
    fn negative_and_zero_prices_fall_into_first_band() {
        assert_eq!(PriceBand::index_for(dec("0")), 0);
        assert_eq!(PriceBand::index_for(dec("-5")), 0);
    }

    #[test]
    fn histogram_keeps_all_bands_in_order() {
        let bars = histogram(vec![dec("50"), dec("150")]);
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0], PriceBandCount { range: "0 - 100", count: 1 });
        assert_eq!(bars[1], PriceBandCount { range: "101 - 200", count: 1 });
        assert!(bars[2..].iter().all(|b| b.count == 0));
        assert_eq!(bars[9].range, "901 - above");
    }

    #[test]
    fn histogram_counts_sum_to_input_len() {
        let prices: Vec<Decimal> = (0..57).map(|n| Decimal::from(n * 37)).collect();
        let total: i64 = histogram(prices.clone()).iter().map(|b| b.count).sum();
        assert_eq!(total, i64::try_from(prices.len()).unwrap());
    }

    #[test]
    fn histogram_serializes_range_and_count() {
        let bars = histogram(Vec::new());
        let json = serde_json::to_value(&bars[0]).expect("serialize");
        assert_eq!(json, serde_json::json!({ "range": "0 - 100", "count": 0 }));
    }
}
