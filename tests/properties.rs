use polars::prelude::*;
use proptest::prelude::*;
use sales_dashboard::dashboard::{select_page, Page};
use sales_dashboard::data::{coerce_number, DataProcessor, SchemaNormalizer};
use sales_dashboard::stats::Aggregator;

/// Cells mixing numbers, junk and blanks, the way hand-edited CSVs look.
fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (-50i32..200).prop_map(|v| Some(v.to_string())),
        (0.0f64..500.0).prop_map(|v| Some(format!("{v:.2}"))),
        "[p-z ]{0,6}".prop_map(Some),
        Just(None),
    ]
}

fn raw_frame(rows: &[(Option<String>, Option<String>, String)]) -> DataFrame {
    let volumes: Vec<Option<&str>> = rows.iter().map(|r| r.0.as_deref()).collect();
    let prices: Vec<Option<&str>> = rows.iter().map(|r| r.1.as_deref()).collect();
    let keys: Vec<&str> = rows.iter().map(|r| r.2.as_str()).collect();
    df!(
        "Sales Volume" => volumes,
        "price" => prices,
        "origin" => keys
    )
    .unwrap()
}

fn floats(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn coercion_is_total(raw in proptest::option::of(".*")) {
        let v = coerce_number(raw.as_deref());
        prop_assert!(v.is_finite());
    }

    #[test]
    fn clean_rows_are_positive_with_revenue(
        rows in proptest::collection::vec((cell(), cell(), "[A-C]"), 0..40)
    ) {
        let normalized = SchemaNormalizer::normalize(&raw_frame(&rows)).unwrap();
        let clean = DataProcessor::filter_and_derive(&normalized).unwrap();
        prop_assert!(clean.height() <= normalized.height());

        let volumes = floats(&clean, "Sales Volume");
        let prices = floats(&clean, "price");
        let revenue = floats(&clean, "Revenue");
        for i in 0..clean.height() {
            prop_assert!(volumes[i] > 0.0 && prices[i] > 0.0);
            prop_assert_eq!(revenue[i], volumes[i] * prices[i]);
        }

        let expected = rows
            .iter()
            .filter(|r| coerce_number(r.0.as_deref()) > 0.0 && coerce_number(r.1.as_deref()) > 0.0)
            .count();
        prop_assert_eq!(clean.height(), expected);
    }

    #[test]
    fn group_sum_is_non_increasing(
        rows in proptest::collection::vec((cell(), cell(), "[A-E]"), 0..40)
    ) {
        let normalized = SchemaNormalizer::normalize(&raw_frame(&rows)).unwrap();
        let clean = DataProcessor::filter_and_derive(&normalized).unwrap();
        let table = Aggregator::group_sum(&clean, "origin").unwrap();

        for pair in table.rows.windows(2) {
            prop_assert!(pair[0].sales_volume >= pair[1].sales_volume);
        }
        let total: f64 = table.rows.iter().map(|r| r.sales_volume).sum();
        let expected: f64 = floats(&clean, "Sales Volume").iter().sum();
        prop_assert!((total - expected).abs() < 1e-6);
        prop_assert!(Aggregator::group_sum(&clean, "not a column").unwrap().is_empty());
    }

    #[test]
    fn top_n_never_pads(n in 0usize..20, groups in 1usize..6) {
        let keys: Vec<String> = (0..groups).map(|g| format!("g{g}")).collect();
        let volumes: Vec<f64> = (0..groups).map(|g| (g + 1) as f64).collect();
        let df = df!("name" => keys, "Sales Volume" => volumes).unwrap();

        let top = Aggregator::top_n(&df, "name", n).unwrap();
        prop_assert_eq!(top.len(), n.min(groups));
    }

    #[test]
    fn select_page_is_total(path in ".*") {
        let page = select_page(&path);
        let expected = match path.as_str() {
            "/details" => Page::Details,
            "/advanced" => Page::Advanced,
            "/insights" => Page::Insights,
            _ => Page::Overview,
        };
        prop_assert_eq!(page, expected);
    }
}
