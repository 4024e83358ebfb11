//! Benchmarks for district sorting and table building
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use statewise_core::{
    sort_districts, Column, DistrictMap, DistrictMetrics, SortDirection, SortState, StateWiseData,
    TableView,
};

fn create_test_districts(count: usize) -> DistrictMap {
    let mut districts: DistrictMap = (0..count)
        .map(|i| {
            // Mix numeric and string values the way upstream payloads do
            let metrics = if i % 3 == 0 {
                DistrictMetrics::new().with("confirmed", format!("{}", (i * 37) % 1000))
            } else {
                DistrictMetrics::new().with("confirmed", ((i * 37) % 1000) as i64)
            };
            (format!("District {:05}", i), metrics.with("recovered", (i % 50) as i64))
        })
        .collect();
    districts.insert("Unknown".to_string(), DistrictMetrics::new().with("confirmed", 5000));
    districts
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_districts");

    for size in [10, 100, 1000] {
        let districts = create_test_districts(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("desc_{}", size), |b| {
            b.iter(|| sort_districts(black_box(&districts), SortDirection::Descending, "confirmed"))
        });

        group.bench_function(format!("asc_{}", size), |b| {
            b.iter(|| sort_districts(black_box(&districts), SortDirection::Ascending, "confirmed"))
        });
    }

    group.finish();
}

fn bench_header_click(c: &mut Criterion) {
    let districts = create_test_districts(200);

    c.bench_function("header_click_toggle_200", |b| {
        let mut state = SortState::new(&districts);
        b.iter(|| state.on_header_click(black_box("confirmed"), &districts))
    });

    c.bench_function("header_click_switch_key_200", |b| {
        let mut state = SortState::new(&districts);
        let keys = ["confirmed", "recovered"];
        let mut i = 0;
        b.iter(|| {
            i += 1;
            state.on_header_click(black_box(keys[i % 2]), &districts)
        })
    });
}

fn bench_table_view(c: &mut Criterion) {
    let districts = create_test_districts(200);
    let state = SortState::new(&districts);
    let columns = [Column::confirmed(), Column::for_key("recovered")];

    c.bench_function("table_view_build_200", |b| {
        b.iter(|| TableView::build(black_box(&districts), &state, &columns, false))
    });
}

fn bench_payload_parse(c: &mut Criterion) {
    let states: Vec<serde_json::Value> = (0..36)
        .map(|s| {
            let districts: serde_json::Map<String, serde_json::Value> = (0..30)
                .map(|d| {
                    (
                        format!("District {}", d),
                        serde_json::json!({ "confirmed": if d % 2 == 0 { serde_json::json!(d * 11) } else { serde_json::json!(format!("{}", d * 11)) } }),
                    )
                })
                .collect();
            serde_json::json!({
                "state": format!("State {}", s),
                "confirmed": s * 100,
                "districts": districts,
            })
        })
        .collect();
    let document = serde_json::json!({ "statewise": states }).to_string();

    let mut group = c.benchmark_group("payload");
    group.throughput(Throughput::Bytes(document.len() as u64));
    group.bench_function("parse_statewise", |b| {
        b.iter(|| serde_json::from_str::<StateWiseData>(black_box(&document)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sort,
    bench_header_click,
    bench_table_view,
    bench_payload_parse
);
criterion_main!(benches);
