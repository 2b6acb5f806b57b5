use std::hint::black_box;

use chrono::{NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::clock::time_from_minute;
use slot_engine::{
    generate_end_candidates, generate_start_candidates, FreeSlotSet, SchedulerSettings,
};

fn bench_candidates(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 3, 16)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    // Every other 5-minute slot free through the working day.
    let free = FreeSlotSet::from_times((7 * 60..20 * 60).step_by(10).map(time_from_minute));

    for (name, settings) in [
        ("scheduler_30m", SchedulerSettings::scheduler()),
        ("dialog_5m", SchedulerSettings::booking_dialog()),
    ] {
        let config = settings.engine_config_for(date);
        c.bench_function(&format!("start_candidates/{name}"), |b| {
            b.iter(|| generate_start_candidates(black_box(&config), date, black_box(&free), now))
        });

        let start = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        c.bench_function(&format!("end_candidates/{name}"), |b| {
            b.iter(|| {
                generate_end_candidates(black_box(&config), date, black_box(&free), now, start)
            })
        });
    }
}

criterion_group!(benches, bench_candidates);
criterion_main!(benches);
