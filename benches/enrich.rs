use chrono::{Datelike, Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use clima::enrich;

fn synthetic_year() -> Vec<String> {
    let mut lines = vec![
        "LOCATION,Oakland Intl AP,CA,USA,TMY3,724930,37.72,-122.22,-8.0,3.0".to_string(),
        "DESIGN CONDITIONS,0".to_string(),
        "TYPICAL/EXTREME PERIODS,0".to_string(),
        "GROUND TEMPERATURES,0".to_string(),
        "HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0".to_string(),
        "COMMENTS 1,benchmark data".to_string(),
        "COMMENTS 2,".to_string(),
        "DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31".to_string(),
    ];
    let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
    for day in 0..365 {
        let date = start + Duration::days(day);
        for hour in 1..=24 {
            lines.push(format!(
                "2005,{},{},{hour},0,A7A7A7*0,20.0,15.0,50,101325,0,0,330,150,300,60,16000,28000,6000,4000,270,3.5,5,3,20,2000,9,999999999,15,0.1,0,88,0.2,0.0,0.0",
                date.month(),
                date.day(),
            ));
        }
    }
    lines
}

fn bench_enrich(c: &mut Criterion) {
    let lines = synthetic_year();
    c.bench_function("enrich_full_year", |b| {
        b.iter(|| enrich(black_box(&lines), black_box("bench.epw")))
    });
}

criterion_group!(benches, bench_enrich);
criterion_main!(benches);
