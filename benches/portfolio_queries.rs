//! Benchmark suite for portfolio queries and interchange
//!
//! Measures the pending report, export and import over generated portfolios
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Portfolios are generated in memory with a spread of rent start dates,
//! balances and payment histories, so no fixture files are needed.

use chrono::{Days, NaiveDate};
use rent_ledger::core::portfolio::pending_report;
use rent_ledger::io::{read_tenants_csv, write_tenants_csv};
use rent_ledger::policy::MonthlyCycleGrace;
use rent_ledger::{Payment, Tenant, TenantMap};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

const SIZES: [usize; 3] = [100, 1_000, 100_000];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).expect("valid date")
}

fn portfolio(size: usize) -> TenantMap {
    (0..size)
        .map(|i| {
            let start = today()
                .checked_sub_days(Days::new((i % 400) as u64))
                .expect("date in range");
            let payments = (0..i % 4)
                .map(|p| Payment {
                    amount: Decimal::new(2500 + p as i64, 2),
                    date_paid: start,
                })
                .collect();
            let tenant = Tenant::from_parts(
                format!("555-{:04}", i % 10_000),
                (i % 10 != 0).then_some(start),
                Decimal::from(i % 900),
                None,
                payments,
            );
            (format!("tenant-{:06}", i), tenant)
        })
        .collect()
}

fn exported(tenants: &TenantMap) -> Vec<u8> {
    let mut output = Vec::new();
    write_tenants_csv(tenants, &mut output).expect("export failed");
    output
}

#[divan::bench(args = SIZES)]
fn pending(bencher: divan::Bencher, size: usize) {
    let tenants = portfolio(size);
    let policy = MonthlyCycleGrace::new(10);
    bencher.bench(|| pending_report(divan::black_box(&tenants), today(), &policy));
}

#[divan::bench(args = SIZES)]
fn export(bencher: divan::Bencher, size: usize) {
    let tenants = portfolio(size);
    bencher.bench(|| exported(divan::black_box(&tenants)));
}

#[divan::bench(args = SIZES)]
fn import(bencher: divan::Bencher, size: usize) {
    let csv = exported(&portfolio(size));
    bencher.bench(|| read_tenants_csv(divan::black_box(csv.as_slice())).expect("import failed"));
}
