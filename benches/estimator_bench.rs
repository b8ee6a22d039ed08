use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sustainabuild::report::CarbonReport;
use sustainabuild::{BuildingInputs, EnergyBaseline, Estimator, FormulaVariant};

fn office_block(area: f64) -> BuildingInputs {
    BuildingInputs::new("office", area, "temperate")
        .with_program("residential")
        .with_material("concrete", 1200.0)
        .with_material("steel", 150.0)
        .with_embodied_energy(EnergyBaseline::Known(9000.0))
        .with_operational_energy(EnergyBaseline::unknown("existing-standard"))
}

fn bench_compute_scenarios(c: &mut Criterion) {
    let inputs = office_block(7500.0);

    for variant in [FormulaVariant::ReuseAware, FormulaVariant::MaterialAware] {
        let estimator = Estimator::new(variant);
        c.bench_function(&format!("compute_scenarios_{}", variant.key()), |b| {
            b.iter(|| estimator.compute_scenarios(black_box(&inputs)))
        });
    }
}

fn bench_batch(c: &mut Criterion) {
    let buildings: Vec<BuildingInputs> = (1..=1000).map(|i| office_block(i as f64 * 25.0)).collect();
    let estimator = Estimator::default();

    c.bench_function("estimate_batch_1000_buildings", |b| {
        b.iter(|| estimator.estimate_batch(black_box(&buildings)))
    });
}

fn bench_report(c: &mut Criterion) {
    let inputs = office_block(7500.0);
    let result = match Estimator::default().compute_scenarios(&inputs) {
        Ok(result) => result,
        Err(err) => panic!("estimate failed: {}", err),
    };

    c.bench_function("report_markdown", |b| {
        b.iter(|| CarbonReport::new(black_box(&result), &inputs).to_markdown())
    });
}

criterion_group!(benches, bench_compute_scenarios, bench_batch, bench_report);
criterion_main!(benches);
