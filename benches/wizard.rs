//! Criterion benchmarks for the patent vault wizard.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nanofi::prelude::*;

fn filled_draft(id: SectionId) -> SectionDraft {
    let mut d = SectionDraft::new(id);
    for f in section_fields(id) {
        match f.kind {
            FieldKind::Text => d.set_text(f.key, "Self-healing concrete"),
            FieldKind::Email => d.set_text(f.key, "ada@example.com"),
            FieldKind::Number { min } => d.set_text(f.key, format!("{}", min + 1000.0)),
            FieldKind::Percent => d.set_text(f.key, "25"),
            FieldKind::Date => d.set_text(f.key, "2023-11-02"),
            FieldKind::LongText { min_len } => d.set_text(f.key, "a".repeat(min_len * 4)),
            FieldKind::Choice(options) => d.set_text(f.key, options[0]),
            FieldKind::Symbol => d.set_text(f.key, "CRETE"),
            FieldKind::Toggle => d.set_flag(f.key, true),
        }
    }
    d
}

fn walk(wizard: &mut Wizard, drafts: &[SectionDraft]) {
    for d in drafts {
        wizard.apply_form(d);
        let _ = wizard.continue_from(d.section());
    }
}

/// One full pass: fill every section, advance, submit into memory.
fn bench_full_run(c: &mut Criterion) {
    let drafts: Vec<_> = SectionId::all().map(filled_draft).collect();
    let auth = AuthState::signed_in(User {
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
    });

    c.bench_function("wizard_full_run", |b| {
        b.iter(|| {
            let mut vault = VaultStorage::new(MemoryStore::new(), &AppConfig::default());
            let mut wizard = Wizard::new();
            walk(&mut wizard, &drafts);
            black_box(wizard.submit(&mut vault, &auth).is_ok())
        });
    });
}

/// Submitting into a vault that already holds `n` applications.
fn bench_submit_into_vault(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_vault_size");
    let drafts: Vec<_> = SectionId::all().map(filled_draft).collect();
    let auth = AuthState::anonymous();

    for size in [0usize, 10, 100, 500].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut vault = VaultStorage::new(MemoryStore::new(), &AppConfig::default());
            for _ in 0..size {
                let mut w = Wizard::new();
                walk(&mut w, &drafts);
                let _ = w.submit(&mut vault, &auth);
            }
            let mut ready = Wizard::new();
            walk(&mut ready, &drafts);

            b.iter(|| {
                let mut w = ready.clone();
                black_box(w.submit(&mut vault, &auth).is_ok())
            });
        });
    }

    group.finish();
}

/// Validating and snapshotting a single section draft.
fn bench_section_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_validate");
    for id in SectionId::all() {
        let draft = filled_draft(id);
        group.bench_with_input(BenchmarkId::from_parameter(id), &draft, |b, d| {
            b.iter(|| black_box((d.validate(), d.snapshot())))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_full_run,
    bench_submit_into_vault,
    bench_section_validate
);
criterion_main!(benches);
