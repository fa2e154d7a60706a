// Criterion benchmarks for TradeMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tradematch::core::{
    calculate_compatibility, parsing::ProfileSignals, scoring::score_signals, Matcher,
    AFCFTA_COUNTRIES, PRODUCT_CATEGORIES,
};
use tradematch::models::{ScoringWeights, TradeProfile, UserType};

const SIZES: [&str; 5] = ["micro", "small", "medium", "large", "enterprise"];

fn create_candidate(id: usize) -> TradeProfile {
    let product_a = PRODUCT_CATEGORIES[id % PRODUCT_CATEGORIES.len()].0;
    let product_b = PRODUCT_CATEGORIES[(id * 7) % PRODUCT_CATEGORIES.len()].0;
    let preferred = AFCFTA_COUNTRIES[(id * 3) % AFCFTA_COUNTRIES.len()];

    TradeProfile {
        id: id as i64 + 1,
        email: format!("importer{}@example.com", id),
        company_name: format!("Importer {}", id),
        user_type: UserType::Importer,
        country: AFCFTA_COUNTRIES[id % AFCFTA_COUNTRIES.len()].to_string(),
        is_verified: id % 3 == 0,
        is_active: true,
        created_at: None,
        business_description: None,
        products_services: Some(format!(r#"["{}", "{}"]"#, product_a, product_b)),
        annual_volume: None,
        company_size: Some(SIZES[id % SIZES.len()].to_string()),
        certifications: None,
        languages: Some(if id % 2 == 0 { "English" } else { "French, Arabic" }.to_string()),
        preferred_countries: Some(format!(r#"["{}", "Ghana"]"#, preferred)),
        contact_person: None,
        phone: None,
        website: None,
    }
}

fn create_subject() -> TradeProfile {
    TradeProfile {
        id: 0,
        email: "exporter@example.com".to_string(),
        company_name: "Africa Grains Export".to_string(),
        user_type: UserType::Exporter,
        country: "Ghana".to_string(),
        is_verified: true,
        is_active: true,
        created_at: None,
        business_description: None,
        products_services: Some(r#"["agricultural_products", "handicrafts_arts"]"#.to_string()),
        annual_volume: None,
        company_size: Some("medium".to_string()),
        certifications: None,
        languages: Some("English, French".to_string()),
        preferred_countries: Some(r#"["Nigeria", "Kenya", "Egypt"]"#.to_string()),
        contact_person: None,
        phone: None,
        website: None,
    }
}

fn bench_pair_scoring(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let subject = create_subject();
    let candidate = create_candidate(7);

    c.bench_function("calculate_compatibility", |b| {
        b.iter(|| calculate_compatibility(black_box(&subject), black_box(&candidate), &weights));
    });

    let subject_signals = ProfileSignals::from_profile(&subject);
    let candidate_signals = ProfileSignals::from_profile(&candidate);

    c.bench_function("score_signals_preparsed", |b| {
        b.iter(|| score_signals(black_box(&subject_signals), black_box(&candidate_signals), &weights));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let subject = create_subject();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<TradeProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_matches(
                        black_box(&subject),
                        black_box(candidates.clone()),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pair_scoring, bench_matching);

criterion_main!(benches);
