use pretty_assertions::assert_eq;
use serde_json::json;
use swarna_core::{
    fallback_dataset, filter_fallback, normalize_documents, normalize_hits, score_percent,
    DetailView, RawDocument, SearchRecord, SearchResponse,
};

fn parse(value: serde_json::Value) -> SearchResponse {
    serde_json::from_value(value).expect("valid search response")
}

#[test]
fn nested_service_hit_is_normalized() {
    let response = parse(json!({
        "query": "angklung",
        "results": [{
            "document": {
                "no": 17,
                "judul": "Angklung",
                "deskripsi": "Alat musik bambu",
                "gambar": "https://img.example/angklung.jpg",
                "kategori": "alat_musik",
                "asal_daerah": "Jawa Barat",
                "cara_main": "Digoyang",
                "link": "https://id.wikipedia.org/wiki/Angklung"
            },
            "tfidf_score": 0.42,
            "jaccard_score": 0.125
        }]
    }));

    let records = normalize_hits(response.results);

    assert_eq!(
        records,
        vec![SearchRecord {
            id: "17".to_string(),
            title: "Angklung".to_string(),
            description: "Alat musik bambu".to_string(),
            image_url: "https://img.example/angklung.jpg".to_string(),
            category: "alat_musik".to_string(),
            origin_region: Some("Jawa Barat".to_string()),
            usage_note: Some("Digoyang".to_string()),
            external_link: Some("https://id.wikipedia.org/wiki/Angklung".to_string()),
            score_tfidf: 0.42,
            score_jaccard: 0.125,
        }]
    );
}

#[test]
fn flat_and_legacy_shapes_agree() {
    let response = parse(json!({
        "results": [
            { "no": "a", "judul": "Kecak", "deskripsi": "Tari Bali", "gambar": "k.jpg",
              "kategori": "tarian", "score_tfidf": 0.3, "score_jaccard": 0.2 },
            { "id": "b", "title": "Kecak", "snippet": "Tari Bali", "image": "k.jpg",
              "category": "tarian", "score_tfidf": 0.3, "score_jaccard": 0.2 }
        ]
    }));

    let records = normalize_hits(response.results);

    assert_eq!(records.len(), 2);
    let strip_id = |record: &SearchRecord| SearchRecord {
        id: String::new(),
        ..record.clone()
    };
    assert_eq!(strip_id(&records[0]), strip_id(&records[1]));
    assert_eq!(records[0].description, "Tari Bali");
}

#[test]
fn duplicate_field_names_and_ids_are_tolerated() {
    let docs: Vec<RawDocument> = serde_json::from_value(json!([
        { "id": 1, "judul": "Adok", "kategori": "alat_musik", "category": "alat_musik" },
        { "id": 1, "judul": "Adok (copy)" },
        { "judul": "No id" }
    ]))
    .unwrap();

    let records = normalize_documents(docs);

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "#2"]);
    assert_eq!(records[0].category, "alat_musik");
    assert_eq!(records[1].category, "lainnya");
}

#[test]
fn missing_or_null_scores_become_zero() {
    let response = parse(json!({
        "results": [{ "document": { "no": 1, "judul": "Bedaya" }, "tfidf_score": null }]
    }));

    let records = normalize_hits(response.results);

    assert_eq!(records[0].score_tfidf, 0.0);
    assert_eq!(records[0].score_jaccard, 0.0);
}

#[test]
fn fallback_matches_title_or_description_case_insensitively() {
    let expected: Vec<_> = fallback_dataset()
        .iter()
        .filter(|record| {
            record.title.to_lowercase().contains("batik")
                || record.description.to_lowercase().contains("batik")
        })
        .cloned()
        .collect();

    let found = filter_fallback("BaTiK");

    assert_eq!(found, expected);
    let titles: Vec<_> = found.iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"Batik"));
    assert!(titles.contains(&"Kebaya"), "description match counts too");
}

#[test]
fn fallback_dataset_is_bundled_with_unique_ids() {
    let dataset = fallback_dataset();
    assert!(dataset.len() >= 10);
    let mut ids: Vec<_> = dataset.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), dataset.len());
    assert!(filter_fallback("   ").is_empty());
}

#[test]
fn single_score_hit_counts_as_tfidf() {
    let response = parse(json!({
        "results": [
            {"score": 0.42, "document": {"no": 3, "judul": "Batik"}},
            {"score": 0.9, "tfidf_score": 0.1, "document": {"no": 4, "judul": "Kecak"}}
        ]
    }));

    let records = normalize_hits(response.results);

    assert_eq!(records[0].id, "3");
    assert_eq!(records[0].score_tfidf, 0.42);
    assert_eq!(records[0].score_jaccard, 0.0);
    assert_eq!(records[1].score_tfidf, 0.1);
}

#[test]
fn score_percentage_is_capped() {
    assert_eq!(score_percent(1.0), 100.0);
    assert_eq!(score_percent(1.7), 100.0);
    assert_eq!(score_percent(0.25), 25.0);
    assert_eq!(score_percent(-0.3), 0.0);
    assert_eq!(score_percent(f64::NAN), 0.0);
}

#[test]
fn detail_view_shows_usage_note_only_for_instruments() {
    let angklung = &filter_fallback("angklung")[0];
    let detail = DetailView::from_record(angklung);
    assert_eq!(detail.category_label, "ALAT MUSIK");
    assert_eq!(detail.usage_note.as_deref(), Some("Digoyang"));

    let dancer = SearchRecord {
        category: "tarian".to_string(),
        usage_note: Some("Berputar".to_string()),
        score_jaccard: 3.0,
        ..angklung.clone()
    };
    let detail = DetailView::from_record(&dancer);
    assert_eq!(detail.usage_note, None);
    assert_eq!(detail.scores[1].percent, 100.0);
}
