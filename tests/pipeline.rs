use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use naminghound::core::config::{shared, Config, Settings};
use naminghound::core::session::Session;
use naminghound::index::entry::{SearchItemType, TypeFilter};
use naminghound::storage::export::{DatasetExporter, EXPORT_FILES};
use naminghound::storage::repository::DatasetRepository;
use naminghound::storage::resources::{BundledSource, DirectorySource, ResourceDatasetLoader};
use naminghound::storage::validator::DatasetValidator;

fn bundled_session(settings: Settings) -> Session {
    Session::new(Box::new(BundledSource), settings, Config::default())
}

#[test]
fn search_build_and_generate_from_bundled_dataset() {
    let mut session = bundled_session(Settings::default());

    let results = session.search("CUST_NO", None);
    assert_eq!(results[0].title, "고객번호");
    assert_eq!(results[0].item_type(), SearchItemType::Term);
    assert_eq!(results[0].selected_text(), "CUST_NO");

    let order = session.search("주문", Some(TypeFilter::only(SearchItemType::Word)));
    let amount = session.search("금액", Some(TypeFilter::only(SearchItemType::Word)));
    assert!(session.add_item_to_builder(&order[0]));
    assert!(session.add_item_to_builder(&amount[0]));
    assert_eq!(session.builder().build_name(), "ORD_AMT");

    let domain = session.search("금액N15", Some(TypeFilter::only(SearchItemType::Domain)));
    assert_eq!(domain[0].sub_text.as_deref(), Some("NUMERIC (15,2)"));
    session.add_builder_column(None, Some(&domain[0]));

    session.apply_settings(Settings { db_dialect: "MySQL".to_string(), ..session.settings() });
    assert_eq!(
        session.create_table_sql(Some("ORDERS")),
        "CREATE TABLE ORDERS (\n  ORD_AMT DECIMAL(15,2) COMMENT '주문 금액'\n);"
    );
}

#[test]
fn results_are_bounded_and_repeatable() {
    let session = bundled_session(Settings::default());
    for text in ["dt", "일자", "amt", "코드", "cutsomer"] {
        let first = session.search(text, None);
        let second = session.search(text, None);
        assert!(first.len() <= Config::default().default_limit);
        assert_eq!(first, second, "{text}");
        assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score), "{text}");
    }
}

#[test]
fn readers_never_observe_mismatched_catalog() {
    let settings = shared(Settings::default());
    let repository = DatasetRepository::new(Box::new(BundledSource), settings.clone());
    let small = r#"{"version": "9", "words": [{"koName": "고객", "abbr": "CUST"}]}"#;
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let catalog = repository.snapshot();
                    assert_eq!(catalog.index.len(), catalog.dataset.len());
                    for item in &catalog.index.items {
                        assert!(catalog.dataset.resolve(&item.payload).is_some());
                    }
                }
            });
        }

        for round in 0..40 {
            {
                let mut live = settings.write();
                live.use_custom_only = round % 2 == 0;
                live.custom_dataset_json = Some(small.to_string());
            }
            repository.reload();
        }
        done.store(true, Ordering::Relaxed);
    });

    assert_eq!(repository.snapshot().version, 40);
}

#[test]
fn merged_export_reloads_from_disk() {
    let custom = r#"{"version": "2", "words": [{"koName": "회원", "enName": "Member", "abbr": "MBR"}]}"#;
    let session = bundled_session(Settings {
        custom_dataset_json: Some(custom.to_string()),
        ..Settings::default()
    });
    let merged = session.repository().load();

    let buffer = session.export_merged(Cursor::new(Vec::new())).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();
    archive.extract(dir.path()).unwrap();
    for name in EXPORT_FILES {
        assert!(dir.path().join(name).exists(), "{name}");
    }

    let reloaded = ResourceDatasetLoader::new(&DirectorySource::new(dir.path())).load();
    assert_eq!(reloaded.terms, merged.terms);
    assert_eq!(reloaded.words, merged.words);
    assert_eq!(reloaded.domains, merged.domains);
    assert!(reloaded.words.iter().any(|w| w.abbr.as_deref() == Some("MBR")));
}

#[test]
fn base_export_matches_bundled_bytes() {
    let buffer = DatasetExporter::new()
        .write_base_zip(&BundledSource, Cursor::new(Vec::new()))
        .unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();
    let mut names: Vec<_> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["domains.json", "terms.json", "words.json"]);
}

#[test]
fn validator_reports_every_bad_entry_before_apply() {
    let json = r#"{"version": "1", "terms": [{"abbr": "A"}, {"abbr": "B"}], "domains": {}}"#;
    let result = DatasetValidator::new().validate(json);
    assert_eq!(result.errors.len(), 3);

    // An invalid override never replaces the base dataset
    let mut session = bundled_session(Settings::default());
    let before = session.repository().load();
    session.apply_settings(Settings { custom_dataset_json: Some(json.to_string()), ..session.settings() });
    assert_eq!(*session.repository().load(), *before);
}
