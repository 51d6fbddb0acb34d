//! Integration tests for casebase loading.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use casekit::{CaseView, DataFrame, Error, Loader, Value, load_dataframe, load_path};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

mod folder_loading {
    use super::*;

    #[test]
    fn test_json_files_keyed_by_file_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", r#"{"make": "vw", "doors": 5}"#);
        write(dir.path(), "b.json", r#"{"make": "bmw", "doors": 3}"#);

        let cb = load_path(dir.path(), None).unwrap();

        assert_eq!(cb.names().collect::<Vec<_>>(), vec!["a.json", "b.json"]);
        assert_eq!(cb["a.json"].get("make"), Some(&Value::from("vw")));
        assert_eq!(cb["b.json"].get("doors"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_mixed_formats_and_nested_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.txt", "free text case");
        write(dir.path(), "nested/deeper/car.yaml", "make: vw\n");
        write(dir.path(), "nested/car.toml", "make = \"audi\"\n");
        write(dir.path(), "nested/rows.csv", "a,b\n1,2\n");

        let cb = load_path(dir.path(), None).unwrap();

        assert_eq!(cb.len(), 4);
        assert_eq!(cb["notes.txt"], Value::from("free text case"));
        assert_eq!(cb["car.yaml"].get("make"), Some(&Value::from("vw")));
        assert_eq!(cb["car.toml"].get("make"), Some(&Value::from("audi")));
        assert_eq!(
            cb["rows.csv"].get("0").and_then(|row| row.get("b")),
            Some(&Value::from("2"))
        );
    }

    #[test]
    fn test_each_file_uses_its_own_extension() {
        // The directory's own suffix must not select the parser.
        let root = TempDir::new().unwrap();
        let dir = root.path().join("cases.json");
        write(&dir, "plain.txt", "not json at all");
        write(&dir, "doc.yaml", "kind: yaml\n");

        let cb = load_path(&dir, None).unwrap();

        assert_eq!(cb["plain.txt"], Value::from("not json at all"));
        assert_eq!(cb["doc.yaml"].get("kind"), Some(&Value::from("yaml")));
    }

    #[test]
    fn test_unrecognized_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "case.json", "{}");
        write(dir.path(), "image.png", "binary");
        write(dir.path(), "README", "no extension");

        let cb = load_path(dir.path(), None).unwrap();
        assert_eq!(cb.names().collect::<Vec<_>>(), vec!["case.json"]);
    }

    #[test]
    fn test_only_unrecognized_files_is_unsupported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "image.png", "binary");
        write(dir.path(), "data.xml", "<a/>");

        let err = load_path(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { extension: None, .. }));
    }

    #[test]
    fn test_empty_directory_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let err = load_path(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_pattern_restricts_scan() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "top.json", "{}");
        write(dir.path(), "sub/inner.json", "{}");
        write(dir.path(), "sub/inner.txt", "text");

        let top_only = load_path(dir.path(), Some("*.json")).unwrap();
        assert_eq!(top_only.names().collect::<Vec<_>>(), vec!["top.json"]);

        let text_only = load_path(dir.path(), Some("**/*.txt")).unwrap();
        assert_eq!(text_only.names().collect::<Vec<_>>(), vec!["inner.txt"]);
    }

    #[test]
    fn test_one_bad_file_aborts_the_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.json", "{}");
        write(dir.path(), "bad.json", "{ broken");

        let err = load_path(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{}");
        let err = load_path(dir.path(), Some("[")).unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_same_name_in_subdirectories_later_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/case.txt", "from a");
        write(dir.path(), "b/case.txt", "from b");

        let cb = load_path(dir.path(), None).unwrap();
        assert_eq!(cb.len(), 1);
        assert_eq!(cb["case.txt"], Value::from("from b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "top.json", r#"{"v": 1}"#);
        write(dir.path(), "locked/inner.json", r#"{"v": 2}"#);
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = load_path(dir.path(), None);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Privileged users can still read the directory, so only the
        // readable file is asserted.
        let cb = result.unwrap();
        assert_eq!(cb["top.json"].get("v"), Some(&Value::Integer(1)));
    }
}

mod file_loading {
    use super::*;

    #[test]
    fn test_csv_cases_keep_row_order() {
        let dir = TempDir::new().unwrap();
        let mut content = String::from("zeta,alpha\n");
        for i in 0..12 {
            content.push_str(&format!("z{i},a{i}\n"));
        }
        write(dir.path(), "rows.csv", &content);

        let cb = load_path(dir.path().join("rows.csv"), None).unwrap();

        let expected: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        assert_eq!(cb.names().map(str::to_string).collect::<Vec<_>>(), expected);
        let columns: Vec<_> = cb["11"].as_mapping().unwrap().keys().collect();
        assert_eq!(columns, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_csv_rows_keyed_by_index() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "people.csv", "name,age\nalice,30\nbob,41\n");

        let cb = load_path(dir.path().join("people.csv"), None).unwrap();

        assert_eq!(cb.names().collect::<Vec<_>>(), vec!["0", "1"]);
        let row0 = cb["0"].as_mapping().unwrap();
        assert_eq!(row0.len(), 2);
        assert_eq!(row0["name"], Value::from("alice"));
        assert_eq!(row0["age"], Value::from("30"));
    }

    #[test]
    fn test_yaml_multi_document_last_write_wins() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "cases.yaml",
            "golf:\n  doors: 5\npolo:\n  doors: 3\n---\ngolf:\n  doors: 3\n",
        );

        let cb = load_path(dir.path().join("cases.yaml"), None).unwrap();
        assert_eq!(cb.len(), 2);
        assert_eq!(cb["golf"].get("doors"), Some(&Value::Integer(3)));
        assert_eq!(cb["polo"].get("doors"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_yml_spelling() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.yml", "a: 1\n");
        let cb = load_path(dir.path().join("cases.yml"), None).unwrap();
        assert_eq!(cb["a"], Value::Integer(1));
    }

    #[test]
    fn test_json_object_keys_are_case_names() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.json", r#"{"x": {"v": 1}, "y": {"v": 2}}"#);
        let cb = load_path(dir.path().join("cases.json"), None).unwrap();
        assert_eq!(cb.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_json_array_keyed_by_position() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.json", r#"[{"v": 1}, {"v": 2}, {"v": 3}]"#);
        let cb = load_path(dir.path().join("cases.json"), None).unwrap();
        assert_eq!(cb.names().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert_eq!(cb["2"].get("v"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_json_scalar_cannot_be_a_casebase() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.json", "42");
        let err = load_path(dir.path().join("cases.json"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_toml_tables_are_cases() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.toml", "[golf]\ndoors = 5\n\n[polo]\ndoors = 3\n");
        let cb = load_path(dir.path().join("cases.toml"), None).unwrap();
        assert_eq!(cb.len(), 2);
        assert_eq!(cb["polo"].get("doors"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_text_file_is_not_a_batch_format() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "case.txt", "text");
        let err = load_path(dir.path().join("case.txt"), None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFormat { extension: Some(ref ext), .. } if ext == ".txt"
        ));
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "CASES.JSON", "{}");
        let err = load_path(dir.path().join("CASES.JSON"), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let err = load_path("/nonexistent/path", None).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref p) if p == Path::new("/nonexistent/path")));
    }

    #[test]
    fn test_parser_error_is_unchanged() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cases.toml", "key = ");

        let err = load_path(dir.path().join("cases.toml"), None).unwrap_err();
        let direct = toml::from_str::<toml::Table>("key = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
        assert_eq!(err.to_string(), direct.to_string());
    }

    #[test]
    fn test_load_data() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "settings.yaml", "threshold: 0.5\n");

        let value = casekit::load_data(dir.path().join("settings.yaml")).unwrap();
        assert_eq!(value.get("threshold"), Some(&Value::Float(0.5)));

        assert!(matches!(
            casekit::load_data(dir.path().join("absent.yaml")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_loaded_casebase_outlives_loader() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{}");
        let cb = {
            let loader = Loader::new();
            loader.load_path(dir.path(), None).unwrap()
        };
        assert_eq!(cb.len(), 1);
    }
}

mod round_trip {
    use super::*;
    use casekit::Record;

    fn expected_cases() -> serde_json::Value {
        serde_json::json!({
            "golf": {"make": "vw", "doors": 5, "price": 12000.5, "used": true},
            "polo": {"make": "vw", "doors": 3, "price": 9000.0, "used": false}
        })
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(&path, serde_json::to_string(&expected_cases()).unwrap()).unwrap();

        let cb = load_path(&path, None).unwrap();
        assert_eq!(Value::Mapping(cb.into_inner()), Value::from(expected_cases()));
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.yaml");
        fs::write(&path, serde_yaml_ng::to_string(&expected_cases()).unwrap()).unwrap();

        let cb = load_path(&path, None).unwrap();
        assert_eq!(Value::Mapping(cb.into_inner()), Value::from(expected_cases()));
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.toml");
        let table: toml::Table = serde_json::from_value(expected_cases()).unwrap();
        fs::write(&path, toml::to_string(&table).unwrap()).unwrap();

        let cb = load_path(&path, None).unwrap();
        assert_eq!(Value::Mapping(cb.into_inner()), Value::from(table));
    }

    #[test]
    fn test_csv_round_trip_is_all_strings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.csv");
        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer.write_record(["make", "doors"]).unwrap();
        writer.write_record(["vw", "5"]).unwrap();
        writer.write_record(["bmw, m3", "3"]).unwrap();
        writer.flush().unwrap();

        let cb = load_path(&path, None).unwrap();

        let mut row1 = Record::new();
        row1.insert("make".to_string(), Value::from("bmw, m3"));
        row1.insert("doors".to_string(), Value::from("3"));
        assert_eq!(cb["1"], Value::Mapping(row1));
    }
}

mod table_view {
    use super::*;
    use casekit::IndexedFrame;
    use casekit::config::CsvSettings;
    use casekit::table::read_csv;
    use polars::df;
    use std::sync::{Arc, RwLock};

    fn car(model: &str) -> DataFrame {
        df!("model" => [model], "make" => ["vw"]).unwrap()
    }

    #[test]
    fn test_view_over_appended_table_grows() {
        let mut frame = car("golf");

        let first = load_dataframe(&frame).len();
        frame.vstack_mut(&car("polo")).unwrap();
        let second = load_dataframe(&frame).len();

        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_two_views_observe_the_same_mutation() {
        let indexed = IndexedFrame::new(car("golf").slice(0, 0), "model").unwrap();
        let shared = Arc::new(RwLock::new(indexed));
        let left = load_dataframe(Arc::clone(&shared));
        let right = load_dataframe(Arc::clone(&shared));

        shared
            .write()
            .unwrap()
            .frame_mut()
            .vstack_mut(&car("golf"))
            .unwrap();

        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
        assert_eq!(left.labels().collect::<Vec<_>>(), vec!["golf"]);
    }

    #[test]
    fn test_csv_table_matches_batch_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "people.csv", "name,age,note\nalice,30,\nbob,41,tall\n");
        let path = dir.path().join("people.csv");

        let frame = read_csv(&path, &CsvSettings::default()).unwrap();
        let view = load_dataframe(&frame);
        let batch = load_path(&path, None).unwrap();

        assert_eq!(view.len(), batch.len());
        for name in view.case_names() {
            assert_eq!(view.case(&name).unwrap().as_ref(), &batch[name.as_str()]);
        }
    }

    #[test]
    fn test_view_and_casebase_share_a_contract() {
        fn total(view: &dyn CaseView) -> usize {
            view.case_names().filter(|n| view.case(n).is_some()).count()
        }

        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{}");
        let loaded = load_path(dir.path(), None).unwrap();

        let frame = car("golf");
        let view = load_dataframe(&frame);

        assert_eq!(total(&loaded), 1);
        assert_eq!(total(&view), 1);
    }
}
