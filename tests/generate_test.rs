use chrono::{DateTime, Utc};
use fixturegen::domain::StringOptions;
use fixturegen::{Category, Constraint, Generator, GeneratorError, RandomSource, Schema};
use serde_json::{json, Value};

fn name_schema() -> Schema {
    Schema::object([("name", Schema::string().rule(Constraint::with_arg("min", 5)))])
}

#[test]
fn test_generate_object_with_min_length() -> anyhow::Result<()> {
    let mut generator = Generator::with_seed(1);
    let valid = generator.generate(&name_schema())?;

    let name = valid["name"].as_str().unwrap();
    assert!(name.chars().count() >= 5);
    assert_eq!(valid.as_object().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_generate_all_object_with_min_length() -> anyhow::Result<()> {
    let mut generator = Generator::with_seed(2);
    let result = generator.generate_all(&name_schema())?;

    assert_eq!(result.invalid.len(), 1);
    assert_eq!(result.invalid[0].field_path, "name");
    assert_eq!(result.invalid[0].model, json!({ "name": true }));

    assert_eq!(result.short.len(), 1);
    assert_eq!(result.short[0].field_path, "name");
    assert!(result.short[0].model["name"].as_str().unwrap().chars().count() < 5);

    assert_eq!(result.nil[0].model, json!({ "name": null }));
    assert_eq!(result.empty[0].model, json!({ "name": "" }));
    Ok(())
}

#[test]
fn test_every_category_is_present_in_output() -> anyhow::Result<()> {
    let mut generator = Generator::with_seed(3);
    let result = generator.generate_all(&Schema::object([("flag", Schema::boolean())]))?;

    let encoded = serde_json::to_value(&result)?;
    for category in Category::ALL {
        assert!(encoded.get(category.as_str()).is_some(), "missing {}", category);
    }
    assert!(result.empty.is_empty());
    assert!(result.long.is_empty());
    Ok(())
}

#[test]
fn test_number_range_holds_for_every_sample() -> anyhow::Result<()> {
    let schema = Schema::number()
        .rule(Constraint::with_arg("min", 0))
        .rule(Constraint::with_arg("max", 10));
    let mut generator = Generator::with_seed(4);

    for _ in 0..100 {
        let valid = generator.generate(&schema)?.as_i64().unwrap();
        assert!((0..=10).contains(&valid));
    }
    Ok(())
}

#[test]
fn test_alternatives_produce_both_types() -> anyhow::Result<()> {
    let schema = Schema::alternatives(vec![Schema::string(), Schema::number()]);
    let mut generator = Generator::with_seed(5);

    let mut strings = 0;
    let mut numbers = 0;
    for _ in 0..100 {
        match generator.generate(&schema)? {
            Value::String(_) => strings += 1,
            Value::Number(_) => numbers += 1,
            other => panic!("unexpected value {}", other),
        }
    }
    assert!(strings > 0 && numbers > 0);
    Ok(())
}

#[test]
fn test_mutations_touch_only_their_field() -> anyhow::Result<()> {
    let schema = Schema::object([
        ("email", Schema::string().rule(Constraint::new("email"))),
        ("age", Schema::number().rule(Constraint::with_arg("max", 120))),
        (
            "profile",
            Schema::object([("bio", Schema::string().rule(Constraint::with_arg("max", 40)))]),
        ),
        ("tags", Schema::array(vec![Schema::string()])),
    ]);
    let mut generator = Generator::with_seed(6);
    let result = generator.generate_all(&schema)?;
    let valid = result.valid.as_object().unwrap();

    for category in Category::VIOLATIONS {
        for sample in result.samples(category) {
            let model = sample.model.as_object().unwrap();
            let top = sample.field_path.split('.').next().unwrap();
            for (key, value) in valid {
                if key != top {
                    assert_eq!(model.get(key), Some(value), "{} leaked into {}", sample.field_path, key);
                }
            }
            assert_ne!(model.get(top), valid.get(top));
        }
    }

    let long_paths: Vec<_> = result.long.iter().map(|s| s.field_path.as_str()).collect();
    assert_eq!(long_paths, vec!["age", "profile.bio", "tags.0"]);
    Ok(())
}

#[test]
fn test_unsupported_type_fails_whole_run() {
    let schema = Schema::object([
        ("ok", Schema::string()),
        ("broken", Schema::array(vec![Schema::new("symbol")])),
    ]);
    let mut generator = Generator::with_seed(7);

    for err in [
        generator.generate(&schema).unwrap_err(),
        generator.generate_all(&schema).map(|_| ()).unwrap_err(),
    ] {
        assert!(matches!(err, GeneratorError::UnsupportedType { ref type_tag } if type_tag == "symbol"));
        assert_eq!(err.to_string(), "No handler has been implemented for type 'symbol'");
    }
}

#[test]
fn test_same_seed_same_output() -> anyhow::Result<()> {
    let schema = name_schema();
    let first = Generator::with_seed(99).generate_all(&schema)?;
    let second = Generator::with_seed(99).generate_all(&schema)?;
    assert_eq!(first, second);
    Ok(())
}

/// Deterministic source that always returns the lowest allowed value.
struct FloorSource;

impl RandomSource for FloorSource {
    fn sentence(&mut self) -> String {
        "Fixed sentence text.".to_string()
    }

    fn sentence_of(&mut self, words: usize) -> String {
        vec!["word"; words].join(" ")
    }

    fn word(&mut self, length: usize) -> String {
        "w".repeat(length)
    }

    fn string(&mut self, options: StringOptions) -> String {
        let fill = if options.symbols { "#" } else { "s" };
        fill.repeat(options.length.unwrap_or(4))
    }

    fn integer(&mut self, min: i64, _max: i64) -> i64 {
        min
    }

    fn boolean(&mut self) -> bool {
        false
    }

    fn date_between(&mut self, min: DateTime<Utc>, _max: DateTime<Utc>) -> DateTime<Utc> {
        min
    }

    fn email(&mut self) -> String {
        "user@example.com".to_string()
    }

    fn ip(&mut self) -> String {
        "10.0.0.1".to_string()
    }

    fn domain(&mut self) -> String {
        "example.com".to_string()
    }

    fn guid(&mut self) -> String {
        "00000000-0000-4000-8000-000000000000".to_string()
    }

    fn string_matching(&mut self, pattern: &str) -> String {
        pattern.to_string()
    }
}

#[test]
fn test_custom_random_source() -> anyhow::Result<()> {
    let schema = Schema::object([
        ("email", Schema::string().rule(Constraint::new("email"))),
        ("count", Schema::number().rule(Constraint::with_arg("min", 3))),
        ("pick", Schema::alternatives(vec![Schema::boolean(), Schema::number()])),
    ]);
    let mut generator = Generator::with_random_source(FloorSource);

    let valid = generator.generate(&schema)?;
    assert_eq!(valid, json!({ "count": 3, "email": "user@example.com", "pick": false }));

    let result = generator.generate_all(&schema)?;
    let bogus = result.bogus.iter().find(|s| s.field_path == "email").unwrap();
    assert_eq!(bogus.model["email"], json!("####@example.com"));
    Ok(())
}

#[test]
fn test_oversized_length_arguments_do_not_abort() -> anyhow::Result<()> {
    let schema = Schema::object([
        ("blob", Schema::binary().rule(Constraint::with_arg("max", 1e20))),
        ("text", Schema::string().rule(Constraint::with_arg("min", 1e19))),
    ]);
    let mut generator = Generator::with_seed(8);

    let result = generator.generate_all(&schema)?;
    let text = result.valid["text"].as_str().unwrap();
    assert!(text.chars().count() >= fixturegen::domain::MAX_LENGTH_ARG);
    let long_paths: Vec<_> = result.long.iter().map(|s| s.field_path.as_str()).collect();
    assert_eq!(long_paths, vec!["blob", "text"]);
    Ok(())
}
