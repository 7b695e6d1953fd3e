use bluff_engine::cards::Card;
use bluff_engine::equity::{ranking, HandClass, HoleCards, Range, Suitedness};
use bluff_engine::errors::PokerError;

fn class(text: &str) -> HandClass {
    text.parse().unwrap()
}

#[test]
fn class_combos() {
    assert_eq!(Range::parse("KK").unwrap().len(), 6);
    assert_eq!(Range::parse("AKs").unwrap().len(), 4);
    assert_eq!(Range::parse("AKo").unwrap().len(), 12);
    assert_eq!(Range::parse("AK").unwrap().len(), 12);
    assert_eq!(class("T9s").kind(), Suitedness::Suited);
}

#[test]
fn higher_or_equal_classes() {
    let names = |text: &str| -> Vec<String> {
        class(text)
            .higher_or_equal()
            .iter()
            .map(HandClass::to_string)
            .collect()
    };
    assert_eq!(names("A9o"), ["A9o", "ATo", "AJo", "AQo", "AKo"]);
    assert_eq!(
        names("K9s"),
        ["K9s", "KTs", "KJs", "KQs", "A9s", "ATs", "AJs", "AQs", "AKs"]
    );
    assert_eq!(names("33").len(), 12);
    assert_eq!(names("AA"), ["AA"]);
}

#[test]
fn higher_or_equal_range_sizes() {
    for (desc, combos) in [
        ("KK", 12),
        ("KK AKs", 16),
        ("KQs", 12),
        ("AQo", 24),
        ("AQs", 8),
        ("22", 78),
    ] {
        assert_eq!(
            Range::parse_higher_or_equal(desc).unwrap().len(),
            combos,
            "{desc}"
        );
    }
}

#[test]
fn plus_suffix_and_concrete_hands_mix() {
    assert_eq!(Range::parse("QQ+").unwrap().len(), 18);
    assert_eq!(Range::parse("AKs, KQs").unwrap().len(), 8);

    let range = Range::parse("AsKd QQ").unwrap();
    assert_eq!(range.len(), 7);
    assert!(range.contains(&"KdAs".parse::<HoleCards>().unwrap()));

    // Concrete hands stay concrete even when every class is expanded.
    assert_eq!(Range::parse_higher_or_equal("AsKd").unwrap().len(), 1);
}

#[test]
fn duplicates_are_dropped() {
    let range = Range::parse("AA AA AsAh aa").unwrap();
    assert_eq!(range.len(), 6);
    assert_eq!(range.classes(), vec![class("AA")]);
}

#[test]
fn bad_descriptions_are_errors() {
    for desc in ["", " , ", "ZZ", "AKx", "AAs", "AsAs", "A"] {
        assert!(
            matches!(Range::parse(desc), Err(PokerError::InvalidRange(_))),
            "{desc:?}"
        );
    }
}

#[test]
fn dead_cards_are_excluded() {
    let kings = Range::parse("KK").unwrap();
    let dead: Vec<Card> = vec!["Ks".parse().unwrap()];
    assert_eq!(kings.excluding(&dead).len(), 3);
    let dead: Vec<Card> = vec!["Ks".parse().unwrap(), "Kh".parse().unwrap()];
    assert_eq!(kings.excluding(&dead).len(), 1);
    assert_eq!(kings.len(), 6);
}

#[test]
fn class_of_concrete_hand() {
    let hole: HoleCards = "Th9h".parse().unwrap();
    assert_eq!(HandClass::of(&hole), class("T9s"));
    let hole: HoleCards = "9cTh".parse().unwrap();
    assert_eq!(hole.class(), class("T9o"));
    assert_eq!(hole.high().to_string(), "Th");
    let hole: HoleCards = "7c7d".parse().unwrap();
    assert!(hole.class().is_pair());
}

#[test]
fn percentile_ranking() {
    assert!((class("AA").percentile() - 600.0 / 1326.0).abs() < 1e-9);
    assert!((class("32o").percentile() - 100.0).abs() < 1e-9);
    assert!(class("AKs").percentile() < class("AKo").percentile());
    assert_eq!(HandClass::from_percentile(5.0), class("AKo"));
    assert_eq!(HandClass::from_percentile(0.0), class("AA"));
    assert_eq!(
        HandClass::from_percentile(class("72o").percentile()),
        class("72o")
    );
    assert_eq!(ranking::table().len(), 169);
}

#[test]
fn top_percent_ranges() {
    assert_eq!(Range::top_percent(0.0).len(), 6);
    assert_eq!(Range::top_percent(1.0).len(), 12);
    assert_eq!(Range::top_percent(5.0).len(), 60);
    assert_eq!(Range::top_percent(100.0).len(), 1326);
    assert_eq!(Range::top_percent(250.0).len(), 1326);
    assert!(Range::top_percent(5.0).contains(&"AsKs".parse().unwrap()));
    assert!(!Range::top_percent(5.0).contains(&"AsKd".parse().unwrap()));
}

#[test]
fn ranges_serialize_as_hole_card_lists() {
    let range = Range::parse("AsKd").unwrap();
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, r#"{"hands":["AsKd"]}"#);
    assert_eq!(serde_json::to_string(&class("QJ")).unwrap(), "\"QJo\"");
}
