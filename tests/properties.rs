use proptest::prelude::*;
use std::collections::HashMap;
use yomi_check::{rendaku_expand, Dictionaries, Location, Outcome, Validator};

fn readings() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[かさはあん]{1,2}", 1..4)
}

fn claim() -> impl Strategy<Value = String> {
    "[かがさざはばぱあん]{0,5}"
}

fn symbols(entries: &[(&str, &[String])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_vec()))
        .collect()
}

fn two_kanji(first: &[String], second: &[String], claim: &str) -> bool {
    first.iter().any(|r1| {
        second
            .iter()
            .flat_map(|r| rendaku_expand(r))
            .any(|r2| format!("{r1}{r2}") == claim)
    })
}

proptest! {
    #[test]
    fn single_kanji_is_valid_iff_listed(readings in readings(), claim in claim()) {
        let dictionaries =
            Dictionaries::from_maps(symbols(&[("火", &readings)]), HashMap::new()).unwrap();
        let validator = Validator::new(&dictionaries);
        let expected = if readings.contains(&claim) {
            Outcome::Valid
        } else {
            Outcome::Invalid
        };
        prop_assert_eq!(validator.classify("火", &claim), expected);
    }

    #[test]
    fn two_kanji_are_valid_iff_concatenation(
        first in readings(),
        second in readings(),
        claim in claim(),
    ) {
        let dictionaries = Dictionaries::from_maps(
            symbols(&[("火", &first), ("山", &second)]),
            HashMap::new(),
        )
        .unwrap();
        let validator = Validator::new(&dictionaries);
        let valid = validator.classify("火山", &claim) == Outcome::Valid;
        prop_assert_eq!(valid, two_kanji(&first, &second, &claim));
    }

    #[test]
    fn constructed_readings_are_valid(
        first in readings(),
        second in readings(),
        (i, j, k) in (0usize..4, 0usize..4, 0usize..3),
    ) {
        let r1 = &first[i % first.len()];
        let variants = rendaku_expand(&second[j % second.len()]);
        let r2 = &variants[k % variants.len()];
        let dictionaries = Dictionaries::from_maps(
            symbols(&[("火", &first), ("山", &second)]),
            HashMap::new(),
        )
        .unwrap();
        let validator = Validator::new(&dictionaries);
        prop_assert_eq!(validator.classify("火山", &format!("{r1}{r2}")), Outcome::Valid);
    }

    #[test]
    fn outcome_ignores_reading_order(
        (a, b, c, shuffled_a, shuffled_b, shuffled_c) in (readings(), readings(), readings())
            .prop_flat_map(|(a, b, c)| (
                Just(a.clone()),
                Just(b.clone()),
                Just(c.clone()),
                Just(a).prop_shuffle(),
                Just(b).prop_shuffle(),
                Just(c).prop_shuffle(),
            )),
        claim in "[かがさざはばぱあん]{1,7}",
    ) {
        let ordered = Dictionaries::from_maps(
            symbols(&[("国", &a), ("際", &b), ("港", &c)]),
            HashMap::new(),
        )
        .unwrap();
        let shuffled = Dictionaries::from_maps(
            symbols(&[("国", &shuffled_a), ("際", &shuffled_b), ("港", &shuffled_c)]),
            HashMap::new(),
        )
        .unwrap();
        prop_assert_eq!(
            Validator::new(&ordered).classify("国際港", &claim),
            Validator::new(&shuffled).classify("国際港", &claim)
        );
    }

    #[test]
    fn validation_is_idempotent(
        first in readings(),
        second in readings(),
        claims in prop::collection::vec(claim(), 1..5),
    ) {
        let dictionaries = Dictionaries::from_maps(
            symbols(&[("火", &first), ("山", &second)]),
            HashMap::new(),
        )
        .unwrap();
        let validator = Validator::new(&dictionaries);
        let sentence = claims
            .iter()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { format!("[火山|{c}]を") } else { format!("[山|{c}]と") })
            .collect::<String>();
        let location = Location {
            file: "questions-test.json".to_string(),
            id: "1".to_string(),
        };
        let once = validator.validate_sentence(&location, &sentence);
        let twice = validator.validate_sentence(&location, &sentence);
        prop_assert_eq!(once.len(), claims.len());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn expansion_contains_reading(reading in "[かきさしたちはひふほあん]{0,4}") {
        let variants = rendaku_expand(&reading);
        prop_assert_eq!(&variants[0], &reading);
        let mut deduplicated = variants.clone();
        deduplicated.sort();
        deduplicated.dedup();
        prop_assert_eq!(deduplicated.len(), variants.len());
    }

    #[test]
    fn compound_dictionary_overrides(
        first in readings(),
        second in readings(),
        claim in "[かがさざはばぱあん]{1,5}",
    ) {
        let mut compounds = HashMap::new();
        compounds.insert("火山".to_string(), vec![claim.clone()]);
        let dictionaries = Dictionaries::from_maps(
            symbols(&[("火", &first), ("山", &second)]),
            compounds,
        )
        .unwrap();
        let validator = Validator::new(&dictionaries);
        prop_assert_eq!(validator.classify("火山", &claim), Outcome::Valid);
    }
}

#[test]
fn documented_scenarios() {
    let mut kanji = HashMap::new();
    kanji.insert("火".to_string(), vec!["か".to_string(), "ひ".to_string()]);
    let dictionaries = Dictionaries::from_maps(kanji, HashMap::new()).unwrap();
    assert_eq!(
        Validator::new(&dictionaries).classify("火", "ひ"),
        Outcome::Valid
    );

    let mut kanji = HashMap::new();
    kanji.insert("火".to_string(), vec!["か".to_string()]);
    kanji.insert("山".to_string(), vec!["ざん".to_string(), "さん".to_string()]);
    let dictionaries = Dictionaries::from_maps(kanji.clone(), HashMap::new()).unwrap();
    let validator = Validator::new(&dictionaries);
    assert_eq!(validator.classify("火山", "かざん"), Outcome::Valid);
    assert_eq!(validator.classify("火山", "かさん"), Outcome::Valid);
    assert_eq!(validator.classify("火山", "かひ"), Outcome::Invalid);
    assert_eq!(validator.classify("火山", "よみ"), Outcome::Placeholder);

    let mut compounds = HashMap::new();
    compounds.insert("火山".to_string(), vec!["ほのやま".to_string()]);
    let dictionaries = Dictionaries::from_maps(kanji, compounds).unwrap();
    assert_eq!(
        Validator::new(&dictionaries).classify("火山", "ほのやま"),
        Outcome::Valid
    );
}
