use funnel_spec::{
    Answers, CombineMode, Criteria, Rule, RuleOperator, Validator, evaluate, format_phone, is_email,
};

fn rule(question_id: &str, operator: RuleOperator, value: &str) -> Rule {
    Rule {
        id: format!("r-{}", question_id),
        question_id: question_id.into(),
        operator,
        value: value.into(),
    }
}

fn answers(pairs: &[(&str, &str)]) -> Answers {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.to_string()))
        .collect()
}

#[test]
fn zero_rules_always_qualify() {
    let criteria = Criteria::default();
    assert!(evaluate(&criteria, &Answers::new()));
    assert!(evaluate(&criteria, &answers(&[("city", "Outra")])));
}

#[test]
fn unmet_equals_rule_disqualifies() {
    let criteria = Criteria {
        rules: vec![rule("city", RuleOperator::Equals, "São Paulo/SP")],
        logic: CombineMode::All,
    };
    assert!(!evaluate(&criteria, &answers(&[("city", "Outra")])));
    assert!(evaluate(&criteria, &answers(&[("city", "São Paulo/SP")])));
}

#[test]
fn any_mode_needs_a_single_match() {
    let criteria = Criteria {
        rules: vec![
            rule("city", RuleOperator::Equals, "Campinas"),
            rule("priority", RuleOperator::Equals, "Alta"),
            rule("bill", RuleOperator::GreaterThan, "1000"),
        ],
        logic: CombineMode::Any,
    };
    let respondent = answers(&[("city", "Outra"), ("priority", "Alta"), ("bill", "Até R$ 200")]);
    assert!(evaluate(&criteria, &respondent));

    let all = Criteria {
        logic: CombineMode::All,
        ..criteria
    };
    assert!(!evaluate(&all, &respondent));
}

#[test]
fn missing_answers_and_unknown_targets_are_false() {
    let criteria = Criteria {
        rules: vec![rule("ghost", RuleOperator::NotEquals, "x")],
        logic: CombineMode::Any,
    };
    assert!(!evaluate(&criteria, &answers(&[("city", "x")])));
    assert!(!evaluate(&criteria, &answers(&[("ghost", "")])));
}

#[test]
fn numeric_operators_read_currency_answers() {
    let above = rule("bill", RuleOperator::GreaterThan, "R$ 300");
    let below = rule("bill", RuleOperator::LessThan, "500");

    assert!(above.evaluate(&answers(&[("bill", "R$ 400 a R$ 600")])));
    assert!(below.evaluate(&answers(&[("bill", "R$ 400 a R$ 600")])));
    assert!(above.evaluate(&answers(&[("bill", "Acima de R$ 1.000")])));
    assert!(!below.evaluate(&answers(&[("bill", "R$ 600 a R$ 800")])));
    assert!(!above.evaluate(&answers(&[("bill", "não sei")])));
}

#[test]
fn contains_is_a_substring_test() {
    let criteria = Criteria {
        rules: vec![rule("city", RuleOperator::Contains, "/SP")],
        logic: CombineMode::All,
    };
    assert!(evaluate(&criteria, &answers(&[("city", "Campinas/SP")])));
    assert!(!evaluate(&criteria, &answers(&[("city", "Curitiba/PR")])));
}

#[test]
fn phone_validation_formats_and_counts_digits() {
    let check = Validator::Phone.check("11987654321", true);
    assert_eq!(check.value, "(11) 98765-4321");
    assert!(check.valid);

    assert!(Validator::Phone.check("1198765432", true).valid);
    assert!(!Validator::Phone.check("123", true).valid);
    assert!(!Validator::Phone.check("", true).valid);
    assert!(Validator::Phone.check("", false).valid);
    assert_eq!(format_phone("123"), "(12) 3");
}

#[test]
fn email_validation_checks_shape() {
    assert!(is_email("a@b.com"));
    assert!(!is_email("not-an-email"));
    assert!(!is_email("a@b"));
    assert!(Validator::Email.check("a@b.com", true).valid);
    assert!(!Validator::Email.check("not-an-email", true).valid);
    assert!(!Validator::Email.check("", true).valid);
    assert!(Validator::Email.check("", false).valid);
}

#[test]
fn blank_optional_email_is_accepted() {
    assert!(Validator::Email.check("   ", false).valid);
    assert!(!Validator::Email.check("   ", true).valid);
    assert!(!Validator::Email.check(" a@b", false).valid);
}

#[test]
fn text_validation_trims() {
    assert!(!Validator::Text.check("  \n", true).valid);
    assert!(Validator::Text.check("  \n", false).valid);
    assert!(Validator::Text.check(" Ana ", true).valid);
}
