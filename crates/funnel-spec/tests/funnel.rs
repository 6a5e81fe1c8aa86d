use pretty_assertions::assert_eq;

use funnel_spec::{
    Compiler, CompileOptions, FormDefinition, Funnel, Ignored, RuntimeConfig, Screen, Status,
    Transition, parse_definition,
};

fn config(name: &str) -> RuntimeConfig {
    let source = match name {
        "lead_form" => include_str!("../tests/fixtures/lead_form.json"),
        "two_questions" => include_str!("../tests/fixtures/two_questions.json"),
        _ => panic!("unknown fixture {}", name),
    };
    let definition: FormDefinition = parse_definition(source).expect("fixture parses");
    Compiler::new(CompileOptions::default())
        .expect("compiler")
        .runtime_config(&definition)
}

fn moved_to(transition: Transition) -> usize {
    match transition {
        Transition::Moved { to, .. } => to,
        other => panic!("expected a move, got {:?}", other),
    }
}

fn fill_lead_form(funnel: &mut Funnel<'_>, bill: &str) {
    funnel.input("Maria");
    assert_eq!(moved_to(funnel.advance()), 2);
    funnel.input("11987654321");
    assert_eq!(moved_to(funnel.advance()), 3);
    funnel.input("maria@example.com");
    assert_eq!(moved_to(funnel.advance()), 4);
    assert_eq!(moved_to(funnel.choose("São Paulo/SP")), 5);
    assert_eq!(moved_to(funnel.choose(bill)), 6);
}

#[test]
fn advance_moves_one_step_and_last_question_lands_on_review() {
    let config = config("two_questions");
    let mut funnel = Funnel::new(&config);
    assert_eq!(funnel.current_step(), 1);
    assert_eq!(funnel.total_steps(), 4);
    assert_eq!(funnel.progress_percent(), 0);

    assert_eq!(funnel.advance(), Transition::Ignored(Ignored::Invalid));
    funnel.input("   ");
    assert_eq!(funnel.advance(), Transition::Ignored(Ignored::Invalid));
    funnel.input("hello");
    assert_eq!(funnel.advance(), Transition::Moved { from: 1, to: 2 });
    assert_eq!(funnel.progress_percent(), 25);

    assert_eq!(funnel.advance(), Transition::Ignored(Ignored::Unavailable));
    assert_eq!(funnel.choose("A"), Transition::Moved { from: 2, to: 3 });
    assert_eq!(funnel.screen(), Screen::Review);
    assert!(funnel.is_qualified());
}

#[test]
fn choice_selection_is_locked_until_step_is_shown_again() {
    let config = config("two_questions");
    let mut funnel = Funnel::new(&config);
    funnel.input("hello");
    funnel.advance();

    assert_eq!(funnel.select("Z"), Transition::Ignored(Ignored::UnknownOption));
    assert_eq!(moved_to(funnel.choose("B")), 3);
    assert_eq!(funnel.back(), Transition::Moved { from: 3, to: 2 });
    assert_eq!(moved_to(funnel.choose("A")), 3);
    assert_eq!(funnel.answer("test-q2"), Some("A"));
}

#[test]
fn rapid_repeat_selection_is_ignored() {
    let config = config("two_questions");
    let mut funnel = Funnel::new(&config);
    funnel.input("hello");
    funnel.advance();

    assert_eq!(
        funnel.select("B"),
        Transition::Scheduled {
            step: 2,
            delay_ms: 450
        }
    );
    assert_eq!(funnel.select("A"), Transition::Ignored(Ignored::Locked));
    assert_eq!(funnel.answer("test-q2"), Some("B"));
    assert_eq!(funnel.fire_timer(), Transition::Moved { from: 2, to: 3 });
    assert_eq!(funnel.fire_timer(), Transition::Ignored(Ignored::Unavailable));
}

#[test]
fn pending_advance_is_dropped_after_leaving_the_step() {
    let config = config("two_questions");
    let mut funnel = Funnel::new(&config);
    funnel.input("hello");
    funnel.advance();

    funnel.select("A");
    assert_eq!(funnel.back(), Transition::Moved { from: 2, to: 1 });
    assert_eq!(funnel.fire_timer(), Transition::Ignored(Ignored::Unavailable));
    assert_eq!(funnel.current_step(), 1);
}

#[test]
fn back_is_unavailable_on_first_step() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    assert_eq!(funnel.back(), Transition::Ignored(Ignored::Unavailable));
}

#[test]
fn phone_input_is_reformatted_and_validated() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    funnel.input("Maria");
    funnel.advance();

    let check = funnel.input("123").expect("phone step has an input");
    assert!(!check.valid);
    assert_eq!(funnel.advance(), Transition::Ignored(Ignored::Invalid));

    let check = funnel.input("11987654321").expect("phone step has an input");
    assert!(check.valid);
    assert_eq!(check.value, "(11) 98765-4321");
    assert_eq!(funnel.answer("whatsapp"), Some("(11) 98765-4321"));
}

#[test]
fn qualified_respondent_reaches_commitment() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    fill_lead_form(&mut funnel, "R$ 400 a R$ 600");

    assert!(funnel.is_qualified());
    let entries = funnel.review_entries();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[1].label, "Seu WhatsApp");
    assert_eq!(entries[1].step, 2);

    assert_eq!(funnel.confirm_review(), Transition::Moved { from: 6, to: 7 });
    assert_eq!(funnel.screen(), Screen::Commitment);

    let Transition::Submitted(submission) = funnel.commit(true) else {
        panic!("commitment submits");
    };
    assert_eq!(submission.status, Status::Qualified);
    assert_eq!(
        submission.webhook.as_deref(),
        Some("https://hooks.example.com/qualified")
    );
    assert_eq!(
        submission.redirect.as_deref(),
        Some("https://solnascente.com.br/obrigado")
    );
    assert_eq!(submission.payload["status"], "qualificado");
    assert_eq!(submission.payload["whatsapp"], "(11) 98765-4321");
    assert!(submission.payload["submittedAt"].as_str().unwrap().ends_with('Z'));

    assert_eq!(funnel.commit(true), Transition::Ignored(Ignored::Finished));
}

#[test]
fn declining_commitment_uses_disqualified_destination() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    fill_lead_form(&mut funnel, "Acima de R$ 1.000");
    funnel.confirm_review();

    let Transition::Submitted(submission) = funnel.commit(false) else {
        panic!("declining still submits");
    };
    assert_eq!(submission.status, Status::Disqualified);
    assert_eq!(
        submission.webhook.as_deref(),
        Some("https://hooks.example.com/disqualified")
    );
    assert_eq!(submission.redirect, None);
    assert_eq!(submission.payload["status"], "desqualificado");
}

#[test]
fn disqualified_review_submits_without_commitment() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    fill_lead_form(&mut funnel, "Até R$ 200");
    assert!(!funnel.is_qualified());

    let Transition::Submitted(submission) = funnel.advance() else {
        panic!("review submits directly when disqualified");
    };
    assert_eq!(submission.status, Status::Disqualified);
    assert_eq!(funnel.current_step(), 6);
    assert!(funnel.state().finished);
}

#[test]
fn editing_from_review_returns_to_review() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    fill_lead_form(&mut funnel, "Até R$ 200");
    assert!(!funnel.is_qualified());

    assert_eq!(funnel.edit(2), Transition::Moved { from: 6, to: 2 });
    assert!(funnel.state().editing);
    funnel.input("21912345678");
    assert_eq!(funnel.advance(), Transition::Moved { from: 2, to: 6 });
    assert!(!funnel.state().editing);

    assert_eq!(moved_to(funnel.edit(5)), 5);
    assert_eq!(funnel.choose("Acima de R$ 1.000"), Transition::Moved { from: 5, to: 6 });
    assert!(funnel.is_qualified());
    assert_eq!(funnel.answer("whatsapp"), Some("(21) 91234-5678"));
}

#[test]
fn edit_requires_review_and_a_question_step() {
    let config = config("lead_form");
    let mut funnel = Funnel::new(&config);
    assert_eq!(funnel.edit(1), Transition::Ignored(Ignored::Unavailable));
    fill_lead_form(&mut funnel, "Até R$ 200");
    assert_eq!(funnel.edit(6), Transition::Ignored(Ignored::Unavailable));
    assert_eq!(funnel.edit(0), Transition::Ignored(Ignored::Unavailable));
}

#[test]
fn malformed_destinations_are_skipped() {
    let mut config = config("two_questions");
    config.destinations.qualified.webhook = "ftp://example.com/hook".into();
    config.destinations.qualified.redirect = "/obrigado".into();
    let mut funnel = Funnel::new(&config);
    funnel.input("hello");
    funnel.advance();
    funnel.choose("A");
    funnel.confirm_review();

    let Transition::Submitted(submission) = funnel.commit(true) else {
        panic!("commitment submits");
    };
    assert_eq!(submission.webhook, None);
    assert_eq!(submission.redirect, None);
    assert_eq!(submission.payload["test-q1"], "hello");
    assert!(submission.body().contains("\"status\":\"qualificado\""));
}

#[test]
fn empty_funnel_starts_on_review() {
    let mut config = config("two_questions");
    config.questions.clear();
    config.criteria.rules.clear();
    config.total_steps = 2;
    let mut funnel = Funnel::new(&config);
    assert_eq!(funnel.screen(), Screen::Review);
    assert_eq!(funnel.back(), Transition::Ignored(Ignored::Unavailable));
    assert_eq!(funnel.advance(), Transition::Moved { from: 1, to: 2 });
}
