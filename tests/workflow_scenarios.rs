//! End-to-end workflow scenarios through the public API.

use serde_json::json;
use std::sync::{Arc, Mutex};
use waymark::builder::{DefinitionBuilder, TransitionBuilder};
use waymark::core::{BlockerCode, MetadataSubject, Place};
use waymark::engine::{Context, FnStateAccessor, StateAccessor, StateMachine, WorkflowError};
use waymark::events::{AuditTrail, BasicEventDispatcher, Phase, Topic};
use waymark::guard::{GuardError, GuardSet};
use waymark::registry::{Registry, RegistryError};
use waymark::definition;

#[derive(Debug, Default)]
struct Article {
    place: String,
    title: String,
    locked: bool,
    reviewer: Option<String>,
}

impl Article {
    fn at(place: &str) -> Self {
        Self {
            place: place.to_string(),
            title: "Waymarks".to_string(),
            ..Self::default()
        }
    }
}

fn accessor() -> impl StateAccessor<Article> {
    FnStateAccessor::new(
        |a: &Article| Ok(Place::from(a.place.as_str())),
        |a: &mut Article, place: Place, context: &Context| {
            a.place = place.to_string();
            if let Some(reviewer) = context.get("reviewer").and_then(|v| v.as_str()) {
                a.reviewer = Some(reviewer.to_string());
            }
            Ok(())
        },
    )
}

fn publishing_machine(dispatcher: BasicEventDispatcher<Article>) -> StateMachine<Article> {
    let definition = definition! {
        places: ["draft", "review", "published"],
        transitions: [
            "submit": "draft" => "review",
            "publish": "review" => "published",
        ]
    }
    .unwrap();

    StateMachine::builder()
        .name("article")
        .definition(definition)
        .state_accessor(accessor())
        .dispatcher(dispatcher)
        .build()
        .unwrap()
}

#[test]
fn article_moves_through_publishing_workflow() {
    let trail = AuditTrail::new();
    let mut dispatcher = BasicEventDispatcher::<Article>::new();
    dispatcher.add_listener(Topic::machine(Phase::Completed, "article"), trail.listener());

    let machine = publishing_machine(dispatcher);
    let mut article = Article::at("draft");

    assert_eq!(
        machine.apply(&mut article, "submit", Context::new()).unwrap(),
        "review"
    );
    assert!(machine.can(&article, "publish").unwrap());
    assert_eq!(
        machine.apply(&mut article, "publish", Context::new()).unwrap(),
        "published"
    );

    match machine.apply(&mut article, "submit", Context::new()) {
        Err(WorkflowError::NotEnabledTransition { blockers, .. }) => {
            assert_eq!(blockers.len(), 1);
            assert!(blockers.has(&BlockerCode::BlockedByState));
        }
        other => panic!("Expected NotEnabledTransition, got {other:?}"),
    }

    assert_eq!(trail.path(), vec!["draft", "review", "published"]);
}

#[test]
fn guard_listener_vetoes_locked_articles() {
    let mut dispatcher = BasicEventDispatcher::<Article>::new();
    dispatcher.add_listener(Topic::scoped(Phase::Guard, "article", "submit"), |event| {
        if event.subject().locked {
            event.block("article is locked");
        }
    });

    let machine = publishing_machine(dispatcher);
    let mut article = Article::at("draft");
    article.locked = true;

    assert!(!machine.can(&article, "submit").unwrap());

    let blockers = machine
        .build_transition_blocker_list(&article, "submit")
        .unwrap();
    assert!(blockers.has(&BlockerCode::BlockedByEventGuard));
    assert!(!blockers.has(&BlockerCode::BlockedByState));
    assert_eq!(blockers.iter().next().unwrap().message(), "article is locked");

    article.locked = false;
    assert!(machine.can(&article, "submit").unwrap());
}

#[test]
fn renew_picks_transition_leaving_current_place() {
    #[derive(Debug)]
    struct Subscription {
        status: String,
    }

    let definition = DefinitionBuilder::new()
        .places(["active", "expired"])
        .transition(
            TransitionBuilder::new()
                .name("renew")
                .from("active")
                .to("active")
                .metadata("label", "Extend"),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .name("renew")
                .from("expired")
                .to("active")
                .metadata("label", "Reactivate"),
        )
        .unwrap()
        .build()
        .unwrap();

    let labels = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&labels);
    let mut dispatcher = BasicEventDispatcher::<Subscription>::new();
    dispatcher.add_listener(
        Topic::scoped(Phase::Completed, "subscription", "renew"),
        move |event| {
            let label = event
                .metadata()
                .get_metadata("label", MetadataSubject::Transition(event.transition().id()));
            seen.lock().unwrap().push(label);
        },
    );

    let machine = StateMachine::builder()
        .name("subscription")
        .definition(definition)
        .state_accessor(FnStateAccessor::new(
            |s: &Subscription| Ok(Place::from(s.status.as_str())),
            |s: &mut Subscription, place: Place, _: &Context| {
                s.status = place.to_string();
                Ok(())
            },
        ))
        .dispatcher(dispatcher)
        .build()
        .unwrap();

    let mut subscription = Subscription {
        status: "expired".into(),
    };
    assert_eq!(
        machine
            .apply(&mut subscription, "renew", Context::new())
            .unwrap(),
        "active"
    );
    assert_eq!(*labels.lock().unwrap(), vec![Some(json!("Reactivate"))]);
}

#[test]
fn transition_listener_rewrites_context() {
    let mut dispatcher = BasicEventDispatcher::<Article>::new();
    dispatcher.add_listener(Topic::scoped(Phase::Transition, "article", "submit"), |event| {
        event
            .context_mut()
            .insert("reviewer".into(), json!("editor-in-chief"));
    });

    let machine = publishing_machine(dispatcher);
    let mut article = Article::at("draft");
    machine.apply(&mut article, "submit", Context::new()).unwrap();

    assert_eq!(article.reviewer.as_deref(), Some("editor-in-chief"));
}

#[test]
fn enter_guards_report_every_violation() {
    let definition = DefinitionBuilder::new()
        .places(["draft", "review"])
        .transition(
            TransitionBuilder::new()
                .name("submit")
                .from("draft")
                .to("review")
                .guards(
                    GuardSet::new()
                        .require_enter(|a: &Article| !a.title.is_empty(), "title is missing")
                        .require_enter(|a: &Article| !a.locked, "article is locked"),
                ),
        )
        .unwrap()
        .build()
        .unwrap();

    let machine = StateMachine::new(definition, accessor()).with_name("article");
    let mut article = Article::at("draft");
    article.title.clear();
    article.locked = true;

    match machine.apply(&mut article, "submit", Context::new()) {
        Err(WorkflowError::Guard(GuardError::EnterDenied { violations, .. })) => {
            let messages: Vec<&str> = violations.iter().map(|v| v.message()).collect();
            assert_eq!(messages, vec!["title is missing", "article is locked"]);
        }
        other => panic!("Expected EnterDenied, got {other:?}"),
    }
    assert_eq!(article.place, "draft");
}

#[test]
fn invalid_and_undefined_are_distinct_failures() {
    let machine = publishing_machine(BasicEventDispatcher::new());

    let stray = Article::at("archived");
    assert!(matches!(
        machine.can(&stray, "submit"),
        Err(WorkflowError::InvalidState { .. })
    ));

    let mut article = Article::at("draft");
    assert!(matches!(
        machine.apply(&mut article, "delete", Context::new()),
        Err(WorkflowError::UndefinedTransition { .. })
    ));
    assert!(!machine.can(&article, "delete").unwrap());
}

#[test]
fn registry_finds_machine_by_name() {
    let mut registry = Registry::new();
    registry.add(
        Arc::new(publishing_machine(BasicEventDispatcher::new())),
        |_: &StateMachine<Article>, a: &Article| !a.locked,
    );

    let article = Article::at("draft");
    let machine = registry.get(&article, Some("article")).unwrap();
    assert!(machine.can(&article, "submit").unwrap());

    let mut locked = Article::at("draft");
    locked.locked = true;
    assert!(matches!(
        registry.get(&locked, None),
        Err(RegistryError::NoMachine { .. })
    ));
}
