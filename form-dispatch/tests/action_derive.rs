//! Tests for #[derive(Action)] macro

use form_dispatch::{Action, ActionMeta, DebounceKey};

#[test]
fn test_default_names_are_variant_names() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    enum Simple {
        Open,
        Select(u32),
        Move { x: i32, y: i32 },
    }

    assert_eq!(Simple::Open.name(), "Open");
    assert_eq!(Simple::Select(1).name(), "Select");
    assert_eq!(Simple::Move { x: 1, y: 2 }.name(), "Move");
    assert_eq!(Simple::NAMES, &["Open", "Select", "Move"]);
    assert_eq!(Simple::Open.meta(), None);
}

#[test]
fn test_rename_all_screaming_snake() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Edition {
        UpdateEditionGroup(String),
        ShowPhysical,
    }

    assert_eq!(
        Edition::UpdateEditionGroup("x".into()).name(),
        "UPDATE_EDITION_GROUP"
    );
    assert_eq!(Edition::ShowPhysical.name(), "SHOW_PHYSICAL");
}

#[test]
fn test_rename_all_snake() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    #[action(rename_all = "snake_case")]
    enum Snake {
        UpdateDepth(f64),
    }

    assert_eq!(Snake::UpdateDepth(1.0).name(), "update_depth");
}

#[test]
fn test_variant_rename_overrides_rule() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Renamed {
        #[action(rename = "SET_ISBN")]
        UpdateIsbn(String),
        UpdatePages(u32),
    }

    assert_eq!(Renamed::UpdateIsbn("0".into()).name(), "SET_ISBN");
    assert_eq!(Renamed::NAMES, &["SET_ISBN", "UPDATE_PAGES"]);
}

#[test]
fn test_debounce_meta() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    enum Inputs {
        #[action(debounce = "keystroke")]
        Typed(String),
        #[action(debounce = "scroll")]
        Scrolled { offset: u16 },
        Clicked,
    }

    assert_eq!(Inputs::Typed("a".into()).meta(), Some(ActionMeta::keystroke()));
    assert_eq!(
        Inputs::Scrolled { offset: 3 }.meta().map(|m| m.debounce),
        Some(DebounceKey::new("scroll"))
    );
    assert_eq!(Inputs::Clicked.meta(), None);
}

#[test]
fn test_derived_action_drives_store() {
    use form_dispatch::{DebounceMiddleware, StoreWithMiddleware};
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(form_dispatch::Action, Clone, Debug)]
    enum Counter {
        #[action(debounce = "keystroke")]
        Set(i32),
        Bump,
    }

    fn reducer(state: &mut i32, action: Counter) -> bool {
        match action {
            Counter::Set(n) => *state = n,
            Counter::Bump => *state += 1,
        }
        true
    }

    let mut store = StoreWithMiddleware::new(0, reducer, DebounceMiddleware::default());

    assert!(!store.dispatch(Counter::Set(10)));
    assert!(store.dispatch(Counter::Bump));
    assert_eq!(*store.state(), 1);

    assert!(store.flush_due(Instant::now() + Duration::from_secs(1)));
    assert_eq!(*store.state(), 10);
}

#[test]
fn test_meta_serializes_like_the_wire_format() {
    #[derive(form_dispatch::Action, Clone, Debug)]
    enum One {
        #[action(debounce = "keystroke")]
        Typed,
    }

    let json = serde_json::to_string(&One::Typed.meta()).unwrap();
    assert_eq!(json, r#"{"debounce":"keystroke"}"#);
}
