//! Generated Call Sequence Tests
//!
//! Random sequences of builder calls, checked against a simple model of
//! which message each call should land on.

use crate::common::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Call {
    Expect(String),
    Given(String),
    Metadata(String, i64),
    Text(String),
    Json(i64),
}

fn call() -> impl Strategy<Value = Call> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Call::Expect),
        "[a-z]{1,8}".prop_map(Call::Given),
        ("[a-z]{1,6}", any::<i64>()).prop_map(|(k, v)| Call::Metadata(k, v)),
        "[ -~]{0,16}".prop_map(Call::Text),
        any::<i64>().prop_map(Call::Json),
    ]
}

proptest! {
    #[test]
    fn calls_land_on_latest_message(calls in prop::collection::vec(call(), 0..40)) {
        let mut builder = order_builder();
        let mut expected_bodies: Vec<Option<Vec<u8>>> = Vec::new();
        let mut state_count = 0usize;
        let mut expected_states: Vec<usize> = Vec::new();

        for call in calls {
            let before = builder.messages().to_vec();
            match call {
                Call::Expect(description) => {
                    builder.expects_to_receive(description.clone());
                    expected_bodies.push(None);
                    expected_states.push(state_count);
                    prop_assert_eq!(&current(&builder).description, &description);
                }
                Call::Given(state) => {
                    builder.given(state);
                    state_count += 1;
                }
                Call::Metadata(key, value) => {
                    let result = builder.with_metadata([(key, value)]);
                    prop_assert_eq!(result.is_err(), before.is_empty());
                }
                Call::Text(text) => {
                    let result = builder.with_text(text.clone());
                    prop_assert_eq!(result.is_err(), before.is_empty());
                    if let Some(last) = expected_bodies.last_mut() {
                        *last = Some(text.into_bytes());
                    }
                }
                Call::Json(n) => {
                    let result = builder.with_json(json!({"n": n}));
                    prop_assert_eq!(result.is_err(), before.is_empty());
                    if let Some(last) = expected_bodies.last_mut() {
                        *last = Some(json!({"n": n}).to_string().into_bytes());
                    }
                }
            }

            let after = builder.messages();
            if !before.is_empty() && after.len() == before.len() {
                let last = before.len() - 1;
                prop_assert_eq!(&after[..last], &before[..last]);
            }
        }

        prop_assert_eq!(builder.messages().len(), expected_bodies.len());
        for (i, message) in builder.messages().iter().enumerate() {
            prop_assert_eq!(message.provider_states.len(), expected_states[i]);
            match &expected_bodies[i] {
                Some(bytes) => {
                    prop_assert_eq!(message.contents.contents.bytes(), bytes.as_slice());
                    prop_assert_eq!(content_type_key_count(&message.contents.metadata), 1);
                }
                None => prop_assert!(!message.contents.contents.is_present()),
            }
        }
    }

    #[test]
    fn metadata_content_type_key_collapses(
        key in prop::sample::select(vec!["contentType", "content-type", "Content-Type", "CONTENT-TYPE"]),
        text in "[a-z]{0,12}",
    ) {
        let mut builder = builder_with_message("m");
        builder.with_metadata([(key, "text/plain")]).unwrap();
        builder.with_metadata([("other", "kept")]).unwrap();
        builder.with_text_as(text, "text/plain").unwrap();
        let metadata = &current(&builder).contents.metadata;
        prop_assert_eq!(content_type_key_count(metadata), 1);
        prop_assert_eq!(metadata.get("contentType"), Some(&json!("text/plain")));
        prop_assert_eq!(metadata.get("other"), Some(&json!("kept")));
    }
}
