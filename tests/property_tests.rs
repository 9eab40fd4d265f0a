//! Property-based tests using proptest
//!
//! These tests verify invariants that should hold for all inputs:
//! - Level lookup ignores case and round-trips through the canonical name
//! - An entry reaches the targets iff its level passes the threshold
//! - A single producer's entries arrive in submission order

mod common;

use common::{capture_logger, CaptureTarget};
use proptest::prelude::*;
use rust_log_dispatch::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Fatal),
        Just(LogLevel::Error),
        Just(LogLevel::Warn),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
    ]
}

fn non_fatal_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Error),
        Just(LogLevel::Warn),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
    ]
}

/// Flip the case of each character according to `mask`
fn recase(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_lookup_ignores_case(
        level in any_level(),
        mask in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let name = recase(level.to_str(), &mask);
        prop_assert_eq!(LogLevel::lookup(&name), Some(level));
    }

    #[test]
    fn prop_lookup_rejects_unknown_names(name in "[a-z]{1,10}") {
        let known = LogLevel::ALL
            .iter()
            .any(|level| level.to_str().eq_ignore_ascii_case(&name));
        prop_assume!(!known);
        prop_assert_eq!(LogLevel::lookup(&name), None);
    }

    #[test]
    fn prop_level_order_matches_passes(a in any_level(), b in any_level()) {
        prop_assert_eq!(a.passes(b), (a as u8) <= (b as u8));
    }

    #[test]
    fn prop_only_passing_levels_delivered(
        threshold in any_level(),
        levels in prop::collection::vec(non_fatal_level(), 0..50)
    ) {
        let target = CaptureTarget::new();
        let (logger, _errors) = capture_logger(&target);
        logger.sync(true);
        logger.set_max_level(threshold);

        for (i, level) in levels.iter().enumerate() {
            logger.log(*level, i);
        }

        let expected: Vec<String> = levels
            .iter()
            .enumerate()
            .filter(|(_, level)| level.passes(threshold))
            .map(|(i, _)| i.to_string())
            .collect();
        prop_assert_eq!(target.messages(), expected);
        logger.close();
    }

    #[test]
    fn prop_single_producer_order_preserved(
        messages in prop::collection::vec("[a-zA-Z0-9 ]{0,24}", 0..100),
        buffer_size in 0usize..8
    ) {
        let target = CaptureTarget::new();
        let logger = Logger::builder()
            .error_writer(common::SharedBuffer::default())
            .buffer_size(buffer_size)
            .target(target.clone())
            .build()
            .unwrap();

        for message in &messages {
            logger.info(message);
        }
        logger.close();

        prop_assert_eq!(target.messages(), messages);
    }

    #[test]
    fn prop_formatted_line_carries_fields(
        category in "[a-z]{1,12}",
        message in "[a-zA-Z0-9 ]{0,32}",
        level in non_fatal_level()
    ) {
        let target = CaptureTarget::new();
        let (root, _errors) = capture_logger(&target);
        root.sync(true);
        let logger = root.get_logger(category.clone());

        logger.log(level, &message);

        let entries = target.entries();
        prop_assert_eq!(entries.len(), 1);
        let expected_suffix = format!("|{}|{}|{}", level, category, message);
        prop_assert!(entries[0].formatted_message.ends_with(&expected_suffix));
        root.close();
    }
}
