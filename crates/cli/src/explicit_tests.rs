// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use similar_asserts::assert_eq;

fn five_lines() -> TextBuffer {
    TextBuffer::parse("<?php\nclass Foo {\n\t$result = $wpdb->insert( $t, $d );\n\treturn $result;\n}\n")
}

#[test]
fn inserts_above_target_with_target_indent() {
    let mut buf = five_lines();
    let applied = apply_targets(&mut buf, &[ExplicitTarget::new(3, "X")]);

    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].outcome, TargetOutcome::Inserted);
    assert_eq!(buf.len(), 6);
    // New comment sits where line 3 was, carrying line 3's indent.
    assert_eq!(buf.line(2), Some("\t// phpcs:ignore X"));
    assert_eq!(buf.line(3), Some("\t$result = $wpdb->insert( $t, $d );"));
}

#[test]
fn updates_existing_annotation_in_place() {
    let mut buf = TextBuffer::parse(
        "<?php\n\t// phpcs:ignore OldRule -- reason\n\t$result = $wpdb->insert( $t, $d );\n\treturn $result;\n}\n",
    );
    let applied = apply_targets(
        &mut buf,
        &[ExplicitTarget::new(
            3,
            "WordPress.DB.DirectDatabaseQuery.DirectQuery -- reason2",
        )],
    );

    assert_eq!(applied[0].outcome, TargetOutcome::Updated);
    assert_eq!(buf.len(), 5);
    assert_eq!(
        buf.line(1),
        Some("\t// phpcs:ignore WordPress.DB.DirectDatabaseQuery.DirectQuery -- reason2")
    );
}

#[test]
fn out_of_range_target_is_skipped_not_fatal() {
    let mut buf = five_lines();
    let applied = apply_targets(
        &mut buf,
        &[ExplicitTarget::new(99, "X"), ExplicitTarget::new(3, "Y")],
    );

    let by_line = |n: usize| {
        applied
            .iter()
            .find(|a| a.line == n)
            .map(|a| a.outcome)
            .unwrap()
    };
    assert_eq!(by_line(99), TargetOutcome::OutOfRange);
    assert_eq!(by_line(3), TargetOutcome::Inserted);
    assert_eq!(buf.len(), 6);
}

#[test]
fn line_zero_is_out_of_range() {
    let mut buf = five_lines();
    let applied = apply_targets(&mut buf, &[ExplicitTarget::new(0, "X")]);
    assert_eq!(applied[0].outcome, TargetOutcome::OutOfRange);
}

#[test]
fn caller_order_does_not_matter() {
    let text: String = (1..=30).map(|i| format!("\tline{i};\n")).collect();
    let targets = [
        ExplicitTarget::new(10, "A.A -- a"),
        ExplicitTarget::new(25, "B.B -- b"),
        ExplicitTarget::new(5, "C.C -- c"),
    ];
    let mut reversed = targets.to_vec();
    reversed.reverse();

    let mut forward_buf = TextBuffer::parse(&text);
    apply_targets(&mut forward_buf, &targets);

    let mut reverse_buf = TextBuffer::parse(&text);
    apply_targets(&mut reverse_buf, &reversed);

    assert_eq!(forward_buf.render(), reverse_buf.render());
    assert_eq!(forward_buf.len(), 33);
}

#[test]
fn applying_twice_is_idempotent() {
    let mut buf = five_lines();
    let target = [ExplicitTarget::new(3, "X.Y -- z")];
    apply_targets(&mut buf, &target);
    let after_once = buf.render();

    // The same target again now addresses the inserted annotation line;
    // it must overwrite it, not stack a second one.
    let applied = apply_targets(&mut buf, &target);
    assert_eq!(applied[0].outcome, TargetOutcome::Updated);
    assert_eq!(buf.render(), after_once);
}

#[test]
fn duplicate_targets_in_one_batch_collapse() {
    let mut buf = five_lines();
    let targets = [
        ExplicitTarget::new(3, "X.Y -- z"),
        ExplicitTarget::new(3, "X.Y -- z"),
    ];
    let applied = apply_targets(&mut buf, &targets);

    assert_eq!(applied[0].outcome, TargetOutcome::Inserted);
    assert_eq!(applied[1].outcome, TargetOutcome::Updated);
    assert_eq!(buf.len(), 6);
    let markers = buf
        .lines()
        .iter()
        .filter(|l| l.contains("phpcs:ignore"))
        .count();
    assert_eq!(markers, 1);
    assert_eq!(buf.line(2), Some("\t// phpcs:ignore X.Y -- z"));
}

#[test]
fn first_line_target_inserts_at_top() {
    let mut buf = TextBuffer::parse("$x = 1;\n$y = 2;\n");
    let applied = apply_targets(&mut buf, &[ExplicitTarget::new(1, "A.B")]);
    assert_eq!(applied[0].outcome, TargetOutcome::Inserted);
    assert_eq!(buf.line(0), Some("// phpcs:ignore A.B"));
}
