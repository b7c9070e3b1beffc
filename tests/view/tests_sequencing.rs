//! Order labels: plain, parallel and child sequences.

use std::panic::{self, AssertUnwindSafe};

use c4dyn::model::Model;
use c4dyn::view::{DynamicView, DynamicViewError, FrameKind, SequenceError, ViewConfig};

use crate::helpers::model_fixtures::{fork_join_model, id};

fn add(view: &mut DynamicView<'_, Model>, source: &str, destination: &str) -> String {
    view.add(&id(source), &id(destination), None, None)
        .unwrap()
        .order
        .to_string()
}

fn orders(view: &DynamicView<'_, Model>) -> Vec<String> {
    let model = view.model();
    view.interactions()
        .iter()
        .map(|i| {
            let relationship = model.get_relationship(&i.relationship).unwrap();
            format!("{}{}", i.order, relationship.destination)
        })
        .collect()
}

#[test]
fn test_plain_sequence_counts_from_one() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    assert_eq!(add(&mut view, "a", "b"), "1");
    assert_eq!(add(&mut view, "b", "c"), "2");
    assert_eq!(add(&mut view, "c", "e"), "3");
}

#[test]
fn test_fork_join_with_guards() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::new("ForkJoin"));

    add(&mut view, "a", "b");
    {
        let mut branch = view.parallel_sequence(false);
        assert_eq!(add(&mut branch, "b", "c"), "2");
        assert_eq!(add(&mut branch, "c", "e"), "3");
    }
    {
        let mut branch = view.parallel_sequence(true);
        assert_eq!(add(&mut branch, "b", "d"), "2");
        assert_eq!(add(&mut branch, "d", "e"), "3");
    }
    assert_eq!(add(&mut view, "e", "f"), "4");
    assert_eq!(view.sequence().depth(), 0);
    assert_eq!(orders(&view), ["1b", "2c", "3e", "2d", "3e", "4f"]);
}

#[test]
fn test_branch_without_continue_restores_counter() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    add(&mut view, "a", "b");
    {
        let mut branch = view.parallel_sequence(false);
        add(&mut branch, "b", "c");
        add(&mut branch, "c", "e");
    }
    assert_eq!(add(&mut view, "b", "d"), "2");
}

#[test]
fn test_explicit_start_and_end() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    add(&mut view, "a", "b");
    view.start_parallel_sequence();
    assert_eq!(view.sequence().innermost(), FrameKind::Parallel);
    assert_eq!(add(&mut view, "b", "c"), "2");
    view.end_parallel_sequence(false).unwrap();
    view.start_parallel_sequence();
    assert_eq!(add(&mut view, "b", "d"), "2");
    view.end_parallel_sequence(true).unwrap();
    assert_eq!(add(&mut view, "d", "e"), "3");
}

#[test]
fn test_nested_parallel_sequences() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    add(&mut view, "a", "b");
    {
        let mut outer = view.parallel_sequence(true);
        assert_eq!(add(&mut outer, "b", "c"), "2");
        {
            let mut inner = outer.parallel_sequence(true);
            assert_eq!(add(&mut inner, "c", "e"), "3");
            assert_eq!(inner.sequence().depth(), 2);
        }
        assert_eq!(add(&mut outer, "e", "f"), "4");
    }
    assert_eq!(add(&mut view, "b", "d"), "5");
}

#[test]
fn test_child_sequence_labels() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    add(&mut view, "a", "b");
    {
        let mut child = view.child_sequence();
        assert_eq!(add(&mut child, "b", "c"), "1.1");
        assert_eq!(add(&mut child, "b", "d"), "1.2");
        {
            let mut grandchild = child.child_sequence();
            assert_eq!(add(&mut grandchild, "d", "e"), "1.2.1");
        }
        assert_eq!(add(&mut child, "c", "e"), "1.3");
    }
    assert_eq!(add(&mut view, "e", "f"), "2");
}

#[test]
fn test_mismatched_end_is_an_error() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    view.start_child_sequence();
    let err = view.end_parallel_sequence(true).unwrap_err();
    assert_eq!(
        err,
        DynamicViewError::SequencingMisuse(SequenceError::Mismatched {
            requested: FrameKind::Parallel,
            open: FrameKind::Child,
        })
    );
    view.end_child_sequence().unwrap();
    assert_eq!(view.sequence().depth(), 0);
}

#[test]
fn test_failed_add_inside_branch_consumes_no_number() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    add(&mut view, "a", "b");
    {
        let mut branch = view.parallel_sequence(true);
        assert!(branch.add(&id("a"), &id("f"), None, None).is_err());
        assert_eq!(add(&mut branch, "b", "c"), "2");
    }
    assert_eq!(add(&mut view, "c", "e"), "3");
}

// ============================================================================
// Guards closed out of order
// ============================================================================

#[test]
fn test_guard_never_ends_a_frame_it_did_not_open() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    add(&mut view, "a", "b");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut outer = view.parallel_sequence(false);
        add(&mut outer, "b", "c");
        let mut inner = outer.parallel_sequence(true);
        add(&mut inner, "c", "e");
        inner.end_parallel_sequence(true).unwrap();
        drop(inner);
    }));

    assert!(result.is_err());
    assert_eq!(view.sequence().depth(), 0);
    assert_eq!(add(&mut view, "b", "d"), "2");
}

#[test]
#[should_panic(expected = "closed out of order")]
fn test_child_guard_ended_explicitly_panics() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    add(&mut view, "a", "b");

    let mut child = view.child_sequence();
    add(&mut child, "b", "c");
    child.end_child_sequence().unwrap();
}

#[test]
#[should_panic(expected = "closed out of order")]
fn test_guard_dropped_over_open_inner_sequence_panics() {
    let model = fork_join_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    let mut branch = view.parallel_sequence(true);
    branch.start_child_sequence();
}
