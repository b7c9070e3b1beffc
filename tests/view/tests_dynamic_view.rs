//! End-to-end dynamic view construction over the banking model.

use std::panic::{self, AssertUnwindSafe};

use c4dyn::view::{DynamicView, DynamicViewError, Interaction, NotAddableReason, ViewConfig};
use c4dyn::{ElementId, RelationshipId};

use crate::helpers::model_fixtures::{banking_model, id};

#[test]
fn test_sign_in_flow() {
    let model = banking_model();
    let config = ViewConfig::new("SignIn").with_title("Sign in").with_description(
        "Summarises how the sign in feature works in the single-page application.",
    );
    let mut view = DynamicView::for_container(&model, "api", config).unwrap();

    let steps = [
        Interaction::new("spa", "signin").technology("JSON/HTTPS"),
        Interaction::new("signin", "security"),
        Interaction::new("security", "db").description("select * from users where username = ?"),
        Interaction::new("signin", "spa").description("Sends back an authentication token to"),
    ];
    let orders: Vec<_> = steps
        .iter()
        .map(|step| view.add_with(step).unwrap().order)
        .collect();

    assert_eq!(orders, ["1", "2", "3", "4"]);
    assert_eq!(view.key(), Some("SignIn"));
    assert_eq!(view.title(), Some("Sign in"));

    let elements: Vec<_> = view.elements().map(ElementId::as_str).collect();
    assert_eq!(elements, ["spa", "signin", "security", "db"]);

    let over_spa_signin: Vec<_> = view
        .interactions_for(&RelationshipId::from("spa_signin"))
        .map(|i| (i.order.as_str(), i.response))
        .collect();
    assert_eq!(over_spa_signin, [("1", false), ("4", true)]);
}

#[test]
fn test_software_system_scope_flow() {
    let model = banking_model();
    let mut view =
        DynamicView::for_software_system(&model, "ibs", ViewConfig::new("Accounts")).unwrap();

    view.add(&id("customer"), &id("web"), None, Some("HTTPS")).unwrap();
    view.add(&id("web"), &id("spa"), None, None).unwrap();
    view.add(&id("spa"), &id("api"), None, None).unwrap();
    let last = view.add(&id("api"), &id("mainframe"), None, None).unwrap();

    assert_eq!(last.order, "4");
    assert_eq!(view.elements().count(), 5);
}

#[test]
fn test_rejected_destination_changes_nothing() {
    let model = banking_model();
    let mut view = DynamicView::for_software_system(&model, "ibs", ViewConfig::default()).unwrap();
    view.add(&id("spa"), &id("api"), None, None).unwrap();

    let err = view.add(&id("spa"), &id("signin"), None, None).unwrap_err();
    assert_eq!(
        err,
        DynamicViewError::ElementNotAddable {
            element: id("signin"),
            name: "Sign In Controller".into(),
            reason: NotAddableReason::ComponentInSystemScope,
        }
    );
    assert_eq!(view.elements().count(), 2);
    assert_eq!(view.interactions().len(), 1);
    assert_eq!(view.sequence().current().as_deref(), Some("1"));
}

#[test]
fn test_rejected_source_is_reported_first() {
    let model = banking_model();
    let mut view = DynamicView::for_software_system(&model, "ibs", ViewConfig::default()).unwrap();

    let err = view.add(&id("ibs"), &id("signin"), None, None).unwrap_err();
    assert!(matches!(
        err,
        DynamicViewError::ElementNotAddable { reason: NotAddableReason::IsScope, .. }
    ));
}

#[test]
fn test_unknown_relationship_changes_nothing() {
    let model = banking_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());

    let err = view
        .add(&id("customer"), &id("mainframe"), None, Some("gRPC"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A relationship between Personal Banking Customer and Mainframe Banking System with technology 'gRPC' does not exist in model."
    );
    assert_eq!(view.elements().count(), 0);
    assert_eq!(view.sequence().current(), None);
}

#[test]
fn test_destination_may_not_be_parent_of_source() {
    let model = banking_model();
    let mut view =
        DynamicView::for_software_system(&model, "mainframe", ViewConfig::default()).unwrap();

    // The source counts as already in the view when the destination is checked.
    let err = view.add(&id("api"), &id("ibs"), None, None).unwrap_err();
    assert!(matches!(
        err,
        DynamicViewError::ElementNotAddable { reason: NotAddableReason::ChildInView { .. }, .. }
    ));
    assert_eq!(view.elements().count(), 0);
}

#[test]
fn test_early_return_inside_guard_closes_branch() {
    fn build(view: &mut DynamicView<'_>) -> Result<(), DynamicViewError> {
        view.add(&id("customer"), &id("ibs"), None, None)?;
        let mut branch = view.parallel_sequence(true);
        branch.add(&id("ibs"), &id("mainframe"), None, None)?;
        branch.add(&id("ibs"), &id("email"), None, None)?;
        Ok(())
    }

    let model = banking_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    assert!(build(&mut view).is_err());
    assert_eq!(view.sequence().depth(), 0);
    assert_eq!(view.interactions().len(), 2);
    assert_eq!(view.add(&id("customer"), &id("ibs"), None, None).unwrap().order, "3");
}

#[test]
fn test_panic_inside_guard_closes_branch() {
    let model = banking_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    view.add(&id("customer"), &id("ibs"), None, None).unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut branch = view.parallel_sequence(true);
        branch.add(&id("ibs"), &id("mainframe"), None, None).unwrap();
        branch.add(&id("ibs"), &id("email"), None, None).unwrap();
    }));

    assert!(result.is_err());
    assert_eq!(view.sequence().depth(), 0);
    assert_eq!(view.interactions().len(), 2);
    assert_eq!(view.add(&id("customer"), &id("ibs"), None, None).unwrap().order, "3");
}
