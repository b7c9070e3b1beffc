//! Relationship resolution: forward matches, responses and failures.

use c4dyn::model::{Element, Model, Relationship};
use c4dyn::view::{DynamicView, DynamicViewError, RelationshipResolver, ViewConfig};
use c4dyn::RelationshipId;
use rstest::rstest;

use crate::helpers::model_fixtures::{banking_model, id};

fn duplicated_model() -> Model {
    let mut model = Model::new();
    model.add_element(Element::software_system("a", "A")).unwrap();
    model.add_element(Element::software_system("b", "B")).unwrap();
    model
        .add_relationship(
            Relationship::new("http", "a", "b")
                .with_description("Calls")
                .with_technology("HTTP"),
        )
        .unwrap();
    model
        .add_relationship(
            Relationship::new("grpc", "a", "b")
                .with_description("Calls")
                .with_technology("gRPC"),
        )
        .unwrap();
    model
}

// ============================================================================
// Forward relationships
// ============================================================================

#[rstest]
#[case::no_filters(None, None)]
#[case::empty_description(Some(""), None)]
#[case::description(Some("Makes API calls to"), None)]
#[case::technology(None, Some("JSON/HTTPS"))]
#[case::both(Some("Makes API calls to"), Some("JSON/HTTPS"))]
fn test_forward_match(#[case] description: Option<&str>, #[case] technology: Option<&str>) {
    let model = banking_model();
    let resolved = RelationshipResolver::new(&model)
        .resolve(&id("spa"), &id("signin"), description, technology)
        .unwrap();
    assert_eq!(resolved.relationship.id, RelationshipId::from("spa_signin"));
    assert!(!resolved.is_response);
}

#[test]
fn test_description_mismatch_is_not_found() {
    let model = banking_model();
    let err = RelationshipResolver::new(&model)
        .resolve(&id("spa"), &id("signin"), Some("Reads from"), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A relationship between Single-Page Application and Sign In Controller does not exist in model."
    );
}

#[test]
fn test_technology_mismatch_names_technology() {
    let model = banking_model();
    let err = RelationshipResolver::new(&model)
        .resolve(&id("spa"), &id("signin"), None, Some("gRPC"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A relationship between Single-Page Application and Sign In Controller with technology 'gRPC' does not exist in model."
    );
}

#[test]
fn test_first_declared_wins() {
    let model = duplicated_model();
    let resolver = RelationshipResolver::new(&model).with_ambiguity_reports(true);

    let any = resolver.resolve(&id("a"), &id("b"), Some("Calls"), None).unwrap();
    assert_eq!(any.relationship.id.as_str(), "http");

    let grpc = resolver.resolve(&id("a"), &id("b"), None, Some("gRPC")).unwrap();
    assert_eq!(grpc.relationship.id.as_str(), "grpc");
}

#[test]
fn test_resolution_is_repeatable() {
    let model = banking_model();
    let resolver = RelationshipResolver::new(&model);
    let first = resolver.resolve(&id("api"), &id("db"), None, None).unwrap();
    let second = resolver.resolve(&id("api"), &id("db"), None, None).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Responses
// ============================================================================

#[test]
fn test_response_ignores_description() {
    let model = banking_model();
    let resolved = RelationshipResolver::new(&model)
        .resolve(&id("signin"), &id("spa"), Some("Sends back a token to"), None)
        .unwrap();
    assert_eq!(resolved.relationship.id.as_str(), "spa_signin");
    assert!(resolved.is_response);
}

#[test]
fn test_response_checks_technology() {
    let model = banking_model();
    let resolver = RelationshipResolver::new(&model);

    assert!(
        resolver
            .resolve(&id("signin"), &id("spa"), None, Some("JSON/HTTPS"))
            .unwrap()
            .is_response
    );
    let err = resolver
        .resolve(&id("signin"), &id("spa"), None, Some("gRPC"))
        .unwrap_err();
    assert!(matches!(err, DynamicViewError::RelationshipNotFound { .. }));
}

#[test]
fn test_forward_preferred_over_response() {
    let mut model = duplicated_model();
    model
        .add_relationship(Relationship::new("back", "b", "a").with_description("Notifies"))
        .unwrap();

    let resolved = RelationshipResolver::new(&model)
        .resolve(&id("b"), &id("a"), None, None)
        .unwrap();
    assert_eq!(resolved.relationship.id.as_str(), "back");
    assert!(!resolved.is_response);
}

#[test]
fn test_response_in_view_keeps_given_description() {
    let model = banking_model();
    let mut view = DynamicView::for_container(&model, "api", ViewConfig::new("SignIn")).unwrap();

    view.add(&id("spa"), &id("signin"), None, Some("JSON/HTTPS"))
        .unwrap();
    let reply = view
        .add(&id("signin"), &id("spa"), Some("Sends back an authentication token to"), None)
        .unwrap();

    assert!(reply.response);
    assert_eq!(reply.relationship.as_str(), "spa_signin");
    assert_eq!(&*reply.description, "Sends back an authentication token to");
    assert_eq!(reply.order, "2");
}

#[test]
fn test_missing_description_falls_back_to_declared() {
    let model = banking_model();
    let mut view = DynamicView::unscoped(&model, ViewConfig::default());
    let record = view.add(&id("customer"), &id("ibs"), None, None).unwrap();
    assert_eq!(&*record.description, "Views account balances using");
}
