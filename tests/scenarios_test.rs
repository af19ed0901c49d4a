//! End-to-end validation of flat and nested object graphs.

use inquest::message::COMPARISON_VALUE;
use inquest::prelude::*;
use inquest::{MessageFormatter, ValidationFailure};
use serde_json::{json, Value};
use std::sync::Arc;

fn unwrap_failures(result: ValidationResult) -> Vec<ValidationFailure> {
    result.into_result().unwrap_err().into_vec()
}

fn paths(failures: &[ValidationFailure]) -> Vec<String> {
    failures.iter().map(|f| f.path.to_string()).collect()
}

#[test]
fn test_minimum_age() {
    let validator = ObjectValidator::new()
        .rule(PropertyRule::field("Age").validator(GreaterThanOrEqualValidator::new(18)));

    let failures = unwrap_failures(validator.validate(&json!({"Age": 15})).unwrap());

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "Age");
    assert_eq!(failures[0].placeholder(COMPARISON_VALUE), Some(&json!(18)));
    assert_eq!(failures[0].attempted_value, Some(json!(15)));
    assert_eq!(failures[0].code, "greater_than_or_equal");
}

#[test]
fn test_required_city_per_address() {
    let address = ObjectValidator::new()
        .rule(PropertyRule::field("City").validator(NotNullValidator::new()));
    let customer = ObjectValidator::new().rule(
        PropertyRule::field("Addresses")
            .validator(ChildCollectionValidatorAdaptor::new(Arc::new(address))),
    );

    let failures = unwrap_failures(
        customer
            .validate(&json!({"Addresses": [{"City": null}, {"City": "Rome"}]}))
            .unwrap(),
    );

    assert_eq!(paths(&failures), vec!["Addresses[0].City"]);
    assert_eq!(failures[0].message, "'City' must not be empty.");
}

#[test]
fn test_password_confirmation() {
    let validator = ObjectValidator::new()
        .rule(PropertyRule::field("Confirm").validator(EqualValidator::member("Password")));

    let failures = unwrap_failures(
        validator
            .validate(&json!({"Password": "x", "Confirm": "y"}))
            .unwrap(),
    );

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "Confirm");
    assert_eq!(failures[0].placeholder(COMPARISON_VALUE), Some(&json!("x")));
    assert_eq!(failures[0].message, "'Confirm' should be equal to 'x'.");
}

#[test]
fn test_message_formatting() {
    let mut formatter = MessageFormatter::new();
    formatter
        .append_property_name("Age")
        .append_argument(COMPARISON_VALUE, 18);

    assert_eq!(
        formatter.build_message("{PropertyName} must equal {ComparisonValue}"),
        "Age must equal 18"
    );
}

#[test]
fn test_valid_instance_succeeds() {
    let validator = ObjectValidator::new()
        .rule(PropertyRule::field("Age").validator(GreaterThanOrEqualValidator::new(18)))
        .rule(PropertyRule::field("Name").validator(NotEmptyValidator::new()));

    let result = validator.validate(&json!({"Age": 30, "Name": "Ada"})).unwrap();
    assert!(result.is_success());
}

#[test]
fn test_deeply_nested_paths() {
    let line = ObjectValidator::new()
        .rule(PropertyRule::field("Quantity").validator(GreaterThanValidator::new(0)));
    let order = ObjectValidator::new().rule(
        PropertyRule::field("Lines").validator(ChildCollectionValidatorAdaptor::new(Arc::new(line))),
    );
    let customer = ObjectValidator::new()
        .rule(PropertyRule::field("Order").validator(ChildValidatorAdaptor::new(Arc::new(order))));

    let instance = json!({
        "Order": {
            "Lines": [{"Quantity": 1}, {"Quantity": 0}, {"Quantity": -2}]
        }
    });
    let failures = unwrap_failures(customer.validate(&instance).unwrap());

    assert_eq!(
        paths(&failures),
        vec!["Order.Lines[1].Quantity", "Order.Lines[2].Quantity"]
    );
}

#[test]
fn test_every_failure_is_collected() {
    let validator = ObjectValidator::new()
        .rule(
            PropertyRule::field("Email")
                .validator(NotEmptyValidator::new())
                .validator(RegularExpressionValidator::new(r"^[^@\s]+@[^@\s]+$").unwrap()),
        )
        .rule(PropertyRule::field("Age").validator(LessThanValidator::new(150)));

    let failures = unwrap_failures(
        validator
            .validate(&json!({"Email": "not an email", "Age": 200}))
            .unwrap(),
    );

    assert_eq!(paths(&failures), vec!["Email", "Age"]);
    assert_eq!(failures[0].code, "regular_expression");
    assert_eq!(failures[1].code, "less_than");
}

#[test]
fn test_failures_serialize() {
    let validator = ObjectValidator::new()
        .rule(PropertyRule::field("Age").validator(GreaterThanOrEqualValidator::new(18)));
    let failures = validator
        .validate(&json!({"Age": 15}))
        .unwrap()
        .into_result()
        .unwrap_err();

    let serialized = serde_json::to_value(&failures).unwrap();
    assert_eq!(serialized[0]["path"], "Age");
    assert_eq!(serialized[0]["attempted_value"], 15);
    assert_eq!(serialized[0]["placeholders"]["ComparisonValue"], 18);
}

#[test]
fn test_typed_instance() {
    #[derive(serde::Serialize)]
    struct Signup {
        #[serde(rename = "Password")]
        password: String,
        #[serde(rename = "Confirm")]
        confirm: String,
    }

    let validator = ObjectValidator::new()
        .rule(PropertyRule::field("Confirm").validator(EqualValidator::member("Password")));

    let matching = Signup {
        password: "hunter2".into(),
        confirm: "hunter2".into(),
    };
    assert!(validator.validate_serialize(&matching).unwrap().is_success());
}

#[test]
fn test_custom_messages_with_positional_arguments() {
    let validator = ObjectValidator::new().rule(
        PropertyRule::field("Code").validator(
            NotEmptyValidator::new()
                .with_message("{PropertyName} is required for {0} accounts")
                .with_code("code_required")
                .with_message_argument(|instance: &Value, _: Option<&Value>| instance["Kind"].clone()),
        ),
    );

    let failures = unwrap_failures(validator.validate(&json!({"Kind": "business"})).unwrap());
    assert_eq!(failures[0].message, "Code is required for business accounts");
    assert_eq!(failures[0].code, "code_required");
}
