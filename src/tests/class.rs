// Unit Tests for the Error Class Hierarchy
//
// UNIT UNDER TEST: ErrorClass, ErrorConstructor, ErrorFactory::construct
//
// BUSINESS RESPONSIBILITY:
//   - Gives every standard status code one class, reachable by name and by code
//   - Refuses construction of the abstract HttpError base
//   - Constructs fresh errors pre-configured with the class defaults
//   - Answers instanceof questions for constructed errors
//
// TEST COVERAGE:
//   - Named constants, numeric lookup and named lookup resolve identically
//   - Abstract construction failure
//   - Class construction defaults and argument handling
//   - instanceof semantics against the base and sibling classes

use serde_json::json;

use crate::args;
use crate::base_error::BaseError;
use crate::class::{ErrorClass, ErrorConstructor};
use crate::error::{ArgKind, ErrorCategory, FactoryError};
use crate::factory::{construct, ErrorFactory};
use crate::tests::helpers::factory_with_custom_status;

#[cfg(test)]
mod class_addressing_tests {
    use super::*;

    #[test]
    fn test_numeric_and_named_access_yield_identical_class() {
        // Test verifies createError[404] and createError.NotFound are the same class

        // Act
        let by_code = ErrorClass::from_code(404);
        let by_name = ErrorClass::from_name("NotFound");

        // Assert
        assert_eq!(by_code, by_name);
        assert_eq!(by_code, Some(ErrorClass::NOT_FOUND));
        assert_eq!(ErrorConstructor::by_code(404), ErrorConstructor::by_name("NotFound"));
    }

    #[test]
    fn test_every_standard_class_round_trips_through_name() {
        // Test verifies named lookup works for identifiers containing punctuation-free forms

        // Act & Assert
        assert_eq!(ErrorClass::from_name("ImATeapot"), Some(ErrorClass::IM_A_TEAPOT));
        assert_eq!(
            ErrorClass::from_name("InternalServerError"),
            Some(ErrorClass::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(
            ErrorClass::from_name("HTTPVersionNotSupported"),
            Some(ErrorClass::HTTP_VERSION_NOT_SUPPORTED)
        );
        assert_eq!(ErrorClass::from_name("NoSuchThing"), None);
    }

    #[test]
    fn test_unmapped_codes_have_no_class() {
        // Test verifies only registered codes own a class

        // Act & Assert
        assert_eq!(ErrorClass::from_code(499), None);
        assert_eq!(ErrorConstructor::by_code(200), None);
    }

    #[test]
    fn test_base_is_addressable_by_name() {
        // Test verifies the abstract base is exposed for instanceof checks

        // Act
        let base = ErrorConstructor::by_name("HttpError");

        // Assert
        assert_eq!(base, Some(ErrorConstructor::HttpError));
        assert!(ErrorConstructor::HttpError.is_abstract());
        assert_eq!(ErrorConstructor::HttpError.class(), None);
    }

    #[test]
    fn test_class_display_uses_class_name() {
        // Test verifies classes render as their error name

        // Act & Assert
        assert_eq!(ErrorClass::NOT_FOUND.to_string(), "NotFoundError");
        assert_eq!(ErrorClass::GATEWAY_TIMEOUT.to_string(), "GatewayTimeoutError");
        assert_eq!(ErrorClass::NOT_FOUND.code(), 404);
        assert!(ErrorClass::NOT_FOUND.default_expose());
        assert!(!ErrorClass::GATEWAY_TIMEOUT.default_expose());
    }
}

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_constructing_abstract_base_fails() {
        // Test verifies new HttpError() is refused

        // Act
        let result = construct(ErrorConstructor::HttpError, args![]);

        // Assert
        let err = result.expect_err("abstract base must not construct");
        assert_eq!(
            err,
            FactoryError::AbstractConstruction { class: "HttpError" }
        );
        assert_eq!(err.to_string(), "cannot construct abstract class HttpError");
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_constructing_not_found_applies_class_defaults() {
        // Test verifies new NotFound() carries status, name, message and expose

        // Act
        let err = construct(ErrorClass::NOT_FOUND, args![]).expect("NotFound constructs");

        // Assert
        assert_eq!(err.name(), "NotFoundError");
        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.status(), 404);
        assert_eq!(err.status_code(), 404);
        assert!(err.expose());
        assert!(!err.is_adopted());
    }

    #[test]
    fn test_constructing_internal_server_error_hides_message() {
        // Test verifies new InternalServerError() is not exposed

        // Act
        let err = construct(ErrorClass::INTERNAL_SERVER_ERROR, args![])
            .expect("InternalServerError constructs");

        // Assert
        assert_eq!(err.name(), "InternalServerError");
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.status(), 500);
        assert!(!err.expose());
    }

    #[test]
    fn test_construction_by_code_and_by_name_agree() {
        // Test verifies new createError[404]() matches new createError.NotFound()

        // Arrange
        let by_code = ErrorConstructor::by_code(404).expect("404 has a class");
        let by_name = ErrorConstructor::by_name("NotFound").expect("NotFound has a class");

        // Act
        let from_code = construct(by_code, args![]).expect("constructs");
        let from_name = construct(by_name, args![]).expect("constructs");

        // Assert
        assert_eq!(from_code.class(), from_name.class());
        assert_eq!(from_code.name(), from_name.name());
        assert_ne!(from_code.id(), from_name.id(), "each construction is a new object");
    }

    #[test]
    fn test_construction_accepts_message_and_properties() {
        // Test verifies class constructors take the factory's message and bag forms

        // Act
        let err = construct(
            ErrorClass::CONFLICT,
            args!["version mismatch", json!({ "expected": 3, "status": 500 })],
        )
        .expect("constructs");

        // Assert
        assert_eq!(err.status(), 409);
        assert_eq!(err.message(), "version mismatch");
        assert_eq!(err.property("expected"), Some(&json!(3)));
        assert_eq!(err.property("status"), None);
    }

    #[test]
    fn test_construction_rejects_numeric_arguments() {
        // Test verifies the class fixes the status, so numbers are unsupported

        // Act
        let result = construct(ErrorClass::NOT_FOUND, args![404]);

        // Assert
        assert_eq!(
            result.expect_err("number must be rejected"),
            FactoryError::InvalidArgumentType {
                position: 1,
                kind: ArgKind::Number
            }
        );
    }

    #[test]
    fn test_construction_wraps_error_argument_as_source() {
        // Test verifies an error argument becomes the cause of the new error

        // Arrange
        let cause = BaseError::new("disk full");

        // Act
        let err = construct(ErrorClass::INSUFFICIENT_STORAGE, args![cause]).expect("constructs");

        // Assert
        assert_eq!(err.status(), 507);
        assert!(!err.is_adopted());
        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "Error: disk full");
    }

    #[test]
    fn test_custom_class_constructs_through_its_registry() {
        // Test verifies classes for custom codes construct with their phrase

        // Arrange
        let factory: ErrorFactory = factory_with_custom_status();
        let class = factory
            .registry()
            .class_for_code(420)
            .expect("420 is registered");

        // Act
        let err = factory
            .construct(ErrorConstructor::Class(class), args![])
            .expect("constructs");

        // Assert
        assert_eq!(err.name(), "EnhanceYourCalmError");
        assert_eq!(err.message(), "Enhance Your Calm");
        assert_eq!(err.status(), 420);
        assert_eq!(err.class(), Some(class));
    }

    #[test]
    fn test_custom_class_is_named_through_its_registry() {
        // Test verifies custom classes are named by the registry that holds them

        // Arrange
        let factory = factory_with_custom_status();
        let class = factory
            .registry()
            .class_for_code(420)
            .expect("420 is registered");

        // Act
        let name = class.name_in(factory.registry());

        // Assert
        assert_eq!(name, Some("EnhanceYourCalmError"));
        assert_eq!(class.name_in(crate::registry::StatusRegistry::standard()), None);
        assert_eq!(class.to_string(), "HttpError[420]");
        assert_eq!(
            ErrorClass::NOT_FOUND.name_in(factory.registry()),
            Some("NotFoundError")
        );
    }
}

#[cfg(test)]
mod instanceof_tests {
    use super::*;
    use crate::factory::create;

    #[test]
    fn test_constructed_errors_are_instances_of_base_and_class() {
        // Test verifies err instanceof HttpError and err instanceof NotFound

        // Act
        let created = create(args![404]).expect("creates");
        let constructed = construct(ErrorClass::NOT_FOUND, args![]).expect("constructs");

        // Assert
        for err in [&created, &constructed] {
            assert!(err.is_instance_of(ErrorConstructor::HttpError));
            assert!(err.is_instance_of(ErrorConstructor::Class(ErrorClass::NOT_FOUND)));
            assert!(!err.is_instance_of(ErrorConstructor::Class(ErrorClass::GONE)));
        }
    }

    #[test]
    fn test_century_fallback_errors_are_instances_of_century_class() {
        // Test verifies an unmapped 4xx is built from the BadRequest class

        // Act
        let err = create(args![499]).expect("creates");

        // Assert
        assert!(err.is_instance_of(ErrorClass::BAD_REQUEST.into()));
        assert_eq!(err.status(), 499);
    }

    #[test]
    fn test_adopted_errors_are_not_instances() {
        // Test verifies adopted plain errors are marked but not instances

        // Act
        let err = create(args![500, BaseError::new("boom")]).expect("creates");

        // Assert
        assert!(!err.is_instance_of(ErrorConstructor::HttpError));
        assert!(!err.is_instance_of(ErrorClass::INTERNAL_SERVER_ERROR.into()));
    }
}
