pub mod jwt_authorization_validator;
