/// Study domain: value objects, pure services and policies of the longitudinal scan pipeline
pub mod domain;
pub mod policies;
pub mod services;
