//! Pactum - Consumer-driven contracts for asynchronous messages
//!
//! A consumer describes the messages it expects to receive from a provider.
//! Each message carries a description, provider states, metadata and a body
//! whose fields may be annotated with matching rules and generators. The
//! accumulated expectations are projected into a V3 message pact or a V4
//! pact.
//!
//! # Quick Start
//!
//! ```
//! use pactum::{JsonBody, MessagePactBuilder, PactKind};
//!
//! let mut builder = MessagePactBuilder::new();
//! builder
//!     .consumer("billing-service")
//!     .has_pact_with("order-service")
//!     .given("an order exists")
//!     .expects_to_receive("an order created event");
//! builder.with_metadata([("topic", "orders")])?;
//! builder.with_json_body(JsonBody::new().uuid("orderId").integer_type("total", 1200))?;
//!
//! let pact = builder.to_pact_of(PactKind::V4)?;
//! assert_eq!(pact.len(), 1);
//! # Ok::<(), pactum::PactError>(())
//! ```
//!
//! # Architecture
//!
//! The model, codecs and projections live in `pactum-core`; the builder and
//! content DSLs live in `pactum-consumer`. Both are re-exported here.

pub use pactum_consumer::*;
pub use pactum_core::*;
