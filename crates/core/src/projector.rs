//! Projection of accumulated messages into contract documents
//!
//! Both projections read a borrowed message list and return an owned
//! document; nothing in the returned document aliases the input. Order is
//! preserved and no deduplication happens.

use crate::message::AsynchronousMessage;
use crate::pact::{Consumer, MessagePact, Provider, V4Pact};
use tracing::debug;

/// Project onto the V3 message pact shape
///
/// Each interaction is flattened into a V3 message record; the interaction
/// type tag is dropped because the `messages` list already implies it.
pub fn to_versioned_list(
    consumer: &Consumer,
    provider: &Provider,
    messages: &[AsynchronousMessage],
) -> MessagePact {
    debug!(
        consumer = %consumer.name,
        provider = %provider.name,
        messages = messages.len(),
        "Projecting message pact"
    );
    MessagePact {
        provider: provider.clone(),
        consumer: consumer.clone(),
        messages: messages.iter().map(AsynchronousMessage::as_v3_message).collect(),
    }
}

/// Project onto the V4 self-describing shape
pub fn to_self_describing(
    consumer: &Consumer,
    provider: &Provider,
    messages: &[AsynchronousMessage],
) -> V4Pact {
    debug!(
        consumer = %consumer.name,
        provider = %provider.name,
        interactions = messages.len(),
        "Projecting V4 pact"
    );
    V4Pact {
        consumer: consumer.clone(),
        provider: provider.clone(),
        interactions: messages.to_vec(),
    }
}
